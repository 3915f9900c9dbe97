mod any;
mod coerce;
mod convert;
mod decode;
mod desc;
mod encode;
mod error;
mod macros;
mod record;
mod registry;
mod resolver;
mod text;
mod value;

/// Dynamic hole that holds plain or tagged values.
pub use any::AnyValue;
/// Conversion trait and map-key support.
pub use convert::{Bind, MapKey};
/// Decode engine entry points and options.
pub use decode::{DecodeOptions, Decoder, decode_family, decode_fields_with, decode_plain, decode_record, decode_value};
/// Field and record descriptor types.
pub use desc::{DecodeFieldFn, EncodeFieldFn, FieldDesc, RecordDesc, TypeKind, Visibility};
/// Encode engine entry points and options.
pub use encode::{EncodeOptions, Encoder, encode_fields_with, encode_record, encode_value};
/// Error and result aliases.
pub use error::{BindError, Result};
/// Record and polymorphic family traits.
pub use record::{Family, Record};
/// Creator registry and discriminated creators.
pub use registry::{CommandCreator, Creator, CreatorRegistry, DiscriminatorSource};
/// Type-identity tag resolver.
pub use resolver::{TYPE_TAG, TypeResolver};
/// Text boundary and owned binder.
pub use text::{Binder, from_str, parse, parse_slice, print, to_string};
/// Ordered value tree.
pub use value::{Value, ValueMap};
