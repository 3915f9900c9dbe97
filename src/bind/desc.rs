use std::fmt;

use crate::bind::{Decoder, Encoder, Result, Value, ValueMap};

/// Coarse shape of a bindable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
	/// `bool`.
	Bool,
	/// Signed or unsigned integer.
	Int,
	/// `f32` or `f64`.
	Float,
	/// Single `char`.
	Char,
	/// Owned string.
	String,
	/// Fieldless enum bound by member name.
	Enum,
	/// Vector or fixed array.
	Seq,
	/// String- or integer-keyed map.
	Map,
	/// Concrete record declared with `record!`.
	Record,
	/// Boxed polymorphic base declared with `family!`.
	Family,
	/// Fully dynamic hole.
	Any,
	/// `Option` wrapper around another kind.
	Nullable,
}

impl TypeKind {
	/// Render kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::Char => "char",
			Self::String => "string",
			Self::Enum => "enum",
			Self::Seq => "seq",
			Self::Map => "map",
			Self::Record => "record",
			Self::Family => "family",
			Self::Any => "any",
			Self::Nullable => "nullable",
		}
	}

	/// Whether values of this kind are composite or container references.
	pub fn is_composite(self) -> bool {
		matches!(self, Self::Seq | Self::Map | Self::Record | Self::Family | Self::Any)
	}
}

/// Field visibility as declared on the Rust struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
	/// Declared `pub` (any flavour).
	Public,
	/// Declared without a visibility qualifier.
	Private,
}

impl Visibility {
	/// Classify the token text of a visibility qualifier.
	pub fn from_token(token: &str) -> Self {
		if token.trim().is_empty() { Self::Private } else { Self::Public }
	}
}

/// Typed setter half of a field accessor pair.
pub type DecodeFieldFn<T> = fn(&mut T, &Value, &ValueMap, &mut Decoder<'_>) -> Result<()>;
/// Typed getter half of a field accessor pair; `None` means the field is absent.
pub type EncodeFieldFn<T> = fn(&T, &mut Encoder<'_>) -> Result<Option<Value>>;

/// One instance field of a record.
pub struct FieldDesc<T> {
	/// Key used in the value tree.
	pub name: &'static str,
	/// Rust field identifier.
	pub ident: &'static str,
	/// Declared visibility.
	pub visibility: Visibility,
	/// Shape of the declared field type.
	pub kind: TypeKind,
	/// Declared field type as written.
	pub type_name: &'static str,
	/// Convert a value node and store it in the field.
	pub decode: DecodeFieldFn<T>,
	/// Read the field and convert it to a value node.
	pub encode: EncodeFieldFn<T>,
}

/// Instance fields of a record type in declaration order.
pub struct RecordDesc<T> {
	/// Record type name.
	pub type_name: &'static str,
	/// Fields in declaration order.
	pub fields: Vec<FieldDesc<T>>,
}

impl<T> RecordDesc<T> {
	/// Look up a field by its value-tree key.
	pub fn field(&self, name: &str) -> Option<&FieldDesc<T>> {
		self.fields.iter().find(|field| field.name == name)
	}

	/// Fields walked under the given private-field policy.
	pub fn visible_fields(&self, include_private: bool) -> impl Iterator<Item = &FieldDesc<T>> {
		self.fields
			.iter()
			.filter(move |field| include_private || field.visibility == Visibility::Public)
	}

	/// Value-tree keys in declaration order.
	pub fn field_names(&self) -> Vec<&'static str> {
		self.fields.iter().map(|field| field.name).collect()
	}
}

impl<T> fmt::Debug for FieldDesc<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldDesc")
			.field("name", &self.name)
			.field("ident", &self.ident)
			.field("visibility", &self.visibility)
			.field("kind", &self.kind)
			.field("type_name", &self.type_name)
			.finish_non_exhaustive()
	}
}

impl<T> fmt::Debug for RecordDesc<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RecordDesc")
			.field("type_name", &self.type_name)
			.field("fields", &self.fields)
			.finish()
	}
}
