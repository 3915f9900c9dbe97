use std::any::Any;
use std::fmt;

use crate::bind::{Decoder, Encoder, Result, ValueMap};

/// Composite object with a static field descriptor.
///
/// Implemented by the [`record!`](crate::record) macro. The trait is object safe so that
/// polymorphic bases (`trait Fruit: Record`) can be held as `Box<dyn Fruit>` and decoded
/// through the descriptor of whatever concrete type was chosen at runtime.
pub trait Record: Any + Send + Sync + fmt::Debug {
	/// Concrete type name, also used as the type-identity tag.
	fn type_name(&self) -> &'static str;

	/// Populate fields present in `src`, leaving missing ones untouched.
	fn decode_fields(&mut self, src: &ValueMap, cx: &mut Decoder<'_>) -> Result<()>;

	/// Append set fields to `out` in declaration order.
	fn encode_fields(&self, out: &mut ValueMap, cx: &mut Encoder<'_>) -> Result<()>;

	/// Borrow as [`Any`] for downcasting.
	fn as_any(&self) -> &dyn Any;

	/// Mutably borrow as [`Any`] for downcasting.
	fn as_any_mut(&mut self) -> &mut dyn Any;

	/// View through the base record interface.
	fn as_record(&self) -> &dyn Record;

	/// Convert an owned box into the base record interface.
	fn into_record(self: Box<Self>) -> Box<dyn Record>;
}

impl dyn Record {
	/// Whether the concrete type is `T`.
	pub fn is<T: Record>(&self) -> bool {
		self.as_any().is::<T>()
	}

	/// Downcast to a concrete record.
	pub fn downcast_ref<T: Record>(&self) -> Option<&T> {
		self.as_any().downcast_ref::<T>()
	}

	/// Mutably downcast to a concrete record.
	pub fn downcast_mut<T: Record>(&mut self) -> Option<&mut T> {
		self.as_any_mut().downcast_mut::<T>()
	}
}

/// Polymorphic base bound through `Box<dyn Base>` fields.
///
/// Implemented for trait-object types by the [`family!`](crate::family) macro.
pub trait Family: Record {
	/// Base name used in diagnostics.
	const NAME: &'static str;

	/// Default construction of the declared base, `None` when it is abstract.
	fn fallback() -> Option<Box<Self>>;
}

impl Family for dyn Record {
	const NAME: &'static str = "Record";

	fn fallback() -> Option<Box<Self>> {
		None
	}
}
