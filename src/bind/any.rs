use crate::bind::{Bind, Decoder, Encoder, Record, Result, TYPE_TAG, TypeKind, Value, ValueMap, decode_family, encode_record};

/// Fully dynamic hole: a plain value tree or a record chosen by its type tag.
#[derive(Debug, Default)]
pub enum AnyValue {
	/// Untyped node kept as-is.
	#[default]
	Null,
	/// Untyped non-null node kept as-is.
	Plain(Value),
	/// Record instantiated from a type-identity tag.
	Typed(Box<dyn Record>),
}

impl AnyValue {
	/// Whether nothing is held.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow the untyped node.
	pub fn as_plain(&self) -> Option<&Value> {
		match self {
			Self::Plain(value) => Some(value),
			_ => None,
		}
	}

	/// Borrow the typed record.
	pub fn as_typed(&self) -> Option<&dyn Record> {
		match self {
			Self::Typed(record) => Some(record.as_ref()),
			_ => None,
		}
	}

	/// Downcast the typed record to `T`.
	pub fn downcast_ref<T: Record>(&self) -> Option<&T> {
		self.as_typed().and_then(|record| record.downcast_ref::<T>())
	}
}

impl From<Value> for AnyValue {
	fn from(value: Value) -> Self {
		if value.is_null() { Self::Null } else { Self::Plain(value) }
	}
}

impl From<Box<dyn Record>> for AnyValue {
	fn from(record: Box<dyn Record>) -> Self {
		Self::Typed(record)
	}
}

impl Bind for AnyValue {
	fn kind() -> TypeKind {
		TypeKind::Any
	}

	fn decode(node: &Value, parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
		let tagged = node.as_map().is_some_and(|map| map.contains_key(TYPE_TAG));
		if tagged {
			return decode_family::<dyn Record>(node, parent, cx).map(Self::Typed);
		}
		Ok(Self::from(node.clone()))
	}

	fn encode(&self, cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		match self {
			Self::Null => Ok(None),
			Self::Plain(value) => Ok(Some(value.clone())),
			// The static type says nothing, so the tag is always written.
			Self::Typed(record) => encode_record(record.as_ref(), true, cx).map(Some),
		}
	}
}
