use crate::bind::{Bind, BindError, Record, RecordDesc, Result, TYPE_TAG, Value, ValueMap};

/// Behavior switches for encoding.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
	/// Indent printed text; has no effect on the value tree.
	pub pretty: bool,
	/// Also walk fields declared without `pub`.
	pub include_private: bool,
	/// Attach the type-identity tag to polymorphic values.
	pub tag_types: bool,
	/// Maximum nesting depth of the object graph.
	pub max_depth: u32,
}

impl Default for EncodeOptions {
	fn default() -> Self {
		Self {
			pretty: false,
			include_private: false,
			tag_types: false,
			max_depth: 128,
		}
	}
}

impl EncodeOptions {
	/// Preset for indented, human-readable output.
	pub fn pretty() -> Self {
		Self {
			pretty: true,
			..Self::default()
		}
	}

	/// Preset that tags polymorphic values with their runtime type.
	pub fn tagged() -> Self {
		Self {
			tag_types: true,
			..Self::default()
		}
	}
}

/// Recursive encode state for one encode call.
pub struct Encoder<'a> {
	options: &'a EncodeOptions,
	depth: u32,
}

impl<'a> Encoder<'a> {
	/// Create an encoder.
	pub fn new(options: &'a EncodeOptions) -> Self {
		Self { options, depth: 0 }
	}

	/// Active options.
	pub fn options(&self) -> &'a EncodeOptions {
		self.options
	}

	/// Encode a root value; an absent root becomes `null`.
	pub fn encode<T: Bind>(&mut self, value: &T) -> Result<Value> {
		Ok(value.encode(self)?.unwrap_or(Value::Null))
	}

	/// Run `f` one level down.
	pub fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
		if self.depth >= self.options.max_depth {
			return Err(BindError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}
		self.depth += 1;
		let out = f(self);
		self.depth -= 1;
		out
	}
}

/// Encode `value` into a value tree.
pub fn encode_value<T: Bind>(value: &T, options: &EncodeOptions) -> Result<Value> {
	Encoder::new(options).encode(value)
}

/// Encode a record as a map, optionally led by its type-identity tag.
pub fn encode_record(record: &dyn Record, tag: bool, cx: &mut Encoder<'_>) -> Result<Value> {
	let mut out = ValueMap::new();
	if tag {
		out.insert(TYPE_TAG, Value::from(record.type_name()));
	}
	record.encode_fields(&mut out, cx)?;
	Ok(Value::Map(out))
}

/// Append the set fields of `src` in declaration order; absent fields are omitted.
pub fn encode_fields_with<T>(desc: &RecordDesc<T>, src: &T, out: &mut ValueMap, cx: &mut Encoder<'_>) -> Result<()> {
	let include_private = cx.options().include_private;
	for field in desc.visible_fields(include_private) {
		if let Some(value) = cx.nested(|cx| (field.encode)(src, cx))? {
			out.insert(field.name, value);
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests;
