use crate::bind::{Bind, CreatorRegistry, DecodeOptions, Decoder, EncodeOptions, Result, TypeResolver, Value, encode_value};

/// Parse JSON text into a value tree, keeping map order.
pub fn parse(text: &str) -> Result<Value> {
	Ok(serde_json::from_str(text)?)
}

/// Parse JSON bytes into a value tree, keeping map order.
pub fn parse_slice(bytes: &[u8]) -> Result<Value> {
	Ok(serde_json::from_slice(bytes)?)
}

/// Print a value tree as JSON text.
pub fn print(value: &Value, pretty: bool) -> Result<String> {
	let text = if pretty {
		serde_json::to_string_pretty(value)?
	} else {
		serde_json::to_string(value)?
	};
	Ok(text)
}

/// Parse `text` and decode it into `T` using the given creators.
pub fn from_str<T: Bind>(text: &str, registry: &CreatorRegistry) -> Result<T> {
	let tree = parse(text)?;
	Decoder::with_registry(registry).decode(&tree)
}

/// Encode `value` and print it, honouring `options.pretty`.
pub fn to_string<T: Bind>(value: &T, options: &EncodeOptions) -> Result<String> {
	let tree = encode_value(value, options)?;
	print(&tree, options.pretty)
}

/// Owned decode and encode configuration for repeated use.
///
/// Holds the creator registry and type resolver so callers do not have to thread
/// borrows through every call.
#[derive(Default)]
pub struct Binder {
	registry: CreatorRegistry,
	resolver: TypeResolver,
	/// Options for every decode call.
	pub decode_options: DecodeOptions,
	/// Options for every encode call.
	pub encode_options: EncodeOptions,
}

impl Binder {
	/// Create a binder with empty registries and default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a binder that walks private fields on both sides.
	pub fn with_private() -> Self {
		Self {
			decode_options: DecodeOptions::with_private(),
			encode_options: EncodeOptions {
				include_private: true,
				..EncodeOptions::default()
			},
			..Self::default()
		}
	}

	/// Creators consulted during decode.
	pub fn registry(&self) -> &CreatorRegistry {
		&self.registry
	}

	/// Mutable access for registering creators.
	pub fn registry_mut(&mut self) -> &mut CreatorRegistry {
		&mut self.registry
	}

	/// Resolver for type-identity tags.
	pub fn resolver(&self) -> &TypeResolver {
		&self.resolver
	}

	/// Mutable access for registering tagged types.
	pub fn resolver_mut(&mut self) -> &mut TypeResolver {
		&mut self.resolver
	}

	/// Decode a value tree into `T`.
	pub fn decode<T: Bind>(&self, node: &Value) -> Result<T> {
		Decoder::new(&self.registry, &self.resolver, self.decode_options.clone()).decode(node)
	}

	/// Parse and decode JSON text into `T`.
	pub fn from_str<T: Bind>(&self, text: &str) -> Result<T> {
		self.decode(&parse(text)?)
	}

	/// Encode `value` into a value tree.
	pub fn to_value<T: Bind>(&self, value: &T) -> Result<Value> {
		encode_value(value, &self.encode_options)
	}

	/// Encode and print `value`.
	pub fn to_string<T: Bind>(&self, value: &T) -> Result<String> {
		to_string(value, &self.encode_options)
	}
}
