use tracing::{debug, trace};

use crate::bind::{Bind, BindError, CreatorRegistry, Family, Record, RecordDesc, Result, TYPE_TAG, TypeResolver, Value, ValueMap};

static EMPTY_REGISTRY: CreatorRegistry = CreatorRegistry::new();
static EMPTY_RESOLVER: TypeResolver = TypeResolver::new();

/// Runtime limits and behavior switches for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth of the value tree.
	pub max_depth: u32,
	/// Also populate fields declared without `pub`.
	pub include_private: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 128,
			include_private: false,
		}
	}
}

impl DecodeOptions {
	/// Preset that also walks private fields.
	pub fn with_private() -> Self {
		Self {
			include_private: true,
			..Self::default()
		}
	}
}

#[derive(Debug, Clone)]
enum PathStep {
	Key(Box<str>),
	Index(usize),
}

/// Recursive decode state for one decode call.
pub struct Decoder<'a> {
	registry: &'a CreatorRegistry,
	resolver: &'a TypeResolver,
	options: DecodeOptions,
	depth: u32,
	path: Vec<PathStep>,
}

impl<'a> Decoder<'a> {
	/// Create a decoder over borrowed registries.
	pub fn new(registry: &'a CreatorRegistry, resolver: &'a TypeResolver, options: DecodeOptions) -> Self {
		Self {
			registry,
			resolver,
			options,
			depth: 0,
			path: Vec::new(),
		}
	}

	/// Create a decoder with creators only and default options.
	pub fn with_registry(registry: &'a CreatorRegistry) -> Self {
		Self::new(registry, &EMPTY_RESOLVER, DecodeOptions::default())
	}

	/// Decode a root node into `T`.
	pub fn decode<T: Bind>(&mut self, node: &Value) -> Result<T> {
		T::decode(node, None, self)
	}

	/// Creator registry consulted before default construction.
	pub fn registry(&self) -> &'a CreatorRegistry {
		self.registry
	}

	/// Resolver used for type-identity tags.
	pub fn resolver(&self) -> &'a TypeResolver {
		self.resolver
	}

	/// Active options.
	pub fn options(&self) -> &DecodeOptions {
		&self.options
	}

	/// Pointer-style path of the node being decoded (`/` at the root).
	pub fn path(&self) -> String {
		if self.path.is_empty() {
			return "/".to_owned();
		}
		let mut out = String::new();
		for step in &self.path {
			out.push('/');
			match step {
				PathStep::Key(key) => out.push_str(&key.replace('~', "~0").replace('/', "~1")),
				PathStep::Index(index) => out.push_str(&index.to_string()),
			}
		}
		out
	}

	/// Run `f` one level down, under map key `key`.
	pub fn field<R>(&mut self, key: &str, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
		self.enter(PathStep::Key(key.into()), f)
	}

	/// Run `f` one level down, under sequence index `index`.
	pub fn element<R>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
		self.enter(PathStep::Index(index), f)
	}

	/// Require a map node.
	pub fn expect_map<'v>(&self, node: &'v Value) -> Result<&'v ValueMap> {
		node.as_map().ok_or_else(|| self.shape_mismatch("map", node))
	}

	/// Require a sequence node.
	pub fn expect_array<'v>(&self, node: &'v Value) -> Result<&'v [Value]> {
		node.as_array().ok_or_else(|| self.shape_mismatch("array", node))
	}

	/// Build a shape error at the current path.
	pub fn shape_mismatch(&self, expected: &'static str, got: &Value) -> BindError {
		BindError::ShapeMismatch {
			path: self.path(),
			expected,
			got: got.kind_name(),
		}
	}

	/// Build a coercion error at the current path.
	pub fn unconvertible(&self, target: &'static str, value: &Value) -> BindError {
		BindError::UnconvertiblePrimitive {
			path: self.path(),
			target,
			value: value.to_string(),
		}
	}

	/// Build an unknown enum member error at the current path.
	pub fn unknown_member(&self, enum_name: &'static str, name: &str) -> BindError {
		BindError::UnknownEnumMember {
			path: self.path(),
			enum_name,
			name: name.to_owned(),
		}
	}

	fn enter<R>(&mut self, step: PathStep, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
		if self.depth >= self.options.max_depth {
			return Err(BindError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}
		self.depth += 1;
		self.path.push(step);
		let out = f(self);
		self.path.pop();
		self.depth -= 1;
		out
	}
}

/// Decode a value tree into `T` using the given creators.
pub fn decode_value<T: Bind>(node: &Value, registry: &CreatorRegistry) -> Result<T> {
	Decoder::with_registry(registry).decode(node)
}

/// Decode a value tree into `T` without creators or type tags.
pub fn decode_plain<T: Bind>(node: &Value) -> Result<T> {
	decode_value(node, &EMPTY_REGISTRY)
}

/// Decode a concrete record: creator first, then `Default`, then fields.
pub fn decode_record<T: Record + Default>(node: &Value, parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<T> {
	let src = cx.expect_map(node)?;
	let mut dest = match cx.registry().create::<T>(src, parent) {
		Some(created) => {
			trace!("creator supplied {} at {}", std::any::type_name::<T>(), cx.path());
			*created
		}
		None => T::default(),
	};
	dest.decode_fields(src, cx)?;
	Ok(dest)
}

/// Decode a polymorphic base: creator first, then type tag, then the declared fallback.
pub fn decode_family<F: ?Sized + Family>(node: &Value, parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Box<F>> {
	let src = cx.expect_map(node)?;
	let mut dest = if let Some(created) = cx.registry().create::<F>(src, parent) {
		debug!("creator chose {} for {} at {}", created.type_name(), F::NAME, cx.path());
		created
	} else if let Some(tag) = src.get(TYPE_TAG) {
		let name = cx.field(TYPE_TAG, |cx| tag.as_str().ok_or_else(|| cx.shape_mismatch("string", tag)))?;
		cx.resolver().resolve::<F>(name)?
	} else if let Some(base) = F::fallback() {
		trace!("no opinion for {} at {}, using fallback", F::NAME, cx.path());
		base
	} else {
		return Err(BindError::NoConcreteType {
			path: cx.path(),
			target: F::NAME,
		});
	};
	dest.decode_fields(src, cx)?;
	Ok(dest)
}

/// Populate `dest` from `src` following the descriptor's declaration order.
///
/// Keys missing from `src` leave the field at its current value; keys that name no
/// field are ignored.
pub fn decode_fields_with<T>(desc: &RecordDesc<T>, dest: &mut T, src: &ValueMap, cx: &mut Decoder<'_>) -> Result<()> {
	let include_private = cx.options().include_private;
	for field in desc.visible_fields(include_private) {
		let Some(node) = src.get(field.name) else {
			continue;
		};
		cx.field(field.name, |cx| (field.decode)(dest, node, src, cx))?;
	}
	Ok(())
}

#[cfg(test)]
mod tests;
