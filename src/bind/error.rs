use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BindError>;

/// Errors produced while converting between value trees and typed objects.
#[derive(Debug, Error)]
pub enum BindError {
	/// Text parsing or printing failed in the JSON collaborator.
	#[error("json: {0}")]
	Parse(#[from] serde_json::Error),
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Value discriminant does not match what the target type requires.
	#[error("shape mismatch at {path}: expected {expected}, got {got}")]
	ShapeMismatch {
		/// Pointer-style location of the offending node.
		path: String,
		/// Logical value kind the target accepts.
		expected: &'static str,
		/// Actual value kind.
		got: &'static str,
	},
	/// Scalar payload cannot be represented by the target primitive.
	#[error("cannot convert {value} to {target} at {path}")]
	UnconvertiblePrimitive {
		/// Pointer-style location of the offending node.
		path: String,
		/// Target primitive type name.
		target: &'static str,
		/// Rendered source value.
		value: String,
	},
	/// Float has no JSON number form (NaN or infinite).
	#[error("cannot encode {value} as a JSON number for {target}")]
	NonFiniteNumber {
		/// Source primitive type name.
		target: &'static str,
		/// Rendered source value.
		value: String,
	},
	/// Enum member name did not match any declared member.
	#[error("unknown {enum_name} member {name:?} at {path}")]
	UnknownEnumMember {
		/// Pointer-style location of the offending node.
		path: String,
		/// Enum type name.
		enum_name: &'static str,
		/// Name found in the payload.
		name: String,
	},
	/// Type-identity tag names a type the resolver does not know.
	#[error("unresolvable type tag {name:?}")]
	UnresolvableType {
		/// Tag value found in the payload.
		name: String,
	},
	/// A discriminated factory was registered without its discriminator.
	#[error("creator for {target} registered without a discriminator name")]
	MissingDiscriminatorRegistration {
		/// Base type the factory was registered for.
		target: &'static str,
	},
	/// Resolution had no opinion and the declared base cannot be constructed.
	#[error("no concrete type for {target} at {path}")]
	NoConcreteType {
		/// Pointer-style location of the offending node.
		path: String,
		/// Declared base type name.
		target: &'static str,
	},
	/// Recursion depth exceeded configured limit.
	#[error("depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
}

impl BindError {
	/// Whether this error reports a scalar that could not be coerced.
	pub fn is_unconvertible(&self) -> bool {
		matches!(
			self,
			Self::UnconvertiblePrimitive { .. } | Self::UnknownEnumMember { .. } | Self::NonFiniteNumber { .. }
		)
	}

	/// Whether this error reports a value of the wrong discriminant.
	pub fn is_shape_mismatch(&self) -> bool {
		matches!(self, Self::ShapeMismatch { .. })
	}
}
