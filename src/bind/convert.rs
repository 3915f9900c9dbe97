use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::bind::coerce;
use crate::bind::{Decoder, Encoder, Family, Result, TypeKind, Value, ValueMap, decode_family, encode_record};

/// Type that converts to and from value-tree nodes.
///
/// `parent` is the map of the enclosing record, made visible to creators further down.
/// Encoding returns `None` for the absent sentinel, which record fields omit entirely.
pub trait Bind: Sized {
	/// Shape reported in field descriptors.
	fn kind() -> TypeKind;

	/// Convert `node` into `Self`.
	fn decode(node: &Value, parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self>;

	/// Convert `self` into a node, or `None` when absent.
	fn encode(&self, cx: &mut Encoder<'_>) -> Result<Option<Value>>;
}

/// Map key with a string form in the value tree.
pub trait MapKey: Ord + Sized {
	/// Parse a key from its string form.
	fn parse_key(key: &str) -> Option<Self>;

	/// Render the key in string form.
	fn render_key(&self) -> String;
}

impl Bind for bool {
	fn kind() -> TypeKind {
		TypeKind::Bool
	}

	fn decode(node: &Value, _parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
		match node {
			Value::Bool(value) => Ok(*value),
			_ => Err(cx.shape_mismatch("bool", node)),
		}
	}

	fn encode(&self, _cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		Ok(Some(Value::Bool(*self)))
	}
}

macro_rules! bind_signed {
	($($ty:ty),*) => {$(
		impl Bind for $ty {
			fn kind() -> TypeKind {
				TypeKind::Int
			}

			fn decode(node: &Value, _parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
				let wide = coerce::integer(node, stringify!($ty), cx)?;
				coerce::narrow(wide, node, stringify!($ty), cx)
			}

			fn encode(&self, _cx: &mut Encoder<'_>) -> Result<Option<Value>> {
				Ok(Some(Value::I64(*self as i64)))
			}
		}
	)*};
}

macro_rules! bind_unsigned {
	($($ty:ty),*) => {$(
		impl Bind for $ty {
			fn kind() -> TypeKind {
				TypeKind::Int
			}

			fn decode(node: &Value, _parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
				let wide = coerce::integer(node, stringify!($ty), cx)?;
				coerce::narrow(wide, node, stringify!($ty), cx)
			}

			fn encode(&self, _cx: &mut Encoder<'_>) -> Result<Option<Value>> {
				Ok(Some(Value::from(*self as u64)))
			}
		}
	)*};
}

bind_signed!(i8, i16, i32, i64, isize);
bind_unsigned!(u8, u16, u32, u64, usize);

impl Bind for f64 {
	fn kind() -> TypeKind {
		TypeKind::Float
	}

	fn decode(node: &Value, _parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
		coerce::float(node, cx)
	}

	fn encode(&self, _cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		coerce::finite(*self, "f64").map(Some)
	}
}

impl Bind for f32 {
	fn kind() -> TypeKind {
		TypeKind::Float
	}

	fn decode(node: &Value, _parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
		coerce::float32(node, cx)
	}

	fn encode(&self, _cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		coerce::finite(coerce::widen_f32(*self), "f32").map(Some)
	}
}

impl Bind for char {
	fn kind() -> TypeKind {
		TypeKind::Char
	}

	fn decode(node: &Value, _parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
		coerce::character(node, cx)
	}

	fn encode(&self, _cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		Ok(Some(Value::from(self.to_string())))
	}
}

impl Bind for String {
	fn kind() -> TypeKind {
		TypeKind::String
	}

	fn decode(node: &Value, _parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
		match node {
			Value::String(text) => Ok(text.to_string()),
			_ => Err(cx.shape_mismatch("string", node)),
		}
	}

	fn encode(&self, _cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		Ok(Some(Value::from(self.as_str())))
	}
}

impl<T: Bind> Bind for Option<T> {
	fn kind() -> TypeKind {
		TypeKind::Nullable
	}

	fn decode(node: &Value, parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
		if node.is_null() {
			return Ok(None);
		}
		T::decode(node, parent, cx).map(Some)
	}

	fn encode(&self, cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		match self {
			Some(value) => value.encode(cx),
			None => Ok(None),
		}
	}
}

impl<T: Bind> Bind for Vec<T> {
	fn kind() -> TypeKind {
		TypeKind::Seq
	}

	fn decode(node: &Value, parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
		let items = cx.expect_array(node)?;
		let mut out = Vec::with_capacity(items.len());
		for (index, item) in items.iter().enumerate() {
			out.push(cx.element(index, |cx| T::decode(item, parent, cx))?);
		}
		Ok(out)
	}

	fn encode(&self, cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		encode_seq(self, cx).map(Some)
	}
}

impl<T: Bind, const N: usize> Bind for [T; N] {
	fn kind() -> TypeKind {
		TypeKind::Seq
	}

	fn decode(node: &Value, parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
		let items = cx.expect_array(node)?;
		if items.len() != N {
			return Err(cx.shape_mismatch("fixed-length array", node));
		}
		let decoded = Vec::<T>::decode(node, parent, cx)?;
		decoded.try_into().map_err(|_| cx.shape_mismatch("fixed-length array", node))
	}

	fn encode(&self, cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		encode_seq(self, cx).map(Some)
	}
}

impl<K: MapKey, V: Bind> Bind for BTreeMap<K, V> {
	fn kind() -> TypeKind {
		TypeKind::Map
	}

	fn decode(node: &Value, parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
		let mut out = BTreeMap::new();
		decode_entries(node, parent, cx, |key, value| {
			out.insert(key, value);
		})?;
		Ok(out)
	}

	fn encode(&self, cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		encode_entries(self.iter(), cx).map(Some)
	}
}

impl<K: MapKey + Hash, V: Bind, S: BuildHasher + Default> Bind for HashMap<K, V, S> {
	fn kind() -> TypeKind {
		TypeKind::Map
	}

	fn decode(node: &Value, parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
		let mut out = HashMap::with_hasher(S::default());
		decode_entries(node, parent, cx, |key, value| {
			out.insert(key, value);
		})?;
		Ok(out)
	}

	fn encode(&self, cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		let mut entries: Vec<_> = self.iter().collect();
		entries.sort_by(|left, right| left.0.cmp(right.0));
		encode_entries(entries.into_iter(), cx).map(Some)
	}
}

impl<F: ?Sized + Family> Bind for Box<F> {
	fn kind() -> TypeKind {
		TypeKind::Family
	}

	fn decode(node: &Value, parent: Option<&ValueMap>, cx: &mut Decoder<'_>) -> Result<Self> {
		decode_family::<F>(node, parent, cx)
	}

	fn encode(&self, cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		let tag = cx.options().tag_types;
		encode_record(self.as_record(), tag, cx).map(Some)
	}
}

impl Bind for Value {
	fn kind() -> TypeKind {
		TypeKind::Any
	}

	fn decode(node: &Value, _parent: Option<&ValueMap>, _cx: &mut Decoder<'_>) -> Result<Self> {
		Ok(node.clone())
	}

	fn encode(&self, _cx: &mut Encoder<'_>) -> Result<Option<Value>> {
		if self.is_null() {
			return Ok(None);
		}
		Ok(Some(self.clone()))
	}
}

impl MapKey for String {
	fn parse_key(key: &str) -> Option<Self> {
		Some(key.to_owned())
	}

	fn render_key(&self) -> String {
		self.clone()
	}
}

macro_rules! map_key_int {
	($($ty:ty),*) => {$(
		impl MapKey for $ty {
			fn parse_key(key: &str) -> Option<Self> {
				key.parse().ok()
			}

			fn render_key(&self) -> String {
				self.to_string()
			}
		}
	)*};
}

map_key_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

fn encode_seq<T: Bind>(items: &[T], cx: &mut Encoder<'_>) -> Result<Value> {
	let mut out = Vec::with_capacity(items.len());
	for item in items {
		let value = cx.nested(|cx| item.encode(cx))?;
		out.push(value.unwrap_or(Value::Null));
	}
	Ok(Value::Array(out))
}

fn decode_entries<K: MapKey, V: Bind>(
	node: &Value,
	parent: Option<&ValueMap>,
	cx: &mut Decoder<'_>,
	mut insert: impl FnMut(K, V),
) -> Result<()> {
	let src = cx.expect_map(node)?;
	for (key, item) in src.iter() {
		let value = cx.field(key, |cx| {
			let parsed = K::parse_key(key).ok_or_else(|| cx.unconvertible("map key", &Value::from(key)))?;
			Ok((parsed, V::decode(item, parent, cx)?))
		})?;
		insert(value.0, value.1);
	}
	Ok(())
}

fn encode_entries<'v, K: MapKey + 'v, V: Bind + 'v>(entries: impl Iterator<Item = (&'v K, &'v V)>, cx: &mut Encoder<'_>) -> Result<Value> {
	let mut out = ValueMap::new();
	for (key, item) in entries {
		let value = cx.nested(|cx| item.encode(cx))?;
		out.insert(key.render_key(), value.unwrap_or(Value::Null));
	}
	Ok(Value::Map(out))
}
