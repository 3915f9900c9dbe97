use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Dynamically typed JSON-equivalent node.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
	/// JSON `null`.
	#[default]
	Null,
	/// JSON boolean.
	Bool(bool),
	/// Integer that fits in `i64`.
	I64(i64),
	/// Integer above `i64::MAX`.
	U64(u64),
	/// Any non-integral number.
	F64(f64),
	/// JSON string.
	String(Box<str>),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// Ordered string-keyed map.
	Map(ValueMap),
}

/// String-keyed map that iterates in first-insertion order.
///
/// Equality compares entries pairwise, so two maps with the same keys in a different
/// order are not equal.
#[derive(Debug, Clone, Default)]
pub struct ValueMap {
	entries: IndexMap<Box<str>, Value>,
}

impl Value {
	/// Stable lowercase label for the discriminant.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::I64(_) | Self::U64(_) | Self::F64(_) => "number",
			Self::String(_) => "string",
			Self::Array(_) => "array",
			Self::Map(_) => "map",
		}
	}

	/// Whether this node is `null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow string payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Borrow map payload.
	pub fn as_map(&self) -> Option<&ValueMap> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Borrow sequence payload.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Read an integral payload as `i64`.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::I64(value) => Some(*value),
			Self::U64(value) => i64::try_from(*value).ok(),
			Self::F64(value) if value.fract() == 0.0 && *value >= i64::MIN as f64 && *value < i64::MAX as f64 => Some(*value as i64),
			_ => None,
		}
	}

	/// Read any numeric payload as `f64`.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::I64(value) => Some(*value as f64),
			Self::U64(value) => Some(*value as f64),
			Self::F64(value) => Some(*value),
			_ => None,
		}
	}
}

impl ValueMap {
	/// Create an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an empty map with room for `capacity` entries.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: IndexMap::with_capacity(capacity),
		}
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the map holds no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Look up a value by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	/// Look up a string value by key.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(Value::as_str)
	}

	/// Whether `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Insert or replace a value, returning the previous one.
	///
	/// A replaced key keeps its original position.
	pub fn insert(&mut self, key: impl Into<Box<str>>, value: Value) -> Option<Value> {
		self.entries.insert(key.into(), value)
	}

	/// Remove an entry, keeping the order of the remaining ones.
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.entries.shift_remove(key)
	}

	/// Iterate entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.entries.iter().map(|(key, value)| (&**key, value))
	}

	/// Iterate keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(|key| &**key)
	}
}

impl PartialEq for ValueMap {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.entries.iter().eq(other.entries.iter())
	}
}

impl<K: Into<Box<str>>> FromIterator<(K, Value)> for ValueMap {
	fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().map(|(key, value)| (key.into(), value)).collect(),
		}
	}
}

impl IntoIterator for ValueMap {
	type Item = (Box<str>, Value);
	type IntoIter = indexmap::map::IntoIter<Box<str>, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::I64(value)
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		match i64::try_from(value) {
			Ok(signed) => Self::I64(signed),
			Err(_) => Self::U64(value),
		}
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::F64(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value.into_boxed_str())
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::Array(value)
	}
}

impl From<ValueMap> for Value {
	fn from(value: ValueMap) -> Self {
		Self::Map(value)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
		f.write_str(&text)
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::I64(value) => serializer.serialize_i64(*value),
			Self::U64(value) => serializer.serialize_u64(*value),
			Self::F64(value) => serializer.serialize_f64(*value),
			Self::String(value) => serializer.serialize_str(value),
			Self::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Map(map) => map.serialize(serializer),
		}
	}
}

impl Serialize for ValueMap {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut out = serializer.serialize_map(Some(self.len()))?;
		for (key, value) in self.iter() {
			out.serialize_entry(key, value)?;
		}
		out.end()
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(ValueVisitor)
	}
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
	type Value = Value;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		formatter.write_str("any JSON value")
	}

	fn visit_bool<E: de::Error>(self, value: bool) -> Result<Value, E> {
		Ok(Value::Bool(value))
	}

	fn visit_i64<E: de::Error>(self, value: i64) -> Result<Value, E> {
		Ok(Value::I64(value))
	}

	fn visit_u64<E: de::Error>(self, value: u64) -> Result<Value, E> {
		Ok(Value::from(value))
	}

	fn visit_f64<E: de::Error>(self, value: f64) -> Result<Value, E> {
		Ok(Value::F64(value))
	}

	fn visit_str<E: de::Error>(self, value: &str) -> Result<Value, E> {
		Ok(Value::from(value))
	}

	fn visit_string<E: de::Error>(self, value: String) -> Result<Value, E> {
		Ok(Value::from(value))
	}

	fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_none<E: de::Error>(self) -> Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
		Deserialize::deserialize(deserializer)
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(item) = seq.next_element()? {
			items.push(item);
		}
		Ok(Value::Array(items))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
		let mut map = ValueMap::with_capacity(access.size_hint().unwrap_or(0));
		while let Some((key, value)) = access.next_entry::<String, Value>()? {
			map.insert(key, value);
		}
		Ok(Value::Map(map))
	}
}

#[cfg(test)]
mod tests;
