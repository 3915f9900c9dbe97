mod ordered_map {
	use pretty_assertions::assert_eq;

	use crate::bind::{Value, ValueMap};

	#[test]
	fn insert_keeps_first_position_on_replace() {
		let mut map = ValueMap::new();
		map.insert("b", Value::from(1_i64));
		map.insert("a", Value::from(2_i64));
		let previous = map.insert("b", Value::from(3_i64));

		assert_eq!(previous, Some(Value::I64(1)));
		assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a"]);
		assert_eq!(map.get("b"), Some(&Value::I64(3)));
	}

	#[test]
	fn remove_keeps_remaining_order() {
		let mut map: ValueMap = [("x", Value::Null), ("y", Value::Bool(true)), ("z", Value::from("s"))].into_iter().collect();
		assert_eq!(map.remove("y"), Some(Value::Bool(true)));
		assert_eq!(map.remove("missing"), None);
		assert_eq!(map.keys().collect::<Vec<_>>(), vec!["x", "z"]);
		assert_eq!(map.len(), 2);
	}

	#[test]
	fn get_str_only_reads_strings() {
		let map: ValueMap = [("cmd", Value::from("update")), ("id", Value::from(123_i64))].into_iter().collect();
		assert_eq!(map.get_str("cmd"), Some("update"));
		assert_eq!(map.get_str("id"), None);
		assert!(map.contains_key("id"));
		assert!(!map.contains_key("data"));
	}

	#[test]
	fn equality_is_order_sensitive() {
		let ab: ValueMap = [("a", Value::I64(1)), ("b", Value::I64(2))].into_iter().collect();
		let ba: ValueMap = [("b", Value::I64(2)), ("a", Value::I64(1))].into_iter().collect();
		assert_ne!(ab, ba);
		assert_eq!(ab, ab.clone());
	}

	#[test]
	fn wide_objects_keep_order_and_last_value() {
		let mut text = String::from("{");
		for index in 0..20_000 {
			text.push_str(&format!("\"k{index}\":{index},"));
		}
		text.push_str("\"k0\":-1}");

		let value: Value = serde_json::from_str(&text).expect("parse");
		let map = value.as_map().expect("map");
		assert_eq!(map.len(), 20_000);
		assert_eq!(map.keys().next(), Some("k0"));
		assert_eq!(map.keys().last(), Some("k19999"));
		assert_eq!(map.get("k0"), Some(&Value::I64(-1)));
		assert_eq!(map.get("k12345"), Some(&Value::I64(12345)));
	}
}

mod scalars {
	use crate::bind::Value;

	#[test]
	fn u64_is_only_used_above_i64_range() {
		assert_eq!(Value::from(5_u64), Value::I64(5));
		assert_eq!(Value::from(u64::MAX), Value::U64(u64::MAX));
	}

	#[test]
	fn kind_names_are_stable() {
		assert_eq!(Value::Null.kind_name(), "null");
		assert_eq!(Value::F64(1.5).kind_name(), "number");
		assert_eq!(Value::Array(Vec::new()).kind_name(), "array");
		assert_eq!(Value::Map(Default::default()).kind_name(), "map");
	}

	#[test]
	fn integral_reads() {
		assert_eq!(Value::F64(4.0).as_i64(), Some(4));
		assert_eq!(Value::F64(4.5).as_i64(), None);
		assert_eq!(Value::U64(u64::MAX).as_i64(), None);
		assert_eq!(Value::I64(-3).as_f64(), Some(-3.0));
	}
}

mod serde_bridge {
	use pretty_assertions::assert_eq;

	use crate::bind::Value;

	#[test]
	fn deserialize_preserves_key_order() {
		let value: Value = serde_json::from_str(r#"{"z":1,"a":{"y":null,"b":[1,2.5,"x"]}}"#).expect("parse");
		let outer: Vec<_> = value.as_map().expect("map").keys().collect();
		assert_eq!(outer, vec!["z", "a"]);

		let inner = value.as_map().and_then(|map| map.get("a")).and_then(Value::as_map).expect("inner map");
		assert_eq!(inner.keys().collect::<Vec<_>>(), vec!["y", "b"]);
	}

	#[test]
	fn display_prints_compact_json() {
		let value: Value = serde_json::from_str(r#"{ "b" : [ true , null ] , "a" : "q" }"#).expect("parse");
		assert_eq!(value.to_string(), r#"{"b":[true,null],"a":"q"}"#);
	}
}
