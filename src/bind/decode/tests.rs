use crate::bind::{BindError, CreatorRegistry, DecodeOptions, Decoder, Record, TypeResolver, Value, ValueMap, decode_plain, parse};

crate::record! {
	#[derive(Debug, Default, PartialEq)]
	pub struct Leaf {
		pub label: Option<String>,
		pub weight: f64,
	}
}

crate::record! {
	#[derive(Debug, Default, PartialEq)]
	pub struct Branch {
		pub leaves: Option<Vec<Leaf>>,
		pub tip: Option<Leaf>,
		secret: i32,
	}
}

crate::record! {
	#[derive(Debug, Default)]
	pub struct Nest {
		pub inner: Option<Box<dyn Shape>>,
	}
}

crate::record! {
	#[derive(Debug, Default)]
	pub struct Round {
		pub radius: f64,
	}
}

crate::record! {
	#[derive(Debug, Default)]
	pub struct Square {
		pub side: f64,
	}
}

pub trait Shape: Record {}

impl Shape for Round {}
impl Shape for Square {}

crate::family!(dyn Shape);

fn tree(json: &str) -> Value {
	parse(json).expect("fixture json parses")
}

mod records {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn missing_keys_keep_defaults() {
		let branch: Branch = decode_plain(&tree("{}")).expect("empty map decodes");
		assert_eq!(branch, Branch::default());
	}

	#[test]
	fn unknown_keys_are_ignored() {
		let leaf: Leaf = decode_plain(&tree(r#"{"$type":"Leaf","weight":2,"color":"green"}"#)).expect("decode");
		assert_eq!(leaf.weight, 2.0);
		assert_eq!(leaf.label, None);
	}

	#[test]
	fn nested_containers_decode_in_order() {
		let branch: Branch = decode_plain(&tree(r#"{"leaves":[{"label":"a"},{"label":"b","weight":0.5}],"tip":{"weight":1}}"#)).expect("decode");
		let labels: Vec<_> = branch.leaves.iter().flatten().map(|leaf| leaf.label.as_deref()).collect();
		assert_eq!(labels, vec![Some("a"), Some("b")]);
		assert_eq!(branch.tip.map(|tip| tip.weight), Some(1.0));
	}

	#[test]
	fn private_fields_need_opt_in() {
		let node = tree(r#"{"secret":7}"#);
		let plain: Branch = decode_plain(&node).expect("decode");
		assert_eq!(plain.secret, 0);

		let registry = CreatorRegistry::new();
		let resolver = TypeResolver::new();
		let mut cx = Decoder::new(&registry, &resolver, DecodeOptions::with_private());
		let walked: Branch = cx.decode(&node).expect("decode");
		assert_eq!(walked.secret, 7);
	}

	#[test]
	fn creator_replaces_default_construction() {
		let mut registry = CreatorRegistry::new();
		registry.register::<Leaf>(|_, parent| {
			let label = parent.and_then(|parent| parent.get_str("kind")).map(str::to_owned);
			Some(Box::new(Leaf { label, weight: 9.0 }))
		});
		let node = tree(r#"{"kind":"oak","tip":{}}"#);
		let branch: Branch = Decoder::with_registry(&registry).decode(&node).expect("decode");
		let tip = branch.tip.expect("tip present");
		assert_eq!(tip.label.as_deref(), Some("oak"));
		assert_eq!(tip.weight, 9.0);
	}
}

mod errors {
	use super::*;

	#[test]
	fn wrong_discriminant_reports_path() {
		let err = decode_plain::<Branch>(&tree(r#"{"leaves":[{"label":"a"},{"label":[1]}]}"#)).expect_err("label is array");
		match err {
			BindError::ShapeMismatch { path, expected, got } => {
				assert_eq!(path, "/leaves/1/label");
				assert_eq!(expected, "string");
				assert_eq!(got, "array");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn root_must_be_map_for_records() {
		let err = decode_plain::<Leaf>(&tree("[1,2]")).expect_err("array root");
		assert!(matches!(err, BindError::ShapeMismatch { ref path, .. } if path == "/"));
	}

	#[test]
	fn depth_guard_trips() {
		let registry = CreatorRegistry::new();
		let resolver = TypeResolver::new();
		let options = DecodeOptions {
			max_depth: 2,
			..DecodeOptions::default()
		};
		let mut cx = Decoder::new(&registry, &resolver, options);
		let err = cx.decode::<Vec<Vec<Vec<i32>>>>(&tree("[[[1]]]")).expect_err("too deep");
		assert!(matches!(err, BindError::DepthExceeded { max_depth: 2 }));
	}

	#[test]
	fn path_escapes_pointer_tokens() {
		let err = decode_plain::<std::collections::BTreeMap<String, i32>>(&tree(r#"{"a/b~c":"x"}"#)).expect_err("string value");
		assert!(matches!(err, BindError::ShapeMismatch { ref path, .. } if path == "/a~1b~0c"));
	}
}

mod families {
	use super::*;

	#[test]
	fn abstract_base_without_opinion_fails() {
		let err = decode_plain::<Nest>(&tree(r#"{"inner":{"radius":1}}"#)).expect_err("abstract");
		assert!(matches!(err, BindError::NoConcreteType { target: "Shape", ref path } if path == "/inner"));
	}

	#[test]
	fn type_tag_resolves_through_resolver() {
		let registry = CreatorRegistry::new();
		let mut resolver = TypeResolver::new();
		resolver.register::<dyn Shape>(|| Box::new(Square::default()) as Box<dyn Shape>);
		let mut cx = Decoder::new(&registry, &resolver, DecodeOptions::default());

		let nest: Nest = cx.decode(&tree(r#"{"inner":{"$type":"Square","side":3}}"#)).expect("decode");
		let inner = nest.inner.expect("inner set");
		let square = inner.as_record().downcast_ref::<Square>().expect("square");
		assert_eq!(square.side, 3.0);
	}

	#[test]
	fn unknown_tag_is_unresolvable() {
		let err = decode_plain::<Nest>(&tree(r#"{"inner":{"$type":"Hexagon"}}"#)).expect_err("unknown tag");
		assert!(matches!(err, BindError::UnresolvableType { ref name } if name == "Hexagon"));
	}

	#[test]
	fn creator_is_consulted_before_tag() {
		let mut registry = CreatorRegistry::new();
		registry.register::<dyn Shape>(|src: &ValueMap, _| {
			src.contains_key("radius").then(|| Box::new(Round::default()) as Box<dyn Shape>)
		});
		let mut resolver = TypeResolver::new();
		resolver.register::<dyn Shape>(|| Box::new(Square::default()) as Box<dyn Shape>);
		let mut cx = Decoder::new(&registry, &resolver, DecodeOptions::default());

		let nest: Nest = cx.decode(&tree(r#"{"inner":{"$type":"Square","radius":2}}"#)).expect("decode");
		let inner = nest.inner.expect("inner set");
		assert_eq!(inner.type_name(), "Round");
	}
}
