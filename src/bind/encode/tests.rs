use pretty_assertions::assert_eq;

use crate::bind::{BindError, EncodeOptions, Record, Value, encode_value, print};

crate::record! {
	#[derive(Debug, Default)]
	pub struct Sprite {
		pub name: Option<String>,
		pub frames: Option<Vec<u16>>,
		pub scale: f32,
		hidden: bool,
	}
}

crate::record! {
	#[derive(Debug, Default)]
	pub struct Layer {
		pub sprite: Option<Sprite>,
		pub effect: Option<Box<dyn Effect>>,
	}
}

crate::record! {
	#[derive(Debug, Default)]
	pub struct Blur {
		pub radius: u32,
	}
}

pub trait Effect: Record {}

impl Effect for Blur {}

crate::family!(dyn Effect);

fn compact(value: &Value) -> String {
	print(value, false).expect("print")
}

#[test]
fn unset_fields_are_omitted() {
	let tree = encode_value(&Layer::default(), &EncodeOptions::default()).expect("encode");
	assert_eq!(compact(&tree), "{}");
}

#[test]
fn set_fields_follow_declaration_order() {
	let sprite = Sprite {
		frames: Some(vec![3, 1]),
		name: Some("hero".to_owned()),
		scale: 1.2,
		hidden: true,
	};
	let tree = encode_value(&sprite, &EncodeOptions::default()).expect("encode");
	assert_eq!(compact(&tree), r#"{"name":"hero","frames":[3,1],"scale":1.2}"#);
}

#[test]
fn private_fields_need_opt_in() {
	let options = EncodeOptions {
		include_private: true,
		..EncodeOptions::default()
	};
	let tree = encode_value(&Sprite::default(), &options).expect("encode");
	assert_eq!(compact(&tree), r#"{"scale":0.0,"hidden":false}"#);
}

#[test]
fn tag_is_written_only_for_family_values_in_tagging_mode() {
	let layer = Layer {
		sprite: Some(Sprite::default()),
		effect: Some(Box::new(Blur { radius: 4 })),
	};
	let plain = encode_value(&layer, &EncodeOptions::default()).expect("encode");
	assert_eq!(compact(&plain), r#"{"sprite":{"scale":0.0},"effect":{"radius":4}}"#);

	let tagged = encode_value(&layer, &EncodeOptions::tagged()).expect("encode");
	assert_eq!(compact(&tagged), r#"{"sprite":{"scale":0.0},"effect":{"$type":"Blur","radius":4}}"#);
}

#[test]
fn depth_guard_trips() {
	let options = EncodeOptions {
		max_depth: 1,
		..EncodeOptions::default()
	};
	let err = encode_value(&vec![vec![1_u8]], &options).expect_err("too deep");
	assert!(matches!(err, BindError::DepthExceeded { max_depth: 1 }));
}

#[test]
fn presets() {
	assert!(EncodeOptions::pretty().pretty);
	assert!(!EncodeOptions::pretty().tag_types);
	assert!(EncodeOptions::tagged().tag_types);
	assert_eq!(EncodeOptions::default().max_depth, 128);
}
