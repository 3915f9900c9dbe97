use crate::bind::{BindError, CommandCreator, Creator, CreatorRegistry, DiscriminatorSource, Record, Value, ValueMap};

crate::record! {
	#[derive(Debug, Default, PartialEq)]
	pub struct Setting {
		pub value: i32,
	}
}

crate::record! {
	#[derive(Debug, Default)]
	pub struct SetColor {
		pub color: Option<String>,
	}
}

crate::record! {
	#[derive(Debug, Default)]
	pub struct Quit {}
}

pub trait Command: Record {}

impl Command for SetColor {}
impl Command for Quit {}

crate::family!(dyn Command);

fn map(json: &str) -> ValueMap {
	match crate::bind::parse(json).expect("parse") {
		Value::Map(map) => map,
		other => panic!("expected map, got {other:?}"),
	}
}

mod creator_registry {
	use super::*;

	#[test]
	fn last_registration_wins() {
		let mut registry = CreatorRegistry::new();
		registry.register::<Setting>(|_, _| Some(Box::new(Setting { value: 1 })));
		registry.register::<Setting>(|_, _| Some(Box::new(Setting { value: 2 })));

		assert_eq!(registry.len(), 1);
		let created = registry.create::<Setting>(&ValueMap::new(), None).expect("creator opinion");
		assert_eq!(created.value, 2);
	}

	#[test]
	fn records_and_families_share_one_table() {
		let mut registry = CreatorRegistry::new();
		registry.register::<Setting>(|_, _| None);
		registry.register::<dyn Command>(|_, _| Some(Box::new(Quit::default()) as Box<dyn Command>));

		assert!(registry.contains::<Setting>());
		assert!(registry.contains::<dyn Command>());
		assert!(!registry.contains::<SetColor>());
		assert!(registry.create::<Setting>(&ValueMap::new(), None).is_none());
		assert!(registry.create::<dyn Command>(&ValueMap::new(), None).is_some());
	}

	#[test]
	fn unregister_removes_entry() {
		let mut registry = CreatorRegistry::new();
		registry.register::<Setting>(|_, _| None);
		assert!(registry.unregister::<Setting>());
		assert!(!registry.unregister::<Setting>());
		assert!(registry.is_empty());
	}
}

mod command_creator {
	use super::*;

	fn commands() -> CommandCreator<dyn Command> {
		CommandCreator::<dyn Command>::new()
			.with("setColor", || Box::new(SetColor::default()) as Box<dyn Command>)
			.and_then(|creator| creator.with("quit", || Box::new(Quit::default()) as Box<dyn Command>))
			.expect("registration")
	}

	#[test]
	fn reads_discriminator_from_parent() {
		let creator = commands();
		let parent = map(r#"{"cmd":"setColor","data":{}}"#);
		let created = creator.create(&ValueMap::new(), Some(&parent)).expect("opinion");
		assert_eq!(created.type_name(), "SetColor");
	}

	#[test]
	fn root_or_unknown_name_has_no_opinion() {
		let creator = commands();
		assert!(creator.create(&ValueMap::new(), None).is_none());
		let parent = map(r#"{"cmd":"launch"}"#);
		assert!(creator.create(&ValueMap::new(), Some(&parent)).is_none());
		let parent = map(r#"{"cmd":7}"#);
		assert!(creator.create(&ValueMap::new(), Some(&parent)).is_none());
	}

	#[test]
	fn from_self_reads_current_node() {
		let creator = CommandCreator::<dyn Command>::from_self("kind")
			.with("quit", || Box::new(Quit::default()) as Box<dyn Command>)
			.expect("registration");
		assert_eq!(creator.source(), DiscriminatorSource::Current);
		assert_eq!(creator.key(), "kind");

		let src = map(r#"{"kind":"quit"}"#);
		let created = creator.create(&src, None).expect("opinion");
		assert_eq!(created.type_name(), "Quit");
	}

	#[test]
	fn empty_name_fails_at_registration() {
		let mut creator = CommandCreator::<dyn Command>::new();
		let err = creator.register("  ", || Box::new(Quit::default()) as Box<dyn Command>).expect_err("empty name");
		assert!(matches!(err, BindError::MissingDiscriminatorRegistration { .. }));
		assert_eq!(creator.names().count(), 0);
	}

	#[test]
	fn names_are_sorted() {
		let creator = commands();
		assert_eq!(creator.names().collect::<Vec<_>>(), vec!["quit", "setColor"]);
	}
}
