use crate::bind::{BindError, Record, TypeResolver};

crate::record! {
	#[derive(Debug, Default)]
	pub struct Dog {
		pub name: Option<String>,
	}
}

crate::record! {
	#[derive(Debug, Default)]
	pub struct Cat {
		pub lives: u8,
	}
}

pub trait Animal: Record {}

impl Animal for Dog {}
impl Animal for Cat {}

crate::family!(dyn Animal);

fn resolver() -> TypeResolver {
	let mut resolver = TypeResolver::new();
	resolver.register::<dyn Animal>(|| Box::new(Dog::default()) as Box<dyn Animal>);
	resolver.register::<dyn Animal>(|| Box::new(Cat::default()) as Box<dyn Animal>);
	resolver
}

#[test]
fn register_returns_concrete_name() {
	let mut resolver = TypeResolver::new();
	let name = resolver.register::<dyn Animal>(|| Box::new(Dog::default()) as Box<dyn Animal>);
	assert_eq!(name, "Dog");
	assert!(resolver.contains("Dog"));
}

#[test]
fn resolves_within_family_and_dynamic_view() {
	let resolver = resolver();
	let cat = resolver.resolve::<dyn Animal>("Cat").expect("family view");
	assert_eq!(cat.type_name(), "Cat");

	let dog = resolver.resolve_any("Dog").expect("dynamic view");
	assert!(dog.is::<Dog>());
	assert!(dog.downcast_ref::<Cat>().is_none());
}

#[test]
fn unknown_name_is_unresolvable() {
	let err = resolver().resolve::<dyn Animal>("Horse").expect_err("unknown");
	assert!(matches!(err, BindError::UnresolvableType { ref name } if name == "Horse"));
}

#[test]
fn names_are_sorted() {
	assert_eq!(resolver().names().collect::<Vec<_>>(), vec!["Cat", "Dog"]);
}

#[test]
fn explicit_name_overrides_type_name() {
	let mut resolver = TypeResolver::new();
	resolver.register_as::<dyn Animal>("game.Dog", || Box::new(Dog::default()) as Box<dyn Animal>);
	assert!(resolver.contains("game.Dog"));
	assert!(!resolver.contains("Dog"));
}
