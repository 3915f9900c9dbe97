use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::trace;

use crate::bind::{BindError, Family, Record, Result};

/// Reserved map key carrying the concrete runtime type name.
pub const TYPE_TAG: &str = "$type";

type Factory<F> = Arc<dyn Fn() -> Box<F> + Send + Sync>;

/// Maps type-identity tag names back to constructible types.
///
/// Every registration is visible twice: through its family (`dyn Base`) for statically
/// typed `Box<dyn Base>` fields, and through `dyn Record` for fully dynamic holes.
#[derive(Default)]
pub struct TypeResolver {
	families: BTreeMap<TypeId, BTreeMap<Box<str>, Box<dyn Any + Send + Sync>>>,
}

impl TypeResolver {
	/// Create an empty resolver.
	pub const fn new() -> Self {
		Self { families: BTreeMap::new() }
	}

	/// Register a concrete type of family `F` under its own type name.
	///
	/// The factory is called once to learn the name, which is returned.
	pub fn register<F>(&mut self, factory: impl Fn() -> Box<F> + Send + Sync + 'static) -> &'static str
	where
		F: ?Sized + Family,
	{
		let name = factory().type_name();
		self.register_as::<F>(name, factory);
		name
	}

	/// Register a concrete type of family `F` under an explicit name.
	pub fn register_as<F>(&mut self, name: &str, factory: impl Fn() -> Box<F> + Send + Sync + 'static)
	where
		F: ?Sized + Family,
	{
		let factory: Factory<F> = Arc::new(factory);
		let family_view = Arc::clone(&factory);
		let dynamic: Factory<dyn Record> = Arc::new(move || family_view().into_record());
		self.insert::<F>(name, factory);
		if TypeId::of::<F>() != TypeId::of::<dyn Record>() {
			self.insert::<dyn Record>(name, dynamic);
		}
	}

	/// Whether `name` is resolvable through the dynamic view.
	pub fn contains(&self, name: &str) -> bool {
		self.families
			.get(&TypeId::of::<dyn Record>())
			.is_some_and(|names| names.contains_key(name))
	}

	/// Registered names in sorted order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.families
			.get(&TypeId::of::<dyn Record>())
			.into_iter()
			.flat_map(|names| names.keys().map(|name| &**name))
	}

	/// Construct the type registered as `name` within family `F`.
	pub fn resolve<F: ?Sized + 'static>(&self, name: &str) -> Result<Box<F>> {
		let factory = self
			.families
			.get(&TypeId::of::<F>())
			.and_then(|names| names.get(name))
			.and_then(|entry| entry.downcast_ref::<Factory<F>>())
			.ok_or_else(|| BindError::UnresolvableType { name: name.to_owned() })?;
		trace!("resolved type tag {name:?}");
		Ok(factory())
	}

	/// Construct the type registered as `name` through the dynamic view.
	pub fn resolve_any(&self, name: &str) -> Result<Box<dyn Record>> {
		self.resolve::<dyn Record>(name)
	}

	fn insert<F: ?Sized + 'static>(&mut self, name: &str, factory: Factory<F>) {
		self.families.entry(TypeId::of::<F>()).or_default().insert(name.into(), Box::new(factory));
	}
}

#[cfg(test)]
mod tests;
