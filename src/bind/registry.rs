use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use tracing::debug;

use crate::bind::{BindError, Result, ValueMap};

/// Factory that picks a concrete instance for a target type from contextual data.
///
/// `src` is the map being decoded at the current node and `parent` is the map of the
/// immediately enclosing node (`None` at the root). Returning `None` means "no opinion":
/// the engine falls back to the declared type.
pub trait Creator<F: ?Sized>: Send + Sync {
	/// Produce a concrete instance, or `None` to defer to the declared type.
	fn create(&self, src: &ValueMap, parent: Option<&ValueMap>) -> Option<Box<F>>;
}

struct FnCreator<C>(C);

impl<F, C> Creator<F> for FnCreator<C>
where
	F: ?Sized,
	C: Fn(&ValueMap, Option<&ValueMap>) -> Option<Box<F>> + Send + Sync,
{
	fn create(&self, src: &ValueMap, parent: Option<&ValueMap>) -> Option<Box<F>> {
		(self.0)(src, parent)
	}
}

struct Entry {
	target: &'static str,
	creator: Box<dyn Any + Send + Sync>,
}

/// Creators keyed by target type identity.
///
/// Targets are either concrete records (`F = T`) or polymorphic bases (`F = dyn Base`).
/// A registry that is shared between threads must only be read once decoding starts;
/// mutation needs `&mut` and therefore exclusive access.
#[derive(Default)]
pub struct CreatorRegistry {
	entries: BTreeMap<TypeId, Entry>,
}

impl CreatorRegistry {
	/// Create an empty registry.
	pub const fn new() -> Self {
		Self { entries: BTreeMap::new() }
	}

	/// Register a closure creator for `F`, replacing any previous one.
	pub fn register<F>(&mut self, creator: impl Fn(&ValueMap, Option<&ValueMap>) -> Option<Box<F>> + Send + Sync + 'static)
	where
		F: ?Sized + 'static,
	{
		self.register_creator::<F>(FnCreator(creator));
	}

	/// Register a [`Creator`] implementation for `F`, replacing any previous one.
	pub fn register_creator<F>(&mut self, creator: impl Creator<F> + 'static)
	where
		F: ?Sized + 'static,
	{
		let boxed: Box<dyn Creator<F>> = Box::new(creator);
		let target = type_name::<F>();
		if self.entries.insert(TypeId::of::<F>(), Entry { target, creator: Box::new(boxed) }).is_some() {
			debug!("replaced creator for {target}");
		}
	}

	/// Remove the creator for `F`, returning whether one existed.
	pub fn unregister<F: ?Sized + 'static>(&mut self) -> bool {
		self.entries.remove(&TypeId::of::<F>()).is_some()
	}

	/// Whether a creator is registered for `F`.
	pub fn contains<F: ?Sized + 'static>(&self) -> bool {
		self.entries.contains_key(&TypeId::of::<F>())
	}

	/// Number of registered targets.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no creators are registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Registered target type names.
	pub fn targets(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.entries.values().map(|entry| entry.target)
	}

	/// Consult the creator for `F`, if any.
	pub fn create<F: ?Sized + 'static>(&self, src: &ValueMap, parent: Option<&ValueMap>) -> Option<Box<F>> {
		let entry = self.entries.get(&TypeId::of::<F>())?;
		let creator = entry.creator.downcast_ref::<Box<dyn Creator<F>>>()?;
		creator.create(src, parent)
	}
}

/// Where a [`CommandCreator`] reads its discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscriminatorSource {
	/// Field on the enclosing node.
	Parent,
	/// Field on the node being decoded.
	Current,
}

/// Creator that maps a discriminator string to zero-argument factories.
///
/// The default reads the `cmd` field of the enclosing node, matching payloads such as
/// `{"cmd":"setColor","data":{...}}` where `data` is the polymorphic member.
pub struct CommandCreator<F: ?Sized> {
	key: Box<str>,
	source: DiscriminatorSource,
	factories: BTreeMap<Box<str>, Box<dyn Fn() -> Box<F> + Send + Sync>>,
}

impl<F: ?Sized + 'static> CommandCreator<F> {
	/// Discriminator read from the parent node field `cmd`.
	pub fn new() -> Self {
		Self::from_parent("cmd")
	}

	/// Discriminator read from the parent node field `key`.
	pub fn from_parent(key: &str) -> Self {
		Self {
			key: key.into(),
			source: DiscriminatorSource::Parent,
			factories: BTreeMap::new(),
		}
	}

	/// Discriminator read from the current node field `key`.
	pub fn from_self(key: &str) -> Self {
		Self {
			key: key.into(),
			source: DiscriminatorSource::Current,
			factories: BTreeMap::new(),
		}
	}

	/// Associate a discriminator name with a factory.
	///
	/// An empty name is a configuration error, reported here rather than at decode time.
	pub fn register(&mut self, name: &str, factory: impl Fn() -> Box<F> + Send + Sync + 'static) -> Result<()> {
		let name = name.trim();
		if name.is_empty() {
			return Err(BindError::MissingDiscriminatorRegistration { target: type_name::<F>() });
		}
		self.factories.insert(name.into(), Box::new(factory));
		Ok(())
	}

	/// Builder form of [`CommandCreator::register`].
	pub fn with(mut self, name: &str, factory: impl Fn() -> Box<F> + Send + Sync + 'static) -> Result<Self> {
		self.register(name, factory)?;
		Ok(self)
	}

	/// Discriminator field name.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Node the discriminator is read from.
	pub fn source(&self) -> DiscriminatorSource {
		self.source
	}

	/// Registered discriminator names in sorted order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.factories.keys().map(|name| &**name)
	}
}

impl<F: ?Sized + 'static> Default for CommandCreator<F> {
	fn default() -> Self {
		Self::new()
	}
}

impl<F: ?Sized + 'static> Creator<F> for CommandCreator<F> {
	fn create(&self, src: &ValueMap, parent: Option<&ValueMap>) -> Option<Box<F>> {
		let node = match self.source {
			DiscriminatorSource::Parent => parent?,
			DiscriminatorSource::Current => src,
		};
		let name = node.get_str(&self.key)?;
		let factory = self.factories.get(name);
		if factory.is_none() {
			debug!("no {} factory for discriminator {name:?}", type_name::<F>());
		}
		factory.map(|factory| factory())
	}
}

#[cfg(test)]
mod tests;
