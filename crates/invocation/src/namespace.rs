use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

/// Per-call context carried through binding and authorization.
///
/// Values are keyed by their type, so each type holds at most one entry. The
/// command layer never inspects a namespace; only providers and authorizers
/// supplied by the embedding application do.
#[derive(Clone, Default)]
pub struct Namespace {
	entries: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Namespace {
	/// Creates an empty namespace, representing an anonymous caller.
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `value`, replacing any previous value of the same type.
	pub fn insert<T: Any + Send + Sync>(&mut self, value: T) -> &mut Self {
		self.entries.insert(TypeId::of::<T>(), Arc::new(value));
		self
	}

	/// Builder-style variant of [`Namespace::insert`].
	pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
		self.insert(value);
		self
	}

	/// Returns the stored value of type `T`, if any.
	pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
		self.entries
			.get(&TypeId::of::<T>())
			.and_then(|value| value.downcast_ref::<T>())
	}

	/// Returns whether a value of type `T` is stored.
	pub fn contains<T: Any + Send + Sync>(&self) -> bool {
		self.entries.contains_key(&TypeId::of::<T>())
	}

	/// Removes and returns whether a value of type `T` was stored.
	pub fn remove<T: Any + Send + Sync>(&mut self) -> bool {
		self.entries.remove(&TypeId::of::<T>()).is_some()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Describes a missing entry for error messages.
	pub fn missing<T: Any>() -> String {
		format!("namespace has no value of type {}", type_name::<T>())
	}
}

impl std::fmt::Debug for Namespace {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Namespace")
			.field("entries", &self.entries.len())
			.finish()
	}
}
