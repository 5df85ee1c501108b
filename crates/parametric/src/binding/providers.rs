use std::any::{Any, type_name};
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use quill_invocation::{ArgumentError, CommandArgs, Namespace};

use super::Provider;

/// Modifier that makes a string parameter swallow every remaining argument.
pub const TEXT: &str = "text";

/// Binds a single argument, or with the `text` modifier all remaining
/// arguments joined by spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextProvider;

impl Provider<String> for TextProvider {
	fn get(&self, args: &mut CommandArgs, _namespace: &Namespace, modifiers: &[String]) -> Result<String, ArgumentError> {
		if !modifiers.iter().any(|m| m == TEXT) {
			return args.next("string");
		}
		if !args.has_next() {
			return Err(ArgumentError::MissingArgument("text".into()));
		}
		Ok(args.take_remaining().join(" "))
	}
}

/// Parses a single argument with [`FromStr`].
pub struct FromStrProvider<T>(PhantomData<fn() -> T>);

impl<T> FromStrProvider<T> {
	pub fn new() -> Self {
		Self(PhantomData)
	}
}

impl<T> Default for FromStrProvider<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Provider<T> for FromStrProvider<T>
where
	T: FromStr,
	T::Err: Display,
{
	fn get(&self, args: &mut CommandArgs, _namespace: &Namespace, _modifiers: &[String]) -> Result<T, ArgumentError> {
		let value = args.next(type_name::<T>())?;
		value.parse().map_err(|err: T::Err| ArgumentError::InvalidArgument {
			reason: err.to_string(),
			value,
			expected: type_name::<T>(),
		})
	}
}

/// Supplies a clone of the namespace's `T`, hidden from users.
pub struct NamespaceProvider<T>(PhantomData<fn() -> T>);

impl<T> NamespaceProvider<T> {
	pub fn new() -> Self {
		Self(PhantomData)
	}
}

impl<T> Default for NamespaceProvider<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Provider<T> for NamespaceProvider<T>
where
	T: Any + Clone + Send + Sync,
{
	fn is_provided(&self) -> bool {
		true
	}

	fn get(&self, _args: &mut CommandArgs, namespace: &Namespace, _modifiers: &[String]) -> Result<T, ArgumentError> {
		namespace
			.get::<T>()
			.cloned()
			.ok_or_else(|| ArgumentError::Provision(Namespace::missing::<T>()))
	}
}
