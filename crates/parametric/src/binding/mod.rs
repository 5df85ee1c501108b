//! Binding engine: compiles parameter metadata into descriptors and resolves
//! raw arguments into typed values.

mod parser;
mod providers;

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub use parser::{ArgumentParser, ArgumentParserBuilder};
pub use providers::{FromStrProvider, NamespaceProvider, TEXT, TextProvider};
use quill_invocation::{ArgumentError, CommandArgs, Namespace, Parameter};
use thiserror::Error;

use crate::spec::ParameterSpec;

/// A resolved, type-erased argument value.
pub type Value = Box<dyn Any + Send>;

/// Runtime identity of a parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
	id: TypeId,
	name: &'static str,
}

impl TypeKey {
	pub fn of<T: Any>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: type_name::<T>(),
		}
	}

	pub fn id(&self) -> TypeId {
		self.id
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn is<T: Any>(&self) -> bool {
		self.id == TypeId::of::<T>()
	}
}

impl fmt::Display for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// Produces values of type `T` from command arguments or the caller namespace.
pub trait Provider<T>: Send + Sync {
	/// Returns whether values come from the namespace rather than the user.
	/// Provided parameters are hidden from descriptions.
	fn is_provided(&self) -> bool {
		false
	}

	fn get(&self, args: &mut CommandArgs, namespace: &Namespace, modifiers: &[String]) -> Result<T, ArgumentError>;
}

impl<T, F> Provider<T> for F
where
	F: Fn(&mut CommandArgs, &Namespace, &[String]) -> Result<T, ArgumentError> + Send + Sync,
{
	fn get(&self, args: &mut CommandArgs, namespace: &Namespace, modifiers: &[String]) -> Result<T, ArgumentError> {
		self(args, namespace, modifiers)
	}
}

/// Type-erased provider stored in the [`Injector`].
pub(crate) trait ErasedProvider: Send + Sync {
	fn is_provided(&self) -> bool;
	/// Whether an absent value resolves to `None` instead of an error.
	fn is_optional(&self) -> bool;
	fn get(&self, args: &mut CommandArgs, namespace: &Namespace, modifiers: &[String]) -> Result<Value, ArgumentError>;
}

struct Typed<T, P> {
	provider: Arc<P>,
	_marker: PhantomData<fn() -> T>,
}

impl<T, P> ErasedProvider for Typed<T, P>
where
	T: Send + 'static,
	P: Provider<T>,
{
	fn is_provided(&self) -> bool {
		self.provider.is_provided()
	}

	fn is_optional(&self) -> bool {
		false
	}

	fn get(&self, args: &mut CommandArgs, namespace: &Namespace, modifiers: &[String]) -> Result<Value, ArgumentError> {
		Ok(Box::new(self.provider.get(args, namespace, modifiers)?))
	}
}

/// Binds `Option<T>` on top of a `T` provider.
struct Optional<T, P> {
	provider: Arc<P>,
	_marker: PhantomData<fn() -> T>,
}

impl<T, P> ErasedProvider for Optional<T, P>
where
	T: Send + 'static,
	P: Provider<T>,
{
	fn is_provided(&self) -> bool {
		self.provider.is_provided()
	}

	fn is_optional(&self) -> bool {
		true
	}

	fn get(&self, args: &mut CommandArgs, namespace: &Namespace, modifiers: &[String]) -> Result<Value, ArgumentError> {
		let value: Option<T> = if self.provider.is_provided() {
			self.provider.get(args, namespace, modifiers).ok()
		} else if args.has_next() {
			Some(self.provider.get(args, namespace, modifiers)?)
		} else {
			None
		};
		Ok(Box::new(value))
	}
}

/// Errors raised when a parameter cannot be compiled into a descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalParameterError {
	#[error("no provider is bound for type {0}")]
	NoProvider(&'static str),
	#[error("parameter '{name}' of provided type {ty} cannot be bound to a flag")]
	ProvidedFlag { name: String, ty: &'static str },
	#[error("optional parameter '{name}' of type {ty} needs a default or an Option type")]
	OptionalWithoutDefault { name: String, ty: &'static str },
	#[error("flag -{flag} is bound to more than one parameter")]
	DuplicateFlag { flag: char },
	#[error("invalid default for parameter '{name}': {source}")]
	InvalidDefault {
		name: String,
		#[source]
		source: ArgumentError,
	},
}

/// How a descriptor takes its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
	/// Next positional argument(s).
	Positional,
	/// Supplied by the namespace; invisible to users.
	Provided,
	/// Presence of a flag; the parameter is a `bool`.
	Switch(char),
	/// Value following a flag.
	ValueFlag(char),
}

/// Compiled binding for one handler parameter.
#[derive(Clone)]
pub struct ParameterDescriptor {
	key: TypeKey,
	spec: ParameterSpec,
	kind: ParameterKind,
	provider: Arc<dyn ErasedProvider>,
}

impl ParameterDescriptor {
	pub fn key(&self) -> TypeKey {
		self.key
	}

	pub fn spec(&self) -> &ParameterSpec {
		&self.spec
	}

	pub fn kind(&self) -> ParameterKind {
		self.kind
	}

	pub fn name(&self) -> &str {
		self.spec.display_name()
	}

	pub fn flag(&self) -> Option<char> {
		match self.kind {
			ParameterKind::Switch(flag) | ParameterKind::ValueFlag(flag) => Some(flag),
			ParameterKind::Positional | ParameterKind::Provided => None,
		}
	}

	/// Returns whether the parameter is shown to users.
	pub fn is_user_facing(&self) -> bool {
		self.kind != ParameterKind::Provided
	}

	/// Converts the descriptor into its user-visible form.
	pub fn to_parameter(&self) -> Parameter {
		Parameter {
			name: self.name().to_owned(),
			optional: self.spec.optional || self.provider.is_optional(),
			flag: self.flag(),
			value_flag: matches!(self.kind, ParameterKind::ValueFlag(_)),
			default: self.spec.default.clone(),
		}
	}

	pub(crate) fn provider(&self) -> &dyn ErasedProvider {
		&*self.provider
	}

	/// Resolves the value used when the caller omitted this parameter.
	pub(crate) fn absent(&self, namespace: &Namespace) -> Result<Value, ArgumentError> {
		if !self.spec.default.is_empty() {
			let mut defaults = CommandArgs::from_positional(self.spec.default.iter().cloned());
			return self.provider.get(&mut defaults, namespace, &self.spec.modifiers);
		}
		if self.provider.is_optional() {
			return self.provider.get(&mut CommandArgs::default(), namespace, &self.spec.modifiers);
		}
		Err(ArgumentError::MissingArgument(self.name().to_owned()))
	}
}

impl fmt::Debug for ParameterDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ParameterDescriptor")
			.field("key", &self.key)
			.field("spec", &self.spec)
			.field("kind", &self.kind)
			.finish_non_exhaustive()
	}
}

/// Type binding registry consulted when compiling parameters.
#[derive(Default, Clone)]
pub struct Injector {
	providers: HashMap<TypeId, Arc<dyn ErasedProvider>>,
}

impl Injector {
	/// Creates an injector with no bindings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an injector with providers for strings, `bool`, `char` and the
	/// common numeric types.
	pub fn with_builtins() -> Self {
		Self::new()
			.bind::<String>(TextProvider)
			.bind::<bool>(FromStrProvider::<bool>::new())
			.bind::<char>(FromStrProvider::<char>::new())
			.bind::<i32>(FromStrProvider::<i32>::new())
			.bind::<i64>(FromStrProvider::<i64>::new())
			.bind::<u32>(FromStrProvider::<u32>::new())
			.bind::<u64>(FromStrProvider::<u64>::new())
			.bind::<usize>(FromStrProvider::<usize>::new())
			.bind::<f32>(FromStrProvider::<f32>::new())
			.bind::<f64>(FromStrProvider::<f64>::new())
	}

	/// Binds `provider` for `T` and `Option<T>`, replacing earlier bindings.
	pub fn bind<T: Send + 'static>(mut self, provider: impl Provider<T> + 'static) -> Self {
		let provider = Arc::new(provider);
		self.providers.insert(
			TypeId::of::<T>(),
			Arc::new(Typed::<T, _> {
				provider: provider.clone(),
				_marker: PhantomData,
			}),
		);
		self.providers.insert(
			TypeId::of::<Option<T>>(),
			Arc::new(Optional::<T, _> {
				provider,
				_marker: PhantomData,
			}),
		);
		self
	}

	pub fn is_bound(&self, key: TypeKey) -> bool {
		self.providers.contains_key(&key.id())
	}

	/// Compiles a descriptor for a parameter of type `key` with metadata `spec`.
	pub fn compile(&self, key: TypeKey, spec: ParameterSpec) -> Result<ParameterDescriptor, IllegalParameterError> {
		let provider = self
			.providers
			.get(&key.id())
			.cloned()
			.ok_or(IllegalParameterError::NoProvider(key.name()))?;
		let name = spec.display_name().to_owned();

		let kind = match spec.flag {
			Some(_) if provider.is_provided() => {
				return Err(IllegalParameterError::ProvidedFlag { name, ty: key.name() });
			}
			Some(flag) if key.is::<bool>() => ParameterKind::Switch(flag),
			Some(flag) => ParameterKind::ValueFlag(flag),
			None if provider.is_provided() => ParameterKind::Provided,
			None => ParameterKind::Positional,
		};

		let omittable = spec.optional || matches!(kind, ParameterKind::ValueFlag(_));
		if omittable && spec.default.is_empty() && !provider.is_optional() {
			return Err(IllegalParameterError::OptionalWithoutDefault { name, ty: key.name() });
		}

		let descriptor = ParameterDescriptor {
			key,
			spec,
			kind,
			provider,
		};
		let takes_default = matches!(kind, ParameterKind::Positional | ParameterKind::ValueFlag(_));
		if takes_default && !descriptor.spec.default.is_empty() {
			descriptor
				.absent(&Namespace::new())
				.map_err(|source| IllegalParameterError::InvalidDefault { name, source })?;
		}
		Ok(descriptor)
	}
}

impl fmt::Debug for Injector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Injector")
			.field("bindings", &self.providers.len())
			.finish()
	}
}

#[cfg(test)]
mod tests;
