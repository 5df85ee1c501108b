//! Typed handler functions and their erased definitions.

use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use quill_invocation::{AccessError, HandlerError};

use crate::binding::{TypeKey, Value};
use crate::spec::CommandSpec;

/// Result returned by handler functions.
pub type HandlerResult = Result<(), HandlerError>;

/// A function executing a command against a receiver of type `R`.
///
/// Implemented for every `Fn(&R, A, B, ..) -> HandlerResult` with up to eight
/// parameters, so methods such as `Greeter::greet` can be used directly. `Args`
/// is the tuple of parameter types and only serves to tell the impls apart.
pub trait Handler<R, Args>: Send + Sync + 'static {
	/// Parameter types in declaration order.
	fn signature() -> Vec<TypeKey>;

	/// Applies the handler to `receiver` and `args`.
	///
	/// The outer `Result` reports an argument array that does not fit the
	/// signature; the inner one is the handler's own outcome.
	fn apply(&self, receiver: &R, args: Vec<Value>) -> Result<HandlerResult, AccessError>;
}

macro_rules! impl_handler {
	($($ty:ident $var:ident),*) => {
		impl<R, F, $($ty,)*> Handler<R, ($($ty,)*)> for F
		where
			F: Fn(&R, $($ty),*) -> HandlerResult + Send + Sync + 'static,
			$($ty: Any + Send,)*
		{
			fn signature() -> Vec<TypeKey> {
				vec![$(TypeKey::of::<$ty>()),*]
			}

			#[allow(unused_mut, unused_variables)]
			fn apply(&self, receiver: &R, args: Vec<Value>) -> Result<HandlerResult, AccessError> {
				const ARITY: usize = <[&str]>::len(&[$(stringify!($ty)),*]);
				let found = args.len();
				if found != ARITY {
					return Err(AccessError::Arity { expected: ARITY, found });
				}
				let mut args = args.into_iter().enumerate();
				$(
					let $var: $ty = match args.next() {
						Some((index, value)) => *value.downcast::<$ty>().map_err(|_| AccessError::ArgumentType {
							index,
							expected: type_name::<$ty>(),
						})?,
						None => return Err(AccessError::Arity { expected: ARITY, found }),
					};
				)*
				Ok(self(receiver, $($var),*))
			}
		}
	};
}

impl_handler!();
impl_handler!(A a);
impl_handler!(A a, B b);
impl_handler!(A a, B b, C c);
impl_handler!(A a, B b, C c, D d);
impl_handler!(A a, B b, C c, D d, E e);
impl_handler!(A a, B b, C c, D d, E e, G g);
impl_handler!(A a, B b, C c, D d, E e, G g, H h);
impl_handler!(A a, B b, C c, D d, E e, G g, H h, I i);

/// Handler bound to its receiver with the signature erased.
trait BoundHandler: Send + Sync {
	fn apply(&self, args: Vec<Value>) -> Result<HandlerResult, AccessError>;
}

struct Bound<R, H, Args> {
	receiver: Arc<R>,
	handler: H,
	_args: PhantomData<fn() -> Args>,
}

impl<R, H, Args> BoundHandler for Bound<R, H, Args>
where
	R: Send + Sync + 'static,
	H: Handler<R, Args>,
	Args: 'static,
{
	fn apply(&self, args: Vec<Value>) -> Result<HandlerResult, AccessError> {
		self.handler.apply(&self.receiver, args)
	}
}

/// A handler function bound to its receiver, optionally declared as a command.
///
/// Cloning shares the receiver and the function.
#[derive(Clone)]
pub struct HandlerDefinition {
	name: String,
	receiver: &'static str,
	signature: Vec<TypeKey>,
	command: Option<CommandSpec>,
	handler: Arc<dyn BoundHandler>,
}

impl HandlerDefinition {
	/// Binds `handler` to `receiver`. `name` identifies the handler in
	/// diagnostics and manifests.
	pub fn new<R, H, Args>(name: impl Into<String>, receiver: Arc<R>, handler: H) -> Self
	where
		R: Send + Sync + 'static,
		H: Handler<R, Args>,
		Args: 'static,
	{
		Self {
			name: name.into(),
			receiver: short_type_name(type_name::<R>()),
			signature: <H as Handler<R, Args>>::signature(),
			command: None,
			handler: Arc::new(Bound {
				receiver,
				handler,
				_args: PhantomData,
			}),
		}
	}

	/// Declares the handler as a command.
	pub fn command(mut self, spec: CommandSpec) -> Self {
		self.command = Some(spec);
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// `Receiver.name`, used in failure messages.
	pub fn identity(&self) -> String {
		format!("{}.{}", self.receiver, self.name)
	}

	pub fn signature(&self) -> &[TypeKey] {
		&self.signature
	}

	pub fn command_spec(&self) -> Option<&CommandSpec> {
		self.command.as_ref()
	}

	pub(crate) fn apply(&self, args: Vec<Value>) -> Result<HandlerResult, AccessError> {
		self.handler.apply(args)
	}
}

impl fmt::Debug for HandlerDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HandlerDefinition")
			.field("handler", &self.identity())
			.field("signature", &self.signature)
			.field("command", &self.command)
			.finish_non_exhaustive()
	}
}

fn short_type_name(full: &'static str) -> &'static str {
	let base = full.split('<').next().unwrap_or(full);
	match base.rfind("::") {
		Some(idx) => &full[idx + 2..],
		None => full,
	}
}

#[cfg(test)]
mod tests;
