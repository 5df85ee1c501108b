//! The sealed, callable form of a handler.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use quill_invocation::{
	ArgumentError, Authorizer, CommandCallable, CommandError, Description, FailureCause,
	InvocationFailure, InvokeError, Namespace,
};
use tracing::{debug, trace, warn};

use crate::binding::{ArgumentParser, Value};
use crate::handler::HandlerDefinition;
use crate::listener::InvokeListener;
use crate::spec::{CommandSpec, FlagPolicy};

/// An immutable command built from a handler definition.
///
/// Holds no per-call state, so one unit may serve any number of concurrent
/// callers. Whether the receiver tolerates concurrent entry is up to its owner.
pub struct CommandUnit {
	definition: HandlerDefinition,
	spec: CommandSpec,
	parser: ArgumentParser,
	description: Description,
	authorizer: Arc<dyn Authorizer>,
	listeners: Vec<Arc<dyn InvokeListener>>,
}

impl CommandUnit {
	pub(crate) fn new(
		definition: HandlerDefinition,
		spec: CommandSpec,
		parser: ArgumentParser,
		description: Description,
		authorizer: Arc<dyn Authorizer>,
		listeners: Vec<Arc<dyn InvokeListener>>,
	) -> Self {
		Self {
			definition,
			spec,
			parser,
			description,
			authorizer,
			listeners,
		}
	}

	/// Primary command name.
	pub fn name(&self) -> &str {
		self.spec.name().unwrap_or_default()
	}

	pub fn aliases(&self) -> &[String] {
		&self.spec.aliases
	}

	pub fn definition(&self) -> &HandlerDefinition {
		&self.definition
	}

	pub fn spec(&self) -> &CommandSpec {
		&self.spec
	}

	/// The binding plan.
	pub fn parser(&self) -> &ArgumentParser {
		&self.parser
	}

	pub fn flag_policy(&self) -> &FlagPolicy {
		self.parser.flag_policy()
	}

	/// Returns the description built at registration.
	pub fn describe(&self) -> &Description {
		&self.description
	}

	/// Returns whether the caller holds any of the declared permissions.
	/// Commands without permissions are open to every caller.
	pub fn authorize(&self, namespace: &Namespace) -> bool {
		let permissions = self.description.permissions();
		permissions.is_empty()
			|| permissions
				.iter()
				.any(|perm| self.authorizer.test_permission(namespace, perm))
	}

	/// Binds raw arguments to the handler's parameters.
	pub fn resolve<S: AsRef<str>>(&self, raw: &[S], namespace: &Namespace) -> Result<Vec<Value>, ArgumentError> {
		self.parser.resolve(raw, namespace)
	}

	/// Invokes the handler with an already-resolved argument array.
	///
	/// Recoverable handler errors come back unchanged. Fatal errors, panics
	/// and arguments that do not fit the handler are wrapped in an
	/// [`InvocationFailure`] naming the handler.
	pub fn invoke(&self, args: Vec<Value>) -> Result<(), InvokeError> {
		trace!(command = self.name(), args = args.len(), "invoking handler");

		let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.definition.apply(args)));
		let cause = match outcome {
			Ok(Ok(Ok(()))) => return Ok(()),
			Ok(Ok(Err(error))) if error.is_recoverable() => return Err(InvokeError::Handler(error)),
			Ok(Ok(Err(error))) => FailureCause::Fatal(error),
			Ok(Err(access)) => FailureCause::Access(access),
			Err(payload) => FailureCause::Panic(panic_message(payload.as_ref())),
		};

		let handler = self.definition.identity();
		if !matches!(cause, FailureCause::Access(_)) {
			warn!(handler = %handler, cause = %cause, "handler failed fatally");
		}
		Err(InvocationFailure::handler(&handler, cause).into())
	}
}

impl CommandCallable for CommandUnit {
	fn call(&self, arguments: &[String], namespace: &Namespace) -> Result<bool, CommandError> {
		if !self.authorize(namespace) {
			return Err(CommandError::PermissionDenied);
		}

		// A panicking provider is a fault of the command layer, not of the handler.
		let args = match panic::catch_unwind(AssertUnwindSafe(|| self.resolve(arguments, namespace))) {
			Ok(resolved) => resolved?,
			Err(payload) => {
				let detail = format!("argument binding panicked: {}", panic_message(payload.as_ref()));
				let handler = self.definition.identity();
				warn!(handler = %handler, detail = %detail, "internal error while binding arguments");
				return Err(CommandError::Invocation(InvocationFailure::internal(&handler, detail)));
			}
		};

		for listener in &self.listeners {
			if !listener
				.pre_invoke(&self.spec, namespace)
				.map_err(CommandError::Handler)?
			{
				debug!(command = self.name(), "invoke listener skipped command");
				return Ok(false);
			}
		}

		self.invoke(args)?;

		for listener in &self.listeners {
			listener
				.post_invoke(&self.spec, namespace)
				.map_err(CommandError::Handler)?;
		}
		Ok(true)
	}

	fn description(&self) -> &Description {
		self.describe()
	}

	fn test_permission(&self, namespace: &Namespace) -> bool {
		self.authorize(namespace)
	}
}

impl fmt::Debug for CommandUnit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandUnit")
			.field("definition", &self.definition)
			.field("parser", &self.parser)
			.field("description", &self.description)
			.field("listeners", &self.listeners.len())
			.finish_non_exhaustive()
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&'static str>() {
		(*message).to_owned()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"non-string panic payload".to_owned()
	}
}
