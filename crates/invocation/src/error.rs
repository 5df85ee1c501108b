use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while binding raw arguments to handler parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
	/// A required argument was not provided.
	#[error("missing argument: {0}")]
	MissingArgument(String),
	/// An argument was provided but could not be converted.
	#[error("invalid value '{value}' (expected {expected}): {reason}")]
	InvalidArgument {
		/// The offending token.
		value: String,
		/// Name of the expected type.
		expected: &'static str,
		/// Why conversion failed.
		reason: String,
	},
	/// Positional arguments were left after every parameter was bound.
	#[error("too many arguments: {}", .0.join(" "))]
	UnusedArguments(Vec<String>),
	/// Flags were presented that the command neither consumes nor allows.
	#[error("unexpected flags: -{0}")]
	UnusedFlags(String),
	/// A value flag was given as the last token.
	#[error("flag -{0} requires a value")]
	MissingFlagValue(char),
	/// A quoted argument was not closed.
	#[error("unterminated quote at offset {0}")]
	UnterminatedQuote(usize),
	/// A value expected from the caller context was unavailable.
	#[error("{0}")]
	Provision(String),
}

/// The handler could not be applied to the resolved argument array.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
	#[error("expected {expected} arguments, got {found}")]
	Arity { expected: usize, found: usize },
	#[error("argument {index} is not a {expected}")]
	ArgumentType { index: usize, expected: &'static str },
}

/// How the command layer treats a handler-raised error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	/// An application-level failure; propagated to the caller unchanged.
	Recoverable,
	/// Anything else; wrapped in an [`InvocationFailure`].
	Fatal,
}

/// An error raised by a command handler.
///
/// The underlying error is shared, so clones refer to the same instance and
/// [`HandlerError::same_instance`] can check identity after propagation.
#[derive(Clone)]
pub struct HandlerError {
	severity: Severity,
	inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl HandlerError {
	pub fn new(severity: Severity, error: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
		Self {
			severity,
			inner: Arc::from(error.into()),
		}
	}

	/// Wraps an application failure such as a bad argument or missing target.
	pub fn recoverable(error: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
		Self::new(Severity::Recoverable, error)
	}

	pub fn fatal(error: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
		Self::new(Severity::Fatal, error)
	}

	pub fn severity(&self) -> Severity {
		self.severity
	}

	pub fn is_recoverable(&self) -> bool {
		self.severity == Severity::Recoverable
	}

	/// Returns the wrapped error.
	pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
		&*self.inner
	}

	/// Returns whether both values wrap the same error instance.
	pub fn same_instance(&self, other: &HandlerError) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl fmt::Debug for HandlerError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HandlerError")
			.field("severity", &self.severity)
			.field("inner", &self.inner)
			.finish()
	}
}

impl fmt::Display for HandlerError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.inner, f)
	}
}

impl StdError for HandlerError {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		Some(&*self.inner)
	}
}

/// Root cause of an [`InvocationFailure`].
#[derive(Error, Debug, Clone)]
pub enum FailureCause {
	/// The handler was unreachable with the resolved arguments.
	#[error("handler not accessible: {0}")]
	Access(#[from] AccessError),
	/// The handler raised an error outside the recoverable category.
	#[error("handler raised a fatal error: {0}")]
	Fatal(#[source] HandlerError),
	/// The handler panicked.
	#[error("handler panicked: {0}")]
	Panic(String),
	/// The command layer itself misbehaved; not attributable to the handler.
	#[error("internal fault: {0}")]
	Internal(String),
}

/// Adapter-level failure while invoking a handler. Always carries its cause.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct InvocationFailure {
	message: String,
	#[source]
	cause: FailureCause,
}

impl InvocationFailure {
	/// Failure attributable to the handler call.
	pub fn handler(handler: &str, cause: impl Into<FailureCause>) -> Self {
		Self {
			message: format!("Could not invoke handler '{handler}'"),
			cause: cause.into(),
		}
	}

	/// Failure of the command layer itself.
	pub fn internal(handler: &str, detail: impl Into<String>) -> Self {
		Self {
			message: format!("Internal error while invoking handler '{handler}'"),
			cause: FailureCause::Internal(detail.into()),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn cause(&self) -> &FailureCause {
		&self.cause
	}

	pub fn is_internal(&self) -> bool {
		matches!(self.cause, FailureCause::Internal(_))
	}
}

/// Outcome of invoking a handler with an already-resolved argument array.
#[derive(Error, Debug, Clone)]
pub enum InvokeError {
	/// A recoverable error raised by the handler, unchanged.
	#[error(transparent)]
	Handler(HandlerError),
	#[error(transparent)]
	Failure(#[from] InvocationFailure),
}

/// Errors surfaced by the full call path of a command.
#[derive(Error, Debug, Clone)]
pub enum CommandError {
	/// The caller holds none of the command's permissions.
	#[error("permission denied")]
	PermissionDenied,
	/// Arguments could not be bound to the handler's parameters.
	#[error("invalid usage: {0}")]
	Usage(#[from] ArgumentError),
	/// A recoverable error raised by the handler or an invoke listener.
	#[error(transparent)]
	Handler(HandlerError),
	#[error(transparent)]
	Invocation(InvocationFailure),
}

impl From<InvokeError> for CommandError {
	fn from(error: InvokeError) -> Self {
		match error {
			InvokeError::Handler(error) => Self::Handler(error),
			InvokeError::Failure(failure) => Self::Invocation(failure),
		}
	}
}
