//! Invocation contracts shared by quill command units.
//!
//! A command unit is driven by an outer dispatch registry through the
//! [`CommandCallable`] trait. Everything the unit consumes per call lives here:
//!
//! - [`Namespace`]: opaque per-call context, passed through to providers and authorizers
//! - [`Description`]: immutable help model built once per command
//! - [`Authorizer`]: answers yes/no permission questions
//! - [`CommandArgs`]: flag-aware view over tokenized arguments
//! - error families for argument binding, handler failures and invocation wrapping

mod args;
mod authorizer;
mod description;
mod error;
mod namespace;

pub use args::{CommandArgs, split_arguments};
pub use authorizer::{AllowAll, Authorizer, DenyAll};
pub use description::{Description, DescriptionBuilder, Parameter};
pub use error::{
	AccessError, ArgumentError, CommandError, FailureCause, HandlerError, InvocationFailure,
	InvokeError, Severity,
};
pub use namespace::Namespace;

/// A command that can be invoked by a dispatch registry.
///
/// Implementations are immutable once built and may be shared across threads.
pub trait CommandCallable: Send + Sync {
	/// Authorizes, binds and executes the command with the given arguments.
	///
	/// Returns `Ok(false)` when an invoke listener vetoed execution.
	fn call(&self, arguments: &[String], namespace: &Namespace) -> Result<bool, CommandError>;

	/// Returns the command's description.
	fn description(&self) -> &Description;

	/// Returns whether the caller described by `namespace` may run this command.
	fn test_permission(&self, namespace: &Namespace) -> bool;
}
