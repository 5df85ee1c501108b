//! Parametric command units.
//!
//! Turns typed handler functions into permission-checked command units:
//!
//! * [`HandlerDefinition`] binds a handler function to its receiver.
//! * [`CommandSpec`] declares it as a command, inline or through a
//!   [`CommandManifest`].
//! * [`ParametricBuilder`] validates the declaration against the handler's
//!   signature and compiles a binding plan from its [`Injector`].
//! * [`CommandUnit`] describes, authorizes, binds and invokes the command.
//!
//! Units implement [`CommandCallable`], so a dispatcher can hold them as
//! `Box<dyn CommandCallable>` next to hand-written commands.

pub mod binding;
mod builder;
mod handler;
mod listener;
mod manifest;
mod spec;
mod unit;

pub use binding::{
	ArgumentParser, FromStrProvider, IllegalParameterError, Injector, NamespaceProvider, ParameterDescriptor,
	ParameterKind, Provider, TEXT, TextProvider, TypeKey, Value,
};
pub use builder::{ConfigurationError, ParametricBuilder};
pub use handler::{Handler, HandlerDefinition, HandlerResult};
pub use listener::{DescriptionTransform, InvokeListener};
pub use manifest::{CommandManifest, ManifestEntry};
pub use quill_invocation::{
	AccessError, AllowAll, ArgumentError, Authorizer, CommandArgs, CommandCallable, CommandError, DenyAll,
	Description, FailureCause, HandlerError, InvocationFailure, InvokeError, Namespace, Parameter, Severity,
};
pub use spec::{CommandSpec, FlagPolicy, ParameterSpec};
pub use unit::CommandUnit;
