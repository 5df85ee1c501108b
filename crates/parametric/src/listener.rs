//! Extension hooks run while building and calling command units.

use quill_invocation::{Description, HandlerError, Namespace};

use crate::binding::ArgumentParser;
use crate::spec::CommandSpec;

/// Observes command units built by a [`crate::ParametricBuilder`].
///
/// Every method has a no-op default, so listeners implement only the hooks
/// they need. Listeners run in registration order.
pub trait InvokeListener: Send + Sync {
	/// Transforms a description before its command unit is sealed.
	fn update_description(&self, _spec: &CommandSpec, _parser: &ArgumentParser, description: Description) -> Description {
		description
	}

	/// Runs after arguments are bound and before the handler. Returning
	/// `Ok(false)` skips the handler.
	fn pre_invoke(&self, _spec: &CommandSpec, _namespace: &Namespace) -> Result<bool, HandlerError> {
		Ok(true)
	}

	/// Runs after the handler returned successfully.
	fn post_invoke(&self, _spec: &CommandSpec, _namespace: &Namespace) -> Result<(), HandlerError> {
		Ok(())
	}
}

/// Adapts a description transform function into an [`InvokeListener`].
pub struct DescriptionTransform<F>(pub F);

impl<F> InvokeListener for DescriptionTransform<F>
where
	F: Fn(&CommandSpec, &ArgumentParser, Description) -> Description + Send + Sync,
{
	fn update_description(&self, spec: &CommandSpec, parser: &ArgumentParser, description: Description) -> Description {
		(self.0)(spec, parser, description)
	}
}
