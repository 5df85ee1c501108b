use crate::Namespace;

/// Answers permission questions for a caller.
pub trait Authorizer: Send + Sync {
	/// Returns whether the caller described by `namespace` holds `permission`.
	fn test_permission(&self, namespace: &Namespace, permission: &str) -> bool;
}

impl<F> Authorizer for F
where
	F: Fn(&Namespace, &str) -> bool + Send + Sync,
{
	fn test_permission(&self, namespace: &Namespace, permission: &str) -> bool {
		self(namespace, permission)
	}
}

/// Grants every permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
	fn test_permission(&self, _namespace: &Namespace, _permission: &str) -> bool {
		true
	}
}

/// Denies every permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl Authorizer for DenyAll {
	fn test_permission(&self, _namespace: &Namespace, _permission: &str) -> bool {
		false
	}
}
