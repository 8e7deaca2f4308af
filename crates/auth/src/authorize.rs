use thiserror::Error;

use crate::{Permission, PrincipalId, Role};

/// A fully resolved principal for authorization decisions.
///
/// Construction is decoupled from transport: the API derives it from token
/// claims and the role policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub principal_id: PrincipalId,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

impl Principal {
    /// Whether the principal holds `required`, directly or via the wildcard.
    pub fn has_permission(&self, required: &Permission) -> bool {
        self.permissions
            .iter()
            .any(|p| p.is_wildcard() || p == required)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

impl AuthzError {
    /// The capability whose absence caused the denial.
    pub fn missing_permission(&self) -> &str {
        match self {
            AuthzError::Forbidden(p) => p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{MANAGE_NETWORK_PLUGINS, MANAGE_PLUGINS};

    fn principal_with(perms: &[Permission]) -> Principal {
        Principal {
            principal_id: PrincipalId::new(),
            roles: vec![],
            permissions: perms.to_vec(),
        }
    }

    #[test]
    fn explicit_permission_is_granted() {
        let p = principal_with(&[MANAGE_PLUGINS]);
        assert!(p.has_permission(&MANAGE_PLUGINS));
        assert!(!p.has_permission(&MANAGE_NETWORK_PLUGINS));
    }

    #[test]
    fn wildcard_grants_everything() {
        let p = principal_with(&[Permission::new("*")]);
        assert!(p.has_permission(&MANAGE_NETWORK_PLUGINS));
        assert!(p.has_permission(&Permission::new("anything.else")));
    }

    #[test]
    fn missing_permission_is_named_in_error() {
        let err = AuthzError::Forbidden(MANAGE_NETWORK_PLUGINS.as_str().to_string());
        assert_eq!(err.missing_permission(), "plugins.network.manage");
        assert_eq!(
            err.to_string(),
            "forbidden: missing permission 'plugins.network.manage'"
        );
    }
}
