//! API-side access guard for the plugin inventory.
//!
//! Resolves the request principal into capabilities and runs the shared
//! `PluginAccessGuard` before any inventory access.

use plugboard_auth::{
    AuthzError, Caller, DeploymentMode, PluginAccessGuard, Principal, effective_permissions,
};

use crate::context::PrincipalContext;

/// Resolve the request principal against the role policy.
pub fn resolve_principal(principal: &PrincipalContext) -> Principal {
    Principal {
        principal_id: principal.principal_id(),
        roles: principal.roles().to_vec(),
        permissions: effective_permissions(principal.roles()),
    }
}

/// Check that the caller may read the plugin inventory.
///
/// Must be called before the inventory is queried.
pub fn authorize_plugin_read(
    guard: &PluginAccessGuard,
    deployment: DeploymentMode,
    principal: &PrincipalContext,
) -> Result<(), AuthzError> {
    let resolved = resolve_principal(principal);
    let caller = Caller::new(&resolved, deployment);

    guard.check(&caller).inspect_err(|e| {
        tracing::warn!(
            principal_id = %principal.principal_id(),
            missing = e.missing_permission(),
            "plugin inventory access denied"
        );
    })
}
