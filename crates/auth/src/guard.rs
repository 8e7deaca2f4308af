//! Access guard for the plugin inventory.
//!
//! One coarse, all-or-nothing gate shared by the collection read, the
//! single-item read and the per-item check:
//!
//! 1. the caller must hold `plugins.activate`;
//! 2. on a network deployment the caller must also hold
//!    `plugins.network.manage`.

use serde::{Deserialize, Serialize};

use crate::authorize::{AuthzError, Principal};
use crate::permissions::{MANAGE_NETWORK_PLUGINS, MANAGE_PLUGINS};
use crate::Permission;

/// Whether the installation hosts a single site or a network of sites.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentMode {
    #[default]
    SingleSite,
    Network,
}

impl DeploymentMode {
    pub fn is_network(self) -> bool {
        matches!(self, DeploymentMode::Network)
    }
}

/// Identity/capability port consulted by the guard.
pub trait CapabilityProvider {
    fn has_capability(&self, capability: &Permission) -> bool;
    fn is_multi_tenant(&self) -> bool;
}

/// A principal acting within a deployment.
#[derive(Debug, Clone, Copy)]
pub struct Caller<'a> {
    pub principal: &'a Principal,
    pub deployment: DeploymentMode,
}

impl<'a> Caller<'a> {
    pub fn new(principal: &'a Principal, deployment: DeploymentMode) -> Self {
        Self { principal, deployment }
    }
}

impl CapabilityProvider for Caller<'_> {
    fn has_capability(&self, capability: &Permission) -> bool {
        self.principal.has_permission(capability)
    }

    fn is_multi_tenant(&self) -> bool {
        self.deployment.is_network()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PluginAccessGuard;

impl PluginAccessGuard {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the gate, naming the missing capability on denial.
    pub fn check<C>(&self, caller: &C) -> Result<(), AuthzError>
    where
        C: CapabilityProvider + ?Sized,
    {
        if !caller.has_capability(&MANAGE_PLUGINS) {
            return Err(AuthzError::Forbidden(MANAGE_PLUGINS.as_str().to_string()));
        }

        if caller.is_multi_tenant() && !caller.has_capability(&MANAGE_NETWORK_PLUGINS) {
            return Err(AuthzError::Forbidden(
                MANAGE_NETWORK_PLUGINS.as_str().to_string(),
            ));
        }

        Ok(())
    }

    pub fn allows<C>(&self, caller: &C) -> bool
    where
        C: CapabilityProvider + ?Sized,
    {
        self.check(caller).is_ok()
    }

    /// Per-item visibility. There is no finer policy than the collection gate.
    pub fn can_read_item<C>(&self, caller: &C, _plugin_id: &str) -> bool
    where
        C: CapabilityProvider + ?Sized,
    {
        self.allows(caller)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::PrincipalId;

    struct FakeCaller {
        perms: Vec<Permission>,
        network: bool,
        checks: Cell<usize>,
    }

    impl FakeCaller {
        fn new(perms: &[Permission], network: bool) -> Self {
            Self {
                perms: perms.to_vec(),
                network,
                checks: Cell::new(0),
            }
        }
    }

    impl CapabilityProvider for FakeCaller {
        fn has_capability(&self, capability: &Permission) -> bool {
            self.checks.set(self.checks.get() + 1);
            self.perms.contains(capability)
        }

        fn is_multi_tenant(&self) -> bool {
            self.network
        }
    }

    #[test]
    fn denies_without_base_capability() {
        let guard = PluginAccessGuard::new();
        let caller = FakeCaller::new(&[MANAGE_NETWORK_PLUGINS], true);

        let err = guard.check(&caller).unwrap_err();
        assert_eq!(err.missing_permission(), "plugins.activate");
        // Short-circuits after the first check.
        assert_eq!(caller.checks.get(), 1);
    }

    #[test]
    fn single_site_needs_only_base_capability() {
        let guard = PluginAccessGuard::new();
        let caller = FakeCaller::new(&[MANAGE_PLUGINS], false);
        assert!(guard.allows(&caller));
        assert!(guard.can_read_item(&caller, "hello.php"));
    }

    #[test]
    fn network_requires_both_capabilities() {
        let guard = PluginAccessGuard::new();

        let base_only = FakeCaller::new(&[MANAGE_PLUGINS], true);
        let err = guard.check(&base_only).unwrap_err();
        assert_eq!(err.missing_permission(), "plugins.network.manage");

        let both = FakeCaller::new(&[MANAGE_PLUGINS, MANAGE_NETWORK_PLUGINS], true);
        assert!(guard.allows(&both));
    }

    #[test]
    fn caller_wraps_principal_and_deployment() {
        let principal = Principal {
            principal_id: PrincipalId::new(),
            roles: vec![],
            permissions: vec![Permission::new("*")],
        };
        let guard = PluginAccessGuard::new();

        assert!(guard.allows(&Caller::new(&principal, DeploymentMode::SingleSite)));
        assert!(guard.allows(&Caller::new(&principal, DeploymentMode::Network)));
    }
}
