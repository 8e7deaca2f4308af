//! Static role → capability policy.

use std::collections::BTreeSet;

use crate::permissions::{MANAGE_NETWORK_PLUGINS, MANAGE_PLUGINS, WILDCARD};
use crate::{Permission, Role};

/// Capabilities granted by a single role.
///
/// Unknown roles grant nothing.
pub fn default_role_permissions(role: &str) -> Vec<Permission> {
    match role {
        "admin" => vec![WILDCARD],
        "network_admin" => vec![MANAGE_PLUGINS, MANAGE_NETWORK_PLUGINS],
        "site_admin" => vec![MANAGE_PLUGINS],
        _ => Vec::new(),
    }
}

/// Union of capabilities over all roles, deduplicated and sorted.
pub fn effective_permissions(roles: &[Role]) -> Vec<Permission> {
    let names: BTreeSet<String> = roles
        .iter()
        .flat_map(|r| default_role_permissions(r.as_str()))
        .map(|p| p.as_str().to_string())
        .collect();

    names.into_iter().map(Permission::new).collect()
}
