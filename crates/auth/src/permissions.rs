use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Capability identifier.
///
/// Capabilities are modeled as opaque strings (e.g. "plugins.activate").
/// The wildcard `"*"` is used by the role policy to grant everything without
/// enumerating capabilities in tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

/// Wildcard capability: grants every check.
pub const WILDCARD: Permission = Permission::from_static("*");

/// "Manage plugins": required for any read of the plugin inventory.
pub const MANAGE_PLUGINS: Permission = Permission::from_static("plugins.activate");

/// "Manage network plugins": additionally required on network deployments.
pub const MANAGE_NETWORK_PLUGINS: Permission = Permission::from_static("plugins.network.manage");

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
