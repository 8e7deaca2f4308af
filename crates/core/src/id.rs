//! Plugin identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of one inventory entry.
///
/// This is the key the inventory uses for the entry, usually a path relative
/// to the bucket root (`akismet/akismet.php`, `object-cache.php`). Keys are
/// disjoint across buckets, which is what makes ids unique per listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginId(String);

impl PluginId {
    /// Wrap an inventory key without validation.
    ///
    /// Inventory adapters produce keys themselves; use `FromStr` for
    /// caller-supplied input.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Display for PluginId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PluginId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::invalid_id("PluginId: empty"));
        }
        if s.starts_with('/') || s.contains('\0') {
            return Err(DomainError::invalid_id(format!("PluginId: malformed key '{s}'")));
        }
        if s.split('/').any(|segment| segment == "..") {
            return Err(DomainError::invalid_id(format!(
                "PluginId: parent segments are not allowed in '{s}'"
            )));
        }
        Ok(Self(s.to_string()))
    }
}
