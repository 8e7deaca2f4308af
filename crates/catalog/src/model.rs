//! Public plugin representation.

use serde::{Deserialize, Serialize};

use plugboard_core::PluginId;

/// Named status of a plugin.
///
/// The read path only ever assigns `Dropin` and `MustUse`; the other values
/// are part of the published enumeration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluginStatus {
    #[serde(rename = "dropin")]
    Dropin,
    #[serde(rename = "inactive")]
    Inactive,
    #[serde(rename = "mustuse")]
    MustUse,
    #[serde(rename = "network")]
    Network,
    #[serde(rename = "site")]
    Site,
}

impl PluginStatus {
    pub const ALL: [PluginStatus; 5] = [
        PluginStatus::Dropin,
        PluginStatus::Inactive,
        PluginStatus::MustUse,
        PluginStatus::Network,
        PluginStatus::Site,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PluginStatus::Dropin => "dropin",
            PluginStatus::Inactive => "inactive",
            PluginStatus::MustUse => "mustuse",
            PluginStatus::Network => "network",
            PluginStatus::Site => "site",
        }
    }
}

impl core::fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inventory entry as exposed over the API.
///
/// Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    pub id: PluginId,
    pub name: String,
    pub description: String,
    pub version: String,
    pub link: String,
    pub author: String,
    #[serde(rename = "author-url")]
    pub author_url: String,
    pub textdomain: String,
    #[serde(rename = "textdomain-path")]
    pub textdomain_path: String,
    #[serde(rename = "network-only")]
    pub network_only: bool,
    /// `None` serializes as `""`.
    #[serde(with = "status_field")]
    pub status: Option<PluginStatus>,
}

mod status_field {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::PluginStatus;

    pub fn serialize<S>(status: &Option<PluginStatus>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match status {
            Some(s) => s.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PluginStatus>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        PluginStatus::ALL
            .into_iter()
            .find(|s| s.as_str() == raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown plugin status '{raw}'")))
    }
}
