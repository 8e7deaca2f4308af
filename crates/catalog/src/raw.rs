//! Raw inventory records as handed over by an inventory source.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Header keys of interest in a raw record.
pub mod fields {
    pub const NAME: &str = "Name";
    pub const PLUGIN_URI: &str = "PluginURI";
    pub const VERSION: &str = "Version";
    pub const DESCRIPTION: &str = "Description";
    pub const AUTHOR: &str = "Author";
    pub const AUTHOR_URI: &str = "AuthorURI";
    pub const TEXT_DOMAIN: &str = "TextDomain";
    pub const DOMAIN_PATH: &str = "DomainPath";
    pub const NETWORK: &str = "Network";
}

/// A single header value: inventories report either text or a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Text(String),
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

/// Loosely-typed plugin metadata, keyed by header name.
///
/// Lookups are total: a missing key reads as `""` (text) or `false` (flag),
/// so one malformed record never aborts a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPluginRecord(BTreeMap<String, RawValue>);

impl RawPluginRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Text view of a field. Flags render as `"1"` / `""`.
    pub fn text(&self, key: &str) -> Cow<'_, str> {
        match self.0.get(key) {
            Some(RawValue::Text(s)) => Cow::Borrowed(s.as_str()),
            Some(RawValue::Bool(true)) => Cow::Borrowed("1"),
            Some(RawValue::Bool(false)) | None => Cow::Borrowed(""),
        }
    }

    /// Truthiness of a field: `""` and `"0"` are false, any other text is true.
    pub fn flag(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(RawValue::Bool(b)) => *b,
            Some(RawValue::Text(s)) => !(s.is_empty() || s == "0"),
            None => false,
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RawPluginRecord
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
