//! Inventory port: where raw plugin records come from.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use plugboard_core::PluginId;

use crate::raw::RawPluginRecord;

/// The three disjoint inventory buckets, in listing order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketKind {
    All,
    Dropin,
    MustUse,
}

impl BucketKind {
    pub const LISTING_ORDER: [BucketKind; 3] =
        [BucketKind::All, BucketKind::Dropin, BucketKind::MustUse];

    pub fn as_str(self) -> &'static str {
        match self {
            BucketKind::All => "all",
            BucketKind::Dropin => "dropin",
            BucketKind::MustUse => "mustuse",
        }
    }
}

impl core::fmt::Display for BucketKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One keyed record from a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub id: PluginId,
    pub record: RawPluginRecord,
}

impl InventoryEntry {
    pub fn new(id: impl Into<String>, record: RawPluginRecord) -> Self {
        Self {
            id: PluginId::new(id),
            record,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("inventory bucket '{bucket}' is unavailable: {message}")]
    Unavailable { bucket: BucketKind, message: String },
}

impl InventoryError {
    pub fn unavailable(bucket: BucketKind, message: impl Into<String>) -> Self {
        Self::Unavailable {
            bucket,
            message: message.into(),
        }
    }
}

/// Read-only view of the installed plugins.
///
/// Each call reflects live state; buckets are read independently, so a scan
/// may observe different snapshots across buckets.
pub trait InventorySource: Send + Sync {
    fn all_plugins(&self) -> Result<Vec<InventoryEntry>, InventoryError>;
    fn dropins(&self) -> Result<Vec<InventoryEntry>, InventoryError>;
    fn must_use_plugins(&self) -> Result<Vec<InventoryEntry>, InventoryError>;

    fn bucket(&self, kind: BucketKind) -> Result<Vec<InventoryEntry>, InventoryError> {
        match kind {
            BucketKind::All => self.all_plugins(),
            BucketKind::Dropin => self.dropins(),
            BucketKind::MustUse => self.must_use_plugins(),
        }
    }
}

impl<S> InventorySource for Arc<S>
where
    S: InventorySource + ?Sized,
{
    fn all_plugins(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
        (**self).all_plugins()
    }

    fn dropins(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
        (**self).dropins()
    }

    fn must_use_plugins(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
        (**self).must_use_plugins()
    }
}
