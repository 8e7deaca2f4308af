use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use plugboard_catalog::{
    BucketKind, InventoryEntry, InventoryError, InventorySource, RawPluginRecord,
};

/// In-memory inventory for tests/dev.
///
/// Buckets keep insertion order; re-inserting an id replaces the record in
/// place.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    inner: RwLock<HashMap<BucketKind, Vec<InventoryEntry>>>,
    reads: AtomicUsize,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, bucket: BucketKind, id: impl Into<String>, record: RawPluginRecord) {
        let entry = InventoryEntry::new(id, record);
        if let Ok(mut map) = self.inner.write() {
            let entries = map.entry(bucket).or_default();
            match entries.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        }
    }

    /// Number of bucket reads served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn read(&self, bucket: BucketKind) -> Result<Vec<InventoryEntry>, InventoryError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let map = self
            .inner
            .read()
            .map_err(|_| InventoryError::unavailable(bucket, "inventory lock poisoned"))?;
        Ok(map.get(&bucket).cloned().unwrap_or_default())
    }
}

impl InventorySource for InMemoryInventory {
    fn all_plugins(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
        self.read(BucketKind::All)
    }

    fn dropins(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
        self.read(BucketKind::Dropin)
    }

    fn must_use_plugins(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
        self.read(BucketKind::MustUse)
    }
}
