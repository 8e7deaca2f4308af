//! Collection assembly: buckets → projected, annotated, shaped listing.

use core::str::FromStr;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use plugboard_core::{DomainError, PluginId};

use crate::context::{ShapedPlugin, ViewContext, shape};
use crate::filters::{FilterChain, ItemFilterChain};
use crate::inventory::{BucketKind, InventoryError, InventorySource};
use crate::model::{Plugin, PluginStatus};
use crate::projector::Projector;
use crate::sanitize::{Sanitizer, TagStripper};
use crate::schema::{ItemSchema, plugin_schema};

/// How entries from the specialized buckets get their `status`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAnnotation {
    /// Drop-ins get `dropin`, must-use plugins get `mustuse`.
    #[default]
    Annotate,
    /// Every entry keeps an empty status, whatever its bucket.
    Legacy,
}

impl StatusAnnotation {
    pub fn status_for(self, bucket: BucketKind) -> Option<PluginStatus> {
        match (self, bucket) {
            (StatusAnnotation::Annotate, BucketKind::Dropin) => Some(PluginStatus::Dropin),
            (StatusAnnotation::Annotate, BucketKind::MustUse) => Some(PluginStatus::MustUse),
            _ => None,
        }
    }
}

impl FromStr for StatusAnnotation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annotate" => Ok(StatusAnnotation::Annotate),
            "legacy" => Ok(StatusAnnotation::Legacy),
            other => Err(DomainError::validation(format!(
                "status annotation must be 'annotate' or 'legacy', got '{other}'"
            ))),
        }
    }
}

/// Builds plugin listings from an inventory source.
///
/// Holds no per-request state: every call re-reads the inventory.
pub struct CollectionAssembler<I, S = TagStripper> {
    inventory: I,
    filters: FilterChain,
    item_filters: ItemFilterChain,
    projector: Projector<S>,
    annotation: StatusAnnotation,
    schema: ItemSchema,
}

impl<I: InventorySource> CollectionAssembler<I, TagStripper> {
    pub fn new(inventory: I) -> Self {
        Self {
            inventory,
            filters: FilterChain::new(),
            item_filters: ItemFilterChain::new(),
            projector: Projector::new(),
            annotation: StatusAnnotation::default(),
            schema: plugin_schema(),
        }
    }
}

impl<I, S> CollectionAssembler<I, S>
where
    I: InventorySource,
    S: Sanitizer,
{
    pub fn with_filters(mut self, filters: FilterChain) -> Self {
        self.filters = filters;
        self
    }

    /// Stages applied to every item after shaping, in `list` and `find` alike.
    pub fn with_item_filters(mut self, item_filters: ItemFilterChain) -> Self {
        self.item_filters = item_filters;
        self
    }

    pub fn with_annotation(mut self, annotation: StatusAnnotation) -> Self {
        self.annotation = annotation;
        self
    }

    pub fn with_sanitizer<T: Sanitizer>(self, sanitizer: T) -> CollectionAssembler<I, T> {
        CollectionAssembler {
            inventory: self.inventory,
            filters: self.filters,
            item_filters: self.item_filters,
            projector: Projector::with_sanitizer(sanitizer),
            annotation: self.annotation,
            schema: self.schema,
        }
    }

    pub fn annotation(&self) -> StatusAnnotation {
        self.annotation
    }

    pub fn schema(&self) -> &ItemSchema {
        &self.schema
    }

    /// Every plugin across all buckets, in order all → dropin → mustuse.
    ///
    /// Fails only when a bucket cannot be read at all; malformed records
    /// degrade to empty fields.
    pub fn plugins(&self) -> Result<Vec<Plugin>, InventoryError> {
        let mut plugins = Vec::new();

        for kind in BucketKind::LISTING_ORDER {
            let mut entries = self.inventory.bucket(kind)?;
            if kind == BucketKind::All {
                entries = self.filters.apply(entries);
            }

            tracing::debug!(bucket = %kind, entries = entries.len(), "read inventory bucket");

            let status = self.annotation.status_for(kind);
            plugins.extend(entries.iter().map(|entry| {
                let mut plugin = self.projector.project(&entry.record, &entry.id);
                if status.is_some() {
                    plugin.status = status;
                }
                plugin
            }));
        }

        warn_on_duplicate_ids(&plugins);
        Ok(plugins)
    }

    fn prepare(&self, plugin: &Plugin, context: ViewContext) -> ShapedPlugin {
        self.item_filters
            .apply(shape(plugin, context, &self.schema), context)
    }

    /// The listing, shaped for `context`.
    pub fn list(&self, context: ViewContext) -> Result<Vec<ShapedPlugin>, InventoryError> {
        let plugins = self.plugins()?;
        Ok(plugins.iter().map(|p| self.prepare(p, context)).collect())
    }

    /// One plugin by id, shaped for `context`.
    ///
    /// Ids are keys relative to each bucket root, so a regular plugin and a
    /// must-use plugin can share one. The first match in listing order wins.
    pub fn find(
        &self,
        id: &PluginId,
        context: ViewContext,
    ) -> Result<Option<ShapedPlugin>, InventoryError> {
        let plugins = self.plugins()?;
        Ok(plugins
            .iter()
            .find(|p| &p.id == id)
            .map(|p| self.prepare(p, context)))
    }
}

fn warn_on_duplicate_ids(plugins: &[Plugin]) {
    let mut seen = HashSet::with_capacity(plugins.len());
    for plugin in plugins {
        if !seen.insert(&plugin.id) {
            tracing::warn!(plugin = %plugin.id, "plugin id listed by more than one bucket");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use super::*;
    use crate::inventory::InventoryEntry;
    use crate::raw::{RawPluginRecord, fields};

    #[derive(Default)]
    struct FakeInventory {
        all: Vec<InventoryEntry>,
        dropins: Vec<InventoryEntry>,
        must_use: Vec<InventoryEntry>,
        fail_on: Option<BucketKind>,
        reads: Mutex<Vec<BucketKind>>,
    }

    impl FakeInventory {
        fn read(
            &self,
            kind: BucketKind,
            entries: &[InventoryEntry],
        ) -> Result<Vec<InventoryEntry>, InventoryError> {
            self.reads.lock().unwrap().push(kind);
            if self.fail_on == Some(kind) {
                return Err(InventoryError::unavailable(kind, "disk on fire"));
            }
            Ok(entries.to_vec())
        }
    }

    impl InventorySource for FakeInventory {
        fn all_plugins(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
            self.read(BucketKind::All, &self.all)
        }

        fn dropins(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
            self.read(BucketKind::Dropin, &self.dropins)
        }

        fn must_use_plugins(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
            self.read(BucketKind::MustUse, &self.must_use)
        }
    }

    fn named(id: &str, name: &str) -> InventoryEntry {
        InventoryEntry::new(id, RawPluginRecord::new().with(fields::NAME, name))
    }

    #[test]
    fn hello_dolly_only() {
        let inventory = FakeInventory {
            all: vec![InventoryEntry::new(
                "hello.php",
                RawPluginRecord::new()
                    .with(fields::NAME, "Hello Dolly")
                    .with(fields::VERSION, "1.6")
                    .with(fields::NETWORK, false),
            )],
            ..Default::default()
        };

        let listing = CollectionAssembler::new(inventory)
            .list(ViewContext::View)
            .unwrap();

        assert_eq!(listing.len(), 1);
        let item = &listing[0].fields;
        assert_eq!(item["id"], "hello.php");
        assert_eq!(item["name"], "Hello Dolly");
        assert_eq!(item["version"], "1.6");
        assert_eq!(item["network-only"], false);
        assert_eq!(item["status"], "");
    }

    #[test]
    fn must_use_is_annotated_by_default() {
        let inventory = FakeInventory {
            must_use: vec![named("loader.php", "Loader")],
            ..Default::default()
        };

        let plugins = CollectionAssembler::new(inventory).plugins().unwrap();
        assert_eq!(plugins[0].status, Some(PluginStatus::MustUse));
    }

    #[test]
    fn legacy_policy_leaves_status_empty() {
        let inventory = FakeInventory {
            dropins: vec![named("db.php", "")],
            must_use: vec![named("loader.php", "Loader")],
            ..Default::default()
        };

        let plugins = CollectionAssembler::new(inventory)
            .with_annotation(StatusAnnotation::Legacy)
            .plugins()
            .unwrap();
        assert!(plugins.iter().all(|p| p.status.is_none()));
    }

    #[test]
    fn buckets_are_concatenated_in_fixed_order() {
        let inventory = FakeInventory {
            all: vec![named("b/b.php", "B"), named("a/a.php", "A")],
            dropins: vec![named("db.php", "")],
            must_use: vec![named("loader.php", "Loader")],
            ..Default::default()
        };

        let assembler = CollectionAssembler::new(inventory);
        let ids: Vec<String> = assembler
            .plugins()
            .unwrap()
            .into_iter()
            .map(|p| p.id.into_string())
            .collect();

        assert_eq!(ids, ["b/b.php", "a/a.php", "db.php", "loader.php"]);
        assert_eq!(
            *assembler.inventory.reads.lock().unwrap(),
            BucketKind::LISTING_ORDER.to_vec()
        );

        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn filters_only_touch_the_all_bucket() {
        let inventory = FakeInventory {
            all: vec![named("a.php", "A"), named("hidden.php", "Hidden")],
            must_use: vec![named("hidden-mu.php", "Hidden MU")],
            ..Default::default()
        };

        let filters = FilterChain::new().with(|mut entries| {
            entries.retain(|e| !e.id.as_str().starts_with("hidden"));
            entries
        });

        let plugins = CollectionAssembler::new(inventory)
            .with_filters(filters)
            .plugins()
            .unwrap();
        let names: Vec<&str> = plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A", "Hidden MU"]);
    }

    #[test]
    fn malformed_record_does_not_abort_listing() {
        let inventory = FakeInventory {
            all: vec![
                InventoryEntry::new(
                    "no-author.php",
                    RawPluginRecord::new()
                        .with(fields::NAME, "No Author")
                        .with(fields::VERSION, "0.1"),
                ),
                named("ok.php", "Ok"),
            ],
            ..Default::default()
        };

        let plugins = CollectionAssembler::new(inventory).plugins().unwrap();
        assert_eq!(plugins.len(), 2);
        assert_eq!(plugins[0].author, "");
        assert_eq!(plugins[0].name, "No Author");
        assert_eq!(plugins[0].version, "0.1");
    }

    #[test]
    fn unreadable_bucket_fails_whole_listing() {
        let inventory = FakeInventory {
            all: vec![named("a.php", "A")],
            fail_on: Some(BucketKind::Dropin),
            ..Default::default()
        };

        let err = CollectionAssembler::new(inventory).list(ViewContext::View).unwrap_err();
        assert_eq!(err, InventoryError::unavailable(BucketKind::Dropin, "disk on fire"));
    }

    #[test]
    fn find_looks_up_by_id() {
        let inventory = FakeInventory {
            all: vec![named("akismet/akismet.php", "Akismet")],
            dropins: vec![named("object-cache.php", "Redis")],
            ..Default::default()
        };
        let assembler = CollectionAssembler::new(inventory);

        let found = assembler
            .find(&PluginId::new("object-cache.php"), ViewContext::View)
            .unwrap()
            .unwrap();
        assert_eq!(found.fields["status"], "dropin");

        let missing = assembler
            .find(&PluginId::new("nope.php"), ViewContext::View)
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn repeated_listings_are_identical() {
        let inventory = FakeInventory {
            all: vec![named("a.php", "A"), named("b.php", "B")],
            must_use: vec![named("m.php", "M")],
            ..Default::default()
        };
        let assembler = CollectionAssembler::new(inventory);

        let first = assembler.list(ViewContext::View).unwrap();
        let second = assembler.list(ViewContext::View).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parses_annotation_policy() {
        assert_eq!(
            "annotate".parse::<StatusAnnotation>().unwrap(),
            StatusAnnotation::Annotate
        );
        assert_eq!(
            " LEGACY ".parse::<StatusAnnotation>().unwrap(),
            StatusAnnotation::Legacy
        );
        assert!("sometimes".parse::<StatusAnnotation>().is_err());
    }

    #[test]
    fn item_filters_apply_to_list_and_find() {
        let inventory = FakeInventory {
            all: vec![named("a.php", "A")],
            dropins: vec![named("db.php", "DB")],
            ..Default::default()
        };
        let assembler = CollectionAssembler::new(inventory).with_item_filters(
            ItemFilterChain::new().with(|mut item, _| {
                item.fields.remove("author");
                item.fields
                    .insert("checksum".into(), serde_json::json!(item.id.as_str().len()));
                item
            }),
        );

        let listing = assembler.list(ViewContext::View).unwrap();
        assert_eq!(listing.len(), 2);
        for item in &listing {
            assert!(!item.fields.contains_key("author"));
            assert_eq!(item.fields["checksum"], item.id.as_str().len());
        }

        let found = assembler
            .find(&PluginId::new("db.php"), ViewContext::View)
            .unwrap()
            .unwrap();
        assert!(!found.fields.contains_key("author"));
        assert_eq!(found.fields["checksum"], 6);
    }

    #[test]
    fn shared_ids_resolve_to_the_first_bucket() {
        let inventory = FakeInventory {
            all: vec![named("hello.php", "Plugin Hello")],
            must_use: vec![named("hello.php", "MU Hello")],
            ..Default::default()
        };
        let assembler = CollectionAssembler::new(inventory);

        assert_eq!(assembler.list(ViewContext::View).unwrap().len(), 2);

        let found = assembler
            .find(&PluginId::new("hello.php"), ViewContext::View)
            .unwrap()
            .unwrap();
        assert_eq!(found.fields["name"], "Plugin Hello");
        assert_eq!(found.fields["status"], "");
    }
}
