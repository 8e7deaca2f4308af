//! Ordered transform pipelines: one over the "all plugins" bucket, one over
//! each prepared item.

use std::sync::Arc;

use crate::context::{ShapedPlugin, ViewContext};
use crate::inventory::InventoryEntry;

/// A stage may add, drop or rewrite entries.
pub type PluginFilter = dyn Fn(Vec<InventoryEntry>) -> Vec<InventoryEntry> + Send + Sync;

/// Stages run in insertion order. An empty chain is the identity.
#[derive(Clone, Default)]
pub struct FilterChain {
    stages: Vec<Arc<PluginFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, stage: F) -> Self
    where
        F: Fn(Vec<InventoryEntry>) -> Vec<InventoryEntry> + Send + Sync + 'static,
    {
        self.push(stage);
        self
    }

    pub fn push<F>(&mut self, stage: F)
    where
        F: Fn(Vec<InventoryEntry>) -> Vec<InventoryEntry> + Send + Sync + 'static,
    {
        self.stages.push(Arc::new(stage));
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn apply(&self, entries: Vec<InventoryEntry>) -> Vec<InventoryEntry> {
        self.stages.iter().fold(entries, |acc, stage| stage(acc))
    }
}

impl core::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FilterChain")
            .field("stages", &self.stages.len())
            .finish()
    }
}

/// A stage rewrites one shaped item before it is returned.
pub type ItemFilter = dyn Fn(ShapedPlugin, ViewContext) -> ShapedPlugin + Send + Sync;

/// Per-item stages, run in insertion order after shaping.
#[derive(Clone, Default)]
pub struct ItemFilterChain {
    stages: Vec<Arc<ItemFilter>>,
}

impl ItemFilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, stage: F) -> Self
    where
        F: Fn(ShapedPlugin, ViewContext) -> ShapedPlugin + Send + Sync + 'static,
    {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn apply(&self, item: ShapedPlugin, context: ViewContext) -> ShapedPlugin {
        self.stages.iter().fold(item, |acc, stage| stage(acc, context))
    }
}

impl core::fmt::Debug for ItemFilterChain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemFilterChain")
            .field("stages", &self.stages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};

    use plugboard_core::PluginId;

    use super::*;
    use crate::raw::{RawPluginRecord, fields};

    fn entries() -> Vec<InventoryEntry> {
        vec![
            InventoryEntry::new("a.php", RawPluginRecord::new().with(fields::NAME, "A")),
            InventoryEntry::new("b.php", RawPluginRecord::new().with(fields::NAME, "B")),
        ]
    }

    #[test]
    fn empty_chain_is_identity() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.apply(entries()), entries());
    }

    #[test]
    fn stages_run_in_order() {
        let chain = FilterChain::new()
            .with(|mut e| {
                e.retain(|x| x.id.as_str() != "a.php");
                e
            })
            .with(|mut e| {
                for x in &mut e {
                    x.record.insert(fields::VERSION, "9.9");
                }
                e
            });

        let out = chain.apply(entries());
        assert_eq!(chain.len(), 2);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id.as_str(), "b.php");
        assert_eq!(out[0].record.text(fields::VERSION), "9.9");
    }

    fn shaped(id: &str) -> ShapedPlugin {
        let mut fields = Map::new();
        fields.insert("id".into(), json!(id));
        ShapedPlugin {
            id: PluginId::new(id),
            fields,
        }
    }

    #[test]
    fn item_stages_run_in_order_with_context() {
        let chain = ItemFilterChain::new()
            .with(|mut item, _| {
                item.fields.insert("tag".into(), json!("first"));
                item
            })
            .with(|mut item, context| {
                let tag = format!("{}+{}", item.fields["tag"].as_str().unwrap_or(""), context);
                item.fields.insert("tag".into(), json!(tag));
                item
            });

        let out = chain.apply(shaped("a.php"), ViewContext::View);
        assert_eq!(chain.len(), 2);
        assert_eq!(out.fields["tag"], "first+view");
        assert_eq!(out.id.as_str(), "a.php");
    }

    #[test]
    fn empty_item_chain_is_identity() {
        let chain = ItemFilterChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.apply(shaped("a.php"), ViewContext::View), shaped("a.php"));
    }
}
