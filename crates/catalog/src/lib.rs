//! Plugin catalog domain.
//!
//! Turns loosely-typed inventory records into the public, schema-described
//! plugin representation. Pure logic: inventory access goes through the
//! `InventorySource` port, markup removal through `Sanitizer`.

pub mod assembler;
pub mod context;
pub mod filters;
pub mod inventory;
pub mod model;
pub mod projector;
pub mod raw;
pub mod sanitize;
pub mod schema;

pub use assembler::{CollectionAssembler, StatusAnnotation};
pub use context::{ShapedPlugin, ViewContext, shape};
pub use filters::{FilterChain, ItemFilter, ItemFilterChain, PluginFilter};
pub use inventory::{BucketKind, InventoryEntry, InventoryError, InventorySource};
pub use model::{Plugin, PluginStatus};
pub use projector::Projector;
pub use raw::{RawPluginRecord, RawValue};
pub use sanitize::{Sanitizer, TagStripper};
pub use schema::{FieldSchema, FieldType, ItemSchema, plugin_schema};
