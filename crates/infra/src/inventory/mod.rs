//! Inventory adapters behind the catalog's `InventorySource` port.

pub mod filesystem;
pub mod headers;
pub mod in_memory;

pub use filesystem::FsInventory;
pub use in_memory::InMemoryInventory;
