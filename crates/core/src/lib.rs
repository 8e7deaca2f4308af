//! `plugboard-core` — shared domain primitives.
//!
//! This crate contains **pure domain** types (no HTTP, no filesystem).

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::PluginId;
