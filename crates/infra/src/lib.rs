//! Infrastructure layer: concrete inventory sources.

pub mod inventory;
