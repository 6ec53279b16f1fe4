//! Shared key types for the inventory and order ledgers.

pub mod types;

pub use types::{ItemName, OrderId};
