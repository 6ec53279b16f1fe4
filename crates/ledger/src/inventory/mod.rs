//! Inventory items and their stock counts.

mod item;
mod ledger;

pub use item::ItemRecord;
pub use ledger::{DEFAULT_DELTA, InventoryLedger};
