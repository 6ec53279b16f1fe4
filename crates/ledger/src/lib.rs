//! Inventory and order ledgers.
//!
//! Both ledgers wrap a [`store::KeyedStore`] and add the typed operations of
//! their record kind:
//! - [`InventoryLedger`] keeps per-item stock counts that never go negative
//! - [`OrderLedger`] keeps order contents and the order status

pub mod error;
pub mod inventory;
pub mod order;

pub use error::{ErrorKind, LedgerError, Result};
pub use inventory::{DEFAULT_DELTA, InventoryLedger, ItemRecord};
pub use order::{Contents, OrderLedger, OrderRecord, OrderStatus};
