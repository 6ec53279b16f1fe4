//! Request handlers and shared state.

pub mod health;
pub mod items;
pub mod metrics;
pub mod orders;

use fulfillment::FulfillmentCoordinator;
use ledger::{InventoryLedger, OrderLedger};

/// Shared application state accessible from all handlers.
///
/// The coordinator holds handles to the same ledgers.
pub struct AppState {
    pub inventory: InventoryLedger,
    pub orders: OrderLedger,
    pub coordinator: FulfillmentCoordinator,
}

impl AppState {
    /// Creates state around empty ledgers.
    pub fn new() -> Self {
        let inventory = InventoryLedger::new();
        let orders = OrderLedger::new();
        let coordinator = FulfillmentCoordinator::new(inventory.clone(), orders.clone());
        Self {
            inventory,
            orders,
            coordinator,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
