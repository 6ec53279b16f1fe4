//! Order fulfillment.
//!
//! Fulfilling an order is the only operation that spans both ledgers:
//! 1. Read the order's contents
//! 2. Read the stock counts of every item in one batch
//! 3. Refuse early if any item is short, without touching stock
//! 4. Take the stock item by item, in contents order
//! 5. Mark the order fulfilled
//!
//! Steps 2 and 4 are not atomic with each other. Step 4 re-checks each
//! count as it decrements, and a failure there stops the commit with the
//! earlier decrements of the same order already applied. Nothing is rolled
//! back.

pub mod action;
pub mod coordinator;
pub mod stock;

pub use action::{OrderAction, UnknownAction};
pub use coordinator::FulfillmentCoordinator;
pub use stock::StockLedger;
