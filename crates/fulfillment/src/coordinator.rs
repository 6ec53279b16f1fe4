//! Fulfillment coordinator.

use std::num::NonZeroU64;

use common::{ItemName, OrderId};
use ledger::{InventoryLedger, LedgerError, OrderLedger, OrderStatus};

use crate::action::OrderAction;
use crate::stock::StockLedger;

/// Mediates every operation that involves both ledgers.
///
/// The ledgers never call each other; request handlers that need both go
/// through the coordinator.
#[derive(Debug, Clone)]
pub struct FulfillmentCoordinator<I: StockLedger = InventoryLedger> {
    inventory: I,
    orders: OrderLedger,
}

impl<I: StockLedger> FulfillmentCoordinator<I> {
    /// Creates a coordinator over the given ledgers.
    pub fn new(inventory: I, orders: OrderLedger) -> Self {
        Self { inventory, orders }
    }

    /// Returns the inventory this coordinator takes stock from.
    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    /// Returns the order ledger this coordinator updates.
    pub fn orders(&self) -> &OrderLedger {
        &self.orders
    }

    /// Applies `action` to an order and returns the order's new status.
    pub async fn apply(&self, order_id: &OrderId, action: OrderAction) -> ledger::Result<OrderStatus> {
        match action {
            OrderAction::Cancel => self.cancel(order_id).await?,
            OrderAction::Fulfill => self.fulfill(order_id).await?,
        }
        self.orders.status(order_id).await
    }

    /// Cancels an order. Stock is never deducted before fulfillment, so
    /// there is nothing to give back.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, order_id: &OrderId) -> ledger::Result<()> {
        self.orders.cancel(order_id).await
    }

    /// Takes stock for an order and marks it fulfilled.
    ///
    /// Refuses with [`LedgerError::InsufficientStock`] before touching any
    /// stock if the batch-read counts show a shortage. If a decrement still
    /// fails during the commit, the error is returned with the decrements
    /// already made for this order left in place and the order still
    /// pending.
    #[tracing::instrument(skip(self))]
    pub async fn fulfill(&self, order_id: &OrderId) -> ledger::Result<()> {
        metrics::counter!("fulfillment_attempts_total").increment(1);
        let start = std::time::Instant::now();

        let result = self.run_fulfillment(order_id).await;

        let outcome = match &result {
            Ok(()) => "fulfilled",
            Err(FulfillmentFailure::Rejected(_)) => "rejected",
            Err(FulfillmentFailure::PartiallyApplied { .. }) => "partial",
        };
        metrics::counter!("fulfillments_total", "outcome" => outcome).increment(1);
        metrics::histogram!("fulfillment_duration_seconds").record(start.elapsed().as_secs_f64());

        result.map_err(FulfillmentFailure::into_error)
    }

    async fn run_fulfillment(&self, order_id: &OrderId) -> Result<(), FulfillmentFailure> {
        let contents = self.orders.get_contents(order_id).await?;
        let names = contents.item_names();
        let available = self.inventory.query_counts(&names).await?;

        for ((item, required), available) in contents.iter().zip(&available) {
            let required = u64::from(required.get());
            if required > *available {
                tracing::info!(%item, required, available, "order cannot be filled from stock");
                return Err(LedgerError::InsufficientStock {
                    item: item.clone(),
                    requested: required,
                    available: *available,
                }
                .into());
            }
        }

        let mut applied: Vec<ItemName> = Vec::with_capacity(contents.len());
        for (item, quantity) in contents.iter() {
            if let Err(error) = self
                .inventory
                .decrease_stock(item, NonZeroU64::from(quantity))
                .await
            {
                if applied.is_empty() {
                    return Err(error.into());
                }
                tracing::warn!(
                    %order_id,
                    failed = %item,
                    ?applied,
                    %error,
                    "fulfillment stopped mid-commit, earlier decrements remain applied"
                );
                return Err(FulfillmentFailure::PartiallyApplied { error });
            }
            applied.push(item.clone());
        }

        self.orders.fulfill(order_id).await?;
        tracing::info!(%order_id, items = applied.len(), "order fulfilled");
        Ok(())
    }
}

/// How far a failed fulfillment got before stopping.
enum FulfillmentFailure {
    /// Nothing was changed.
    Rejected(LedgerError),
    /// Some stock was taken before the failure.
    PartiallyApplied { error: LedgerError },
}

impl FulfillmentFailure {
    fn into_error(self) -> LedgerError {
        match self {
            FulfillmentFailure::Rejected(error) => error,
            FulfillmentFailure::PartiallyApplied { error } => error,
        }
    }
}

impl From<LedgerError> for FulfillmentFailure {
    fn from(error: LedgerError) -> Self {
        FulfillmentFailure::Rejected(error)
    }
}
