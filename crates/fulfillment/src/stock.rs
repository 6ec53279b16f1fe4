//! The inventory operations fulfillment depends on.

use std::num::NonZeroU64;

use async_trait::async_trait;
use common::ItemName;
use ledger::InventoryLedger;

/// Stock operations used by the fulfillment coordinator.
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Returns the stock counts of `names`, in order, or fails on the first
    /// unknown name.
    async fn query_counts(&self, names: &[ItemName]) -> ledger::Result<Vec<u64>>;

    /// Takes `delta` units of `name` out of stock, returning the new count.
    async fn decrease_stock(&self, name: &ItemName, delta: NonZeroU64) -> ledger::Result<u64>;
}

#[async_trait]
impl StockLedger for InventoryLedger {
    async fn query_counts(&self, names: &[ItemName]) -> ledger::Result<Vec<u64>> {
        InventoryLedger::query_counts(self, names).await
    }

    async fn decrease_stock(&self, name: &ItemName, delta: NonZeroU64) -> ledger::Result<u64> {
        InventoryLedger::decrease_stock(self, name, delta).await
    }
}
