use std::collections::BTreeMap;
use std::num::NonZeroU64;

use common::ItemName;
use store::KeyedStore;

use super::ItemRecord;
use crate::error::{LedgerError, Result};

/// Stock delta used when a caller does not name one.
pub const DEFAULT_DELTA: NonZeroU64 = NonZeroU64::MIN;

/// Ledger of inventory items and their stock counts.
///
/// The stock count of an item never goes below zero: a decrement larger than
/// the count is refused rather than clamped.
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    items: KeyedStore<ItemRecord>,
}

impl InventoryLedger {
    /// Creates a new empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the item stored under `name`.
    pub async fn get(&self, name: &ItemName) -> Result<ItemRecord> {
        Ok(self.items.get(name).await?)
    }

    /// Adds a new item.
    #[tracing::instrument(skip(self, item))]
    pub async fn add_item(&self, name: ItemName, item: ItemRecord) -> Result<()> {
        let count = item.count;
        self.items.add(name.clone(), item).await?;
        tracing::info!(%name, count, "item added");
        Ok(())
    }

    /// Removes an item.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, name: &ItemName) -> Result<()> {
        self.items.delete(name).await?;
        tracing::info!(%name, "item deleted");
        Ok(())
    }

    /// Returns a snapshot of every item.
    pub async fn list(&self) -> BTreeMap<ItemName, ItemRecord> {
        self.items.list().await
    }

    /// Returns the number of distinct items.
    pub async fn len(&self) -> usize {
        self.items.len().await
    }

    /// Returns true if the inventory holds no items.
    pub async fn is_empty(&self) -> bool {
        self.items.is_empty().await
    }

    /// Adds `delta` units to an item's stock and returns the new count.
    #[tracing::instrument(skip(self))]
    pub async fn increase_stock(&self, name: &ItemName, delta: NonZeroU64) -> Result<u64> {
        let requested = delta.get();
        let count = self
            .items
            .update(name, |item| {
                item.count = item.count.checked_add(requested).ok_or_else(|| {
                    LedgerError::StockOverflow {
                        item: name.clone(),
                        count: item.count,
                        requested,
                    }
                })?;
                Ok::<_, LedgerError>(item.count)
            })
            .await?;

        metrics::counter!("stock_adjustments_total", "direction" => "increase").increment(1);
        tracing::debug!(%name, requested, count, "stock increased");
        Ok(count)
    }

    /// Takes `delta` units out of an item's stock and returns the new count.
    ///
    /// Fails with [`LedgerError::InsufficientStock`] when `delta` exceeds the
    /// current count, leaving the count unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn decrease_stock(&self, name: &ItemName, delta: NonZeroU64) -> Result<u64> {
        let requested = delta.get();
        let count = self
            .items
            .update(name, |item| {
                if requested > item.count {
                    return Err(LedgerError::InsufficientStock {
                        item: name.clone(),
                        requested,
                        available: item.count,
                    });
                }
                item.count -= requested;
                Ok(item.count)
            })
            .await?;

        metrics::counter!("stock_adjustments_total", "direction" => "decrease").increment(1);
        tracing::debug!(%name, requested, count, "stock decreased");
        Ok(count)
    }

    /// Applies a signed stock adjustment and returns the new count.
    ///
    /// Positive deltas stock the item, negative deltas take from it by their
    /// absolute value. A zero delta changes nothing but still requires the
    /// item to exist.
    pub async fn adjust_count(&self, name: &ItemName, delta: i64) -> Result<u64> {
        match NonZeroU64::new(delta.unsigned_abs()) {
            None => self.get_count(name).await,
            Some(amount) if delta > 0 => self.increase_stock(name, amount).await,
            Some(amount) => self.decrease_stock(name, amount).await,
        }
    }

    /// Returns the current stock count of an item.
    pub async fn get_count(&self, name: &ItemName) -> Result<u64> {
        Ok(self.items.read(name, |item| item.count).await?)
    }

    /// Returns the stock counts of `names`, in the same order.
    ///
    /// The first unknown name fails the whole query.
    pub async fn query_counts(&self, names: &[ItemName]) -> Result<Vec<u64>> {
        Ok(self.items.read_many(names, |item| item.count).await?)
    }
}
