use std::collections::BTreeMap;

use common::OrderId;
use store::KeyedStore;

use super::{Contents, OrderRecord, OrderStatus};
use crate::error::{LedgerError, Result};

/// Ledger of orders.
///
/// Orders are created pending. [`cancel`](Self::cancel) and
/// [`fulfill`](Self::fulfill) stamp the new status without looking at the
/// current one, so a terminal order can be re-stamped; this is logged as a
/// warning but not refused. Orders are never deleted.
#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    orders: KeyedStore<OrderRecord>,
}

impl OrderLedger {
    /// Creates a new empty order ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the order stored under `id`.
    pub async fn get(&self, id: &OrderId) -> Result<OrderRecord> {
        Ok(self.orders.get(id).await?)
    }

    /// Returns a snapshot of every order.
    pub async fn list(&self) -> BTreeMap<OrderId, OrderRecord> {
        self.orders.list().await
    }

    /// Returns the number of orders, whatever their status.
    pub async fn len(&self) -> usize {
        self.orders.len().await
    }

    /// Returns true if no order has been placed.
    pub async fn is_empty(&self) -> bool {
        self.orders.is_empty().await
    }

    /// Records a new order.
    ///
    /// Whatever status `order` carries is replaced by
    /// [`OrderStatus::Pending`].
    #[tracing::instrument(skip(self, order))]
    pub async fn create_order(&self, id: OrderId, mut order: OrderRecord) -> Result<()> {
        if order.status != OrderStatus::Pending {
            tracing::debug!(%id, supplied = %order.status, "ignoring caller-supplied status");
        }
        order.status = OrderStatus::Pending;
        let items = order.contents.len();
        self.orders.add(id.clone(), order).await?;
        tracing::info!(%id, items, "order created");
        Ok(())
    }

    /// Marks an order cancelled.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, id: &OrderId) -> Result<()> {
        self.stamp(id, OrderStatus::Cancelled).await
    }

    /// Marks an order fulfilled.
    ///
    /// This only records the status; taking stock for the order is the
    /// fulfillment coordinator's job.
    #[tracing::instrument(skip(self))]
    pub async fn fulfill(&self, id: &OrderId) -> Result<()> {
        self.stamp(id, OrderStatus::Fulfilled).await
    }

    /// Returns the current status of an order.
    pub async fn status(&self, id: &OrderId) -> Result<OrderStatus> {
        Ok(self.orders.read(id, |order| order.status).await?)
    }

    /// Returns a copy of an order's contents.
    pub async fn get_contents(&self, id: &OrderId) -> Result<Contents> {
        Ok(self.orders.read(id, |order| order.contents.clone()).await?)
    }

    async fn stamp(&self, id: &OrderId, status: OrderStatus) -> Result<()> {
        let previous = self
            .orders
            .update(id, |order| {
                Ok::<_, LedgerError>(std::mem::replace(&mut order.status, status))
            })
            .await?;

        if previous.is_terminal() {
            tracing::warn!(%id, %previous, %status, "overwriting status of a terminal order");
        } else {
            tracing::info!(%id, %previous, %status, "order status changed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use common::ItemName;

    use super::*;
    use crate::ErrorKind;

    fn sims(n: u32) -> Contents {
        [(ItemName::new("sim"), NonZeroU32::new(n).unwrap())]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn test_create_order_starts_pending() {
        let orders = OrderLedger::new();
        let id = OrderId::new("O1");

        orders
            .create_order(id.clone(), OrderRecord::new(sims(5)))
            .await
            .unwrap();

        assert_eq!(orders.status(&id).await.unwrap(), OrderStatus::Pending);
        assert_eq!(orders.get_contents(&id).await.unwrap(), sims(5));
    }

    #[tokio::test]
    async fn test_create_order_ignores_supplied_status() {
        let orders = OrderLedger::new();
        let id = OrderId::new("O1");

        orders
            .create_order(
                id.clone(),
                OrderRecord::new(sims(5)).with_status(OrderStatus::Fulfilled),
            )
            .await
            .unwrap();

        assert_eq!(orders.get(&id).await.unwrap().status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_duplicate_order() {
        let orders = OrderLedger::new();
        let id = OrderId::new("O1");
        orders
            .create_order(id.clone(), OrderRecord::new(sims(5)))
            .await
            .unwrap();

        let err = orders
            .create_order(id.clone(), OrderRecord::new(sims(7)))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(orders.get_contents(&id).await.unwrap(), sims(5));
    }

    #[tokio::test]
    async fn test_create_order_with_unknown_field() {
        let orders = OrderLedger::new();

        let err = orders
            .create_order(
                OrderId::new("O1"),
                OrderRecord::new(sims(1)).with_field("priority", "high"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnknownField);
        assert!(orders.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_and_fulfill_missing_order() {
        let orders = OrderLedger::new();
        let id = OrderId::new("nope");

        assert_eq!(orders.cancel(&id).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(orders.fulfill(&id).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            orders.get_contents(&id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_fulfill_then_cancel_overwrites_terminal_status() {
        let orders = OrderLedger::new();
        let id = OrderId::new("O1");
        orders
            .create_order(id.clone(), OrderRecord::new(sims(1)))
            .await
            .unwrap();

        orders.fulfill(&id).await.unwrap();
        assert_eq!(orders.status(&id).await.unwrap(), OrderStatus::Fulfilled);

        // Terminal states are not protected: cancelling a fulfilled order
        // succeeds and re-stamps it.
        orders.cancel(&id).await.unwrap();
        assert_eq!(orders.status(&id).await.unwrap(), OrderStatus::Cancelled);

        orders.cancel(&id).await.unwrap();
        assert_eq!(orders.status(&id).await.unwrap(), OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_get_contents_returns_a_copy() {
        let orders = OrderLedger::new();
        let id = OrderId::new("O1");
        orders
            .create_order(id.clone(), OrderRecord::new(sims(1)))
            .await
            .unwrap();

        let mut contents = orders.get_contents(&id).await.unwrap();
        contents.insert(ItemName::new("extra"), NonZeroU32::new(3).unwrap());

        assert_eq!(orders.get_contents(&id).await.unwrap(), sims(1));
    }
}
