use std::collections::BTreeMap;

use common::OrderId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::Schema;

use super::{Contents, OrderStatus};

/// A stored order.
///
/// As with items, `extra` holds caller-supplied fields outside the order
/// schema and is always empty once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub contents: Contents,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl OrderRecord {
    /// Creates a pending order for `contents`.
    pub fn new(contents: Contents) -> Self {
        Self {
            contents,
            status: OrderStatus::Pending,
            extra: BTreeMap::new(),
        }
    }

    /// Replaces the status carried by the record.
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// Attaches an additional field to the record.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

impl Schema for OrderRecord {
    type Key = OrderId;
    const KIND: &'static str = "Order";
    const ALLOWED_FIELDS: &'static [&'static str] = &["contents", "status"];

    fn field_names(&self) -> Vec<String> {
        ["contents", "status"]
            .into_iter()
            .map(String::from)
            .chain(self.extra.keys().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_pending_when_absent() {
        let order: OrderRecord = serde_json::from_str(r#"{"contents": {"sim": 2}}"#).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.unknown_fields().is_empty());
    }

    #[test]
    fn test_unexpected_keys_become_unknown_fields() {
        let order: OrderRecord =
            serde_json::from_str(r#"{"contents": {}, "status": "cancelled", "note": "x"}"#)
                .unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(order.unknown_fields(), vec!["note".to_string()]);
    }

    #[test]
    fn test_serialized_form() {
        let order = OrderRecord::new(Contents::new());
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            serde_json::json!({"contents": {}, "status": "pending"})
        );
    }
}
