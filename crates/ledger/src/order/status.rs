//! Order status.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Intended transitions:
/// ```text
/// Pending ──┬──► Fulfilled
///           └──► Cancelled
/// ```
///
/// The ledger does not enforce these; see [`OrderLedger`](super::OrderLedger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order has been placed, no stock has been taken for it.
    #[default]
    Pending,

    /// Stock has been taken and the order is complete (terminal state).
    #[serde(alias = "delivered")]
    Fulfilled,

    /// Order was called off (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Fulfilled | OrderStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Fulfilled => "fulfilled",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Fulfilled.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
        assert_eq!(OrderStatus::Fulfilled.to_string(), "fulfilled");
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_wire_format_is_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Fulfilled).unwrap();
        assert_eq!(json, "\"fulfilled\"");
    }

    #[test]
    fn test_delivered_reads_as_fulfilled() {
        let status: OrderStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(status, OrderStatus::Fulfilled);
    }
}
