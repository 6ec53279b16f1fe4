//! Actions that can be applied to an order.

use std::str::FromStr;

use thiserror::Error;

/// A status-changing action on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    /// Call the order off. Stock is not touched.
    Cancel,
    /// Take stock for the order and mark it fulfilled.
    Fulfill,
}

impl OrderAction {
    /// Returns the action name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderAction::Cancel => "cancel",
            OrderAction::Fulfill => "fulfill",
        }
    }
}

impl std::fmt::Display for OrderAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The action name is neither `cancel` nor `fulfill`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown order action `{0}`, expected `cancel` or `fulfill`")]
pub struct UnknownAction(pub String);

impl FromStr for OrderAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cancel" => Ok(OrderAction::Cancel),
            "fulfill" => Ok(OrderAction::Fulfill),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}
