//! Ledger error types.

use common::ItemName;
use store::StoreError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// An error raised by the underlying keyed store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A decrement asked for more units than are in stock.
    #[error("Not enough {item}! Requested {requested}, only {available} available")]
    InsufficientStock {
        item: ItemName,
        requested: u64,
        available: u64,
    },

    /// An increment would push the stock count past its representable range.
    #[error("Cannot add {requested} to {item}: count {count} would overflow")]
    StockOverflow {
        item: ItemName,
        count: u64,
        requested: u64,
    },
}

/// The flat failure kind of a [`LedgerError`].
///
/// Boundary layers translate these into their own status conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    UnknownField,
    InsufficientStock,
    StockOverflow,
}

impl LedgerError {
    /// Returns the failure kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Store(StoreError::NotFound { .. }) => ErrorKind::NotFound,
            LedgerError::Store(StoreError::AlreadyExists { .. }) => ErrorKind::AlreadyExists,
            LedgerError::Store(StoreError::UnknownField { .. }) => ErrorKind::UnknownField,
            LedgerError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            LedgerError::StockOverflow { .. } => ErrorKind::StockOverflow,
        }
    }
}

/// Convenience type alias for ledger results.
pub type Result<T> = std::result::Result<T, LedgerError>;
