use thiserror::Error;

/// Errors that can occur when interacting with a keyed store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The key is not present in the store.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// A record already exists under the key.
    #[error("{kind} already exists: {key}")]
    AlreadyExists { kind: &'static str, key: String },

    /// The record names fields outside the store's schema.
    #[error("Unknown {kind} properties: {}", fields.join(", "))]
    UnknownField {
        kind: &'static str,
        fields: Vec<String>,
    },
}

/// Result type for keyed store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
