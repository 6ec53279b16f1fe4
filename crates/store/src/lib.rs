//! Schema-checked keyed record store.
//!
//! [`KeyedStore`] is the container both ledgers are built on. It owns its
//! records outright, enforces key uniqueness, and rejects any record whose
//! field set is not a subset of the schema declared by the record type.

pub mod error;
pub mod keyed;
pub mod schema;

pub use error::{Result, StoreError};
pub use keyed::KeyedStore;
pub use schema::Schema;
