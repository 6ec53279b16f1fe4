//! Record schemas.

use std::fmt::Display;

/// A record type that can be held by a [`KeyedStore`](crate::KeyedStore).
///
/// The schema is the fixed set of field names a record of this kind may
/// carry. A record reports the field names it actually carries through
/// [`Schema::field_names`]; any name outside [`Schema::ALLOWED_FIELDS`]
/// makes the record unstorable.
pub trait Schema: Clone + Send + Sync + 'static {
    /// Key type records are stored under.
    type Key: Ord + Clone + Display + Send + Sync + 'static;

    /// Human-readable record kind, used in errors, logs and metric labels.
    const KIND: &'static str;

    /// Field names a record of this kind may contain.
    const ALLOWED_FIELDS: &'static [&'static str];

    /// Returns the names of the fields this record carries.
    fn field_names(&self) -> Vec<String>;

    /// Returns the carried field names that fall outside the schema, sorted.
    fn unknown_fields(&self) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .field_names()
            .into_iter()
            .filter(|name| !Self::ALLOWED_FIELDS.contains(&name.as_str()))
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }
}
