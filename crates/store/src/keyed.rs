use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{Result, Schema, StoreError};

/// In-memory keyed record store.
///
/// Cloning the store is cheap and yields another handle to the same records.
/// Every operation holds the store's lock for its whole duration, so
/// operations against one store are linearizable. Records handed out are
/// clones; callers never hold an alias into the store.
pub struct KeyedStore<R: Schema> {
    records: Arc<RwLock<BTreeMap<R::Key, R>>>,
}

impl<R: Schema> KeyedStore<R> {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Returns a copy of the record stored under `key`.
    pub async fn get(&self, key: &R::Key) -> Result<R> {
        self.records
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| not_found::<R>(key))
    }

    /// Inserts `record` under `key`.
    ///
    /// The schema is checked before key uniqueness, so a record with unknown
    /// fields is rejected even when the key is already taken.
    #[tracing::instrument(skip(self, key, record), fields(kind = R::KIND, key = %key))]
    pub async fn add(&self, key: R::Key, record: R) -> Result<()> {
        let unknown = record.unknown_fields();
        if !unknown.is_empty() {
            tracing::debug!(?unknown, "rejecting record with unknown fields");
            return Err(StoreError::UnknownField {
                kind: R::KIND,
                fields: unknown,
            });
        }

        let mut records = self.records.write().await;
        if records.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                kind: R::KIND,
                key: key.to_string(),
            });
        }
        records.insert(key, record);
        metrics::counter!("store_writes_total", "store" => R::KIND, "op" => "add").increment(1);
        Ok(())
    }

    /// Removes the record stored under `key`.
    #[tracing::instrument(skip(self, key), fields(kind = R::KIND, key = %key))]
    pub async fn delete(&self, key: &R::Key) -> Result<()> {
        self.records
            .write()
            .await
            .remove(key)
            .ok_or_else(|| not_found::<R>(key))?;
        metrics::counter!("store_writes_total", "store" => R::KIND, "op" => "delete").increment(1);
        Ok(())
    }

    /// Returns a snapshot of every record in the store.
    pub async fn list(&self) -> BTreeMap<R::Key, R> {
        self.records.read().await.clone()
    }

    /// Returns true if a record exists under `key`.
    pub async fn contains(&self, key: &R::Key) -> bool {
        self.records.read().await.contains_key(key)
    }

    /// Returns the number of records in the store.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Projects a value out of the record under `key` without copying it.
    pub async fn read<T>(&self, key: &R::Key, f: impl FnOnce(&R) -> T) -> Result<T> {
        let records = self.records.read().await;
        let record = records.get(key).ok_or_else(|| not_found::<R>(key))?;
        Ok(f(record))
    }

    /// Projects a value out of each record named in `keys`, in order.
    ///
    /// All keys are resolved under a single read lock. The first missing key
    /// fails the whole call and no partial result is returned.
    pub async fn read_many<T>(&self, keys: &[R::Key], f: impl Fn(&R) -> T) -> Result<Vec<T>> {
        let records = self.records.read().await;
        keys.iter()
            .map(|key| {
                records
                    .get(key)
                    .map(&f)
                    .ok_or_else(|| not_found::<R>(key))
            })
            .collect()
    }

    /// Mutates the record under `key` in place under the write lock.
    ///
    /// The closure may refuse the mutation by returning an error; it must
    /// leave the record untouched when it does.
    pub async fn update<T, E>(
        &self,
        key: &R::Key,
        f: impl FnOnce(&mut R) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut records = self.records.write().await;
        let record = records.get_mut(key).ok_or_else(|| not_found::<R>(key))?;
        let out = f(record)?;
        metrics::counter!("store_writes_total", "store" => R::KIND, "op" => "update").increment(1);
        Ok(out)
    }
}

impl<R: Schema> Clone for KeyedStore<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R: Schema> Default for KeyedStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Schema> std::fmt::Debug for KeyedStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedStore").field("kind", &R::KIND).finish()
    }
}

fn not_found<R: Schema>(key: &R::Key) -> StoreError {
    StoreError::NotFound {
        kind: R::KIND,
        key: key.to_string(),
    }
}
