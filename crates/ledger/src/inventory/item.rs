use std::collections::BTreeMap;

use common::ItemName;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::Schema;

/// A stored inventory item.
///
/// `extra` carries any field a caller supplied beyond the item schema. Such
/// records are rejected by the store, so a stored item always has an empty
/// `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "type")]
    pub item_type: String,
    pub description: String,
    pub count: u64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ItemRecord {
    /// Creates an item record with no extra fields.
    pub fn new(item_type: impl Into<String>, description: impl Into<String>, count: u64) -> Self {
        Self {
            item_type: item_type.into(),
            description: description.into(),
            count,
            extra: BTreeMap::new(),
        }
    }

    /// Attaches an additional field to the record.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

impl Schema for ItemRecord {
    type Key = ItemName;
    const KIND: &'static str = "Item";
    const ALLOWED_FIELDS: &'static [&'static str] = &["description", "count", "type"];

    fn field_names(&self) -> Vec<String> {
        ["type", "description", "count"]
            .into_iter()
            .map(String::from)
            .chain(self.extra.keys().cloned())
            .collect()
    }
}
