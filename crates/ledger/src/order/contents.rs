use std::fmt;
use std::num::NonZeroU32;

use common::ItemName;
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The items an order asks for, with their quantities.
///
/// Behaves as a mapping from item name to quantity that remembers insertion
/// order: fulfillment takes stock item by item in this order. Quantities
/// are positive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contents(IndexMap<ItemName, NonZeroU32>);

impl Contents {
    /// Creates empty contents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quantity of `item`, returning the quantity it replaced.
    ///
    /// A replaced item keeps its original position.
    pub fn insert(&mut self, item: ItemName, quantity: NonZeroU32) -> Option<NonZeroU32> {
        self.0.insert(item, quantity)
    }

    /// Returns the quantity requested for `item`.
    pub fn get(&self, item: &ItemName) -> Option<NonZeroU32> {
        self.0.get(item).copied()
    }

    /// Iterates over `(item, quantity)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemName, NonZeroU32)> {
        self.0.iter().map(|(name, quantity)| (name, *quantity))
    }

    /// Returns the item names in insertion order.
    pub fn item_names(&self) -> Vec<ItemName> {
        self.0.keys().cloned().collect()
    }

    /// Returns the number of distinct items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no items are requested.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ItemName, NonZeroU32)> for Contents {
    fn from_iter<T: IntoIterator<Item = (ItemName, NonZeroU32)>>(iter: T) -> Self {
        let mut contents = Contents::new();
        for (item, quantity) in iter {
            contents.insert(item, quantity);
        }
        contents
    }
}

impl Serialize for Contents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (item, quantity) in &self.0 {
            map.serialize_entry(item, quantity)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Contents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ContentsVisitor)
    }
}

struct ContentsVisitor;

impl<'de> Visitor<'de> for ContentsVisitor {
    type Value = Contents;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of item names to positive quantities")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Contents, A::Error> {
        let mut contents = Contents(IndexMap::with_capacity(access.size_hint().unwrap_or(0)));
        while let Some((item, quantity)) = access.next_entry::<ItemName, NonZeroU32>()? {
            if contents.0.contains_key(&item) {
                return Err(serde::de::Error::custom(format!("duplicate item `{item}`")));
            }
            contents.0.insert(item, quantity);
        }
        Ok(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_keeps_insertion_order() {
        let contents: Contents = [
            (ItemName::new("zeta"), qty(1)),
            (ItemName::new("alpha"), qty(2)),
            (ItemName::new("mid"), qty(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            contents.item_names(),
            vec![
                ItemName::new("zeta"),
                ItemName::new("alpha"),
                ItemName::new("mid")
            ]
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut contents = Contents::new();
        contents.insert(ItemName::new("a"), qty(1));
        contents.insert(ItemName::new("b"), qty(2));

        assert_eq!(contents.insert(ItemName::new("a"), qty(9)), Some(qty(1)));
        assert_eq!(contents.len(), 2);
        assert_eq!(contents.get(&ItemName::new("a")), Some(qty(9)));
        assert_eq!(contents.item_names()[0], ItemName::new("a"));
    }

    #[test]
    fn test_json_preserves_document_order() {
        let contents: Contents = serde_json::from_str(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        assert_eq!(
            contents.item_names(),
            vec![ItemName::new("zeta"), ItemName::new("alpha")]
        );
        assert_eq!(
            serde_json::to_string(&contents).unwrap(),
            r#"{"zeta":1,"alpha":2}"#
        );
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let result: Result<Contents, _> = serde_json::from_str(r#"{"sim": 0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_negative_quantity() {
        let result: Result<Contents, _> = serde_json::from_str(r#"{"sim": -3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_duplicate_items() {
        let result: Result<Contents, _> = serde_json::from_str(r#"{"sim": 1, "sim": 2}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("duplicate item `sim`"));
    }

    #[test]
    fn test_parses_large_order_in_linear_time() {
        let n = 100_000;
        let body = format!(
            "{{{}}}",
            (0..n)
                .map(|i| format!("\"item-{i:06}\":{}", i % 7 + 1))
                .collect::<Vec<_>>()
                .join(",")
        );

        let start = std::time::Instant::now();
        let contents: Contents = serde_json::from_str(&body).unwrap();
        let elapsed = start.elapsed();

        assert_eq!(contents.len(), n);
        assert_eq!(contents.item_names()[0], ItemName::new("item-000000"));
        assert_eq!(contents.item_names()[n - 1], ItemName::new(format!("item-{:06}", n - 1)));
        assert_eq!(contents.get(&ItemName::new("item-000013")), Some(qty(7)));
        assert!(elapsed < std::time::Duration::from_secs(5), "parse took {elapsed:?}");
    }
}
