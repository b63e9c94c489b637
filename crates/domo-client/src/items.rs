//! In-memory catalog of the last full item refresh

use indexmap::IndexMap;
use serde_json::Value;

/// Raw list payloads keyed by feature category, in feature-list order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCatalog {
    items: IndexMap<String, Value>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, category: impl Into<String>, payload: Value) {
        self.items.insert(category.into(), payload);
    }

    /// Payload stored for a category
    pub fn get(&self, category: &str) -> Option<&Value> {
        self.items.get(category)
    }

    /// Categories in the order the controller listed them
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
