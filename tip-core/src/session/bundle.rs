use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Typed key-value storage for saving session state across a screen rebuild.
pub trait StateBundle {
    fn put_string(
        &mut self,
        key: &str,
        value: &str,
    );

    fn put_int(
        &mut self,
        key: &str,
        value: i64,
    );

    fn put_bool(
        &mut self,
        key: &str,
        value: bool,
    );

    /// Returns `None` if the key is missing or holds another type.
    fn get_string(
        &self,
        key: &str,
    ) -> Option<String>;

    fn get_int(
        &self,
        key: &str,
    ) -> Option<i64>;

    fn get_bool(
        &self,
        key: &str,
    ) -> Option<bool>;
}

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BundleValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// In-memory [`StateBundle`]; serializes as a flat map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryBundle {
    values: BTreeMap<String, BundleValue>,
}

impl MemoryBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl StateBundle for MemoryBundle {
    fn put_string(
        &mut self,
        key: &str,
        value: &str,
    ) {
        self.values
            .insert(key.to_string(), BundleValue::Text(value.to_string()));
    }

    fn put_int(
        &mut self,
        key: &str,
        value: i64,
    ) {
        self.values.insert(key.to_string(), BundleValue::Int(value));
    }

    fn put_bool(
        &mut self,
        key: &str,
        value: bool,
    ) {
        self.values.insert(key.to_string(), BundleValue::Bool(value));
    }

    fn get_string(
        &self,
        key: &str,
    ) -> Option<String> {
        match self.values.get(key) {
            Some(BundleValue::Text(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn get_int(
        &self,
        key: &str,
    ) -> Option<i64> {
        match self.values.get(key) {
            Some(BundleValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    fn get_bool(
        &self,
        key: &str,
    ) -> Option<bool> {
        match self.values.get(key) {
            Some(BundleValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }
}
