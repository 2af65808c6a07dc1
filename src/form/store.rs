use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Flat mapping from field id to its current value.
///
/// Keys span the header fields and every field of every tab; values of
/// inactive tabs are kept. Entries are only added or overwritten, never
/// removed one by one; `clear` drops everything at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormStore {
    values: IndexMap<String, String>,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, or the empty string when the key was never set.
    pub fn get(&self, id: &str) -> &str {
        self.value(id).unwrap_or("")
    }

    /// Like `get` but tells "never set" apart from "set to empty".
    pub fn value(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(id.into(), value.into());
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in first-write order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect::<Map<_, _>>(),
        )
    }
}
