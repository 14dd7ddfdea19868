//! Owned document behind the top-level builders.

use serde_json::{Map, Value};

use crate::embodied::Body;

/// Mutable document shared by the top-level builders.
///
/// Array-valued sections only ever grow by appending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    body: Body,
}

impl Document {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn as_value(&self) -> Value {
        Value::Object(self.body.clone())
    }

    pub(crate) fn get(&self, section: &str) -> Option<&Value> {
        self.body.get(section)
    }

    /// Replaces a scalar section.
    pub(crate) fn set(&mut self, section: &str, value: impl Into<Value>) {
        self.body.insert(section.to_string(), value.into());
    }

    /// Appends one entry to an array section, creating it on first use.
    pub(crate) fn push(&mut self, section: &str, entry: Value) {
        tracing::trace!(section, "append section entry");
        self.extend(section, std::iter::once(entry));
    }

    /// Appends every entry to an array section, keeping their order.
    pub(crate) fn extend(&mut self, section: &str, entries: impl IntoIterator<Item = Value>) {
        match self.body.get_mut(section) {
            Some(Value::Array(items)) => items.extend(entries),
            _ => {
                self.body
                    .insert(section.to_string(), Value::Array(entries.into_iter().collect()));
            }
        }
    }

    /// Inserts or replaces `key` inside an object section.
    pub(crate) fn insert_keyed(&mut self, section: &str, key: &str, entry: Value) {
        match self.body.get_mut(section) {
            Some(Value::Object(map)) => {
                map.insert(key.to_string(), entry);
            }
            _ => {
                let mut map = Map::new();
                map.insert(key.to_string(), entry);
                self.body.insert(section.to_string(), Value::Object(map));
            }
        }
    }
}

/// Access to the document of a top-level builder.
///
/// Lives in a private module, so only this crate can implement the traits
/// built on it.
pub trait HasDocument {
    /// Returns the document.
    fn document(&self) -> &Document;

    /// Returns the document for mutation.
    fn document_mut(&mut self) -> &mut Document;
}
