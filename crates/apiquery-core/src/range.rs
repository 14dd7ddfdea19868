//! Inclusive value ranges.

use serde_json::{Map, Value};

use crate::embodied::{embodied_operand, Embodied};

/// An inclusive lower/upper bound pair.
///
/// A missing bound means the range is open on that side. `null` bounds are
/// treated as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Range {
    from: Option<Value>,
    to: Option<Value>,
}

impl Range {
    /// Creates a range from optional bounds.
    #[must_use]
    pub fn range(from: Option<Value>, to: Option<Value>) -> Self {
        Self {
            from: bound(from),
            to: bound(to),
        }
    }

    /// Creates a range with only a lower bound.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from(from: impl Into<Value>) -> Self {
        Self {
            from: bound(Some(from.into())),
            to: None,
        }
    }

    /// Creates a range with only an upper bound.
    #[must_use]
    pub fn to(to: impl Into<Value>) -> Self {
        Self {
            from: None,
            to: bound(Some(to.into())),
        }
    }

    /// Creates a range with both bounds.
    #[must_use]
    pub fn between(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Self::range(Some(from.into()), Some(to.into()))
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn get_from(&self) -> Option<&Value> {
        self.from.as_ref()
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn get_to(&self) -> Option<&Value> {
        self.to.as_ref()
    }

    /// Returns `true` when neither bound is set.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

fn bound(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

impl Embodied for Range {
    fn body(&self) -> Value {
        let mut body = Map::new();
        if let Some(from) = &self.from {
            body.insert("from".to_string(), from.clone());
        }
        if let Some(to) = &self.to {
            body.insert("to".to_string(), to.clone());
        }
        Value::Object(body)
    }
}

embodied_operand!(Range);
