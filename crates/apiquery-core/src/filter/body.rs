//! Wire representation of a filter and its composition chain.

use serde_json::{json, Map, Value};

/// Body of a [`Filter`](super::Filter).
///
/// A fresh filter is a single condition `{field: {operator, value}}`. The
/// first composition turns it into a chain keyed by the same field:
/// `{field: [{op: <original body>}, {op: <other body>}]}`. Later compositions
/// append to that array, so `a.and(b).and(c)` yields one flat, left-to-right
/// chain instead of nested pairs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FilterBody {
    Condition {
        field: String,
        operator: String,
        value: Value,
    },
    Chain {
        field: String,
        entries: Vec<Value>,
    },
}

impl FilterBody {
    pub(crate) fn condition(field: String, operator: String, value: Value) -> Self {
        Self::Condition {
            field,
            operator,
            value,
        }
    }

    pub(crate) fn field(&self) -> &str {
        match self {
            Self::Condition { field, .. } | Self::Chain { field, .. } => field,
        }
    }

    pub(crate) fn is_chain(&self) -> bool {
        matches!(self, Self::Chain { .. })
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut body = Map::new();
        match self {
            Self::Condition {
                field,
                operator,
                value,
            } => {
                body.insert(
                    field.clone(),
                    json!({ "operator": operator, "value": value }),
                );
            }
            Self::Chain { field, entries } => {
                body.insert(field.clone(), Value::Array(entries.clone()));
            }
        }
        Value::Object(body)
    }

    /// Folds `other` into the chain under `operator`.
    ///
    /// With no operand, the operator alone is recorded: it wraps the original
    /// body on first composition and appends `{operator: null}` afterwards.
    pub(crate) fn compose(&mut self, operator: &str, other: Option<Value>) {
        tracing::trace!(field = self.field(), operator, "compose filter");
        if let Self::Chain { entries, .. } = self {
            entries.push(entry(operator, other.unwrap_or(Value::Null)));
            return;
        }

        let mut entries = vec![entry(operator, self.to_value())];
        if let Some(other) = other {
            entries.push(entry(operator, other));
        }
        *self = Self::Chain {
            field: self.field().to_string(),
            entries,
        };
    }
}

fn entry(operator: &str, body: Value) -> Value {
    let mut map = Map::new();
    map.insert(operator.to_string(), body);
    Value::Object(map)
}
