//! The body contract shared by every builder.
//!
//! A builder owns a JSON document (its *body*). When one builder is handed to
//! another, the receiver copies the body at that moment; later changes to the
//! operand are not reflected in the receiver.

use serde_json::{Map, Value};

use crate::error::Result;

/// An ordered JSON object. Key order follows insertion order.
pub type Body = Map<String, Value>;

/// A value exposing a JSON-serializable body.
pub trait Embodied {
    /// Returns a copy of the body as a JSON value.
    fn body(&self) -> Value;

    /// Renders the body as compact, canonical JSON text.
    fn to_json(&self) -> String {
        self.body().to_string()
    }

    /// Renders the body as indented JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized.
    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.body())?)
    }
}

/// A polymorphic operand: either another builder or plain JSON data.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Body captured from an [`Embodied`] value.
    Embodied(Value),
    /// A plain JSON-compatible value, used verbatim.
    Plain(Value),
}

impl Operand {
    /// Captures the body of an embodied value.
    #[must_use]
    pub fn of<E: Embodied + ?Sized>(value: &E) -> Self {
        Self::Embodied(value.body())
    }

    /// Returns the JSON this operand contributes to a parent document.
    #[must_use]
    pub fn into_body(self) -> Value {
        match self {
            Self::Embodied(v) | Self::Plain(v) => v,
        }
    }

    /// Returns `true` when the operand came from a builder.
    #[must_use]
    pub fn is_embodied(&self) -> bool {
        matches!(self, Self::Embodied(_))
    }
}

/// Normalizes an operand to the JSON it contributes to a parent document.
///
/// Builders yield their body; plain values are returned unchanged, so applying
/// this twice to plain data is the identity.
#[must_use]
pub fn to_body(operand: impl Into<Operand>) -> Value {
    operand.into().into_body()
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Plain(value)
    }
}

impl From<&Value> for Operand {
    fn from(value: &Value) -> Self {
        Self::Plain(value.clone())
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Self::Plain(Value::from(value))
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Self::Plain(Value::from(value))
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Plain(Value::from(value))
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Plain(Value::from(value))
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Self::Plain(Value::from(value))
    }
}

impl From<Vec<Value>> for Operand {
    fn from(value: Vec<Value>) -> Self {
        Self::Plain(Value::Array(value))
    }
}

/// Implements `From<T>`/`From<&T>` into [`Operand`] and `Display` as
/// canonical JSON for an [`Embodied`] type.
macro_rules! embodied_operand {
    ($ty:ty) => {
        impl From<$ty> for $crate::embodied::Operand {
            fn from(value: $ty) -> Self {
                $crate::embodied::Operand::of(&value)
            }
        }

        impl From<&$ty> for $crate::embodied::Operand {
            fn from(value: &$ty) -> Self {
                $crate::embodied::Operand::of(value)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::embodied::Embodied::to_json(self))
            }
        }
    };
}

pub(crate) use embodied_operand;
