//! Error types for `apiquery`.
//!
//! Builders never fail: malformed operators and values are serialized as
//! given and the receiving service reports them. The errors below come from
//! the edges of the crate (expression parsing, configuration, rendering) and
//! from [`require`], the parameter assertion used before any request is
//! built.

use thiserror::Error;

/// Result type alias for `apiquery` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `apiquery` operations.
///
/// Error codes follow the pattern `AQ-XXX`.
#[derive(Error, Debug)]
pub enum Error {
    /// A required parameter was absent or empty (AQ-001).
    #[error("[AQ-001] {0}")]
    MissingParameter(String),

    /// A textual filter, sort or highlight expression is malformed (AQ-002).
    #[error("[AQ-002] Invalid expression: {0}")]
    InvalidExpression(String),

    /// A document could not be rendered as JSON (AQ-003).
    #[error("[AQ-003] Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (AQ-004).
    #[error("[AQ-004] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "AQ-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) => "AQ-001",
            Self::InvalidExpression(_) => "AQ-002",
            Self::Serialization(_) => "AQ-003",
            Self::Config(_) => "AQ-004",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Returns the value when present, or fails with `message`.
///
/// Strings that are empty after trimming count as absent.
///
/// # Errors
///
/// Returns [`Error::MissingParameter`] carrying `message`.
pub fn require<T: Presence>(value: Option<T>, message: &str) -> Result<T> {
    match value {
        Some(v) if v.is_present() => Ok(v),
        _ => Err(Error::MissingParameter(message.to_string())),
    }
}

/// Whether a supplied value counts as "specified" for [`require`].
pub trait Presence {
    /// Returns `false` for values that should be reported as missing.
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for &str {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for serde_json::Value {
    fn is_present(&self) -> bool {
        !self.is_null()
    }
}

impl Presence for u64 {
    fn is_present(&self) -> bool {
        true
    }
}
