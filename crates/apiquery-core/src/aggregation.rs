//! Statistical aggregations computed over query results.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apiquery_core::{Aggregation, Query, QueryOptions, Range};
//!
//! let query = Query::builder()
//!     .aggregate("mean_age", Aggregation::avg("age"))
//!     .aggregate("brackets", Aggregation::range("age", [Range::to(18), Range::from(18)]));
//! ```

use serde_json::{json, Value};

use crate::embodied::{to_body, Embodied, Operand};
use crate::range::Range;

/// A field, an operator and an optional operator argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    field: String,
    operator: String,
    value: Option<Value>,
}

impl Aggregation {
    /// Creates an aggregation without an argument.
    #[must_use]
    pub fn new(field: impl Into<String>, operator: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: None,
        }
    }

    /// Creates an aggregation with an argument. A `null` argument is dropped.
    #[must_use]
    pub fn field(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let value = value.into();
        Self {
            field: field.into(),
            operator: operator.into(),
            value: (!value.is_null()).then_some(value),
        }
    }

    /// Average of a numeric field.
    #[must_use]
    pub fn avg(field: impl Into<String>) -> Self {
        Self::new(field, "avg")
    }

    /// Number of values.
    #[must_use]
    pub fn count(field: impl Into<String>) -> Self {
        Self::new(field, "count")
    }

    /// Distinct values.
    #[must_use]
    pub fn distinct(field: impl Into<String>) -> Self {
        Self::new(field, "distinct")
    }

    /// Count, sum, min, max, average and deviation in one result.
    #[must_use]
    pub fn extended_stats(field: impl Into<String>) -> Self {
        Self::new(field, "extendedStats")
    }

    /// Buckets values into fixed-width intervals.
    #[must_use]
    pub fn histogram(field: impl Into<String>, interval: impl Into<Value>) -> Self {
        Self::field(field, "histogram", interval)
    }

    /// Largest value.
    #[must_use]
    pub fn max(field: impl Into<String>) -> Self {
        Self::new(field, "max")
    }

    /// Smallest value.
    #[must_use]
    pub fn min(field: impl Into<String>) -> Self {
        Self::new(field, "min")
    }

    /// Number of documents lacking the field.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "missing")
    }

    /// Count, sum, min, max and average in one result.
    #[must_use]
    pub fn stats(field: impl Into<String>) -> Self {
        Self::new(field, "stats")
    }

    /// Sum of a numeric field.
    #[must_use]
    pub fn sum(field: impl Into<String>) -> Self {
        Self::new(field, "sum")
    }

    /// Most frequent terms.
    #[must_use]
    pub fn terms(field: impl Into<String>) -> Self {
        Self::new(field, "terms")
    }

    /// Buckets values into the given ranges.
    #[must_use]
    pub fn range(field: impl Into<String>, ranges: impl IntoIterator<Item = Range>) -> Self {
        let ranges: Vec<Value> = ranges.into_iter().map(|r| r.body()).collect();
        Self::field(field, "range", Value::Array(ranges))
    }

    /// Buckets geo distances from `location` into the given ranges.
    #[must_use]
    pub fn distance(
        field: impl Into<String>,
        location: impl Into<Operand>,
        ranges: impl IntoIterator<Item = Range>,
    ) -> Self {
        let ranges: Vec<Value> = ranges.into_iter().map(|r| r.body()).collect();
        Self::field(
            field,
            "geoDistance",
            json!({ "location": to_body(location), "ranges": ranges }),
        )
    }

    /// Adds a bucket to a `range` or distance aggregation.
    ///
    /// Other aggregations are returned unchanged.
    #[must_use]
    pub fn add_range(mut self, range: Range) -> Self {
        match &mut self.value {
            Some(Value::Array(ranges)) => ranges.push(range.body()),
            Some(Value::Object(map)) => {
                if let Some(Value::Array(ranges)) = map.get_mut("ranges") {
                    ranges.push(range.body());
                }
            }
            _ => {}
        }
        self
    }

    /// Returns the field name.
    #[must_use]
    pub fn get_field(&self) -> &str {
        &self.field
    }

    /// Returns the operator.
    #[must_use]
    pub fn get_operator(&self) -> &str {
        &self.operator
    }

    /// Returns the operator argument, if any.
    #[must_use]
    pub fn get_value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

/// Second argument of [`QueryOptions::aggregate`](crate::QueryOptions::aggregate):
/// an aggregation, or a `(field, operator)` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationArg {
    /// An aggregation built elsewhere.
    Aggregation(Aggregation),
    /// A field and an operator without argument.
    FieldOperator(String, String),
}

impl AggregationArg {
    /// Resolves to an [`Aggregation`].
    #[must_use]
    pub fn into_aggregation(self) -> Aggregation {
        match self {
            Self::Aggregation(a) => a,
            Self::FieldOperator(field, operator) => Aggregation::new(field, operator),
        }
    }
}

impl From<Aggregation> for AggregationArg {
    fn from(a: Aggregation) -> Self {
        Self::Aggregation(a)
    }
}

impl From<&Aggregation> for AggregationArg {
    fn from(a: &Aggregation) -> Self {
        Self::Aggregation(a.clone())
    }
}

impl<F: Into<String>, O: Into<String>> From<(F, O)> for AggregationArg {
    fn from((field, operator): (F, O)) -> Self {
        Self::FieldOperator(field.into(), operator.into())
    }
}
