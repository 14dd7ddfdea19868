//! Argument shapes accepted by the filter factories and by the query and
//! search stages.
//!
//! Each polymorphic parameter is one of the enums below, built through `From`
//! impls on filters and tuples and resolved in exactly one place.

use serde_json::{Map, Value};

use super::Filter;
use crate::embodied::{to_body, Operand};
use crate::geo::{BoundingBox, Circle};
use crate::range::Range;

/// A filter, or the arguments to build one with [`Filter::field`] /
/// [`Filter::field_op`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterArg {
    /// An existing filter, used as is.
    Filter(Filter),
    /// `field = value`.
    FieldValue {
        /// Field name.
        field: String,
        /// Compared value.
        value: Value,
    },
    /// `field <operator> value`.
    FieldOperatorValue {
        /// Field name.
        field: String,
        /// Operator, passed through verbatim.
        operator: String,
        /// Operator argument.
        value: Value,
    },
}

impl FilterArg {
    /// Resolves to a filter.
    #[must_use]
    pub fn into_filter(self) -> Filter {
        match self {
            Self::Filter(filter) => filter,
            Self::FieldValue { field, value } => Filter::field(field, value),
            Self::FieldOperatorValue {
                field,
                operator,
                value,
            } => Filter::field_op(field, operator, value),
        }
    }
}

impl From<Filter> for FilterArg {
    fn from(filter: Filter) -> Self {
        Self::Filter(filter)
    }
}

impl From<&Filter> for FilterArg {
    fn from(filter: &Filter) -> Self {
        Self::Filter(filter.clone())
    }
}

impl<F: Into<String>, V: Into<Value>> From<(F, V)> for FilterArg {
    fn from((field, value): (F, V)) -> Self {
        Self::FieldValue {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl<F: Into<String>, O: Into<String>, V: Into<Value>> From<(F, O, V)> for FilterArg {
    fn from((field, operator, value): (F, O, V)) -> Self {
        Self::FieldOperatorValue {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// Arguments of the text operators (`match`, `phrase`, `prefix`, `fuzzy`,
/// `similar`).
///
/// A lone string is query text applied to every field ([`Filter::ALL`]). A
/// second string turns the first one into the field name.
#[derive(Debug, Clone, PartialEq)]
pub struct TextArgs {
    /// Target field; `None` targets all fields.
    pub field: Option<String>,
    /// Query text.
    pub query: String,
    /// Fuzziness, used by `fuzzy` only.
    pub fuzziness: Option<Value>,
}

impl TextArgs {
    /// Query text over all fields.
    #[must_use]
    pub fn all(query: impl Into<String>) -> Self {
        Self {
            field: None,
            query: query.into(),
            fuzziness: None,
        }
    }

    /// Query text over one field.
    #[must_use]
    pub fn field(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            query: query.into(),
            fuzziness: None,
        }
    }

    /// Sets the fuzziness.
    #[must_use]
    pub fn with_fuzziness(mut self, fuzziness: impl Into<Value>) -> Self {
        self.fuzziness = Some(fuzziness.into());
        self
    }

    /// Splits into the target field and the `{query, fuzziness?}` value.
    pub(crate) fn resolve(self, with_fuzziness: bool) -> (String, Value) {
        let field = self.field.unwrap_or_else(|| Filter::ALL.to_string());
        let mut value = Map::new();
        value.insert("query".to_string(), Value::String(self.query));
        if with_fuzziness {
            if let Some(fuzziness) = self.fuzziness.filter(|f| !f.is_null()) {
                value.insert("fuzziness".to_string(), fuzziness);
            }
        }
        (field, Value::Object(value))
    }
}

impl From<&str> for TextArgs {
    fn from(query: &str) -> Self {
        Self::all(query)
    }
}

impl From<String> for TextArgs {
    fn from(query: String) -> Self {
        Self::all(query)
    }
}

impl From<(&str, &str)> for TextArgs {
    fn from((field, query): (&str, &str)) -> Self {
        Self::field(field, query)
    }
}

impl From<(String, String)> for TextArgs {
    fn from((field, query): (String, String)) -> Self {
        Self::field(field, query)
    }
}

impl From<(&str, i32)> for TextArgs {
    fn from((query, fuzziness): (&str, i32)) -> Self {
        Self::all(query).with_fuzziness(fuzziness)
    }
}

impl From<(&str, f64)> for TextArgs {
    fn from((query, fuzziness): (&str, f64)) -> Self {
        Self::all(query).with_fuzziness(fuzziness)
    }
}

impl From<(&str, &str, i32)> for TextArgs {
    fn from((field, query, fuzziness): (&str, &str, i32)) -> Self {
        Self::field(field, query).with_fuzziness(fuzziness)
    }
}

impl From<(&str, &str, f64)> for TextArgs {
    fn from((field, query, fuzziness): (&str, &str, f64)) -> Self {
        Self::field(field, query).with_fuzziness(fuzziness)
    }
}

/// Arguments of [`Query::search`](crate::Query::search) and the search
/// stages.
///
/// Resolution order: field + operator + value builds a plain condition;
/// field + text builds a `match` on that field; bare text builds a `match`
/// over all fields; a filter is used as is; nothing (or empty text) adds no
/// filter.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchArg {
    /// No filter.
    None,
    /// An existing filter.
    Filter(Filter),
    /// Text matched across all fields.
    Text(String),
    /// Text matched on one field.
    FieldText(String, String),
    /// A plain `field <operator> value` condition.
    FieldOperatorValue(String, String, Value),
}

impl SearchArg {
    /// Resolves to zero or one filter.
    #[must_use]
    pub fn into_filter(self) -> Option<Filter> {
        match self {
            Self::None => None,
            Self::Filter(filter) => Some(filter),
            Self::Text(text) if text.is_empty() => None,
            Self::Text(text) => Some(Filter::text_match(text)),
            Self::FieldText(field, text) => Some(Filter::text_match((field, text))),
            Self::FieldOperatorValue(field, operator, value) => {
                Some(Filter::field_op(field, operator, value))
            }
        }
    }
}

impl From<Filter> for SearchArg {
    fn from(filter: Filter) -> Self {
        Self::Filter(filter)
    }
}

impl From<&Filter> for SearchArg {
    fn from(filter: &Filter) -> Self {
        Self::Filter(filter.clone())
    }
}

impl From<Option<Filter>> for SearchArg {
    fn from(filter: Option<Filter>) -> Self {
        filter.map_or(Self::None, Self::Filter)
    }
}

impl From<&str> for SearchArg {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for SearchArg {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<(&str, &str)> for SearchArg {
    fn from((field, text): (&str, &str)) -> Self {
        Self::FieldText(field.to_string(), text.to_string())
    }
}

impl From<(String, String)> for SearchArg {
    fn from((field, text): (String, String)) -> Self {
        Self::FieldText(field, text)
    }
}

impl<F: Into<String>, O: Into<String>, V: Into<Value>> From<(F, O, V)> for SearchArg {
    fn from((field, operator, value): (F, O, V)) -> Self {
        Self::FieldOperatorValue(field.into(), operator.into(), value.into())
    }
}

/// Argument of [`Filter::range`]: a [`Range`] or a `(min, max)` pair where
/// `null` leaves that side open.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeArg(pub Range);

impl From<Range> for RangeArg {
    fn from(range: Range) -> Self {
        Self(range)
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for RangeArg {
    fn from((min, max): (A, B)) -> Self {
        Self(Range::range(Some(min.into()), Some(max.into())))
    }
}

/// Argument of [`Filter::distance`]: a circle, or a location and a range of
/// distances.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceArg {
    /// Center and radius; the radius becomes the upper bound.
    Circle(Circle),
    /// A location and a distance range.
    Location(Value, Range),
}

impl DistanceArg {
    /// A location and a maximum distance.
    pub fn within(location: impl Into<Operand>, max: impl Into<Value>) -> Self {
        Self::Location(to_body(location), Range::to(max))
    }

    pub(crate) fn resolve(self) -> (Value, Range) {
        match self {
            Self::Circle(circle) => (
                circle.get_center().clone(),
                Range::to(circle.get_radius().clone()),
            ),
            Self::Location(location, range) => (location, range),
        }
    }
}

impl From<Circle> for DistanceArg {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}

impl<L: Into<Operand>> From<(L, Range)> for DistanceArg {
    fn from((location, range): (L, Range)) -> Self {
        Self::Location(to_body(location), range)
    }
}

/// Argument of [`Filter::bounding_box`]: a box or its two corners.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxArg {
    /// A bounding box value.
    Box(BoundingBox),
    /// Upper-left and lower-right corners.
    Corners(Value, Value),
}

impl BoxArg {
    pub(crate) fn into_points(self) -> Vec<Value> {
        match self {
            Self::Box(bbox) => bbox.get_points(),
            Self::Corners(upper_left, lower_right) => vec![upper_left, lower_right],
        }
    }
}

impl From<BoundingBox> for BoxArg {
    fn from(bbox: BoundingBox) -> Self {
        Self::Box(bbox)
    }
}

impl<A: Into<Operand>, B: Into<Operand>> From<(A, B)> for BoxArg {
    fn from((upper_left, lower_right): (A, B)) -> Self {
        Self::Corners(to_body(upper_left), to_body(lower_right))
    }
}
