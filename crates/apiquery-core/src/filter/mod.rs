//! Composable filter predicates.
//!
//! A filter names a field, an operator and a value, serialized as
//! `{field: {"operator": ..., "value": ...}}`. Filters compose with
//! [`Filter::and`], [`Filter::or`] and [`Filter::not`] into a flat chain
//! (see [`Filter::add`]).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apiquery_core::{Filter, Range};
//!
//! // Simple comparison
//! let adults = Filter::gte("age", 18);
//!
//! // Full-text match on all fields, then on one field
//! let any = Filter::text_match("foo");
//! let named = Filter::text_match(("name", "foo"));
//!
//! // Chained composition
//! let filter = Filter::gt("age", 12).and(("name", "a")).or(Filter::exists("email"));
//! ```
//!
//! No validation happens here: unknown operators and odd values are
//! serialized as given and left for the receiving service to reject.

mod args;
mod body;

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};

pub use args::{BoxArg, DistanceArg, FilterArg, RangeArg, SearchArg, TextArgs};
use body::FilterBody;

use crate::embodied::{embodied_operand, to_body, Embodied, Operand};

/// Operators understood by the receiving service.
///
/// Filter constructors accept any `Into<String>` operator, so values outside
/// this list pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// Field holds any of the values.
    Any,
    /// Field holds none of the values.
    None,
    /// Field is present.
    Exists,
    /// Field is absent.
    Missing,
    /// Analyzed full-text match.
    Match,
    /// Exact phrase match.
    Phrase,
    /// Term prefix.
    Prefix,
    /// Fuzzy term match.
    Fuzzy,
    /// More-like-this similarity.
    Similar,
    /// Regular expression (`~`).
    Regex,
    /// Glob-style wildcard.
    Wildcard,
    /// Inclusive range.
    Range,
    /// Geo distance (`gd`).
    GeoDistance,
    /// Geo polygon (`gp`).
    GeoPolygon,
    /// Geo shape (`gs`).
    GeoShape,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 21] = [
        Self::Equal,
        Self::NotEqual,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Any,
        Self::None,
        Self::Exists,
        Self::Missing,
        Self::Match,
        Self::Phrase,
        Self::Prefix,
        Self::Fuzzy,
        Self::Similar,
        Self::Regex,
        Self::Wildcard,
        Self::Range,
        Self::GeoDistance,
        Self::GeoPolygon,
        Self::GeoShape,
    ];

    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Any => "any",
            Self::None => "none",
            Self::Exists => "exists",
            Self::Missing => "missing",
            Self::Match => "match",
            Self::Phrase => "phrase",
            Self::Prefix => "prefix",
            Self::Fuzzy => "fuzzy",
            Self::Similar => "similar",
            Self::Regex => "~",
            Self::Wildcard => "wildcard",
            Self::Range => "range",
            Self::GeoDistance => "gd",
            Self::GeoPolygon => "gp",
            Self::GeoShape => "gs",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operator '{s}'"))
    }
}

/// A filter predicate or a chain of composed predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    body: FilterBody,
}

impl Filter {
    /// Field name meaning "every field".
    pub const ALL: &'static str = "*";

    /// Creates an equality filter.
    #[must_use]
    pub fn field(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field_op(field, Operator::Equal, value)
    }

    /// Creates a filter with an explicit operator.
    #[must_use]
    pub fn field_op(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            body: FilterBody::condition(field.into(), operator.into(), value.into()),
        }
    }

    /// Returns the argument if it is a filter, otherwise builds one.
    #[must_use]
    pub fn to_filter(arg: impl Into<FilterArg>) -> Self {
        arg.into().into_filter()
    }

    /// `field = value`
    #[must_use]
    pub fn equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field_op(field, Operator::Equal, value)
    }

    /// `field != value`
    #[must_use]
    pub fn not_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field_op(field, Operator::NotEqual, value)
    }

    /// `field > value`
    #[must_use]
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field_op(field, Operator::Gt, value)
    }

    /// `field >= value`
    #[must_use]
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field_op(field, Operator::Gte, value)
    }

    /// `field < value`
    #[must_use]
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field_op(field, Operator::Lt, value)
    }

    /// `field <= value`
    #[must_use]
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field_op(field, Operator::Lte, value)
    }

    /// Regular expression match.
    #[must_use]
    pub fn regex(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field_op(field, Operator::Regex, value)
    }

    /// Wildcard match (`*` and `?`).
    #[must_use]
    pub fn wildcard(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field_op(field, Operator::Wildcard, value)
    }

    /// Field is present.
    #[must_use]
    pub fn exists(field: impl Into<String>) -> Self {
        Self::field_op(field, Operator::Exists, Value::Null)
    }

    /// Field is absent.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::field_op(field, Operator::Missing, Value::Null)
    }

    /// Field holds any of `values`.
    #[must_use]
    pub fn any<V: Into<Value>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::field_op(field, Operator::Any, collect_values(values))
    }

    /// Field holds none of `values`.
    #[must_use]
    pub fn none<V: Into<Value>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::field_op(field, Operator::None, collect_values(values))
    }

    /// Full-text match. `"text"` searches all fields, `("field", "text")`
    /// one field.
    #[must_use]
    pub fn text_match(args: impl Into<TextArgs>) -> Self {
        Self::text(Operator::Match, args.into(), false)
    }

    /// Exact phrase match, with the same arguments as [`Filter::text_match`].
    #[must_use]
    pub fn phrase(args: impl Into<TextArgs>) -> Self {
        Self::text(Operator::Phrase, args.into(), false)
    }

    /// Prefix match, with the same arguments as [`Filter::text_match`].
    #[must_use]
    pub fn prefix(args: impl Into<TextArgs>) -> Self {
        Self::text(Operator::Prefix, args.into(), false)
    }

    /// Fuzzy match. Accepts `text`, `(text, fuzziness)`, `(field, text)` or
    /// `(field, text, fuzziness)`.
    #[must_use]
    pub fn fuzzy(args: impl Into<TextArgs>) -> Self {
        Self::text(Operator::Fuzzy, args.into(), true)
    }

    /// Similarity match, with the same arguments as [`Filter::text_match`].
    #[must_use]
    pub fn similar(args: impl Into<TextArgs>) -> Self {
        Self::text(Operator::Similar, args.into(), false)
    }

    fn text(operator: Operator, args: TextArgs, with_fuzziness: bool) -> Self {
        let (field, value) = args.resolve(with_fuzziness);
        Self::field_op(field, operator, value)
    }

    /// Value lies within an inclusive range: a [`Range`](crate::Range) or a
    /// `(min, max)` pair.
    #[must_use]
    pub fn range(field: impl Into<String>, range: impl Into<RangeArg>) -> Self {
        let RangeArg(range) = range.into();
        Self::field_op(field, Operator::Range, range.body())
    }

    /// Geo distance from a location, bounded by a range or a circle radius.
    #[must_use]
    pub fn distance(field: impl Into<String>, arg: impl Into<DistanceArg>) -> Self {
        let (location, range) = arg.into().resolve();
        let mut value = json!({ "location": location });
        if let Some(min) = range.get_from() {
            value["min"] = min.clone();
        }
        if let Some(max) = range.get_to() {
            value["max"] = max.clone();
        }
        Self::field_op(field, Operator::GeoDistance, value)
    }

    /// Point lies inside the box.
    #[must_use]
    pub fn bounding_box(field: impl Into<String>, arg: impl Into<BoxArg>) -> Self {
        Self::polygon(field, arg.into().into_points())
    }

    /// Point lies inside the polygon through `points`.
    #[must_use]
    pub fn polygon<P: Into<Operand>>(
        field: impl Into<String>,
        points: impl IntoIterator<Item = P>,
    ) -> Self {
        let points: Vec<Value> = points.into_iter().map(to_body).collect();
        Self::field_op(field, Operator::GeoPolygon, points)
    }

    /// Geometry intersects any of `shapes`.
    #[must_use]
    pub fn shape<S: Into<Operand>>(
        field: impl Into<String>,
        shapes: impl IntoIterator<Item = S>,
    ) -> Self {
        let geometries: Vec<Value> = shapes.into_iter().map(to_body).collect();
        Self::field_op(
            field,
            Operator::GeoShape,
            json!({ "type": "geometrycollection", "geometries": geometries }),
        )
    }

    /// Negates a filter by appending a `not` entry to its chain.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(arg: impl Into<FilterArg>) -> Self {
        Self::to_filter(arg).add_operator("not")
    }

    /// Composes with another filter under `operator`.
    ///
    /// The first composition rewrites the body into
    /// `{field: [{op: <this body>}, {op: <other body>}]}`; every later one
    /// appends `{op: <other body>}` to that array. The other filter's body is
    /// copied at this point.
    #[must_use]
    pub fn add(mut self, operator: impl Into<String>, filter: impl Into<FilterArg>) -> Self {
        let other = Self::to_filter(filter).body();
        self.body.compose(&operator.into(), Some(other));
        self
    }

    /// Like [`Filter::add`], but a missing filter leaves `self` untouched.
    #[must_use]
    pub fn add_optional(self, operator: impl Into<String>, filter: Option<Filter>) -> Self {
        match filter {
            Some(filter) => self.add(operator, filter),
            None => self,
        }
    }

    /// Records `operator` in the chain without an operand.
    #[must_use]
    pub fn add_operator(mut self, operator: impl Into<String>) -> Self {
        self.body.compose(&operator.into(), None);
        self
    }

    /// Folds every filter into the chain under `operator`, in order.
    #[must_use]
    pub fn add_many<F: Into<FilterArg>>(
        self,
        operator: impl Into<String>,
        filters: impl IntoIterator<Item = F>,
    ) -> Self {
        let operator = operator.into();
        filters
            .into_iter()
            .fold(self, |acc, filter| acc.add(operator.as_str(), filter))
    }

    /// `self AND other`
    #[must_use]
    pub fn and(self, filter: impl Into<FilterArg>) -> Self {
        self.add("and", filter)
    }

    /// `self OR other`
    #[must_use]
    pub fn or(self, filter: impl Into<FilterArg>) -> Self {
        self.add("or", filter)
    }

    /// Returns the field this filter is keyed by.
    #[must_use]
    pub fn field_name(&self) -> &str {
        self.body.field()
    }

    /// Returns `true` once the filter has been composed.
    #[must_use]
    pub fn is_composed(&self) -> bool {
        self.body.is_chain()
    }
}

fn collect_values<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Value {
    Value::Array(values.into_iter().map(Into::into).collect())
}

impl Embodied for Filter {
    fn body(&self) -> Value {
        self.body.to_value()
    }
}

embodied_operand!(Filter);
