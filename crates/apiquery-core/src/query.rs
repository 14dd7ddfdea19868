//! Top-level query documents.
//!
//! A [`Query`] gathers filters, projections, sorting, paging, aggregations
//! and highlighting into one JSON document:
//!
//! ```rust,ignore
//! use apiquery_core::{query, Filter, Query, QueryOptions};
//!
//! let q = Query::builder()
//!     .filter(Filter::gt("age", 12))
//!     .fields(["name", "age"])
//!     .sort_with("age", "desc")
//!     .limit(10);
//!
//! // Module-level constructors start a fresh query
//! let count = query::filter(("status", "active")).count();
//! ```
//!
//! Array sections (`filter`, `fields`, `sort`, `aggregation`, `highlight`)
//! keep call order and are never deduplicated. Scalar sections (`type`,
//! `limit`, `offset`) are last-write-wins.

use std::fmt;

use serde_json::{Map, Value};

use crate::aggregation::AggregationArg;
use crate::document::{Document, HasDocument};
use crate::embodied::{embodied_operand, Embodied};
use crate::filter::{FilterArg, SearchArg};

/// Values of the `type` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    /// Only count matching documents.
    Count,
    /// Return matching documents.
    Fetch,
    /// Ranked full-text search.
    Search,
}

impl QueryType {
    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Fetch => "fetch",
            Self::Search => "search",
        }
    }
}

impl From<QueryType> for String {
    fn from(t: QueryType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl From<SortDirection> for String {
    fn from(d: SortDirection) -> Self {
        d.as_str().to_string()
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One or many field names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldList(pub Vec<String>);

impl From<&str> for FieldList {
    fn from(field: &str) -> Self {
        Self(vec![field.to_string()])
    }
}

impl From<String> for FieldList {
    fn from(field: String) -> Self {
        Self(vec![field])
    }
}

impl From<Vec<String>> for FieldList {
    fn from(fields: Vec<String>) -> Self {
        Self(fields)
    }
}

impl From<Vec<&str>> for FieldList {
    fn from(fields: Vec<&str>) -> Self {
        Self(fields.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for FieldList {
    fn from(fields: &[&str]) -> Self {
        Self(fields.iter().map(|f| (*f).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldList {
    fn from(fields: [&str; N]) -> Self {
        Self(fields.iter().map(|f| (*f).to_string()).collect())
    }
}

/// Sections shared by [`Query`] and [`Search`](crate::Search).
///
/// Every method appends to or overwrites one section and returns the
/// builder, so calls chain.
pub trait QueryOptions: HasDocument + Sized {
    /// Appends `{field: {name, operator, value?}}` to `aggregation`.
    ///
    /// Accepts an [`Aggregation`](crate::Aggregation) or a
    /// `(field, operator)` pair. A missing value is omitted.
    #[must_use]
    fn aggregate(mut self, name: impl Into<String>, aggregation: impl Into<AggregationArg>) -> Self {
        let aggregation = aggregation.into().into_aggregation();
        let mut entry = Map::new();
        entry.insert("name".to_string(), Value::String(name.into()));
        entry.insert(
            "operator".to_string(),
            Value::String(aggregation.get_operator().to_string()),
        );
        if let Some(value) = aggregation.get_value() {
            entry.insert("value".to_string(), value.clone());
        }
        let mut wrapper = Map::new();
        wrapper.insert(aggregation.get_field().to_string(), Value::Object(entry));
        self.document_mut()
            .push("aggregation", Value::Object(wrapper));
        self
    }

    /// Appends field names to the `fields` projection.
    #[must_use]
    fn fields(mut self, fields: impl Into<FieldList>) -> Self {
        let FieldList(fields) = fields.into();
        self.document_mut()
            .extend("fields", fields.into_iter().map(Value::String));
        self
    }

    /// Appends an ascending sort on `field`.
    #[must_use]
    fn sort(self, field: impl Into<String>) -> Self {
        self.sort_with(field, SortDirection::Asc)
    }

    /// Appends `{field: direction}` to `sort`.
    #[must_use]
    fn sort_with(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        let mut entry = Map::new();
        entry.insert(field.into(), Value::String(direction.into()));
        self.document_mut().push("sort", Value::Object(entry));
        self
    }

    /// Sets the number of results to skip.
    #[must_use]
    fn offset(mut self, offset: u64) -> Self {
        self.document_mut().set("offset", offset);
        self
    }

    /// Sets the maximum number of results.
    #[must_use]
    fn limit(mut self, limit: u64) -> Self {
        self.document_mut().set("limit", limit);
        self
    }

    /// Sets the `type` section.
    #[must_use]
    fn query_type(mut self, query_type: impl Into<String>) -> Self {
        self.document_mut()
            .set("type", Value::String(query_type.into()));
        self
    }

    /// Shorthand for `query_type("count")`.
    #[must_use]
    fn count(self) -> Self {
        self.query_type(QueryType::Count)
    }

    /// Shorthand for `query_type("fetch")`.
    #[must_use]
    fn fetch(self) -> Self {
        self.query_type(QueryType::Fetch)
    }

    /// Returns a section of the document, if set.
    fn section(&self, name: &str) -> Option<&Value> {
        self.document().get(name)
    }
}

/// A query document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    document: Document,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: Document::new(),
        }
    }

    /// Creates an empty query.
    #[must_use]
    pub fn builder() -> Self {
        Self::new()
    }

    /// Appends a filter to the `filter` section.
    ///
    /// Accepts a [`Filter`](crate::Filter), `(field, value)` or
    /// `(field, operator, value)`.
    #[must_use]
    pub fn filter(mut self, filter: impl Into<FilterArg>) -> Self {
        let filter = filter.into().into_filter();
        self.document.push("filter", filter.body());
        self
    }

    /// Marks the query as a search and appends the resolved filter, if any.
    ///
    /// Accepts a filter, `"text"` (match on all fields), `("field", "text")`
    /// or `(field, operator, value)`; see [`SearchArg`].
    #[must_use]
    pub fn search(self, arg: impl Into<SearchArg>) -> Self {
        let filter = arg.into().into_filter();
        let query = self.query_type(QueryType::Search);
        match filter {
            Some(filter) => query.filter(filter),
            None => query,
        }
    }

    /// Appends a field to the flat `highlight` list.
    #[must_use]
    pub fn highlight(mut self, field: impl Into<String>) -> Self {
        self.document.push("highlight", Value::String(field.into()));
        self
    }
}

impl HasDocument for Query {
    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

impl QueryOptions for Query {}

impl Embodied for Query {
    fn body(&self) -> Value {
        self.document.as_value()
    }
}

embodied_operand!(Query);

/// `Query::builder().aggregate(name, aggregation)`
#[must_use]
pub fn aggregate(name: impl Into<String>, aggregation: impl Into<AggregationArg>) -> Query {
    Query::builder().aggregate(name, aggregation)
}

/// `Query::builder().count()`
#[must_use]
pub fn count() -> Query {
    Query::builder().count()
}

/// `Query::builder().fetch()`
#[must_use]
pub fn fetch() -> Query {
    Query::builder().fetch()
}

/// `Query::builder().fields(fields)`
#[must_use]
pub fn fields(fields: impl Into<FieldList>) -> Query {
    Query::builder().fields(fields)
}

/// `Query::builder().filter(filter)`
#[must_use]
pub fn filter(filter: impl Into<FilterArg>) -> Query {
    Query::builder().filter(filter)
}

/// `Query::builder().highlight(field)`
#[must_use]
pub fn highlight(field: impl Into<String>) -> Query {
    Query::builder().highlight(field)
}

/// `Query::builder().limit(limit)`
#[must_use]
pub fn limit(limit: u64) -> Query {
    Query::builder().limit(limit)
}

/// `Query::builder().offset(offset)`
#[must_use]
pub fn offset(offset: u64) -> Query {
    Query::builder().offset(offset)
}

/// `Query::builder().search(arg)`
#[must_use]
pub fn search(arg: impl Into<SearchArg>) -> Query {
    Query::builder().search(arg)
}

/// `Query::builder().sort(field)`
#[must_use]
pub fn sort(field: impl Into<String>) -> Query {
    Query::builder().sort(field)
}

/// `Query::builder().sort_with(field, direction)`
#[must_use]
pub fn sort_with(field: impl Into<String>, direction: impl Into<String>) -> Query {
    Query::builder().sort_with(field, direction)
}

/// `Query::builder().query_type(query_type)`
#[must_use]
pub fn query_type(query_type: impl Into<String>) -> Query {
    Query::builder().query_type(query_type)
}
