//! # `apiquery` Core
//!
//! Fluent builders for backend-agnostic filter, query and search documents.
//!
//! Every builder owns a JSON *body* and renders it as canonical JSON. Builders
//! nest: a [`Filter`] handed to a [`Query`] contributes a copy of its body,
//! taken at that call.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apiquery_core::{Aggregation, Embodied, Filter, Query, QueryOptions, Search};
//!
//! let query = Query::builder()
//!     .filter(Filter::gt("age", 12).and(("name", "alice")))
//!     .search(("bio", "rust"))
//!     .fields(["name", "age"])
//!     .sort_with("age", "desc")
//!     .aggregate("mean_age", Aggregation::avg("age"))
//!     .limit(20);
//!
//! let body = query.to_json();
//!
//! let search = Search::builder()
//!     .query("foo")
//!     .post_filter(("age", "<", 12))
//!     .highlight_with("name", Some(10), None)
//!     .cursor("c1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::doc_markdown)]

pub mod aggregation;
pub mod config;
#[cfg(test)]
mod config_tests;
mod document;
pub mod embodied;
pub mod error;
pub mod expr;
pub mod filter;
#[cfg(test)]
mod filter_tests;
pub mod geo;
pub mod query;
pub mod range;
pub mod search;

pub use aggregation::{Aggregation, AggregationArg};
pub use config::{ConfigError, QueryConfig};
pub use embodied::{to_body, Body, Embodied, Operand};
pub use error::{require, Error, Result};
pub use filter::{BoxArg, DistanceArg, Filter, FilterArg, Operator, RangeArg, SearchArg, TextArgs};
pub use geo::{BoundingBox, Circle, Line, Point, Polygon, Shape};
pub use query::{FieldList, Query, QueryOptions, QueryType, SortDirection};
pub use range::Range;
pub use search::Search;
