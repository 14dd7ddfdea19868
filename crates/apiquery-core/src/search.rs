//! Search documents with separate query, pre-filter and post-filter stages.
//!
//! ```rust,ignore
//! use apiquery_core::{Filter, Search};
//!
//! let search = Search::builder()
//!     .query(("title", "rust"))
//!     .pre_filter(Filter::equal("lang", "en"))
//!     .post_filter(("stars", ">", 10))
//!     .highlight_with("title", Some(10), None);
//! ```

use serde_json::{Map, Value};

use crate::document::{Document, HasDocument};
use crate::embodied::{embodied_operand, Embodied};
use crate::filter::SearchArg;
use crate::query::QueryOptions;

/// A search document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Search {
    document: Document,
}

impl Search {
    /// Creates an empty search.
    #[must_use]
    pub fn builder() -> Self {
        Self {
            document: Document::new(),
        }
    }

    /// Appends to the scored `query` stage.
    ///
    /// Accepts a filter, `"text"`, `("field", "text")` or
    /// `(field, operator, value)`; see [`SearchArg`].
    #[must_use]
    pub fn query(self, arg: impl Into<SearchArg>) -> Self {
        self.stage("query", arg.into())
    }

    /// Appends to the `pre_filter` stage, applied before scoring.
    #[must_use]
    pub fn pre_filter(self, arg: impl Into<SearchArg>) -> Self {
        self.stage("pre_filter", arg.into())
    }

    /// Appends to the `post_filter` stage, applied after aggregations.
    #[must_use]
    pub fn post_filter(self, arg: impl Into<SearchArg>) -> Self {
        self.stage("post_filter", arg.into())
    }

    fn stage(mut self, section: &str, arg: SearchArg) -> Self {
        if let Some(filter) = arg.into_filter() {
            tracing::trace!(section, field = filter.field_name(), "add search stage filter");
            self.document.push(section, filter.body());
        }
        self
    }

    /// Highlights matches in `field` with default options.
    #[must_use]
    pub fn highlight(self, field: impl Into<String>) -> Self {
        self.highlight_with(field, None, None)
    }

    /// Highlights matches in `field`.
    ///
    /// `size` is the fragment length and `count` the number of fragments;
    /// absent options are omitted. Highlighting the same field again
    /// replaces its options in place.
    #[must_use]
    pub fn highlight_with(
        mut self,
        field: impl Into<String>,
        size: Option<u64>,
        count: Option<u64>,
    ) -> Self {
        let mut options = Map::new();
        if let Some(size) = size {
            options.insert("size".to_string(), Value::from(size));
        }
        if let Some(count) = count {
            options.insert("count".to_string(), Value::from(count));
        }
        self.document
            .insert_keyed("highlight", &field.into(), Value::Object(options));
        self
    }

    /// Sets the continuation token returned by a previous page.
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.document.set("cursor", Value::String(cursor.into()));
        self
    }
}

impl HasDocument for Search {
    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

impl QueryOptions for Search {}

impl Embodied for Search {
    fn body(&self) -> Value {
        self.document.as_value()
    }
}

embodied_operand!(Search);
