//! Colon-separated text expressions for filters, sorts, highlights and
//! aggregations, as typed on a command line.
//!
//! | Expression                 | Meaning                                   |
//! |----------------------------|-------------------------------------------|
//! | `age:12`                   | `age = 12`                                |
//! | `age:>:12`                 | `age > 12`                                |
//! | `foo` (stage only)         | match `foo` on all fields                 |
//! | `name:foo` (stage only)    | match `foo` on `name`                     |
//! | `age:desc`                 | sort `age` descending                     |
//! | `title:10:2`               | highlight `title`, size 10, 2 fragments   |
//! | `ages:age:histogram:10`    | aggregation `ages` over `age`             |
//!
//! Values are read as JSON when they parse as JSON, otherwise as strings.
//! Only the first two colons split an expression, so the value part may
//! itself contain colons.

use serde_json::Value;

use crate::aggregation::Aggregation;
use crate::error::{require, Error, Result};
use crate::filter::{FilterArg, SearchArg};
use crate::query::SortDirection;

/// A parsed sort expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort on.
    pub field: String,
    /// Direction.
    pub direction: SortDirection,
}

/// A parsed highlight expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpec {
    /// Field to highlight.
    pub field: String,
    /// Fragment size.
    pub size: Option<u64>,
    /// Number of fragments.
    pub count: Option<u64>,
}

/// Reads a value as JSON, falling back to a plain string.
#[must_use]
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn field_part(raw: &str) -> Result<String> {
    require(Some(raw.trim()), "Parameter \"field\" must be specified").map(str::to_string)
}

/// Parses `field:value` or `field:operator:value`.
///
/// # Errors
///
/// Fails when the field is empty or no value is given.
pub fn parse_filter(expr: &str) -> Result<FilterArg> {
    let parts: Vec<&str> = expr.splitn(3, ':').collect();
    match parts.as_slice() {
        [field, value] => Ok(FilterArg::FieldValue {
            field: field_part(field)?,
            value: parse_value(value),
        }),
        [field, operator, value] => Ok(FilterArg::FieldOperatorValue {
            field: field_part(field)?,
            operator: require(Some(*operator), "Parameter \"operator\" must be specified")?
                .to_string(),
            value: parse_value(value),
        }),
        _ => Err(Error::InvalidExpression(format!(
            "filter '{expr}' must be field:value or field:operator:value"
        ))),
    }
}

/// Parses a query or search-stage expression: `text`, `field:text` or
/// `field:operator:value`.
///
/// # Errors
///
/// Fails when a field part is empty.
pub fn parse_stage(expr: &str) -> Result<SearchArg> {
    let parts: Vec<&str> = expr.splitn(3, ':').collect();
    match parts.as_slice() {
        [text] => Ok(SearchArg::Text((*text).to_string())),
        [field, text] => Ok(SearchArg::FieldText(
            field_part(field)?,
            (*text).to_string(),
        )),
        [field, operator, value] => Ok(SearchArg::FieldOperatorValue(
            field_part(field)?,
            (*operator).to_string(),
            parse_value(value),
        )),
        _ => Ok(SearchArg::None),
    }
}

/// Parses `field` or `field:asc|desc`.
///
/// # Errors
///
/// Fails on an empty field or an unknown direction.
pub fn parse_sort(expr: &str, default: SortDirection) -> Result<SortSpec> {
    let (field, direction) = match expr.split_once(':') {
        Some((field, "asc")) => (field, SortDirection::Asc),
        Some((field, "desc")) => (field, SortDirection::Desc),
        Some((_, other)) => {
            return Err(Error::InvalidExpression(format!(
                "sort direction '{other}' must be asc or desc"
            )))
        }
        None => (expr, default),
    };
    Ok(SortSpec {
        field: field_part(field)?,
        direction,
    })
}

/// Parses `field`, `field:size` or `field:size:count`.
///
/// # Errors
///
/// Fails on an empty field or a non-numeric option.
pub fn parse_highlight(expr: &str) -> Result<HighlightSpec> {
    let mut parts = expr.splitn(3, ':');
    let field = field_part(parts.next().unwrap_or_default())?;
    let size = parts.next().map(|raw| parse_count(raw, "size")).transpose()?;
    let count = parts.next().map(|raw| parse_count(raw, "count")).transpose()?;
    Ok(HighlightSpec { field, size, count })
}

fn parse_count(raw: &str, what: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidExpression(format!("highlight {what} '{raw}' is not a number")))
}

/// Parses `name:field:operator` or `name:field:operator:value`.
///
/// # Errors
///
/// Fails when a part is missing or empty.
pub fn parse_aggregation(expr: &str) -> Result<(String, Aggregation)> {
    let parts: Vec<&str> = expr.splitn(4, ':').collect();
    let (name, field, operator, value) = match parts.as_slice() {
        [name, field, operator] => (*name, *field, *operator, None),
        [name, field, operator, value] => (*name, *field, *operator, Some(parse_value(value))),
        _ => {
            return Err(Error::InvalidExpression(format!(
                "aggregation '{expr}' must be name:field:operator[:value]"
            )))
        }
    };
    let name = require(Some(name), "Parameter \"name\" must be specified")?.to_string();
    let field = field_part(field)?;
    let operator = require(Some(operator), "Parameter \"operator\" must be specified")?;
    let aggregation = match value {
        Some(value) => Aggregation::field(field, operator, value),
        None => Aggregation::new(field, operator),
    };
    Ok((name, aggregation))
}
