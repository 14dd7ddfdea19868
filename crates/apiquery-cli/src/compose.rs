//! Turns parsed command-line arguments into query and search documents.

use anyhow::{bail, Context, Result};
use apiquery_core::config::QuerySection;
use apiquery_core::expr::{parse_aggregation, parse_filter, parse_highlight, parse_sort, parse_stage};
use apiquery_core::{Query, QueryOptions, QueryType, Search};
use clap::{Args, ValueEnum};

/// CLI query type option
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TypeArg {
    Count,
    Fetch,
    Search,
}

impl From<TypeArg> for QueryType {
    fn from(t: TypeArg) -> Self {
        match t {
            TypeArg::Count => QueryType::Count,
            TypeArg::Fetch => QueryType::Fetch,
            TypeArg::Search => QueryType::Search,
        }
    }
}

/// Options shared by `query` and `search`.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Projected fields, comma-separated or repeated
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Sort as `field` or `field:asc|desc` (repeatable)
    #[arg(long)]
    pub sort: Vec<String>,

    /// Aggregation as `name:field:operator[:value]` (repeatable)
    #[arg(long)]
    pub aggregate: Vec<String>,

    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<u64>,

    /// Number of results to skip
    #[arg(long)]
    pub offset: Option<u64>,
}

/// Arguments of the `query` command.
#[derive(Debug, Clone, Default, Args)]
pub struct QueryArgs {
    /// Filter as `field:value` or `field:operator:value` (repeatable)
    #[arg(long)]
    pub filter: Vec<String>,

    /// Search as `text`, `field:text` or `field:operator:value`
    #[arg(long)]
    pub search: Option<String>,

    /// Query type
    #[arg(long = "type", value_enum)]
    pub query_type: Option<TypeArg>,

    /// Field to highlight (repeatable)
    #[arg(long)]
    pub highlight: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments of the `search` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Scored query stage, as `text`, `field:text` or `field:operator:value` (repeatable)
    #[arg(long)]
    pub query: Vec<String>,

    /// Pre-filter stage expression (repeatable)
    #[arg(long)]
    pub pre_filter: Vec<String>,

    /// Post-filter stage expression (repeatable)
    #[arg(long)]
    pub post_filter: Vec<String>,

    /// Highlight as `field[:size[:count]]` (repeatable)
    #[arg(long)]
    pub highlight: Vec<String>,

    /// Continuation token from a previous page
    #[arg(long)]
    pub cursor: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Builds a query document.
pub fn build_query(args: &QueryArgs, defaults: &QuerySection) -> Result<Query> {
    let mut query = Query::builder();

    for expr in &args.filter {
        let filter = parse_filter(expr).with_context(|| format!("invalid --filter '{expr}'"))?;
        query = query.filter(filter);
    }

    if let Some(expr) = &args.search {
        let stage = parse_stage(expr).with_context(|| format!("invalid --search '{expr}'"))?;
        query = query.search(stage);
    }

    if let Some(query_type) = args.query_type {
        query = query.query_type(QueryType::from(query_type));
    }

    for field in &args.highlight {
        query = query.highlight(field.as_str());
    }

    apply_common(query, &args.common, defaults)
}

/// Builds a search document.
pub fn build_search(args: &SearchArgs, defaults: &QuerySection) -> Result<Search> {
    let mut search = Search::builder();

    for expr in &args.query {
        let stage = parse_stage(expr).with_context(|| format!("invalid --query '{expr}'"))?;
        search = search.query(stage);
    }
    for expr in &args.pre_filter {
        let stage = parse_stage(expr).with_context(|| format!("invalid --pre-filter '{expr}'"))?;
        search = search.pre_filter(stage);
    }
    for expr in &args.post_filter {
        let stage =
            parse_stage(expr).with_context(|| format!("invalid --post-filter '{expr}'"))?;
        search = search.post_filter(stage);
    }

    for expr in &args.highlight {
        let spec = parse_highlight(expr).with_context(|| format!("invalid --highlight '{expr}'"))?;
        search = search.highlight_with(spec.field, spec.size, spec.count);
    }

    if let Some(cursor) = &args.cursor {
        search = search.cursor(cursor.as_str());
    }

    apply_common(search, &args.common, defaults)
}

fn apply_common<T: QueryOptions>(mut doc: T, args: &CommonArgs, defaults: &QuerySection) -> Result<T> {
    if !args.fields.is_empty() {
        doc = doc.fields(args.fields.clone());
    }

    for expr in &args.sort {
        let spec = parse_sort(expr, defaults.sort_direction())
            .with_context(|| format!("invalid --sort '{expr}'"))?;
        doc = doc.sort_with(spec.field, spec.direction);
    }

    for expr in &args.aggregate {
        let (name, aggregation) =
            parse_aggregation(expr).with_context(|| format!("invalid --aggregate '{expr}'"))?;
        doc = doc.aggregate(name, aggregation);
    }

    if let Some(offset) = args.offset {
        doc = doc.offset(offset);
    }

    if let Some(limit) = args.limit.or(defaults.default_limit) {
        if limit > defaults.max_limit {
            bail!("limit {limit} exceeds query.max_limit ({})", defaults.max_limit);
        }
        doc = doc.limit(limit);
    }

    tracing::debug!("document built");
    Ok(doc)
}
