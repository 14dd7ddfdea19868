#![allow(clippy::doc_markdown)]
//! `apiquery` CLI - build filter, query and search documents from the shell
//!
//! Usage:
//!   `apiquery query --filter age:>:12 --fields name,age --limit 10`
//!   `apiquery search --query name:foo --post-filter age:<:12 --highlight name:10`
//!   `apiquery --pretty query --search foo --type count`

mod compose;
#[cfg(test)]
mod compose_tests;

use std::path::PathBuf;

use anyhow::Context;
use apiquery_core::config::LoggingConfig;
use apiquery_core::{Embodied, QueryConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use compose::{QueryArgs, SearchArgs};

#[derive(Parser)]
#[command(name = "apiquery")]
#[command(
    author,
    version,
    about = "apiquery CLI - Compose JSON query and search documents"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(long, env = "APIQUERY_CONFIG", default_value = "apiquery.toml", global = true)]
    config: PathBuf,

    /// Indent the rendered document
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a query document
    Query(QueryArgs),

    /// Build a search document
    Search(SearchArgs),
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = QueryConfig::load_from_path(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    config.validate().context("invalid configuration")?;

    init_logging(&config.logging);
    tracing::debug!(config = %cli.config.display(), "configuration loaded");

    let pretty = cli.pretty || config.output.pretty;
    let document: Box<dyn Embodied> = match &cli.command {
        Commands::Query(args) => Box::new(compose::build_query(args, &config.query)?),
        Commands::Search(args) => Box::new(compose::build_search(args, &config.query)?),
    };

    let rendered = if pretty {
        document.to_json_pretty()?
    } else {
        document.to_json()
    };
    println!("{rendered}");

    Ok(())
}
