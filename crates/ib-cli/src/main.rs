//! infobase-query
//!
//! Normalizes a query string against a schema file and prints the
//! resulting query as JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ib_core::{MemorySchemaStore, QueryConfig};
use ib_queries::{Query, QueryBuilder, RawQuery, VersionsQueryBuilder};

#[derive(Debug, Parser)]
#[command(name = "infobase-query", version, about)]
struct Args {
    /// JSON file with type definitions
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Build a revision history query instead
    #[arg(long)]
    versions: bool,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Query string, e.g. `type=/type/page&title~=foo&limit=10`
    query: String,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = QueryConfig::from_env().context("Failed to load query configuration")?;

    let query = run(&args, config)?;
    let output = if args.pretty {
        serde_json::to_string_pretty(&query)?
    } else {
        serde_json::to_string(&query)?
    };
    println!("{}", output);
    Ok(())
}

fn run(args: &Args, config: QueryConfig) -> anyhow::Result<Query> {
    let raw = RawQuery::from_query_string(&args.query)?;

    if args.versions {
        return Ok(VersionsQueryBuilder::new()
            .config(config)
            .build(raw.options, raw.fields)?);
    }

    let store = load_store(args.schema.as_ref())?;
    info!(types = store.len(), "Schema store ready");
    Ok(QueryBuilder::new(&store).config(config).build_raw(raw)?)
}

fn load_store(path: Option<&PathBuf>) -> anyhow::Result<MemorySchemaStore> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read schema file {}", path.display()))?;
            Ok(MemorySchemaStore::from_json(&json)?)
        }
        None => Ok(MemorySchemaStore::new()),
    }
}

/// Initialize structured logging on stderr, keeping stdout for the query
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ib_queries=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}
