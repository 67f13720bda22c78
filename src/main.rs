use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lookbook::prelude::*;

/// Query a precomputed fashion catalog for visually similar items
#[derive(Parser, Debug)]
#[command(name = "lookbook")]
#[command(about = "Catalog similarity retrieval for fashion recommendations", long_about = None)]
struct Args {
    /// JSON file holding the query embedding (an array of numbers, or an
    /// object with a "clip_embedding" or "embedding" key)
    query: PathBuf,

    /// Path to the catalog data directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Number of results to return
    #[arg(short = 'k', long, default_value_t = 10)]
    top_k: usize,

    /// Equality filter over a metadata column, e.g. --filter season=Summer
    /// (repeatable, AND-combined)
    #[arg(short, long = "filter", value_name = "COLUMN=VALUE", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Filter by season (shorthand for --filter season=...)
    #[arg(long)]
    season: Option<String>,

    /// Filter by base colour (shorthand for --filter baseColour=...)
    #[arg(long)]
    colour: Option<String>,

    /// Metadata columns to include in the output, comma-separated
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_filter(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected COLUMN=VALUE, got {:?}", raw))
}

fn read_query(path: &PathBuf) -> anyhow::Result<Vec<f32>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read query file {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).context("query file is not valid JSON")?;

    let array = match &value {
        serde_json::Value::Array(_) => &value,
        serde_json::Value::Object(object) => object
            .get("clip_embedding")
            .or_else(|| object.get("embedding"))
            .context("query object has no \"clip_embedding\" or \"embedding\" key")?,
        _ => anyhow::bail!("query file must hold an array or an object"),
    };

    array
        .as_array()
        .context("query embedding is not an array")?
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .context("query embedding contains a non-numeric value")
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Loading catalog from {:?}", args.data_dir);
    let paths = CatalogPaths::from_dir(&args.data_dir);
    let handle = CatalogHandle::load(&paths)?;
    let catalog = handle.snapshot();

    let query = read_query(&args.query)?;

    let mut spec = FilterSpec::from_pairs(args.filters);
    if let Some(season) = args.season {
        spec.insert("season", season);
    }
    if let Some(colour) = args.colour {
        spec.insert("baseColour", colour);
    }

    let view = catalog.filter(&spec);
    let ranked = view.rank(&query, args.top_k)?;

    let columns: Vec<&str> = if args.columns.is_empty() {
        DEFAULT_COLUMNS.to_vec()
    } else {
        args.columns.iter().map(String::as_str).collect()
    };
    let records = project(&catalog, &ranked, &columns);

    if records.is_empty() {
        info!("No matching catalog items; consider relaxing filters");
    }
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
