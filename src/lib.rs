//! Free-text semantic search over an artwork catalog.
//!
//! The catalog is a small CSV corpus. Selected fields of every record are
//! flattened into one composite text and embedded up front; each query is
//! embedded with the same model and every record is ranked by cosine
//! similarity. The scan is exact, not approximate: at catalog scale a
//! full pass is fast and keeps ranking deterministic.

pub mod catalog;
pub mod config;
pub mod model;
pub mod search;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use directories::ProjectDirs;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::config::{ENV_CATALOG, SearchConfig};
use crate::search::embedder_registry;
use crate::search::engine::{QueryResult, SearchEngine};

/// Version string with build metadata for `--version` output.
pub static LONG_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}\nbuild timestamp: {}\ntarget: {}\nopt level: {}",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown"),
        option_env!("VERGEN_CARGO_OPT_LEVEL").unwrap_or("unknown"),
    )
});

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "artsearch",
    version,
    long_version = LONG_VERSION.as_str(),
    about = "Semantic search over an artwork catalog"
)]
pub struct Cli {
    /// Data directory holding embedding model files.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the catalog with a free-text query.
    Search {
        /// Query text.
        query: String,

        /// Catalog CSV path (overrides ARTSEARCH_CATALOG).
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Comma-separated fields to embed (overrides ARTSEARCH_FIELDS).
        #[arg(long, value_delimiter = ',', value_name = "FIELDS")]
        fields: Vec<String>,

        /// Embedder name or id (overrides ARTSEARCH_EMBEDDER).
        #[arg(long, value_name = "NAME")]
        embedder: Option<String>,

        /// Maximum number of results (overrides ARTSEARCH_TOP_K).
        #[arg(short = 'k', long, value_name = "N")]
        top_k: Option<usize>,

        /// Machine-readable JSON output.
        #[arg(long)]
        robot: bool,
    },

    /// List embedding backends and their availability.
    Embedders {
        /// Machine-readable JSON output.
        #[arg(long)]
        robot: bool,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Render the man page to stdout.
    Man,
}

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    match cli.command {
        Commands::Search {
            query,
            catalog,
            fields,
            embedder,
            top_k,
            robot,
        } => run_search(&data_dir, &query, catalog, fields, embedder, top_k, robot),
        Commands::Embedders { robot } => run_embedders(&data_dir, robot),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "artsearch", &mut io::stdout());
            Ok(())
        }
        Commands::Man => {
            clap_mangen::Man::new(Cli::command()).render(&mut io::stdout())?;
            Ok(())
        }
    }
}

/// Platform data directory, e.g. `~/.local/share/artsearch` on Linux.
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "artsearch", "artsearch")
        .expect("project dirs available")
        .data_dir()
        .to_path_buf()
}

fn run_search(
    data_dir: &Path,
    query: &str,
    catalog: Option<PathBuf>,
    fields: Vec<String>,
    embedder: Option<String>,
    top_k: Option<usize>,
    robot: bool,
) -> Result<()> {
    let mut config = SearchConfig::from_env();
    if let Some(catalog) = catalog {
        config.catalog_path = Some(catalog);
    }
    if !fields.is_empty() {
        config.embed_fields = fields;
    }
    if let Some(embedder) = embedder {
        config.embedder = Some(embedder);
    }
    if let Some(top_k) = top_k {
        config.top_k = top_k;
    }

    let Some(catalog_path) = config.catalog_path.clone() else {
        bail!("no catalog configured; pass --catalog or set {ENV_CATALOG}");
    };

    let embedder_name = config
        .embedder
        .clone()
        .or_else(|| embedder_registry::best_available(data_dir).map(|e| e.name.to_string()))
        .unwrap_or_else(|| embedder_registry::default_embedder().name.to_string());
    embedder_registry::validate(&embedder_name, data_dir).map_err(|msg| anyhow!(msg))?;
    debug!(embedder = %embedder_name, "selected embedder");

    let records = catalog::load_catalog(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;

    let spinner = (!robot).then(|| build_spinner("embedding catalog"));
    let backend = embedder_registry::load_embedder(&embedder_name, data_dir)?;
    let engine = SearchEngine::build(backend, records, config.field_selector())?;
    if let Some(spinner) = &spinner {
        spinner.set_message("searching");
    }
    let results = engine.search(query, config.top_k)?;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if robot {
        let payload = serde_json::json!({
            "query": query,
            "embedder": engine.embedder_info(),
            "total_records": engine.len(),
            "results": results,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let info = engine.embedder_info();
    println!(
        "Results for {} ({} records, {}):",
        format!("\"{query}\"").cyan(),
        engine.len(),
        info.id
    );
    if results.is_empty() {
        println!("  (empty catalog)");
    }
    for (rank, result) in results.iter().enumerate() {
        println!("{}", format_hit(rank + 1, result));
    }
    Ok(())
}

/// One human-readable result line, in catalog display style:
/// `1. Sunflowers (1888, F454)  [similarity: 0.812]`.
fn format_hit(rank: usize, result: &QueryResult) -> String {
    let title = result
        .record
        .get("title")
        .filter(|t| !t.is_empty())
        .unwrap_or("(untitled)");
    let extras = ["year", "catalogF"]
        .iter()
        .copied()
        .filter_map(|name| result.record.get(name))
        .filter(|value| !value.is_empty())
        .join(", ");
    let mut line = format!("{rank}. {}", title.bold());
    if !extras.is_empty() {
        line.push_str(&format!(" ({extras})"));
    }
    line.push_str(&format!("  [similarity: {:.3}]", result.similarity));
    line
}

fn run_embedders(data_dir: &Path, robot: bool) -> Result<()> {
    if robot {
        let embedders: Vec<_> = embedder_registry::all()
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "name": entry.name,
                    "id": entry.id,
                    "dimension": entry.dimension,
                    "semantic": entry.is_semantic,
                    "available": embedder_registry::is_available(entry, data_dir),
                    "description": entry.description,
                })
            })
            .collect();
        let payload = serde_json::json!({ "embedders": embedders });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for entry in embedder_registry::all() {
        let status = if embedder_registry::is_available(entry, data_dir) {
            "available".green()
        } else {
            "unavailable".yellow()
        };
        let kind = if entry.is_semantic { "semantic" } else { "lexical" };
        println!(
            "{:<8} {:<12} {:>4}d  {:<9} {:<12} {}",
            entry.name.bold(),
            entry.id,
            entry.dimension,
            kind,
            status,
            entry.description
        );
    }
    Ok(())
}

fn build_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""]),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
