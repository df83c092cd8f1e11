//! foodb-docs: Build FooDB search documents from the table dumps
//!
//! Usage:
//!   # Documents for every food, to stdout
//!   foodb-docs --source-dir ./foodb_2020_04_07_json
//!
//!   # Write to a file and keep the run statistics
//!   foodb-docs -s ./foodb_2020_04_07_json -o foods.jsonl --stats stats.json
//!
//!   # Foods only, skipping the content join
//!   foodb-docs -s ./foodb_2020_04_07_json --foods-only
//!
//!   # Settings from a TOML file, debug logging
//!   foodb-docs --config foodb.toml -v

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use foodb_docs::{load_documents, load_food_documents, DocumentWriter, PipelineConfig};
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "foodb-docs")]
#[command(about = "Build FooDB food documents with their compound contents", long_about = None)]
struct Args {
    /// Directory holding Food.json, Compound.json and Content.json
    #[arg(long, short = 's', env = "FOODB_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// TOML file with pipeline settings (flags take precedence)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Output file for the documents (stdout if omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Emit food documents without joining compounds
    #[arg(long)]
    foods_only: bool,

    /// Write run statistics as JSON to this file
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Absolute tolerance for treating a mean content value as zero
    #[arg(long)]
    zero_tolerance: Option<f64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, args.log_format);

    // Build config: file, then flags
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_toml_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = args.source_dir {
        config.source_dir = dir;
    }
    if let Some(tolerance) = args.zero_tolerance {
        config.zero_tolerance = tolerance;
    }

    let documents = if args.foods_only {
        load_food_documents(&config)?
    } else {
        load_documents(&config)?
    };
    let stats = documents.stats().clone();

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    let mut writer = DocumentWriter::new(output);
    let total = writer.write_documents(documents)?;
    writer.flush()?;
    info!(total, "documents written");

    if let Some(path) = args.stats {
        let metadata = json!({
            "biothing_type": "food",
            "stats": {
                "total": total,
                "run": stats,
            }
        });
        let file = File::create(&path)
            .with_context(|| format!("Failed to create stats file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, &metadata).context("Failed to write stats")?;
    }

    Ok(())
}

/// Logs go to stderr; stdout carries documents
fn init_tracing(verbose: u8, format: LogFormat) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match verbose {
        0 => "foodb_docs=info",
        1 => "foodb_docs=debug",
        _ => "foodb_docs=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
