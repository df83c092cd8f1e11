//! foodb-mapping: Print the search index mapping for FooDB food documents
//!
//! Usage:
//!   foodb-mapping
//!   foodb-mapping --compact > mapping.json

use anyhow::Result;
use clap::Parser;
use foodb_docs::food_mapping;

#[derive(Parser, Debug)]
#[command(name = "foodb-mapping")]
#[command(about = "Print the index mapping for food documents", long_about = None)]
struct Args {
    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let output = if args.compact {
        serde_json::to_string(food_mapping())?
    } else {
        serde_json::to_string_pretty(food_mapping())?
    };

    println!("{}", output);

    Ok(())
}
