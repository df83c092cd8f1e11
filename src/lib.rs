//! # foodb-docs - FooDB search documents
//!
//! Builds one search document per food from the FooDB table dumps
//! (`Food.json`, `Compound.json`, `Content.json`, one JSON object per
//! line). Each food carries the compounds measured in it, with the
//! measurements summarized as min/max/avg plus unit and reference.
//!
//! ## Modules
//!
//! - **table**: load Food/Compound keyed by id, scan and group Content
//! - **join**: summarize content groups and attach compounds to foods
//! - **normalize**: `_id` promotion and null sweeping
//! - **pipeline**: the `load_documents` entry point
//! - **mapping**: index mapping for the emitted documents
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use foodb_docs::{load_documents, PipelineConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = PipelineConfig::new("foodb_2020_04_07_json");
//! let documents = load_documents(&config)?;
//! println!("{} foods", documents.len());
//!
//! for document in documents {
//!     // document["_id"], document["compounds"][..]["orig_contents"]["avg"]
//!     println!("{}", serde_json::to_string(&document)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod join;
pub mod mapping;
pub mod normalize;
pub mod pipeline;
pub mod table;
pub mod types;
pub mod writer;

pub use error::{LoadError, Result};
pub use mapping::food_mapping;
pub use normalize::{normalize, sweep};
pub use pipeline::{load_documents, load_food_documents, FoodDocuments};
pub use types::{
    ContentItem, ContentSummary, Document, PairKey, PipelineConfig, Row, RowId, RunStats,
};
pub use writer::DocumentWriter;
