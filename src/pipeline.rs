//! Pipeline entry points
//!
//! Loader → content scan → aggregate/join → normalize. Everything up to
//! the join runs eagerly; normalization happens as documents are pulled.

use crate::error::Result;
use crate::join::join_contents;
use crate::normalize::normalize;
use crate::table::{load_table, scan_contents};
use crate::types::{Document, PipelineConfig, Row, RowId, RunStats};
use indexmap::map::IntoValues;
use tracing::{info, instrument};

/// The emitted Food documents of one run, in Food table order.
///
/// Single use: iterating again means running the pipeline again.
pub struct FoodDocuments {
    foods: IntoValues<RowId, Row>,
    stats: RunStats,
}

impl FoodDocuments {
    /// Counters gathered while building the documents
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }
}

impl Iterator for FoodDocuments {
    type Item = Document;

    fn next(&mut self) -> Option<Document> {
        self.foods.next().map(normalize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.foods.size_hint()
    }
}

impl ExactSizeIterator for FoodDocuments {}

/// Run the full join: one document per Food row, each carrying the
/// compounds measured in it.
#[instrument(skip_all, fields(source_dir = %config.source_dir.display()))]
pub fn load_documents(config: &PipelineConfig) -> Result<FoodDocuments> {
    let mut foods = load_table(config.food_path())?;
    let compounds = load_table(config.compound_path())?;
    let scan = scan_contents(config.content_path())?;

    let mut stats = RunStats {
        foods: foods.len(),
        compounds: compounds.len(),
        content_rows_scanned: scan.rows_scanned,
        content_rows_kept: scan.rows_kept,
        content_rows_unresolved: scan.rows_unresolved,
        groups: scan.groups.len(),
        ..Default::default()
    };

    join_contents(
        &mut foods,
        &compounds,
        &scan.groups,
        config.zero_tolerance,
        &mut stats,
    )?;

    info!(documents = foods.len(), "documents ready");
    Ok(FoodDocuments {
        foods: foods.into_values(),
        stats,
    })
}

/// Food documents alone, without reading Compound or Content
#[instrument(skip_all, fields(source_dir = %config.source_dir.display()))]
pub fn load_food_documents(config: &PipelineConfig) -> Result<FoodDocuments> {
    let foods = load_table(config.food_path())?;
    let stats = RunStats {
        foods: foods.len(),
        ..Default::default()
    };

    Ok(FoodDocuments {
        foods: foods.into_values(),
        stats,
    })
}
