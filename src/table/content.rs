//! Content table scan: filter measurement rows and group them by
//! (food, compound) pair.

use crate::error::{LoadError, Result};
use crate::table::loader::{row_id, RowReader};
use crate::types::{ContentItem, PairKey, Row};
use indexmap::IndexMap;
use serde_json::Value;
use std::io::BufRead;
use std::path::Path;
use tracing::{info, instrument};

/// Only rows with this `source_type` describe compound measurements
pub const COMPOUND_SOURCE_TYPE: &str = "Compound";

/// Content items per (food, compound) pair, in discovery order
pub type ContentGroups = IndexMap<PairKey, Vec<ContentItem>>;

/// Result of one pass over the Content table
#[derive(Debug, Default)]
pub struct ContentScan {
    pub groups: ContentGroups,
    pub rows_scanned: usize,
    pub rows_kept: usize,
    pub rows_unresolved: usize,
}

/// Scan the Content table at `path`
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn scan_contents(path: impl AsRef<Path>) -> Result<ContentScan> {
    let reader = RowReader::open(path)?;
    let scan = collect_contents(reader)?;
    info!(
        scanned = scan.rows_scanned,
        kept = scan.rows_kept,
        unresolved = scan.rows_unresolved,
        groups = scan.groups.len(),
        "content scanned"
    );
    Ok(scan)
}

/// Filter and group rows from an open Content stream
pub fn collect_contents<R: BufRead>(mut reader: RowReader<R>) -> Result<ContentScan> {
    let mut scan = ContentScan::default();

    while let Some(mut row) = reader.next_row()? {
        scan.rows_scanned += 1;

        let orig_content = take_field(&mut row, "orig_content", &reader)?;
        let source_type = take_field(&mut row, "source_type", &reader)?;
        if is_blank(&orig_content) || source_type.as_str() != Some(COMPOUND_SOURCE_TYPE) {
            continue;
        }

        let food_id = take_field(&mut row, "food_id", &reader)?;
        let source_id = take_field(&mut row, "source_id", &reader)?;
        let item = ContentItem {
            orig_content,
            orig_unit: take_field(&mut row, "orig_unit", &reader)?,
            citation: take_field(&mut row, "citation", &reader)?,
        };
        scan.rows_kept += 1;

        // a non-integer reference can never match a table row
        let (Some(food_id), Some(compound_id)) = (row_id(&food_id), row_id(&source_id)) else {
            scan.rows_unresolved += 1;
            continue;
        };

        scan.groups
            .entry(PairKey::new(food_id, compound_id))
            .or_default()
            .push(item);
    }

    Ok(scan)
}

/// A content value that does not count as a measurement: null, false,
/// zero, or an empty string, array or object.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn take_field<R: BufRead>(
    row: &mut Row,
    field: &'static str,
    reader: &RowReader<R>,
) -> Result<Value> {
    row.remove(field).ok_or_else(|| LoadError::MissingField {
        path: reader.path().to_path_buf(),
        line: reader.line_no(),
        field,
    })
}
