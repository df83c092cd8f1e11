//! Line-oriented table loading
//!
//! A table dump holds one JSON object per line. Lines are parsed one at a
//! time with simd-json into a reused scratch buffer, so the only thing kept
//! per line is the row itself.

use crate::error::{LoadError, Result};
use crate::types::{Row, RowId, ID_FIELD};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// A loaded table keyed by internal identifier, in file order
pub type Table = IndexMap<RowId, Row>;

/// Streams the rows of a newline-delimited JSON file
pub struct RowReader<R: BufRead> {
    reader: R,
    path: PathBuf,
    line: String,
    scratch: Vec<u8>,
    line_no: usize,
}

impl RowReader<BufReader<File>> {
    /// Open a table file. A path that does not exist is `MissingFile`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
        Ok(RowReader::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> RowReader<R> {
    /// Wrap any buffered reader. `path` is only used in error messages.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        RowReader {
            reader,
            path: path.into(),
            line: String::new(),
            scratch: Vec::new(),
            line_no: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 1-based number of the line last returned
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Read the next non-blank line as a row
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        loop {
            self.line.clear();
            let read = self
                .reader
                .read_line(&mut self.line)
                .map_err(|e| LoadError::io(&self.path, e))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }

            self.scratch.clear();
            self.scratch.extend_from_slice(trimmed.as_bytes());
            let value: Value = simd_json::serde::from_slice(&mut self.scratch)
                .map_err(|e| self.json_error(e.to_string()))?;

            return match value {
                Value::Object(row) => Ok(Some(row)),
                other => Err(self.json_error(format!(
                    "expected a JSON object, found {}",
                    value_kind(&other)
                ))),
            };
        }
    }

    fn json_error(&self, message: String) -> LoadError {
        LoadError::Json {
            path: self.path.clone(),
            line: self.line_no,
            message,
        }
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

/// Load a Food/Compound style table: every row keyed by its `id`, with the
/// `id` field moved out of the row and into the key.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_table(path: impl AsRef<Path>) -> Result<Table> {
    let reader = RowReader::open(path)?;
    let table = collect_table(reader)?;
    info!(rows = table.len(), "table loaded");
    Ok(table)
}

/// Build a keyed table from an already open row stream
pub fn collect_table<R: BufRead>(mut reader: RowReader<R>) -> Result<Table> {
    let mut table = Table::new();

    while let Some(mut row) = reader.next_row()? {
        let id_value = row.remove(ID_FIELD).ok_or_else(|| LoadError::MissingField {
            path: reader.path().to_path_buf(),
            line: reader.line_no(),
            field: ID_FIELD,
        })?;
        let id = row_id(&id_value).ok_or_else(|| LoadError::InvalidId {
            path: reader.path().to_path_buf(),
            line: reader.line_no(),
            value: id_value.to_string(),
        })?;

        if table.insert(id, row).is_some() {
            debug!(id, line = reader.line_no(), "duplicate id, later row wins");
        }
    }

    Ok(table)
}

/// Read an identifier that is either an integer or integer-valued text
pub fn row_id(value: &Value) -> Option<RowId> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as RowId)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    fn reader(input: &str) -> RowReader<Cursor<Vec<u8>>> {
        RowReader::new(Cursor::new(input.as_bytes().to_vec()), "Food.json")
    }

    #[test]
    fn test_rows_keyed_by_id() {
        let input = concat!(
            r#"{"id": 5, "public_id": "FOOD00914", "name": "Soybean oil"}"#,
            "\n",
            r#"{"id": 7, "public_id": "FOOD00007", "name": "Kiwi"}"#,
            "\n"
        );

        let table = collect_table(reader(input)).unwrap();

        assert_eq!(table.len(), 2);
        let soybean = &table[&5_i64];
        assert_eq!(soybean["public_id"], "FOOD00914");
        assert_eq!(soybean["name"], "Soybean oil");
        assert!(!soybean.contains_key("id"));
        assert_eq!(table.keys().copied().collect::<Vec<_>>(), vec![5, 7]);
    }

    #[test]
    fn test_other_fields_untouched() {
        let input = r#"{"id": 1, "public_id": null, "name_scientific": "", "legacy_id": 0}"#;

        let table = collect_table(reader(input)).unwrap();

        let row = &table[&1_i64];
        assert!(row["public_id"].is_null());
        assert_eq!(row["name_scientific"], "");
        assert_eq!(row["legacy_id"], 0);
    }

    #[test]
    fn test_reader_iterates_raw_rows() {
        let input = "{\"id\": 1, \"name\": \"Angelica\"}\n{\"name\": \"no id\"}\n";

        let rows = reader(input).collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], 1);
        assert!(!rows[1].contains_key("id"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let input = "\n{\"id\": 1}\n   \n{\"id\": 2}\n\n";

        let table = collect_table(reader(input)).unwrap();

        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let input = "{\"id\": 1}\n{\"id\": 2,\n";

        let err = collect_table(reader(input)).unwrap_err();

        match err {
            LoadError::Json { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_line_rejected() {
        let err = collect_table(reader("[1, 2, 3]\n")).unwrap_err();
        assert!(matches!(err, LoadError::Json { line: 1, .. }));
    }

    #[test]
    fn test_missing_id_is_fatal() {
        let err = collect_table(reader("{\"public_id\": \"FOOD1\"}\n")).unwrap_err();
        assert!(matches!(err, LoadError::MissingField { field: "id", .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_table("/definitely/not/here/Food.json").unwrap_err();
        assert!(matches!(err, LoadError::MissingFile { .. }));
    }

    #[test]
    fn test_row_id_forms() {
        assert_eq!(row_id(&json!(23333)), Some(23333));
        assert_eq!(row_id(&json!("42")), Some(42));
        assert_eq!(row_id(&json!(5.0)), Some(5));
        assert_eq!(row_id(&json!(5.5)), None);
        assert_eq!(row_id(&json!(null)), None);
        assert_eq!(row_id(&json!("FDB023333")), None);
    }
}
