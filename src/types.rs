use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};

use crate::error::{LoadError, Result};

/// Internal join identifier (`id` in Food/Compound, `food_id`/`source_id` in Content)
pub type RowId = i64;

/// One table row, field name to value
pub type Row = Map<String, Value>;

/// An emitted, normalized document
pub type Document = Map<String, Value>;

/// Internal identifier field, removed from every emitted document
pub const ID_FIELD: &str = "id";

/// Public identifier field, promoted to the document key
pub const PUBLIC_ID_FIELD: &str = "public_id";

/// Primary key of emitted documents
pub const DOC_ID_FIELD: &str = "_id";

/// Food document field holding the attached compound documents
pub const COMPOUNDS_FIELD: &str = "compounds";

/// Key of one Content group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey {
    pub food_id: RowId,
    pub compound_id: RowId,
}

impl PairKey {
    pub fn new(food_id: RowId, compound_id: RowId) -> Self {
        PairKey {
            food_id,
            compound_id,
        }
    }
}

/// The part of a Content row that survives filtering
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    /// Raw measurement, number or numeric text
    pub orig_content: Value,
    pub orig_unit: Value,
    pub citation: Value,
}

/// Summary of one (food, compound) group
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSummary {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub unit: Value,
    pub reference: Value,
}

impl ContentSummary {
    /// The `orig_contents` object attached to a compound document.
    ///
    /// Non-finite statistics have no JSON form and come out as null.
    pub fn orig_contents(&self) -> Value {
        let mut contents = Map::new();
        contents.insert("min".to_string(), float_value(self.min));
        contents.insert("max".to_string(), float_value(self.max));
        contents.insert("avg".to_string(), float_value(self.avg));
        contents.insert("unit".to_string(), self.unit.clone());
        Value::Object(contents)
    }
}

fn float_value(n: f64) -> Value {
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

/// Counters collected over one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub foods: usize,
    pub compounds: usize,
    pub content_rows_scanned: usize,
    pub content_rows_kept: usize,
    /// Kept rows whose food or source id is not an integer
    pub content_rows_unresolved: usize,
    pub groups: usize,
    pub relationships: usize,
    pub skipped_missing_food: usize,
    pub skipped_missing_compound: usize,
    pub skipped_zero_mean: usize,
}

/// Configuration for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the three table dumps
    pub source_dir: PathBuf,

    pub food_file: String,

    pub compound_file: String,

    pub content_file: String,

    /// Absolute tolerance under which a group mean counts as zero
    pub zero_tolerance: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            source_dir: PathBuf::from("."),
            food_file: String::from("Food.json"),
            compound_file: String::from("Compound.json"),
            content_file: String::from("Content.json"),
            zero_tolerance: 1e-9,
        }
    }
}

impl PipelineConfig {
    /// Default file layout under the given source directory
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        PipelineConfig {
            source_dir: source_dir.into(),
            ..Default::default()
        }
    }

    /// Load a config from a TOML file. Keys that are absent keep their defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::from_toml_str(&text)
            .map_err(|e| LoadError::config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn food_path(&self) -> PathBuf {
        self.source_dir.join(&self.food_file)
    }

    pub fn compound_path(&self) -> PathBuf {
        self.source_dir.join(&self.compound_file)
    }

    pub fn content_path(&self) -> PathBuf {
        self.source_dir.join(&self.content_file)
    }
}
