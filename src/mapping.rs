//! Search index mapping for Food documents
//!
//! Declares how each emitted field should be indexed. The pipeline never
//! reads this; it is handed to whatever loads the documents into the
//! index.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Normalizer applied to every keyword field
pub const KEYWORD_NORMALIZER: &str = "keyword_lowercase_normalizer";

static FOOD_MAPPING: Lazy<Value> = Lazy::new(|| {
    json!({
        "name": text(),
        "name_scientific": text(),
        "description": text(),
        "itis_id": keyword(),
        "wikipedia_id": text(),
        "picture_file_name": keyword(),
        "picture_content_type": keyword(),
        "picture_file_size": integer(),
        "picture_updated_at": keyword(),
        "legacy_id": integer(),
        "food_group": text(),
        "food_subgroup": text(),
        "food_type": text(),
        "created_at": keyword(),
        "updated_at": keyword(),
        "creator_id": integer(),
        "updater_id": integer(),
        "export_to_afcdb": boolean(),
        "category": keyword(),
        "ncbi_taxonomy_id": integer(),
        "export_to_foodb": boolean(),
        "compounds": {
            "properties": compound_properties()
        }
    })
});

/// Field mapping for Food documents, with compounds nested under `compounds`
pub fn food_mapping() -> &'static Value {
    &FOOD_MAPPING
}

fn compound_properties() -> Value {
    json!({
        "state": keyword(),
        "annotation_quality": keyword(),
        "moldb_smiles": keyword(),
        "moldb_inchi": keyword(),
        "moldb_mono_mass": keyword(),
        "moldb_inchikey": keyword(),
        "orig_contents": {
            "properties": {
                "min": float(),
                "max": float(),
                "avg": float(),
                "unit": text()
            }
        },
        "cas_number": text(),
        "reference": text(),
        "name": text(),
        "description": text(),
        "moldb_iupac": text(),
        "kingdom": text(),
        "superklass": text(),
        "klass": text(),
        "subklass": text()
    })
}

fn text() -> Value {
    json!({"type": "text"})
}

fn keyword() -> Value {
    json!({"type": "keyword", "normalizer": KEYWORD_NORMALIZER})
}

fn integer() -> Value {
    json!({"type": "integer"})
}

fn float() -> Value {
    json!({"type": "float"})
}

fn boolean() -> Value {
    json!({"type": "boolean"})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_fields_are_floats() {
        let contents = &food_mapping()["compounds"]["properties"]["orig_contents"]["properties"];
        for field in ["min", "max", "avg"] {
            assert_eq!(contents[field]["type"], "float");
        }
        assert_eq!(contents["unit"]["type"], "text");
    }

    #[test]
    fn test_keyword_fields_normalized() {
        let mapping = food_mapping();
        assert_eq!(mapping["category"]["type"], "keyword");
        assert_eq!(mapping["category"]["normalizer"], KEYWORD_NORMALIZER);
        assert_eq!(
            mapping["compounds"]["properties"]["moldb_inchikey"]["normalizer"],
            KEYWORD_NORMALIZER
        );
    }

    #[test]
    fn test_no_internal_fields_mapped() {
        let mapping = food_mapping().as_object().unwrap();
        assert!(!mapping.contains_key("id"));
        assert!(!mapping.contains_key("public_id"));
    }
}
