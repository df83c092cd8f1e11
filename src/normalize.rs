//! Document normalization
//!
//! Turns a joined Food or Compound row into its emitted form: the internal
//! `id` is dropped, `public_id` becomes `_id`, and null values are swept
//! out at every depth.

use crate::types::{Document, Row, DOC_ID_FIELD, ID_FIELD, PUBLIC_ID_FIELD};
use serde_json::{Map, Value};

/// Normalize one row into an emitted document.
///
/// A row without `public_id` (or with a null one) yields a document
/// without `_id`.
pub fn normalize(mut row: Row) -> Document {
    row.remove(ID_FIELD);
    let public_id = row.remove(PUBLIC_ID_FIELD).unwrap_or(Value::Null);
    row.insert(DOC_ID_FIELD.to_string(), public_id);
    sweep(&mut row);
    row
}

/// Recursively remove null values from a document.
///
/// Nested objects left empty are removed as well, and null array elements
/// are dropped. Zero, `false` and empty strings are kept.
pub fn sweep(map: &mut Map<String, Value>) {
    for value in map.values_mut() {
        sweep_value(value);
    }
    map.retain(|_, value| !is_swept(value));
}

fn sweep_value(value: &mut Value) {
    match value {
        Value::Object(map) => sweep(map),
        Value::Array(items) => {
            for item in items.iter_mut() {
                sweep_value(item);
            }
            items.retain(|item| !is_swept(item));
        }
        _ => {}
    }
}

fn is_swept(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_public_id_promoted() {
        let doc = normalize(row(json!({
            "id": 5,
            "public_id": "FOOD00914",
            "name": "Soybean oil"
        })));

        assert_eq!(
            Value::Object(doc),
            json!({"_id": "FOOD00914", "name": "Soybean oil"})
        );
    }

    #[test]
    fn test_missing_public_id_leaves_no_key() {
        let doc = normalize(row(json!({"name": "Soybean oil"})));

        assert!(!doc.contains_key("_id"));
        assert!(!doc.contains_key("public_id"));

        let doc = normalize(row(json!({"public_id": null, "name": "Kiwi"})));
        assert!(!doc.contains_key("_id"));
    }

    #[test]
    fn test_nested_nulls_swept() {
        let doc = normalize(row(json!({
            "public_id": "FOOD00914",
            "description": null,
            "compounds": [
                {
                    "_id": "FDB023333",
                    "cas_number": null,
                    "orig_contents": {"min": 1.0, "max": null, "avg": 1.0, "unit": null}
                },
                null
            ]
        })));

        assert_eq!(
            Value::Object(doc),
            json!({
                "_id": "FOOD00914",
                "compounds": [
                    {"_id": "FDB023333", "orig_contents": {"min": 1.0, "avg": 1.0}}
                ]
            })
        );
    }

    #[test]
    fn test_meaningful_values_kept() {
        let doc = normalize(row(json!({
            "public_id": "FOOD00001",
            "legacy_id": 0,
            "export_to_afcdb": false,
            "name_scientific": "",
            "tags": []
        })));

        assert_eq!(doc["legacy_id"], 0);
        assert_eq!(doc["export_to_afcdb"], false);
        assert_eq!(doc["name_scientific"], "");
        assert_eq!(doc["tags"], json!([]));
    }

    #[test]
    fn test_object_emptied_by_sweep_removed() {
        let mut map = row(json!({"picture": {"file_name": null, "size": null}, "name": "Kiwi"}));
        sweep(&mut map);

        assert_eq!(Value::Object(map), json!({"name": "Kiwi"}));
    }
}
