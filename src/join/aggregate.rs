use crate::error::{LoadError, Result};
use crate::types::{ContentItem, ContentSummary, PairKey};
use serde_json::Value;

/// Reduce one group of measurements to a summary.
///
/// Unit and reference come from the first item; later items are not
/// checked against it. Returns `None` when the mean is within `tolerance`
/// of zero, which means the compound was not detected in the food.
pub fn summarize(
    key: PairKey,
    items: &[ContentItem],
    tolerance: f64,
) -> Result<Option<ContentSummary>> {
    let Some(first) = items.first() else {
        return Ok(None);
    };

    let mut values = Vec::with_capacity(items.len());
    for item in items {
        values.push(parse_content(key, &item.orig_content)?);
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = values.iter().sum::<f64>() / values.len() as f64;

    if avg.abs() < tolerance {
        return Ok(None);
    }

    Ok(Some(ContentSummary {
        min,
        max,
        avg,
        unit: first.orig_unit.clone(),
        reference: first.citation.clone(),
    }))
}

/// Read a measurement stored either as a JSON number or as numeric text
pub fn parse_content(key: PairKey, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| LoadError::NonNumericContent {
        food_id: key.food_id,
        compound_id: key.compound_id,
        value: value.to_string(),
    })
}
