use crate::error::Result;
use crate::join::aggregate::summarize;
use crate::normalize::normalize;
use crate::table::{ContentGroups, Table};
use crate::types::{Document, RunStats, COMPOUNDS_FIELD};
use serde_json::Value;
use tracing::{debug, info};

/// Attach compound documents to the food rows they were measured in.
///
/// Every content group whose food and compound both exist, and whose
/// mean is not zero, appends one compound document to
/// `foods[food_id]["compounds"]`, in group discovery order. Groups that
/// reference a missing row are skipped and counted in `stats`.
pub fn join_contents(
    foods: &mut Table,
    compounds: &Table,
    groups: &ContentGroups,
    tolerance: f64,
    stats: &mut RunStats,
) -> Result<()> {
    for (key, items) in groups {
        let Some(compound) = compounds.get(&key.compound_id) else {
            debug!(food_id = key.food_id, compound_id = key.compound_id, "no such compound, skipping");
            stats.skipped_missing_compound += 1;
            continue;
        };
        let Some(food) = foods.get_mut(&key.food_id) else {
            debug!(food_id = key.food_id, compound_id = key.compound_id, "no such food, skipping");
            stats.skipped_missing_food += 1;
            continue;
        };

        let Some(summary) = summarize(*key, items, tolerance)? else {
            debug!(food_id = key.food_id, compound_id = key.compound_id, "zero mean content, skipping");
            stats.skipped_zero_mean += 1;
            continue;
        };

        let mut row = compound.clone();
        row.insert("orig_contents".to_string(), summary.orig_contents());
        row.insert("reference".to_string(), summary.reference);
        attach_compound(food, normalize(row));
        stats.relationships += 1;
    }

    info!(
        relationships = stats.relationships,
        missing_food = stats.skipped_missing_food,
        missing_compound = stats.skipped_missing_compound,
        zero_mean = stats.skipped_zero_mean,
        "contents joined"
    );
    Ok(())
}

fn attach_compound(food: &mut Document, compound: Document) {
    let slot = food
        .entry(COMPOUNDS_FIELD)
        .or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    if let Value::Array(list) = slot {
        list.push(Value::Object(compound));
    }
}
