//! WebAssembly bindings.
//!
//! Preference tables are passed as plain JS objects mapping an agent name
//! to its ranking, e.g. `{ "A": ["X", "Y"] }`. Object keys are processed
//! in lexicographic order, which fixes the proposer and output order.

use std::collections::BTreeMap;

use wasm_bindgen::prelude::*;

use crate::stable::{stable_match, PreferenceTable};

fn table_from_js(value: JsValue) -> Result<PreferenceTable<String>, JsValue> {
    let map: BTreeMap<String, Vec<String>> = serde_wasm_bindgen::from_value(value)?;
    Ok(map.into_iter().collect())
}

/// Computes a stable matching between two groups given as JS objects.
///
/// Returns an array of `{ agent1, agent2, ranks }` objects, where `ranks`
/// is `{ rank_by_agent1, rank_by_agent2 }` or `null`.
#[wasm_bindgen(js_name = stableMatch)]
pub fn stable_match_js(
    group1: JsValue,
    group2: JsValue,
    include_ranks: bool,
) -> Result<JsValue, JsValue> {
    let group1 = table_from_js(group1)?;
    let group2 = table_from_js(group2)?;
    let matches = stable_match(&group1, &group2, include_ranks)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(serde_wasm_bindgen::to_value(&matches)?)
}
