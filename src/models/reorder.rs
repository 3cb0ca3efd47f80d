//! Reorder request shared by people and gifts.

use serde::Deserialize;
use serde_json::Value;

/// Request body for a drag-and-drop reorder.
///
/// `orderedIds` is kept as raw JSON so a missing or non-array value can be
/// reported as a bad request instead of failing body extraction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    #[serde(default)]
    pub ordered_ids: Value,
}
