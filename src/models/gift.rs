//! Gift model.

use serde::{Deserialize, Serialize};

use super::loose;

/// A gift idea owned by one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: i64,
    pub person_id: i64,
    pub description: String,
    pub link: Option<String>,
    pub purchased: bool,
    pub order_index: i64,
}

/// Request body for creating a new gift.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGiftRequest {
    #[serde(default, deserialize_with = "loose::id")]
    pub person_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "loose::truthy")]
    pub purchased: bool,
}

/// Request body for editing a gift. Every field is replaced, so callers resend
/// the values they want to keep.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGiftRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "loose::truthy")]
    pub purchased: bool,
}

/// Validated gift fields ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftFields {
    pub description: String,
    pub link: Option<String>,
    pub purchased: bool,
}

/// Empty links are stored as null; anything else is kept byte-for-byte.
pub fn normalize_link(link: Option<&str>) -> Option<String> {
    match link {
        Some(l) if !l.trim().is_empty() => Some(l.to_string()),
        _ => None,
    }
}
