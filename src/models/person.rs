//! Person model.

use serde::{Deserialize, Serialize};

/// Someone on the gift list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub order_index: i64,
}

/// Request body for creating a new person.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePersonRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Request body for renaming a person.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePersonRequest {
    #[serde(default)]
    pub name: Option<String>,
}
