// src/models/category.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::CategoryId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
  pub id: CategoryId,
  pub name: String,
}

/// Input for category creation. `name` is optional here so that a missing field
/// reaches the service and fails validation with a readable message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
  pub name: Option<String>,
}
