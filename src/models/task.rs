use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A single to-do item as stored in the `items` table and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-generated, monotonically increasing identifier.
    pub id: i32,
    #[schema(example = "Buy milk")]
    pub name: String,
    pub is_complete: bool,
}

/// Payload for `POST /items`.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Must be between 1 and 100 characters.
    #[validate(length(min = 1, max = 100, message = "Name is required."))]
    pub name: String,
    /// Defaults to `false` when omitted.
    #[serde(default)]
    pub is_complete: bool,
}

/// Payload for `PUT /items/{id}`.
///
/// The client echoes the task id in the body; the path id is authoritative
/// and the body id is ignored.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 100, message = "Name is required."))]
    pub name: String,
    pub is_complete: bool,
}
