use serde::Serialize;
use utoipa::ToSchema;

use super::role::Role;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[schema(value_type = String, example = "student")]
    pub role: Role,
    pub dept: String,
    /// students only
    pub roll: Option<String>,
    pub email: String,
    /// students only, normalized to +91
    pub parent_mobile: Option<String>,
    #[serde(skip_serializing)]
    pub password: String,
}
