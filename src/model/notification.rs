use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::role::Role;

/// In-app message scoped to a role within a department, optionally narrowed
/// to one student by roll number.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: i64,
    #[schema(value_type = String, example = "tutor")]
    pub role: Role,
    pub dept: String,
    pub roll: Option<String>,
    pub message: String,
    pub is_read: bool,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// Who a notification is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTarget {
    pub role: Role,
    pub dept: String,
    pub roll: Option<String>,
}

impl NotificationTarget {
    pub fn department(role: Role, dept: &str) -> Self {
        Self {
            role,
            dept: dept.to_string(),
            roll: None,
        }
    }

    pub fn student(dept: &str, roll: &str) -> Self {
        Self {
            role: Role::Student,
            dept: dept.to_string(),
            roll: Some(roll.to_string()),
        }
    }
}
