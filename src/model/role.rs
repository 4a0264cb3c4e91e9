use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Student,
    Tutor,
    /// Academic coordinator, the final approver of a department
    Ac,
    Admin,
}

impl Role {
    /// Roles that may self-register; admin is configured, never registered
    pub fn is_registrable(&self) -> bool {
        !matches!(self, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_storage_labels() {
        assert_eq!(Role::from_str("ac").unwrap(), Role::Ac);
        assert_eq!(Role::Tutor.as_ref(), "tutor");
        assert!(Role::from_str("hr").is_err());
        assert!(!Role::Admin.is_registrable());
    }
}
