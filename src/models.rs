use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::role::Role;

#[derive(Deserialize, ToSchema)]
pub struct RegisterReq {
    #[schema(value_type = String, example = "student")]
    pub role: Role,
    #[schema(example = "A")]
    pub name: String,
    #[schema(example = "CSE")]
    pub dept: String,
    #[schema(example = "a@srec.ac.in")]
    pub email: String,
    #[schema(example = "Str0ng@pass")]
    pub password: String,
    /// students only
    #[schema(example = "71810010001")]
    pub roll: Option<String>,
    /// students only; +91 is added when missing
    #[schema(example = "9876543210")]
    pub parent_mobile: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(value_type = String, example = "student")]
    pub role: Role,
    /// roll number for students, email for tutor/AC, username for admin
    #[schema(example = "71810010001")]
    pub identity: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub sub: String,
    pub role: Role,
    pub dept: String,
    /// Present only for students
    pub roll: Option<String>,
    pub exp: usize,
    pub jti: String,
}
