use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;

use crate::model::leave_request::LeaveStatus;

/// Failures of the leave workflow and the stores behind it.
#[derive(Debug, Display)]
pub enum WorkflowError {
    /// malformed submission or registration fields
    #[display(fmt = "{}", _0)]
    Validation(String),
    #[display(fmt = "Leave request {} not found", _0)]
    NotFound(i64),
    /// unrecognized decision token
    #[display(fmt = "Invalid action '{}'. Allowed: approve, reject", _0)]
    InvalidAction(String),
    /// decision attempted on a request that is not waiting on this approver
    #[display(fmt = "Leave request {} is '{}', expected '{}'", id, current, expected)]
    InvalidState {
        id: i64,
        current: LeaveStatus,
        expected: LeaveStatus,
    },
    #[display(fmt = "{}", _0)]
    Forbidden(&'static str),
    #[display(fmt = "{}", _0)]
    Conflict(String),
    #[display(fmt = "storage error: {}", _0)]
    Storage(sqlx::Error),
}

impl std::error::Error for WorkflowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkflowError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for WorkflowError {
    fn from(value: sqlx::Error) -> Self {
        Self::Storage(value)
    }
}

impl ResponseError for WorkflowError {
    fn status_code(&self) -> StatusCode {
        match self {
            WorkflowError::Validation(_) | WorkflowError::InvalidAction(_) => {
                StatusCode::BAD_REQUEST
            }
            WorkflowError::NotFound(_) => StatusCode::NOT_FOUND,
            WorkflowError::InvalidState { .. } | WorkflowError::Conflict(_) => {
                StatusCode::CONFLICT
            }
            WorkflowError::Forbidden(_) => StatusCode::FORBIDDEN,
            WorkflowError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            WorkflowError::Storage(e) => {
                tracing::error!(error = %e, "Storage failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(
            WorkflowError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(WorkflowError::NotFound(7).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            WorkflowError::InvalidAction("maybe".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        let state = WorkflowError::InvalidState {
            id: 3,
            current: LeaveStatus::Rejected,
            expected: LeaveStatus::Pending,
        };
        assert_eq!(state.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            state.to_string(),
            "Leave request 3 is 'Rejected', expected 'Pending'"
        );
        assert_eq!(
            WorkflowError::Forbidden("Tutor only").status_code(),
            StatusCode::FORBIDDEN
        );
    }
}
