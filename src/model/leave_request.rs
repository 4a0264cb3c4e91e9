use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Lifecycle of a leave request. The string forms are the stored labels.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema, EnumString, Display, AsRefStr,
)]
pub enum LeaveStatus {
    #[strum(serialize = "Pending")]
    #[serde(rename = "Pending")]
    Pending,
    #[strum(serialize = "Tutor Approved")]
    #[serde(rename = "Tutor Approved")]
    TutorApproved,
    #[strum(serialize = "Rejected")]
    #[serde(rename = "Rejected")]
    Rejected,
    #[strum(serialize = "Approved by AC")]
    #[serde(rename = "Approved by AC")]
    AcApproved,
    #[strum(serialize = "Rejected by AC")]
    #[serde(rename = "Rejected by AC")]
    AcRejected,
}

/// Which approver is acting on a request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Tutor,
    Ac,
}

/// Decision token accepted by the approval endpoints.
#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Decision {
    Approve,
    Reject,
}

impl Stage {
    /// Status a request must be in for this stage to act on it
    pub fn precursor(self) -> LeaveStatus {
        match self {
            Stage::Tutor => LeaveStatus::Pending,
            Stage::Ac => LeaveStatus::TutorApproved,
        }
    }
}

impl LeaveStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LeaveStatus::Rejected | LeaveStatus::AcApproved | LeaveStatus::AcRejected
        )
    }

    /// Next status when `stage` applies `decision`, or `None` when the request
    /// is not waiting on that stage.
    pub fn transition(self, stage: Stage, decision: Decision) -> Option<LeaveStatus> {
        match (self, stage, decision) {
            (LeaveStatus::Pending, Stage::Tutor, Decision::Approve) => {
                Some(LeaveStatus::TutorApproved)
            }
            (LeaveStatus::Pending, Stage::Tutor, Decision::Reject) => Some(LeaveStatus::Rejected),
            (LeaveStatus::TutorApproved, Stage::Ac, Decision::Approve) => {
                Some(LeaveStatus::AcApproved)
            }
            (LeaveStatus::TutorApproved, Stage::Ac, Decision::Reject) => {
                Some(LeaveStatus::AcRejected)
            }
            _ => None,
        }
    }

    /// Still waiting on a tutor or AC decision
    pub fn is_open(self) -> bool {
        matches!(self, LeaveStatus::Pending | LeaveStatus::TutorApproved)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "A")]
    pub student_name: String,
    #[schema(example = "71810010001")]
    pub roll: String,
    #[schema(example = "CSE")]
    pub dept: String,
    #[schema(example = "2024-03-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-03-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "fever")]
    pub reason: String,
    /// assigned tutor (first-line approver)
    #[schema(example = "T1")]
    pub tutor: String,
    #[schema(example = "Pending", value_type = String)]
    pub status: LeaveStatus,
    /// base64 QR payload, present only once approved by the AC
    #[schema(nullable = true)]
    pub qr_code: Option<String>,
    #[schema(example = "2024-02-28T09:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}
