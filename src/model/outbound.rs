use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, ToSchema, EnumString, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeliveryStatus {
    Queued,
    /// claimed by a flush, send in progress
    Sending,
    Sent,
    Failed,
}

/// A parent-notification message waiting for (or done with) delivery.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OutboundMessage {
    pub id: i64,
    pub leave_id: i64,
    pub destination: String,
    pub body: String,
    pub status: DeliveryStatus,
    pub attempts: i64,
    pub last_error: Option<String>,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}
