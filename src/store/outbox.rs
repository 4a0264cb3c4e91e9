use chrono::{DateTime, Utc};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};

use super::decode_label;
use crate::model::outbound::{DeliveryStatus, OutboundMessage};

#[derive(FromRow)]
struct OutboundRow {
    id: i64,
    leave_id: i64,
    destination: String,
    body: String,
    status: String,
    attempts: i64,
    last_error: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OutboundRow> for OutboundMessage {
    type Error = sqlx::Error;

    fn try_from(row: OutboundRow) -> Result<Self, Self::Error> {
        Ok(OutboundMessage {
            id: row.id,
            leave_id: row.leave_id,
            destination: row.destination,
            body: row.body,
            status: decode_label(&row.status)?,
            attempts: row.attempts,
            last_error: row.last_error,
            created_at: row.created_at,
        })
    }
}

const COLUMNS: &str = "id, leave_id, destination, body, status, attempts, last_error, created_at";

pub async fn enqueue<'e, E>(
    executor: E,
    leave_id: i64,
    destination: &str,
    body: &str,
) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO outbound_messages (leave_id, destination, body, status, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(leave_id)
    .bind(destination)
    .bind(body)
    .bind(DeliveryStatus::Queued.as_ref())
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Moves up to `limit` of the oldest queued messages to `sending` and returns
/// them, oldest first. The claim is one statement, so concurrent flushes never
/// get the same message.
pub async fn claim_queued(pool: &SqlitePool, limit: i64) -> Result<Vec<OutboundMessage>, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE outbound_messages
        SET status = ?
        WHERE id IN (
            SELECT id FROM outbound_messages WHERE status = ? ORDER BY id LIMIT ?
        )
        RETURNING {COLUMNS}
        "#
    );

    let mut claimed = sqlx::query_as::<_, OutboundRow>(&sql)
        .bind(DeliveryStatus::Sending.as_ref())
        .bind(DeliveryStatus::Queued.as_ref())
        .bind(limit)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(OutboundMessage::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    // RETURNING order is unspecified
    claimed.sort_by_key(|m| m.id);
    Ok(claimed)
}

/// Records the delivery attempt of a claimed message. Messages not in
/// `sending` are left alone.
pub async fn record_attempt(
    pool: &SqlitePool,
    id: i64,
    outcome: Result<(), &str>,
) -> Result<bool, sqlx::Error> {
    let (status, error) = match outcome {
        Ok(()) => (DeliveryStatus::Sent, None),
        Err(e) => (DeliveryStatus::Failed, Some(e)),
    };

    let result = sqlx::query(
        r#"
        UPDATE outbound_messages
        SET status = ?, attempts = attempts + 1, last_error = ?
        WHERE id = ?
        AND status = ?
        "#,
    )
    .bind(status.as_ref())
    .bind(error)
    .bind(id)
    .bind(DeliveryStatus::Sending.as_ref())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn for_leave(pool: &SqlitePool, leave_id: i64) -> Result<Vec<OutboundMessage>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM outbound_messages WHERE leave_id = ? ORDER BY id");

    sqlx::query_as::<_, OutboundRow>(&sql)
        .bind(leave_id)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(OutboundMessage::try_from)
        .collect()
}
