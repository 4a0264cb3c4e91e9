//! SQL access for users, leave requests, the notification feed and the
//! outbound message queue. Write helpers accept any executor so the workflow
//! can run them inside one transaction.

pub mod leaves;
pub mod notifications;
pub mod outbox;
pub mod users;

/// Maps a stored label that no longer parses into a decode error.
pub(crate) fn decode_label<T, E>(label: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr<Err = E>,
    E: std::error::Error + Send + Sync + 'static,
{
    label.parse().map_err(|e: E| sqlx::Error::Decode(Box::new(e)))
}
