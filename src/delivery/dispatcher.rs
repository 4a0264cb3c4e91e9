use std::sync::Arc;

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, error, warn};

use super::sender::MessageSender;
use crate::store::outbox;

/// Queued intents handled per flush.
const BATCH_SIZE: i64 = 50;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub sent: usize,
    pub failed: usize,
}

/// Drains queued outbound messages. Each message is claimed before it is
/// sent, so it goes out at most once even when flushes overlap. Failures are
/// recorded on the message and logged; they never reach the caller and are
/// not retried.
#[derive(Clone)]
pub struct Dispatcher {
    pool: SqlitePool,
    sender: Arc<dyn MessageSender>,
}

impl Dispatcher {
    pub fn new(pool: SqlitePool, sender: Arc<dyn MessageSender>) -> Self {
        Self { pool, sender }
    }

    pub async fn flush(&self) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        let pending = match outbox::claim_queued(&self.pool, BATCH_SIZE).await {
            Ok(pending) => pending,
            Err(e) => {
                error!(error = %e, "Failed to claim queued messages");
                return summary;
            }
        };

        for message in pending {
            let outcome = self.sender.send(&message.destination, &message.body).await;

            let recorded = match &outcome {
                Ok(status) => {
                    debug!(message_id = message.id, leave_id = message.leave_id, status = %status, "Message delivered");
                    summary.sent += 1;
                    outbox::record_attempt(&self.pool, message.id, Ok(())).await
                }
                Err(e) => {
                    warn!(message_id = message.id, leave_id = message.leave_id, error = %e, "Message delivery failed");
                    summary.failed += 1;
                    let reason = e.to_string();
                    outbox::record_attempt(&self.pool, message.id, Err(reason.as_str())).await
                }
            };

            if let Err(e) = recorded {
                error!(error = %e, message_id = message.id, "Failed to record delivery attempt");
            }
        }

        summary
    }
}
