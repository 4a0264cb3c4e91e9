use async_trait::async_trait;
use derive_more::Display;
use tracing::info;

#[derive(Debug, Display)]
pub enum DeliveryError {
    #[display(fmt = "transport failure: {}", _0)]
    Transport(String),
    #[display(fmt = "provider rejected message ({}): {}", status, body)]
    Rejected { status: u16, body: String },
}

impl std::error::Error for DeliveryError {}

/// Outbound messaging collaborator: attempts delivery of `body` to
/// `destination` and reports the provider status.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, destination: &str, body: &str) -> Result<String, DeliveryError>;
}

/// Used when no SMS provider is configured; the message only reaches the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSender;

#[async_trait]
impl MessageSender for LogSender {
    async fn send(&self, destination: &str, body: &str) -> Result<String, DeliveryError> {
        info!(destination, body, "SMS transport not configured, message logged only");
        Ok("logged".to_string())
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records every message; fails deliveries while `failing` is set.
    #[derive(Default)]
    pub struct RecordingSender {
        pub sent: Mutex<Vec<(String, String)>>,
        pub failing: std::sync::atomic::AtomicBool,
    }

    impl RecordingSender {
        pub fn failing() -> Self {
            let sender = Self::default();
            sender
                .failing
                .store(true, std::sync::atomic::Ordering::SeqCst);
            sender
        }

        pub fn messages(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessageSender for RecordingSender {
        async fn send(&self, destination: &str, body: &str) -> Result<String, DeliveryError> {
            if self.failing.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(DeliveryError::Transport("network unreachable".into()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((destination.to_string(), body.to_string()));
            Ok("queued".to_string())
        }
    }
}
