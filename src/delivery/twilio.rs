use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use super::sender::{DeliveryError, MessageSender};
use crate::config::TwilioOptions;

/// Sends SMS through the Twilio Messages REST API.
#[derive(Debug, Clone)]
pub struct TwilioSmsSender {
    options: TwilioOptions,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
    status: String,
}

impl TwilioSmsSender {
    pub fn new(options: TwilioOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{sid}/Messages.json",
            sid = self.options.account_sid
        )
    }
}

#[async_trait]
impl MessageSender for TwilioSmsSender {
    async fn send(&self, destination: &str, body: &str) -> Result<String, DeliveryError> {
        let form = [
            ("To", destination),
            ("From", self.options.from_number.as_str()),
            ("Body", body),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Twilio returned an error");
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let message = response
            .json::<MessageResponse>()
            .await
            .map_err(|e| DeliveryError::Transport(format!("unreadable Twilio response: {e}")))?;

        debug!(sid = %message.sid, status = %message.status, "SMS accepted by Twilio");
        Ok(message.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_the_account_messages_resource() {
        let sender = TwilioSmsSender::new(TwilioOptions {
            account_sid: "AC123".into(),
            auth_token: "token".into(),
            from_number: "+15550000000".into(),
        });
        assert_eq!(
            sender.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }
}
