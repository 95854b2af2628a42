use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::WhatsAppConfig;
use crate::domain::{
    error::DeliveryError,
    models::user::PhoneNumber,
    services::notification_service::{MessageId, NotificationGateway},
};

/// Gateway to the WhatsApp HTTP API. Connected once at process start and
/// shared by all requests; sends are bounded by the configured timeout.
#[derive(Clone)]
pub struct HttpWhatsAppGateway {
    client: Client,
    api_url: String,
    sender_id: String,
    access_token: String,
}

impl HttpWhatsAppGateway {
    /// Verify the credentials against the API before any traffic is
    /// accepted. Fails the process on a bad token or unreachable API.
    pub async fn connect(config: WhatsAppConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.send_timeout).build()?;

        let url = format!("{}/{}", config.api_url, config.sender_id);
        client
            .get(&url)
            .bearer_auth(&config.access_token)
            .send()
            .await?
            .error_for_status()?;

        info!(sender_id = %config.sender_id, "WhatsApp gateway connected");
        Ok(Self {
            client,
            api_url: config.api_url,
            sender_id: config.sender_id,
            access_token: config.access_token,
        })
    }
}

/// E.164 shape: optional leading `+`, 7 to 15 digits, no leading zero.
fn is_valid_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    (7..=15).contains(&digits.len())
        && !digits.starts_with('0')
        && digits.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Deserialize)]
struct SendResponse {
    messages: Vec<SentMessage>,
}

#[derive(Deserialize)]
struct SentMessage {
    id: String,
}

#[async_trait]
impl NotificationGateway for HttpWhatsAppGateway {
    fn validate_phone(&self, phone: &PhoneNumber) -> bool {
        is_valid_phone(phone.as_str())
    }

    async fn send_message(
        &self,
        phone: &PhoneNumber,
        text: &str,
    ) -> Result<MessageId, DeliveryError> {
        if !self.validate_phone(phone) {
            return Err(DeliveryError::InvalidRecipient(phone.as_str().to_string()));
        }

        let url = format!("{}/{}/messages", self.api_url, self.sender_id);
        let body = serde_json::json!({
            "messaging_product": "whatsapp",
            "to": phone.as_str(),
            "type": "text",
            "text": { "body": text },
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Send(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(phone = phone.as_str(), %status, "WhatsApp send rejected");
            return Err(DeliveryError::Send(format!("gateway returned {status}")));
        }

        let parsed: SendResponse = response
            .json()
            .await
            .map_err(|e| DeliveryError::Send(e.to_string()))?;

        parsed
            .messages
            .into_iter()
            .next()
            .map(|m| m.id)
            .ok_or_else(|| DeliveryError::Send("gateway returned no message id".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_e164_shaped_numbers() {
        assert!(is_valid_phone("+15551234567"));
        assert!(is_valid_phone("4915112345678"));
        assert!(is_valid_phone("1234567"));
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("+0123456789"));
        assert!(!is_valid_phone("123456"));
        assert!(!is_valid_phone("+155512345678901234"));
        assert!(!is_valid_phone("555-123-4567"));
        assert!(!is_valid_phone("abc1234567"));
    }
}
