//! WhatsApp Cloud API notifier.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::notifications::{DeliveryReceipt, NotificationKind, Notifier, NotifierError};

/// Configuration for the WhatsApp Cloud API.
#[derive(Clone)]
pub struct WhatsAppConfig {
    /// Graph API address, e.g. `"https://graph.facebook.com"`.
    pub base_url: String,

    /// Graph API version segment, e.g. `"v18.0"`.
    pub api_version: String,

    /// Sending phone number id issued by Meta.
    pub phone_number_id: String,

    /// Bearer access token.
    pub access_token: String,

    /// Admin number that receives every notification.
    pub recipient: String,
}

impl std::fmt::Debug for WhatsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("phone_number_id", &self.phone_number_id)
            .field("access_token", &"**redacted**")
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// HTTP client for sending text messages through the WhatsApp Cloud API.
#[derive(Debug, Clone)]
pub struct WhatsAppNotifier {
    config: WhatsAppConfig,
    http: Client,
}

impl WhatsAppNotifier {
    #[must_use]
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/{}/messages",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version,
            self.config.phone_number_id
        )
    }
}

#[async_trait]
impl Notifier for WhatsAppNotifier {
    async fn notify(
        &self,
        kind: NotificationKind,
        message: &str,
    ) -> Result<DeliveryReceipt, NotifierError> {
        let body = SendMessageRequest::text(&self.config.recipient, message);

        tracing::debug!(kind = kind.as_str(), "sending whatsapp notification");

        let response = self
            .http
            .post(self.messages_url())
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            return Err(NotifierError::Rejected { status, body });
        }

        let parsed: SendMessageResponse = response.json().await?;

        let message_id = parsed
            .messages
            .into_iter()
            .next()
            .map(|message| message.id)
            .ok_or(NotifierError::MissingMessageId)?;

        Ok(DeliveryReceipt {
            message_id: Some(message_id),
        })
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'static str,
    recipient_type: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextBody<'a>,
}

impl<'a> SendMessageRequest<'a> {
    fn text(to: &'a str, body: &'a str) -> Self {
        Self {
            messaging_product: "whatsapp",
            recipient_type: "individual",
            to,
            kind: "text",
            text: TextBody {
                preview_url: false,
                body,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    preview_url: bool,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    #[serde(default)]
    messages: Vec<SentMessage>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    id: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn config() -> WhatsAppConfig {
        WhatsAppConfig {
            base_url: "https://graph.facebook.com/".to_string(),
            api_version: "v18.0".to_string(),
            phone_number_id: "12345".to_string(),
            access_token: "secret-token".to_string(),
            recipient: "919000000000".to_string(),
        }
    }

    #[test]
    fn messages_url_joins_version_and_phone_number_id() {
        let notifier = WhatsAppNotifier::new(config());

        assert_eq!(
            notifier.messages_url(),
            "https://graph.facebook.com/v18.0/12345/messages"
        );
    }

    #[test]
    fn text_request_matches_cloud_api_shape() -> TestResult {
        let body = serde_json::to_value(SendMessageRequest::text("919000000000", "hi"))?;

        assert_eq!(
            body,
            json!({
                "messaging_product": "whatsapp",
                "recipient_type": "individual",
                "to": "919000000000",
                "type": "text",
                "text": { "preview_url": false, "body": "hi" },
            })
        );

        Ok(())
    }

    #[test]
    fn response_without_messages_parses_to_empty_list() -> TestResult {
        let parsed: SendMessageResponse = serde_json::from_value(json!({ "contacts": [] }))?;

        assert!(parsed.messages.is_empty());

        Ok(())
    }

    #[test]
    fn debug_output_hides_access_token() {
        let rendered = format!("{:?}", config());

        assert!(!rendered.contains("secret-token"));
    }
}
