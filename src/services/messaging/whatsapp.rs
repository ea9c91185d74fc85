use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::MessagingProvider;

/// Sends text messages through the WhatsApp Cloud API.
pub struct WhatsAppProvider {
    api_url: String,
    phone_number_id: String,
    access_token: String,
    client: reqwest::Client,
}

impl WhatsAppProvider {
    pub fn new(
        api_url: String,
        phone_number_id: String,
        access_token: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build WhatsApp HTTP client")?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            phone_number_id,
            access_token,
            client,
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.api_url, self.phone_number_id)
    }
}

fn message_payload(to: &str, body: &str) -> serde_json::Value {
    json!({
        "messaging_product": "whatsapp",
        "to": to,
        "type": "text",
        "text": { "body": body },
    })
}

#[async_trait]
impl MessagingProvider for WhatsAppProvider {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()> {
        let resp = self
            .client
            .post(self.messages_url())
            .bearer_auth(&self.access_token)
            .json(&message_payload(to, body))
            .send()
            .await
            .context("failed to call WhatsApp API")?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            anyhow::bail!("WhatsApp API error ({status}): {detail}");
        }

        tracing::debug!("WhatsApp message accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_url_trims_trailing_slash() {
        let provider = WhatsAppProvider::new(
            "https://graph.facebook.com/v19.0/".to_string(),
            "1234567890".to_string(),
            "token".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            provider.messages_url(),
            "https://graph.facebook.com/v19.0/1234567890/messages"
        );
    }

    #[test]
    fn test_message_payload_shape() {
        let payload = message_payload("919999999999", "Hi Asha");
        assert_eq!(payload["messaging_product"], "whatsapp");
        assert_eq!(payload["to"], "919999999999");
        assert_eq!(payload["type"], "text");
        assert_eq!(payload["text"]["body"], "Hi Asha");
    }
}
