pub mod whatsapp;

use async_trait::async_trait;

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()>;
}

/// Stand-in used when no WhatsApp credentials are configured: messages are
/// logged and dropped.
pub struct DisabledProvider;

#[async_trait]
impl MessagingProvider for DisabledProvider {
    async fn send_message(&self, _to: &str, _body: &str) -> anyhow::Result<()> {
        tracing::warn!("messaging disabled, message not sent");
        Ok(())
    }
}
