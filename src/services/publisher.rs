use super::report::RenderedPage;
use crate::connectors::{ConnectorError, TelegramConnector};
use async_trait::async_trait;
use std::sync::Arc;

/// The surface that shows the current status page.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Replaces the visible page. On failure the previous page stays as it was.
    async fn publish(&self, page: &RenderedPage) -> Result<(), ConnectorError>;
}

/// Edits one pre-existing channel message in place.
pub struct TelegramPublisher {
    telegram: Arc<dyn TelegramConnector>,
    chat_id: i64,
    message_id: i64,
}

impl TelegramPublisher {
    pub fn new(telegram: Arc<dyn TelegramConnector>, chat_id: i64, message_id: i64) -> Self {
        Self {
            telegram,
            chat_id,
            message_id,
        }
    }
}

#[async_trait]
impl Publisher for TelegramPublisher {
    #[tracing::instrument(name = "Publish status page", skip(self, page), fields(chat_id = self.chat_id, message_id = self.message_id))]
    async fn publish(&self, page: &RenderedPage) -> Result<(), ConnectorError> {
        self.telegram
            .edit_message_text(self.chat_id, self.message_id, &page.text, None)
            .await
    }
}
