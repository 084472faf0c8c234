//! Telegram Bot API connector
//!
//! Carries both the persistent status message (edited in place every cycle)
//! and the operator's command surface.

use crate::connectors::ConnectorError;
use async_trait::async_trait;

pub mod client;
#[cfg(test)]
pub mod mock;
mod types;

pub use client::TelegramClient;
#[cfg(test)]
pub use mock::{MockTelegramConnector, SentCall};
pub use types::{CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update, User};

#[async_trait]
pub trait TelegramConnector: Send + Sync {
    /// Long-polls for updates with `update_id >= offset`.
    async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, ConnectorError>;

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<Message, ConnectorError>;

    /// Replaces the text of an existing message. Editing to identical text succeeds.
    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<(), ConnectorError>;

    async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<(), ConnectorError>;
}
