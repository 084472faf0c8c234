use super::types::{ApiResponse, InlineKeyboardMarkup, Message, Update};
use super::TelegramConnector;
use crate::connectors::ConnectorError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

const NOT_MODIFIED: &str = "message is not modified";

/// Bot API client over HTTPS. All texts are sent with HTML parse mode.
pub struct TelegramClient {
    http: reqwest::Client,
    /// `{api_url}/bot{token}`; never logged
    endpoint: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, bot_token: &str, poll_timeout: Duration) -> Result<Self, ConnectorError> {
        // Requests must outlive the long-poll window or getUpdates always times out.
        let http = reqwest::Client::builder()
            .timeout(poll_timeout + Duration::from_secs(10))
            .build()
            .map_err(|err| ConnectorError::Internal(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            http,
            endpoint: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
        })
    }

    async fn call<T>(&self, method: &str, payload: Value) -> Result<T, ConnectorError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}/{}", self.endpoint, method))
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let envelope = response.json::<ApiResponse<T>>().await.map_err(|err| {
            ConnectorError::InvalidResponse(format!("{} returned {}: {}", method, status, err.without_url()))
        })?;

        if envelope.ok {
            return envelope.result.ok_or_else(|| {
                ConnectorError::InvalidResponse(format!("{} returned no result", method))
            });
        }

        let description = envelope
            .description
            .unwrap_or_else(|| format!("{} failed", method));
        Err(ConnectorError::from_status(
            envelope.error_code.unwrap_or(status),
            description,
        ))
    }
}

#[async_trait]
impl TelegramConnector for TelegramClient {
    async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, ConnectorError> {
        self.call(
            "getUpdates",
            json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
        .await
    }

    #[tracing::instrument(name = "Send Telegram message", skip(self, text, markup))]
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<Message, ConnectorError> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });
        if let Some(markup) = markup {
            payload["reply_markup"] = json!(markup);
        }

        self.call("sendMessage", payload).await
    }

    #[tracing::instrument(name = "Edit Telegram message", skip(self, text, markup))]
    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<(), ConnectorError> {
        let mut payload = json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });
        if let Some(markup) = markup {
            payload["reply_markup"] = json!(markup);
        }

        match self.call::<Value>("editMessageText", payload).await {
            Ok(_) => Ok(()),
            Err(ConnectorError::HttpError(description)) if description.contains(NOT_MODIFIED) => {
                tracing::debug!("Message {} already up to date", message_id);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<(), ConnectorError> {
        let mut payload = json!({ "callback_query_id": callback_query_id });
        if let Some(text) = text {
            payload["text"] = json!(text);
        }

        self.call::<bool>("answerCallbackQuery", payload)
            .await
            .map(|_| ())
    }
}
