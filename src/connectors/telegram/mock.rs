use super::types::{Chat, InlineKeyboardMarkup, Message, Update};
use super::TelegramConnector;
use crate::connectors::ConnectorError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum SentCall {
    Send {
        chat_id: i64,
        text: String,
        markup: Option<InlineKeyboardMarkup>,
    },
    Edit {
        chat_id: i64,
        message_id: i64,
        text: String,
    },
    Answer {
        callback_query_id: String,
        text: Option<String>,
    },
}

/// In-memory Bot API. Hands out queued update batches and records every call.
pub struct MockTelegramConnector {
    updates: Mutex<VecDeque<Vec<Update>>>,
    calls: Mutex<Vec<SentCall>>,
    next_message_id: AtomicI64,
    fail_edits: AtomicBool,
    fail_answers: AtomicBool,
}

impl Default for MockTelegramConnector {
    fn default() -> Self {
        Self {
            updates: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            next_message_id: AtomicI64::new(100),
            fail_edits: AtomicBool::new(false),
            fail_answers: AtomicBool::new(false),
        }
    }
}

impl MockTelegramConnector {
    pub fn push_updates(&self, batch: Vec<Update>) {
        self.updates.lock().unwrap().push_back(batch);
    }

    pub fn fail_edits(&self, fail: bool) {
        self.fail_edits.store(fail, Ordering::SeqCst);
    }

    /// Callback answers fail the way Telegram rejects an expired query.
    pub fn fail_answers(&self, fail: bool) {
        self.fail_answers.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<SentCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TelegramConnector for MockTelegramConnector {
    async fn get_updates(&self, offset: i64, _timeout_secs: u64) -> Result<Vec<Update>, ConnectorError> {
        let batch = self.updates.lock().unwrap().pop_front();
        match batch {
            Some(batch) => Ok(batch
                .into_iter()
                .filter(|update| update.update_id >= offset)
                .collect()),
            None => {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok(Vec::new())
            }
        }
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<Message, ConnectorError> {
        self.calls.lock().unwrap().push(SentCall::Send {
            chat_id,
            text: text.to_string(),
            markup,
        });

        Ok(Message {
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst),
            chat: Chat { id: chat_id },
            from: None,
            text: Some(text.to_string()),
        })
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        _markup: Option<InlineKeyboardMarkup>,
    ) -> Result<(), ConnectorError> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(ConnectorError::ServiceUnavailable(
                "Connection failed: telegram unreachable".to_string(),
            ));
        }

        self.calls.lock().unwrap().push(SentCall::Edit {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<(), ConnectorError> {
        if self.fail_answers.load(Ordering::SeqCst) {
            return Err(ConnectorError::HttpError(
                "Bad Request: query is too old and response timeout expired".to_string(),
            ));
        }

        self.calls.lock().unwrap().push(SentCall::Answer {
            callback_query_id: callback_query_id.to_string(),
            text: text.map(str::to_string),
        });
        Ok(())
    }
}
