//! Operator command surface.
//!
//! Every handler checks the sender against the configured owner before doing
//! anything else; the reconciler itself is never exposed to other users.

mod check;
mod poller;
mod redeploy;
mod start;

use crate::connectors::telegram::{Message, Update};
use crate::connectors::{ConnectorError, Remediator, TelegramConnector};
use crate::models::TargetRegistry;
use crate::services::Scheduler;
use std::sync::Arc;

pub use poller::run_update_loop;

pub const UNAUTHORIZED_TEXT: &str = "⛔ You are not authorized to use this bot.";

/// Everything a command handler may touch.
pub struct BotContext {
    pub telegram: Arc<dyn TelegramConnector>,
    pub remediator: Arc<dyn Remediator>,
    pub scheduler: Arc<Scheduler>,
    pub targets: Arc<TargetRegistry>,
    pub owner_id: i64,
}

impl BotContext {
    fn is_owner(&self, user_id: Option<i64>) -> bool {
        user_id == Some(self.owner_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Redeploy,
    Check,
}

impl Command {
    /// Accepts `/cmd`, `/cmd@BotName` and trailing arguments.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);

        match name {
            "start" => Some(Self::Start),
            "redeploy" => Some(Self::Redeploy),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

pub async fn dispatch(ctx: &BotContext, update: Update) -> Result<(), ConnectorError> {
    if let Some(query) = update.callback_query {
        return redeploy::select_project(ctx, &query).await;
    }

    let Some(message) = update.message else {
        return Ok(());
    };
    let Some(command) = message.text.as_deref().and_then(Command::parse) else {
        return Ok(());
    };

    if !ctx.is_owner(message.from.as_ref().map(|user| user.id)) {
        return reject(ctx, &message, command).await;
    }

    match command {
        Command::Start => start::start(ctx, &message).await,
        Command::Redeploy => redeploy::list_projects(ctx, &message).await,
        Command::Check => check::check(ctx, &message).await,
    }
}

async fn reject(ctx: &BotContext, message: &Message, command: Command) -> Result<(), ConnectorError> {
    tracing::info!(
        user_id = ?message.from.as_ref().map(|user| user.id),
        ?command,
        "Rejected command from unauthorized user"
    );
    ctx.telegram
        .send_message(message.chat.id, UNAUTHORIZED_TEXT, None)
        .await
        .map(|_| ())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::connectors::render_service::MockRemediator;
    use crate::connectors::telegram::{
        CallbackQuery, Chat, MockTelegramConnector, SentCall, User,
    };
    use crate::health::MockProbe;
    use crate::services::scheduler::tests::{registry, scheduler_with, RecordingPublisher};
    use std::time::Duration;

    pub(crate) const OWNER: i64 = 42;
    pub(crate) const STRANGER: i64 = 7;

    pub(crate) struct Harness {
        pub ctx: Arc<BotContext>,
        pub telegram: Arc<MockTelegramConnector>,
        pub remediator: Arc<MockRemediator>,
    }

    pub(crate) fn harness_with(probe: MockProbe, remediator: MockRemediator) -> Harness {
        let telegram = Arc::new(MockTelegramConnector::default());
        let remediator = Arc::new(remediator);
        let names = ["Blog", "Shop"];
        let ctx = Arc::new(BotContext {
            telegram: telegram.clone(),
            remediator: remediator.clone(),
            scheduler: Arc::new(scheduler_with(
                probe,
                remediator.clone(),
                Arc::new(RecordingPublisher::default()),
                &names,
                Duration::from_secs(3600),
            )),
            targets: registry(&names),
            owner_id: OWNER,
        });
        Harness {
            ctx,
            telegram,
            remediator,
        }
    }

    pub(crate) fn harness() -> Harness {
        harness_with(MockProbe::default(), MockRemediator::default())
    }

    pub(crate) fn user(id: i64) -> User {
        User {
            id,
            first_name: "Ops".to_string(),
            username: None,
        }
    }

    pub(crate) fn text_update(update_id: i64, from: i64, text: &str) -> Update {
        Update {
            update_id,
            message: Some(Message {
                message_id: 1,
                chat: Chat { id: from },
                from: Some(user(from)),
                text: Some(text.to_string()),
            }),
            callback_query: None,
        }
    }

    pub(crate) fn button_update(update_id: i64, from: i64, data: &str) -> Update {
        Update {
            update_id,
            message: None,
            callback_query: Some(CallbackQuery {
                id: format!("cb-{}", update_id),
                from: user(from),
                message: Some(Message {
                    message_id: 55,
                    chat: Chat { id: from },
                    from: None,
                    text: Some("Select a project to redeploy:".to_string()),
                }),
                data: Some(data.to_string()),
            }),
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/redeploy@render_manager_bot"), Some(Command::Redeploy));
        assert_eq!(Command::parse("  /check now"), Some(Command::Check));
        assert_eq!(Command::parse("start"), None);
        assert_eq!(Command::parse("/unknown"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[tokio::test]
    async fn strangers_get_the_rejection_text_for_every_command() {
        let h = harness();
        for text in ["/start", "/redeploy", "/check"] {
            dispatch(&h.ctx, text_update(1, STRANGER, text)).await.unwrap();
        }

        let calls = h.telegram.calls();
        assert_eq!(calls.len(), 3);
        for call in calls {
            assert_eq!(
                call,
                SentCall::Send {
                    chat_id: STRANGER,
                    text: UNAUTHORIZED_TEXT.to_string(),
                    markup: None,
                }
            );
        }
        assert!(h.remediator.calls().is_empty());
    }

    #[tokio::test]
    async fn plain_text_is_ignored() {
        let h = harness();
        dispatch(&h.ctx, text_update(1, OWNER, "hello")).await.unwrap();
        assert!(h.telegram.calls().is_empty());
    }
}
