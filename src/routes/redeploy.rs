use super::{BotContext, UNAUTHORIZED_TEXT};
use crate::connectors::telegram::{CallbackQuery, InlineKeyboardButton, InlineKeyboardMarkup, Message};
use crate::connectors::ConnectorError;
use crate::helpers::escape_html;

const CALLBACK_PREFIX: &str = "redeploy:";
pub const SELECT_PROMPT: &str = "Select a project to redeploy:";
pub const UNKNOWN_PROJECT: &str = "Unknown project.";

/// Callback data carries the registry index; Telegram caps it at 64 bytes,
/// which long project names would overflow.
fn callback_data(index: usize) -> String {
    format!("{}{}", CALLBACK_PREFIX, index)
}

fn parse_callback_data(data: &str) -> Option<usize> {
    data.strip_prefix(CALLBACK_PREFIX)?.parse().ok()
}

pub async fn list_projects(ctx: &BotContext, message: &Message) -> Result<(), ConnectorError> {
    if ctx.targets.is_empty() {
        ctx.telegram
            .send_message(message.chat.id, "No projects to display.", None)
            .await?;
        return Ok(());
    }

    let keyboard = ctx
        .targets
        .iter()
        .enumerate()
        .map(|(index, target)| {
            vec![InlineKeyboardButton {
                text: target.name.clone(),
                callback_data: callback_data(index),
            }]
        })
        .collect();

    ctx.telegram
        .send_message(
            message.chat.id,
            SELECT_PROMPT,
            Some(InlineKeyboardMarkup {
                inline_keyboard: keyboard,
            }),
        )
        .await
        .map(|_| ())
}

/// Button press: redeploy exactly the selected project, reporting progress by
/// editing the message that carried the buttons.
#[tracing::instrument(name = "Manual redeploy", skip_all, fields(user_id = query.from.id))]
pub async fn select_project(ctx: &BotContext, query: &CallbackQuery) -> Result<(), ConnectorError> {
    if !ctx.is_owner(Some(query.from.id)) {
        tracing::info!("Rejected button press from unauthorized user");
        return ctx
            .telegram
            .answer_callback_query(&query.id, Some(UNAUTHORIZED_TEXT))
            .await;
    }

    let target = query
        .data
        .as_deref()
        .and_then(parse_callback_data)
        .and_then(|index| ctx.targets.get(index));
    let (Some(target), Some(message)) = (target, query.message.as_ref()) else {
        return ctx
            .telegram
            .answer_callback_query(&query.id, Some(UNKNOWN_PROJECT))
            .await;
    };

    // Presses older than Telegram's answer window can no longer be
    // acknowledged; the redeploy still goes ahead.
    if let Err(err) = ctx.telegram.answer_callback_query(&query.id, None).await {
        tracing::warn!("Failed to answer button press: {}", err);
    }

    let name = escape_html(&target.name);
    if let Err(err) = ctx
        .telegram
        .edit_message_text(
            message.chat.id,
            message.message_id,
            &format!("Redeploying <b>{}</b> ...", name),
            None,
        )
        .await
    {
        tracing::warn!("Failed to show redeploy progress: {}", err);
    }

    let outcome = ctx.remediator.trigger(target).await;
    if outcome.is_triggered() {
        tracing::info!(project = %target.name, %outcome, "Manual redeploy started");
    } else {
        tracing::warn!(project = %target.name, %outcome, "Manual redeploy failed");
    }

    ctx.telegram
        .edit_message_text(
            message.chat.id,
            message.message_id,
            &format!("<b>{}</b>: {}", name, outcome),
            None,
        )
        .await
}
