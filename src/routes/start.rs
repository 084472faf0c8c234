use super::BotContext;
use crate::connectors::telegram::Message;
use crate::connectors::ConnectorError;

pub const GREETING: &str = "👋 Render manager is running. Use /redeploy to redeploy a project or /check to refresh the status page.";

pub async fn start(ctx: &BotContext, message: &Message) -> Result<(), ConnectorError> {
    ctx.telegram
        .send_message(message.chat.id, GREETING, None)
        .await
        .map(|_| ())
}
