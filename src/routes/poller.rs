use super::{dispatch, BotContext};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long-polls Telegram and hands each update to its own task, so a slow
/// redeploy never holds up the next command.
pub async fn run_update_loop(
    ctx: Arc<BotContext>,
    poll_timeout_secs: u64,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut offset: i64 = 0;
    tracing::info!("Listening for commands");

    loop {
        let polled = tokio::select! {
            result = ctx.telegram.get_updates(offset, poll_timeout_secs) => result,
            _ = shutdown.changed() => break,
        };

        match polled {
            Ok(updates) => {
                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    let ctx = ctx.clone();
                    tokio::spawn(async move {
                        let update_id = update.update_id;
                        if let Err(err) = dispatch(&ctx, update).await {
                            tracing::error!(update_id, "Failed to handle update: {}", err);
                        }
                    });
                }
            }
            Err(err) => {
                tracing::warn!("Polling Telegram failed: {}", err);
                tokio::select! {
                    _ = tokio::time::sleep(RETRY_DELAY) => {}
                    _ = shutdown.changed() => break,
                }
            }
        }
    }

    tracing::info!("Stopped listening for commands");
}
