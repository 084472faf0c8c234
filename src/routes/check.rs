use super::BotContext;
use crate::connectors::telegram::Message;
use crate::connectors::ConnectorError;

pub const ALREADY_RUNNING: &str = "A status check is already running.";

/// Runs a cycle right away, unless the scheduler is already in one.
pub async fn check(ctx: &BotContext, message: &Message) -> Result<(), ConnectorError> {
    let text = match ctx.scheduler.try_run_cycle().await {
        Some(cycle) => {
            let summary = cycle.summary();
            format!(
                "Status page refreshed: {} online, {} unstable, {} down.",
                summary.online, summary.unstable, summary.down
            )
        }
        None => ALREADY_RUNNING.to_string(),
    };

    ctx.telegram
        .send_message(message.chat.id, &text, None)
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::render_service::MockRemediator;
    use crate::connectors::telegram::SentCall;
    use crate::health::MockProbe;
    use crate::models::HealthState;
    use crate::routes::dispatch;
    use crate::routes::tests::{harness_with, text_update, OWNER};
    use std::time::Duration;

    #[tokio::test]
    async fn reports_cycle_summary() {
        let h = harness_with(
            MockProbe::default().with_state("Shop", HealthState::Down),
            MockRemediator::default(),
        );
        dispatch(&h.ctx, text_update(1, OWNER, "/check")).await.unwrap();

        assert_eq!(
            h.telegram.calls(),
            vec![SentCall::Send {
                chat_id: OWNER,
                text: "Status page refreshed: 1 online, 0 unstable, 1 down.".to_string(),
                markup: None,
            }]
        );
        assert_eq!(h.remediator.calls(), vec!["Shop".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn skips_while_a_cycle_is_running() {
        let h = harness_with(
            MockProbe::default().with_delay("Blog", Duration::from_secs(5)),
            MockRemediator::default(),
        );
        let scheduler = h.ctx.scheduler.clone();
        let running = tokio::spawn(async move { scheduler.run_cycle().await });
        tokio::time::sleep(Duration::from_millis(10)).await;

        dispatch(&h.ctx, text_update(1, OWNER, "/check")).await.unwrap();
        running.await.unwrap();

        assert_eq!(
            h.telegram.calls(),
            vec![SentCall::Send {
                chat_id: OWNER,
                text: ALREADY_RUNNING.to_string(),
                markup: None,
            }]
        );
    }
}
