use crate::configuration::Settings;
use crate::connectors::{
    build_http_client, RenderDeployClient, Remediator, TelegramClient, TelegramConnector,
};
use crate::health::{HttpProbe, Probe};
use crate::models::{Cycle, TargetRegistry};
use crate::routes::{self, BotContext};
use crate::services::{Markup, Publisher, Reconciler, ReportRenderer, Scheduler, TelegramPublisher};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// The wired-up bot: one scheduler and one command surface sharing the same
/// target registry, deploy client and Telegram connector.
pub struct Application {
    scheduler: Arc<Scheduler>,
    bot: Arc<BotContext>,
    poll_timeout_secs: u64,
}

impl Application {
    pub fn build(settings: &Settings, targets: TargetRegistry) -> anyhow::Result<Self> {
        let telegram: Arc<dyn TelegramConnector> = Arc::new(TelegramClient::new(
            &settings.telegram.api_url,
            &settings.credentials.bot_token,
            Duration::from_secs(settings.telegram.poll_timeout_secs),
        )?);

        Self::build_with(settings, targets, telegram)
    }

    /// Same as `build`, with a caller-provided Telegram connector.
    pub fn build_with(
        settings: &Settings,
        targets: TargetRegistry,
        telegram: Arc<dyn TelegramConnector>,
    ) -> anyhow::Result<Self> {
        // Probes and redeploys share one connection pool.
        let http = build_http_client().context("Failed to build HTTP client")?;

        let targets = Arc::new(targets);
        let probe: Arc<dyn Probe> = Arc::new(HttpProbe::new(http.clone(), settings.probe_timeout()));
        let remediator: Arc<dyn Remediator> = Arc::new(RenderDeployClient::new(
            http,
            &settings.render.api_url,
            settings.credentials.render_api_key.clone(),
            settings.deploy_timeout(),
        ));
        let publisher: Arc<dyn Publisher> = Arc::new(TelegramPublisher::new(
            telegram.clone(),
            settings.credentials.status_channel_id,
            settings.credentials.status_message_id,
        ));

        let reconciler = Reconciler::new(
            probe,
            remediator.clone(),
            settings.probe_timeout(),
            settings.deploy_timeout(),
        );
        let scheduler = Arc::new(Scheduler::new(
            reconciler,
            ReportRenderer::new(settings.schedule.page_size, Markup::Html),
            publisher,
            targets.clone(),
            settings.check_interval(),
        ));

        let bot = Arc::new(BotContext {
            telegram,
            remediator,
            scheduler: scheduler.clone(),
            targets,
            owner_id: settings.credentials.owner_id,
        });

        Ok(Self {
            scheduler,
            bot,
            poll_timeout_secs: settings.telegram.poll_timeout_secs,
        })
    }

    /// A single reconcile/publish pass, without the command surface.
    pub async fn run_once(&self) -> Cycle {
        self.scheduler.run_cycle().await
    }

    /// Runs the scheduler and the command loop until Ctrl-C.
    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let scheduler = tokio::spawn(self.scheduler.clone().run(shutdown_rx.clone()));
        let poller = tokio::spawn(routes::run_update_loop(
            self.bot.clone(),
            self.poll_timeout_secs,
            shutdown_rx,
        ));

        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for shutdown signal")?;
        tracing::info!("Shutdown requested");
        shutdown_tx.send(true).ok();

        let (scheduler_result, poller_result) = tokio::join!(scheduler, poller);
        scheduler_result.context("Scheduler task failed")?;
        poller_result.context("Command loop failed")?;

        Ok(())
    }
}
