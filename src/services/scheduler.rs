//! Periodic reconcile → render → publish loop.

use super::publisher::Publisher;
use super::reconciler::Reconciler;
use super::report::ReportRenderer;
use crate::models::{Cycle, TargetRegistry};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub struct Scheduler {
    reconciler: Reconciler,
    renderer: ReportRenderer,
    publisher: Arc<dyn Publisher>,
    targets: Arc<TargetRegistry>,
    interval: Duration,
    /// Held for the whole of a cycle; at most one cycle runs at a time.
    cycle_lock: Mutex<()>,
}

impl Scheduler {
    pub fn new(
        reconciler: Reconciler,
        renderer: ReportRenderer,
        publisher: Arc<dyn Publisher>,
        targets: Arc<TargetRegistry>,
        interval: Duration,
    ) -> Self {
        Self {
            reconciler,
            renderer,
            publisher,
            targets,
            interval,
            cycle_lock: Mutex::new(()),
        }
    }

    /// Runs one cycle, waiting for a running one to finish first.
    pub async fn run_cycle(&self) -> Cycle {
        let _permit = self.cycle_lock.lock().await;
        self.execute().await
    }

    /// Runs one cycle unless another is in progress, in which case `None`.
    pub async fn try_run_cycle(&self) -> Option<Cycle> {
        let _permit = self.cycle_lock.try_lock().ok()?;
        Some(self.execute().await)
    }

    async fn execute(&self) -> Cycle {
        tracing::info!(projects = self.targets.len(), "Running status check");

        let cycle = self.reconciler.run_cycle(self.targets.as_slice()).await;
        let page = self.renderer.render(&cycle);

        match self.publisher.publish(&page).await {
            Ok(()) => tracing::info!(
                pages = page.pages,
                page_size = page.page_size,
                "Channel status message updated"
            ),
            Err(err) => tracing::error!("Failed to edit channel message: {}", err),
        }

        let summary = cycle.summary();
        tracing::info!(
            online = summary.online,
            unstable = summary.unstable,
            down = summary.down,
            redeploys = cycle.remediations.len(),
            "Status check finished"
        );

        cycle
    }

    /// Runs a cycle now and then once per interval until `shutdown` flips to
    /// true. A cycle in progress always completes.
    pub async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval_at(Instant::now(), self.interval);
        // Overrunning cycles drop the missed ticks and stay on the original grid.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            "Scheduler started, checking every {} minute(s)",
            self.interval.as_secs() / 60
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Scheduler stopped");
    }
}
