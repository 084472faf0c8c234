//! Probe-then-remediate pass over the whole target set.

use crate::connectors::Remediator;
use crate::health::Probe;
use crate::models::{Cycle, HealthState, RemediationOutcome, Target};
use chrono::Utc;
use futures::future::join_all;
use indexmap::IndexMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Slack on top of the HTTP timeouts before a call is abandoned outright.
const DEADLINE_GRACE: Duration = Duration::from_secs(2);

pub struct Reconciler {
    probe: Arc<dyn Probe>,
    remediator: Arc<dyn Remediator>,
    probe_deadline: Duration,
    remediation_deadline: Duration,
}

impl Reconciler {
    pub fn new(
        probe: Arc<dyn Probe>,
        remediator: Arc<dyn Remediator>,
        probe_timeout: Duration,
        deploy_timeout: Duration,
    ) -> Self {
        Self {
            probe,
            remediator,
            probe_deadline: probe_timeout + DEADLINE_GRACE,
            remediation_deadline: deploy_timeout + DEADLINE_GRACE,
        }
    }

    /// Probes every target concurrently, then redeploys each `Down` target
    /// exactly once. Per-target failures end up inside the returned cycle.
    #[tracing::instrument(name = "Reconcile projects", skip_all, fields(projects = targets.len()))]
    pub async fn run_cycle(&self, targets: &[Target]) -> Cycle {
        let probes = targets.iter().map(|target| async move {
            let state = match timeout(self.probe_deadline, self.probe.check(target)).await {
                Ok(state) => state,
                Err(_) => {
                    tracing::debug!("Probe for {} did not return in time", target.name);
                    HealthState::Down
                }
            };
            (target.name.clone(), state)
        });
        // All probes finish before any remediation decision is made.
        let health: IndexMap<String, HealthState> = join_all(probes).await.into_iter().collect();

        let remediations = targets
            .iter()
            .filter(|target| health.get(&target.name).map_or(false, HealthState::is_down))
            .map(|target| async move {
                let outcome = timeout(self.remediation_deadline, self.remediator.trigger(target))
                    .await
                    .unwrap_or_else(|_| {
                        RemediationOutcome::Error("Redeploy request timed out".to_string())
                    });
                if !outcome.is_triggered() {
                    tracing::warn!("{} was Down, redeploy not started: {}", target.name, outcome);
                } else {
                    tracing::info!("{} was Down, {}", target.name, outcome);
                }
                (target.name.clone(), outcome)
            });
        let remediations: IndexMap<String, RemediationOutcome> =
            join_all(remediations).await.into_iter().collect();

        Cycle {
            timestamp: Utc::now(),
            health,
            remediations,
        }
    }
}
