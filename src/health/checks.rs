use crate::models::{HealthState, Target};
use async_trait::async_trait;
use std::time::{Duration, Instant};

#[async_trait]
pub trait Probe: Send + Sync {
    /// Classifies one target's reachability. Never fails outward.
    async fn check(&self, target: &Target) -> HealthState;
}

/// Issues a single `GET` to the target's health URL.
///
/// There are no retries here; the next scheduled cycle is the retry.
pub struct HttpProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    #[tracing::instrument(name = "Check project health", skip(self, target), fields(project = %target.name))]
    async fn check(&self, target: &Target) -> HealthState {
        let start = Instant::now();

        match self
            .client
            .get(&target.app_url)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status().as_u16();
                tracing::debug!(
                    status,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Project answered"
                );
                HealthState::from_status(status)
            }
            Err(e) => {
                tracing::debug!("Project unreachable: {:?}", e.without_url());
                HealthState::Down
            }
        }
    }
}
