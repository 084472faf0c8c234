use super::Probe;
use crate::models::{HealthState, Target};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Answers from a fixed table; unknown targets are `Online`.
#[derive(Default)]
pub struct MockProbe {
    states: HashMap<String, HealthState>,
    hang: HashMap<String, Duration>,
}

impl MockProbe {
    pub fn with_state(mut self, name: &str, state: HealthState) -> Self {
        self.states.insert(name.to_string(), state);
        self
    }

    /// Makes the probe for `name` sleep before answering.
    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.hang.insert(name.to_string(), delay);
        self
    }
}

#[async_trait]
impl Probe for MockProbe {
    async fn check(&self, target: &Target) -> HealthState {
        if let Some(delay) = self.hang.get(&target.name) {
            tokio::time::sleep(*delay).await;
        }
        self.states
            .get(&target.name)
            .copied()
            .unwrap_or(HealthState::Online)
    }
}
