use super::Remediator;
use crate::models::{RemediationOutcome, Target};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Records every trigger and answers from a fixed table (default: `Triggered(200)`).
#[derive(Default)]
pub struct MockRemediator {
    outcomes: HashMap<String, RemediationOutcome>,
    calls: Mutex<Vec<String>>,
}

impl MockRemediator {
    pub fn with_outcome(mut self, name: &str, outcome: RemediationOutcome) -> Self {
        self.outcomes.insert(name.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Remediator for MockRemediator {
    async fn trigger(&self, target: &Target) -> RemediationOutcome {
        self.calls.lock().unwrap().push(target.name.clone());
        self.outcomes
            .get(&target.name)
            .cloned()
            .unwrap_or(RemediationOutcome::Triggered(200))
    }
}
