use super::{HealthState, RemediationOutcome};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// One complete poll-and-remediate pass over the target set.
///
/// `health` is keyed by target name in configured order and always holds
/// every configured target. `remediations` only holds targets that were
/// `Down` in this cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    pub timestamp: DateTime<Utc>,
    pub health: IndexMap<String, HealthState>,
    pub remediations: IndexMap<String, RemediationOutcome>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub online: usize,
    pub unstable: usize,
    pub down: usize,
}

impl Cycle {
    pub fn summary(&self) -> CycleSummary {
        self.health
            .values()
            .fold(CycleSummary::default(), |mut summary, state| {
                match state {
                    HealthState::Online => summary.online += 1,
                    HealthState::Unstable(_) => summary.unstable += 1,
                    HealthState::Down => summary.down += 1,
                }
                summary
            })
    }
}
