//! Render deploy connector
//!
//! Requests redeploys of monitored projects, either through a deploy hook URL
//! or through the authenticated services API.

use crate::models::{RemediationOutcome, Target};
use async_trait::async_trait;

pub mod client;
#[cfg(test)]
pub mod mock;

pub use client::RenderDeployClient;
#[cfg(test)]
pub use mock::MockRemediator;

#[async_trait]
pub trait Remediator: Send + Sync {
    /// Requests one redeploy of `target`. Never fails outward: every failure
    /// mode is folded into the returned outcome.
    async fn trigger(&self, target: &Target) -> RemediationOutcome;
}
