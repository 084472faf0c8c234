use super::Remediator;
use crate::connectors::ConnectorError;
use crate::models::{DeployTrigger, RemediationOutcome, Target};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Calls Render to start a new deploy of a project.
pub struct RenderDeployClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    timeout: Duration,
}

impl RenderDeployClient {
    pub fn new(http: reqwest::Client, api_url: &str, api_key: String, timeout: Duration) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        }
    }

    fn request(&self, trigger: &DeployTrigger) -> reqwest::RequestBuilder {
        match trigger {
            DeployTrigger::Hook { url } => self.http.post(url),
            DeployTrigger::Service { id } => self
                .http
                .post(format!("{}/v1/services/{}/deploys", self.api_url, id))
                .bearer_auth(&self.api_key)
                .header("Accept", "application/json")
                .json(&json!({ "clearCache": "do_not_clear" })),
        }
    }
}

#[async_trait]
impl Remediator for RenderDeployClient {
    #[tracing::instrument(name = "Trigger redeploy", skip(self, target), fields(project = %target.name))]
    async fn trigger(&self, target: &Target) -> RemediationOutcome {
        let outcome = match self
            .request(&target.deploy)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => RemediationOutcome::from_status(response.status().as_u16()),
            Err(err) => RemediationOutcome::Error(ConnectorError::from(err).to_string()),
        };

        tracing::debug!(%outcome, "Render answered redeploy request");
        outcome
    }
}
