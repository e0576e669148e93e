//! Docent collection client
//!
//! The uploader talks to Docent through the `AgentRunSink` trait so the batch
//! logic does not depend on reqwest. `DocentClient` is the HTTP
//! implementation:
//!
//! `POST {api_url}/{collection_id}/agent_runs` with `{"agent_runs": [...]}`
//! and a bearer token. The whole batch goes in a single request.

use std::time::Duration;

use async_trait::async_trait;
use deliberation_core::IngestConfig;
use reqwest::Client;
use serde::Serialize;

use crate::error::UploadError;
use crate::models::AgentRun;

/// Destination for a batch of agent runs.
#[async_trait]
pub trait AgentRunSink: Send + Sync {
    /// Submit every run to the collection. Returns the number accepted.
    async fn add_agent_runs(
        &self,
        collection_id: &str,
        agent_runs: &[AgentRun],
    ) -> Result<usize, UploadError>;

    /// Sink name for logging.
    fn name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct DocentConfig {
    pub api_key: String,
    pub api_url: String,
    pub timeout_seconds: u64,
    /// Environment variable the key came from, for error messages.
    pub api_key_env: String,
}

impl DocentConfig {
    /// Build from ingest settings. With no explicit key, reads the variable
    /// named by `api_key_env`.
    pub fn new(api_key: Option<String>, config: &IngestConfig) -> Self {
        let api_key = api_key
            .or_else(|| std::env::var(&config.api_key_env).ok())
            .unwrap_or_default();

        Self {
            api_key,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            timeout_seconds: config.timeout_seconds,
            api_key_env: config.api_key_env.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AddAgentRunsRequest<'a> {
    agent_runs: &'a [AgentRun],
}

#[derive(Debug, Clone)]
pub struct DocentClient {
    client: Client,
    config: DocentConfig,
}

impl DocentClient {
    pub fn new(config: DocentConfig) -> Result<Self, UploadError> {
        if config.api_key.is_empty() {
            return Err(UploadError::MissingApiKey {
                var: config.api_key_env.clone(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        tracing::info!(api_url = %config.api_url, "Docent client initialized");
        Ok(Self { client, config })
    }

    /// Point an existing config at another server (for testing / staging).
    pub fn with_base_url(config: DocentConfig, base_url: String) -> Result<Self, UploadError> {
        Self::new(DocentConfig {
            api_url: base_url.trim_end_matches('/').to_string(),
            ..config
        })
    }
}

#[async_trait]
impl AgentRunSink for DocentClient {
    async fn add_agent_runs(
        &self,
        collection_id: &str,
        agent_runs: &[AgentRun],
    ) -> Result<usize, UploadError> {
        let url = format!("{}/{}/agent_runs", self.config.api_url, collection_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&AddAgentRunsRequest { agent_runs })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read Docent error body");
                    format!("<unreadable body: {e}>")
                }
            };
            tracing::error!(code = status.as_u16(), message = %message, "Docent API error");
            return Err(UploadError::Api {
                code: status.as_u16(),
                message,
            });
        }

        Ok(agent_runs.len())
    }

    fn name(&self) -> &str {
        "docent"
    }
}
