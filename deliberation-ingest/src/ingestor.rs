use std::path::Path;

use deliberation_core::{artifact, Run};

use crate::client::AgentRunSink;
use crate::error::UploadError;
use crate::models::build_agent_runs;

/// Outcome of one batch submission. Failure always reports a zero count.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReport {
    pub success: bool,
    pub count: usize,
    pub collection_id: String,
    /// Where to view the collection, set on success.
    pub dashboard_url: Option<String>,
    pub error: Option<String>,
}

pub struct Ingestor {
    sink: Box<dyn AgentRunSink>,
    dashboard_url: String,
}

impl Ingestor {
    pub fn new(sink: Box<dyn AgentRunSink>, dashboard_url: impl Into<String>) -> Self {
        Self {
            sink,
            dashboard_url: dashboard_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Submit already-loaded runs as one batch.
    pub async fn ingest_runs(&self, collection_id: &str, runs: &[Run]) -> UploadReport {
        let agent_runs = build_agent_runs(runs);
        tracing::info!(
            count = agent_runs.len(),
            collection_id = %collection_id,
            sink = self.sink.name(),
            "Ingesting agent runs"
        );

        match self.sink.add_agent_runs(collection_id, &agent_runs).await {
            Ok(count) => {
                tracing::info!(count, "Successfully ingested agent runs");
                UploadReport {
                    success: true,
                    count,
                    collection_id: collection_id.to_string(),
                    dashboard_url: Some(format!("{}/{}", self.dashboard_url, collection_id)),
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to ingest agent runs");
                UploadReport {
                    success: false,
                    count: 0,
                    collection_id: collection_id.to_string(),
                    dashboard_url: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Read the prepared artifact and submit it. Artifact errors propagate;
    /// submission errors are folded into the report.
    pub async fn ingest_to_collection(
        &self,
        artifact_path: &Path,
        collection_id: &str,
    ) -> Result<UploadReport, UploadError> {
        tracing::info!(path = %artifact_path.display(), "Creating agent runs from prepared data");
        let runs = artifact::read_runs(artifact_path)?;
        Ok(self.ingest_runs(collection_id, &runs).await)
    }
}
