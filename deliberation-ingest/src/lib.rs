pub mod client;
pub mod error;
pub mod ingestor;
pub mod models;

pub use client::{AgentRunSink, DocentClient, DocentConfig};
pub use error::UploadError;
pub use ingestor::{Ingestor, UploadReport};
pub use models::{build_agent_runs, AgentRun, AgentRunMetadata, ChatMessage, Transcript};
