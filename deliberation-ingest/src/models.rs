//! Docent's agent-run schema, as accepted by its batch-add endpoint.

use std::collections::BTreeMap;

use deliberation_core::{Message, Role, Run};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key of the single transcript attached to each run.
pub const MAIN_TRANSCRIPT: &str = "main";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ChatMessage {
    User { content: String },
    Assistant { content: String },
}

impl From<&Message> for ChatMessage {
    fn from(msg: &Message) -> Self {
        match msg.role {
            Role::User => ChatMessage::User {
                content: msg.content.clone(),
            },
            Role::Assistant => ChatMessage::Assistant {
                content: msg.content.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Run-level metadata. Docent only accepts numeric score values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentRunMetadata {
    pub scores: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRun {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub transcripts: BTreeMap<String, Transcript>,
    pub metadata: AgentRunMetadata,
}

impl AgentRun {
    /// Wrap a prepared run; `session_id` is its 1-based position in the batch.
    pub fn from_run(run: &Run, session_id: usize) -> Self {
        let name = format!("Negotiation Session {}", session_id);
        let messages: Vec<ChatMessage> = run.messages.iter().map(ChatMessage::from).collect();

        let mut scores = BTreeMap::new();
        scores.insert("total_rounds".to_string(), run.metadata.total_rounds as f64);
        scores.insert("message_count".to_string(), messages.len() as f64);
        scores.insert("session_id".to_string(), session_id as f64);

        let transcript = Transcript {
            id: Uuid::new_v4(),
            name: name.clone(),
            description: format!("Multi-agent negotiation from {}", run.metadata.filename),
            messages,
            metadata: serde_json::Map::new(),
        };

        AgentRun {
            id: Uuid::new_v4(),
            name,
            description: format!("Agent negotiation session from {}", run.metadata.filename),
            transcripts: BTreeMap::from([(MAIN_TRANSCRIPT.to_string(), transcript)]),
            metadata: AgentRunMetadata { scores },
        }
    }
}

pub fn build_agent_runs(runs: &[Run]) -> Vec<AgentRun> {
    runs.iter()
        .enumerate()
        .map(|(i, run)| AgentRun::from_run(run, i + 1))
        .collect()
}
