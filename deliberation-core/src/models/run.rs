use serde::{Deserialize, Serialize};

/// `experiment_type` stamped on every run.
pub const EXPERIMENT_TYPE: &str = "multi_agent_negotiation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub filename: String,
    pub experiment_type: String,
    #[serde(default)]
    pub total_rounds: usize,
}

/// One trajectory flattened into a conversation. Unit of the prepared artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub messages: Vec<Message>,
    pub metadata: RunMetadata,
}
