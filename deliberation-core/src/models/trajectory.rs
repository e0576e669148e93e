use serde::{Deserialize, Deserializer, Serialize};

use super::agent::{AgentProfile, AgentRoster};

/// One `history*.json` file as written by the negotiation game.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrajectory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slot_assignment: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rounds: Vec<RawRound>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub finished_rounds: u64,
}

/// One agent turn.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRound {
    #[serde(default, deserialize_with = "null_as_default")]
    pub agent: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_answer: String,
    #[serde(default)]
    pub public_answer: Option<String>,
}

/// A round with its tagged spans pulled out of `full_answer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRound {
    pub round_index: usize,
    pub agent: String,
    pub agent_config: Option<AgentProfile>,
    pub prompt: String,
    pub full_answer: String,
    pub public_answer: String,
    pub deals_proposed: Vec<String>,
    pub scratchpad_reasoning: Option<String>,
    pub message_length: usize,
    pub has_scratchpad: bool,
    pub has_deal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryMetadata {
    pub config: AgentRoster,
    pub total_rounds: usize,
    pub finished_rounds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedTrajectory {
    pub filename: String,
    pub slot_assignment: Vec<serde_json::Value>,
    pub rounds: Vec<ParsedRound>,
    pub metadata: TrajectoryMetadata,
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
