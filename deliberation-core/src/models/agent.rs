use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DeliberationError;

/// Static description of one negotiating agent, from `config.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub short_name: String,
    pub player_type: String,
    pub strategy: String,
    pub model: String,
}

/// Agent name → profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentRoster(BTreeMap<String, AgentProfile>);

impl AgentRoster {
    /// Parse `name,short_name,player_type,strategy,model` lines.
    ///
    /// Lines with fewer than five fields are skipped; extra fields are ignored
    /// and a repeated name keeps the last entry.
    pub fn parse(text: &str) -> Self {
        let mut agents = BTreeMap::new();
        for line in text.lines() {
            let parts: Vec<&str> = line.trim().split(',').collect();
            if parts.len() < 5 {
                continue;
            }
            agents.insert(
                parts[0].to_string(),
                AgentProfile {
                    short_name: parts[1].to_string(),
                    player_type: parts[2].to_string(),
                    strategy: parts[3].to_string(),
                    model: parts[4].to_string(),
                },
            );
        }
        Self(agents)
    }

    /// Load a roster file. A missing file yields an empty roster.
    pub fn load(path: &Path) -> Result<Self, DeliberationError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No agent config file, using empty roster");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn get(&self, agent: &str) -> Option<&AgentProfile> {
        self.0.get(agent)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
