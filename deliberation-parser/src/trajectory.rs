//! Trajectory parsing: `history*.json` → parsed rounds → conversation runs.

use std::path::{Path, PathBuf};

use deliberation_core::{
    AgentRoster, DeliberationError, Message, ParsedRound, ParsedTrajectory, ParserConfig,
    RawRound, RawTrajectory, Run, RunMetadata, SpanExtractor, TrajectoryMetadata,
    EXPERIMENT_TYPE,
};

use crate::report::{FileFailure, ParseReport};

/// Load `config.txt`-style agent profiles. A missing file is an empty roster.
pub fn load_agent_config(path: &Path) -> Result<AgentRoster, DeliberationError> {
    AgentRoster::load(path).map_err(|e| e.in_file(path.display().to_string()))
}

/// Parses every trajectory in one data directory against that directory's
/// agent roster.
#[derive(Debug, Clone)]
pub struct TrajectoryParser {
    data_dir: PathBuf,
    file_prefix: String,
    roster: AgentRoster,
    spans: SpanExtractor,
}

impl TrajectoryParser {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        config: &ParserConfig,
    ) -> Result<Self, DeliberationError> {
        let data_dir = data_dir.into();
        let roster = load_agent_config(&data_dir.join(&config.agent_config_file))?;
        tracing::info!(
            data_dir = %data_dir.display(),
            agents = roster.len(),
            "Loaded agent roster"
        );
        Ok(Self {
            data_dir,
            file_prefix: config.file_prefix.clone(),
            roster,
            spans: SpanExtractor::new()?,
        })
    }

    pub fn from_config(config: &ParserConfig) -> Result<Self, DeliberationError> {
        Self::new(config.data_dir(), config)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    /// Trajectory files directly inside the data directory, sorted by name.
    /// Symlinks are followed. A missing directory has no trajectories.
    pub fn discover(&self) -> Result<Vec<PathBuf>, DeliberationError> {
        let entries = match std::fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(data_dir = %self.data_dir.display(), "Data directory not found");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(&self.file_prefix) && name.ends_with(".json") {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    pub fn parse_trajectory_file(
        &self,
        path: &Path,
    ) -> Result<ParsedTrajectory, DeliberationError> {
        let text = std::fs::read_to_string(path)?;
        let raw: RawTrajectory = serde_json::from_str(&text)?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let rounds: Vec<ParsedRound> = raw
            .rounds
            .iter()
            .enumerate()
            .map(|(idx, round)| self.parse_round(round, idx))
            .collect();

        Ok(ParsedTrajectory {
            filename,
            slot_assignment: raw.slot_assignment,
            metadata: TrajectoryMetadata {
                config: self.roster.clone(),
                total_rounds: rounds.len(),
                finished_rounds: raw.finished_rounds,
            },
            rounds,
        })
    }

    pub fn parse_round(&self, round: &RawRound, round_index: usize) -> ParsedRound {
        let deals = self.spans.deals(&round.full_answer);
        let scratchpad = self.spans.scratchpad(&round.full_answer);
        let public_answer = self
            .spans
            .answer(&round.full_answer)
            .or_else(|| round.public_answer.clone())
            .unwrap_or_default();

        ParsedRound {
            round_index,
            agent: round.agent.clone(),
            agent_config: self.roster.get(&round.agent).cloned(),
            prompt: round.prompt.clone(),
            full_answer: round.full_answer.clone(),
            public_answer,
            message_length: round.full_answer.chars().count(),
            has_scratchpad: scratchpad.is_some(),
            has_deal: !deals.is_empty(),
            deals_proposed: deals,
            scratchpad_reasoning: scratchpad,
        }
    }

    /// Parse every discovered file. A failing file is logged and recorded,
    /// and the batch continues. Only directory listing errors abort.
    pub fn process_all_trajectories(&self) -> Result<ParseReport, DeliberationError> {
        let files = self.discover()?;
        tracing::info!(count = files.len(), "Found trajectory files to process");

        let mut report = ParseReport {
            files_found: files.len(),
            ..ParseReport::default()
        };

        for path in files {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            match self.parse_trajectory_file(&path) {
                Ok(parsed) => {
                    report.agents.extend(
                        parsed
                            .rounds
                            .iter()
                            .filter(|r| !r.agent.is_empty())
                            .map(|r| r.agent.clone()),
                    );
                    report.runs.push(convert_to_docent_format(&parsed));
                    report.processed.push(path);
                    tracing::info!(file = %name, runs = 1, "Processed trajectory");
                }
                Err(e) => {
                    tracing::error!(file = %name, error = %e, "Failed to process trajectory");
                    report.failures.push(FileFailure { path, error: e });
                }
            }
        }

        tracing::info!(runs = report.runs.len(), "Total runs prepared for Docent");
        Ok(report)
    }
}

/// Flatten a parsed trajectory into one conversation run: per round, the
/// prompt as a user message (when non-empty), then the reply as an assistant
/// message. The reply is the public answer, or the full answer when no
/// public answer was found.
pub fn convert_to_docent_format(parsed: &ParsedTrajectory) -> Run {
    let mut messages = Vec::with_capacity(parsed.rounds.len() * 2);

    for round in &parsed.rounds {
        if !round.prompt.is_empty() {
            messages.push(Message::user(round.prompt.clone()));
        }
        let content = if round.public_answer.is_empty() {
            &round.full_answer
        } else {
            &round.public_answer
        };
        messages.push(Message::assistant(content.clone()));
    }

    Run {
        messages,
        metadata: RunMetadata {
            filename: parsed.filename.clone(),
            experiment_type: EXPERIMENT_TYPE.to_string(),
            total_rounds: parsed.metadata.total_rounds,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deliberation_core::Role;

    fn parser() -> TrajectoryParser {
        TrajectoryParser {
            data_dir: PathBuf::from("."),
            file_prefix: "history".to_string(),
            roster: AgentRoster::parse("Alice,A1,buyer,aggressive,gpt-4\n"),
            spans: SpanExtractor::new().unwrap(),
        }
    }

    fn raw(agent: &str, prompt: &str, full_answer: &str, public_answer: Option<&str>) -> RawRound {
        RawRound {
            agent: agent.to_string(),
            prompt: prompt.to_string(),
            full_answer: full_answer.to_string(),
            public_answer: public_answer.map(str::to_string),
        }
    }

    fn trajectory(rounds: Vec<ParsedRound>) -> ParsedTrajectory {
        ParsedTrajectory {
            filename: "history_0.json".to_string(),
            slot_assignment: Vec::new(),
            metadata: TrajectoryMetadata {
                config: AgentRoster::default(),
                total_rounds: rounds.len(),
                finished_rounds: 0,
            },
            rounds,
        }
    }

    #[test]
    fn test_parse_round_extracts_all_spans() {
        let answer = "<SCRATCHPAD>\n I can concede on B.\n</SCRATCHPAD>\n\
                      <ANSWER> Offer: <DEAL>A1 B2</DEAL> </ANSWER>";
        let round = parser().parse_round(&raw("Alice", "Your turn", answer, None), 3);

        assert_eq!(round.round_index, 3);
        assert_eq!(round.scratchpad_reasoning.as_deref(), Some("I can concede on B."));
        assert!(round.has_scratchpad);
        assert_eq!(round.deals_proposed, vec!["A1 B2"]);
        assert!(round.has_deal);
        assert_eq!(round.public_answer, "Offer: <DEAL>A1 B2</DEAL>");
        assert_eq!(round.message_length, answer.chars().count());
        assert_eq!(round.agent_config.unwrap().short_name, "A1");
    }

    #[test]
    fn test_answer_tag_beats_public_answer_field() {
        let round = parser().parse_round(
            &raw("Alice", "", "<ANSWER>from tag</ANSWER>", Some("from field")),
            0,
        );
        assert_eq!(round.public_answer, "from tag");
    }

    #[test]
    fn test_public_answer_field_fallback() {
        let round = parser().parse_round(&raw("Alice", "", "no tags", Some("from field")), 0);
        assert_eq!(round.public_answer, "from field");

        let round = parser().parse_round(&raw("Alice", "", "no tags", None), 0);
        assert_eq!(round.public_answer, "");
    }

    #[test]
    fn test_unknown_agent_has_no_profile() {
        let round = parser().parse_round(&raw("Mallory", "", "hello", None), 0);
        assert!(round.agent_config.is_none());
        assert!(!round.has_deal);
        assert!(round.deals_proposed.is_empty());
        assert!(!round.has_scratchpad);
    }

    #[test]
    fn test_message_length_counts_chars() {
        let round = parser().parse_round(&raw("Alice", "", "héllo", None), 0);
        assert_eq!(round.message_length, 5);
    }

    #[test]
    fn test_convert_alternates_when_every_round_has_prompt() {
        let p = parser();
        let rounds = (0..4)
            .map(|i| {
                let prompt = format!("prompt {i}");
                p.parse_round(&raw("Alice", &prompt, "<ANSWER>ok</ANSWER>", None), i)
            })
            .collect();
        let run = convert_to_docent_format(&trajectory(rounds));

        assert_eq!(run.messages.len(), 8);
        for (i, msg) in run.messages.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(msg.role, expected);
        }
        assert_eq!(run.metadata.total_rounds, 4);
        assert_eq!(run.metadata.experiment_type, "multi_agent_negotiation");
        assert_eq!(run.metadata.filename, "history_0.json");
    }

    #[test]
    fn test_convert_skips_empty_prompt_and_falls_back_to_full_answer() {
        let p = parser();
        let rounds = vec![
            p.parse_round(&raw("Alice", "", "plain reply", None), 0),
            p.parse_round(&raw("Alice", "next", "<ANSWER>public</ANSWER>", None), 1),
        ];
        let run = convert_to_docent_format(&trajectory(rounds));

        assert_eq!(
            run.messages,
            vec![
                Message::assistant("plain reply"),
                Message::user("next"),
                Message::assistant("public"),
            ]
        );
    }

    #[test]
    fn test_empty_answer_everywhere_yields_empty_assistant_message() {
        let p = parser();
        let rounds = vec![p.parse_round(&raw("Alice", "", "", None), 0)];
        let run = convert_to_docent_format(&trajectory(rounds));
        assert_eq!(run.messages, vec![Message::assistant("")]);
    }

    #[test]
    fn test_empty_answer_tag_still_beats_field_and_falls_back_to_full_answer() {
        let p = parser();
        let full_answer = "<ANSWER>   </ANSWER> thinking aloud";
        let round = p.parse_round(&raw("Alice", "", full_answer, Some("from field")), 0);
        assert_eq!(round.public_answer, "");

        let run = convert_to_docent_format(&trajectory(vec![round]));
        assert_eq!(run.messages, vec![Message::assistant(full_answer)]);
    }
}
