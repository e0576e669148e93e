pub mod artifact;
pub mod config;
pub mod error;
pub mod models;
pub mod spans;

pub use config::{DeliberationConfig, IngestConfig, ParserConfig};
pub use error::DeliberationError;
pub use models::{
    AgentProfile, AgentRoster, Message, ParsedRound, ParsedTrajectory, RawRound, RawTrajectory,
    Role, Run, RunMetadata, TrajectoryMetadata, EXPERIMENT_TYPE,
};
pub use spans::SpanExtractor;
