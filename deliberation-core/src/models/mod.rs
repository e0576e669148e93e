pub mod agent;
pub mod run;
pub mod trajectory;

pub use agent::{AgentProfile, AgentRoster};
pub use run::{Message, Role, Run, RunMetadata, EXPERIMENT_TYPE};
pub use trajectory::{ParsedRound, ParsedTrajectory, RawRound, RawTrajectory, TrajectoryMetadata};
