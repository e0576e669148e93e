pub mod archive;
pub mod report;
pub mod trajectory;

pub use archive::archive_processed;
pub use report::{ArchiveReport, FileFailure, ParseReport};
pub use trajectory::{convert_to_docent_format, load_agent_config, TrajectoryParser};
