use std::collections::BTreeSet;
use std::path::PathBuf;

use deliberation_core::{DeliberationError, Run};

/// A trajectory file that could not be parsed.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: DeliberationError,
}

/// Outcome of one parsing batch.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub files_found: usize,
    /// One run per entry of `processed`, in the same order.
    pub runs: Vec<Run>,
    pub processed: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    /// Distinct agent names seen across parsed rounds.
    pub agents: BTreeSet<String>,
}

impl ParseReport {
    pub fn total_messages(&self) -> usize {
        self.runs.iter().map(|r| r.messages.len()).sum()
    }
}

/// Outcome of moving consumed files out of the data directory.
#[derive(Debug, Default)]
pub struct ArchiveReport {
    pub destination: PathBuf,
    pub moved: Vec<PathBuf>,
}
