//! The prepared-data artifact handed from the parser to the uploader.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::DeliberationError;
use crate::models::Run;

/// Write runs as a pretty-printed JSON array, replacing any existing file.
pub fn write_runs(path: &Path, runs: &[Run]) -> Result<(), DeliberationError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, runs)?;
    writer.flush()?;
    Ok(())
}

pub fn read_runs(path: &Path) -> Result<Vec<Run>, DeliberationError> {
    let reader = BufReader::new(File::open(path)?);
    let runs = serde_json::from_reader(reader)?;
    Ok(runs)
}
