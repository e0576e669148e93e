//! Moves consumed trajectory files into `processed/` so a rerun skips them.
//!
//! The move happens after the artifact is written and is not transactional:
//! a crash in between leaves the inputs in place and they are parsed again.

use std::path::Path;

use deliberation_core::DeliberationError;

use crate::report::ArchiveReport;

pub fn archive_processed(
    data_dir: &Path,
    processed_dir: &str,
    files: &[impl AsRef<Path>],
) -> Result<ArchiveReport, DeliberationError> {
    let destination = data_dir.join(processed_dir);
    let mut report = ArchiveReport {
        destination: destination.clone(),
        moved: Vec::with_capacity(files.len()),
    };

    if files.is_empty() {
        return Ok(report);
    }

    std::fs::create_dir_all(&destination)?;
    tracing::info!(
        count = files.len(),
        destination = %destination.display(),
        "Moving processed files"
    );

    for file in files {
        let file = file.as_ref();
        let Some(name) = file.file_name() else {
            continue;
        };
        let target = destination.join(name);
        std::fs::rename(file, &target)
            .map_err(|e| DeliberationError::from(e).in_file(file.display().to_string()))?;
        tracing::debug!(file = %name.to_string_lossy(), "Moved to processed/");
        report.moved.push(target);
    }

    Ok(report)
}
