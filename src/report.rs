// Persist the failed job list next to the output target for retry tooling.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::RunnerError;

/// Name of the failure list written into the output target's directory.
pub const FAILED_FILES_NAME: &str = "failed_files.txt";

/// Directory the failure list goes into: the parent of `output_target`, or
/// the current working directory when the target has no parent component.
pub fn failure_dir(output_target: &Path) -> &Path {
    match output_target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Write the failed job identifiers, one per line in arrival order.
///
/// Nothing is written when `failed` is empty. Returns the written path, or
/// `None` when there were no failures. An existing file is overwritten, so
/// concurrent runs sharing an output directory clobber each other's list.
pub fn write_failed_files(
    failed: &[String],
    output_target: &Path,
) -> crate::error::Result<Option<PathBuf>> {
    if failed.is_empty() {
        info!("No files failed.");
        return Ok(None);
    }

    let path = failure_dir(output_target).join(FAILED_FILES_NAME);

    let mut content = String::new();
    for job in failed {
        content.push_str(job);
        content.push('\n');
    }

    std::fs::write(&path, content).map_err(|e| {
        RunnerError::persistence(format!("failed to write {}: {e}", path.display()))
    })?;

    info!(
        "Failed file names have been written to {}.",
        path.display()
    );
    Ok(Some(path))
}
