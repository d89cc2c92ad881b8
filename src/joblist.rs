// Pre-run job list handling: read the list file, then exclusion, skipping
// and shuffling before anything is dispatched.

use std::path::Path;

use rand::seq::SliceRandom;

use crate::error::RunnerError;

/// Read job identifiers from a list file, one per line. Lines are trimmed
/// and blank lines dropped.
pub fn read_job_list(path: &Path) -> crate::error::Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        RunnerError::config(format!("failed to read file list {}: {e}", path.display()))
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Remove jobs already present in `exclude_dir`.
///
/// Matching is by file-name stem: the text before the first `.` of the
/// directory entry against the same stem of the job's basename. Each entry
/// removes at most the first matching job, so duplicate jobs survive all but
/// one exclusion.
pub fn apply_exclude(files: &mut Vec<String>, exclude_dir: &Path) -> crate::error::Result<()> {
    let entries = std::fs::read_dir(exclude_dir).map_err(|e| {
        RunnerError::config(format!(
            "failed to read exclude directory {}: {e}",
            exclude_dir.display()
        ))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            RunnerError::config(format!(
                "failed to read exclude directory {}: {e}",
                exclude_dir.display()
            ))
        })?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        let stem = first_stem(&name);

        if let Some(pos) = files.iter().position(|f| first_stem(basename(f)) == stem) {
            files.remove(pos);
        }
    }
    Ok(())
}

/// Drop the first `n` jobs. Dropping more than the list holds empties it.
pub fn apply_skip(files: &mut Vec<String>, n: usize) {
    files.drain(..n.min(files.len()));
}

/// Shuffle the job list in place.
pub fn shuffle(files: &mut [String]) {
    files.shuffle(&mut rand::thread_rng());
}

/// Text before the first `.` of a file name.
fn first_stem(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Final path component, `/`-separated.
fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
