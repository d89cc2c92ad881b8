// Per-job worker command: one child process per job, so a crashing job
// cannot corrupt the dispatcher or its siblings.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::RunnerError;

/// Runs a configured program once per job as `<program> <job> <output_target>`.
///
/// A non-zero exit status (or failure to spawn at all) is reported as a task
/// error; the command's own stdout/stderr pass through untouched.
pub struct CommandTask {
    program: String,
}

impl CommandTask {
    pub fn new(program: impl Into<String>) -> Self {
        CommandTask {
            program: program.into(),
        }
    }

    pub fn run(&self, job: &str, output_target: &Path) -> crate::error::Result<()> {
        let status = Command::new(&self.program)
            .arg(job)
            .arg(output_target)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| RunnerError::task(format!("failed to spawn {}: {e}", self.program)))?;

        if status.success() {
            Ok(())
        } else {
            Err(RunnerError::task(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }
}
