// Run entry point: fan jobs out to the pool, drain completions, persist the
// failure list.

use std::path::Path;

use crate::pipeline::collector::{RunState, collect_outcomes};
use crate::pipeline::dispatcher::{JobTask, WorkerPool};
use crate::report::write_failed_files;

/// Final statistics for a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub completed: usize,
    /// Failed job identifiers, in completion arrival order.
    pub failed: Vec<String>,
}

impl From<RunState> for RunSummary {
    fn from(state: RunState) -> Self {
        RunSummary {
            total: state.total,
            completed: state.completed,
            failed: state.failed,
        }
    }
}

/// Process every job and record failures.
///
/// Each job runs at most `worker_count` at a time; one job's failure never
/// aborts the others. After all jobs have reported, the failed identifiers
/// are written next to `output_target` (see [`write_failed_files`]).
///
/// Fails before submitting anything when `worker_count < 1`, and after all
/// outcomes are known when the failure list cannot be persisted. The worker
/// pool is torn down on both paths.
pub fn run<T>(
    jobs: Vec<String>,
    output_target: &Path,
    worker_count: usize,
    task: T,
) -> crate::error::Result<RunSummary>
where
    T: JobTask + 'static,
{
    let total = jobs.len();
    let pool = WorkerPool::new(worker_count)?;
    let outcomes = pool.dispatch(jobs, output_target, task);
    let state = collect_outcomes(outcomes, total);
    drop(pool);

    write_failed_files(&state.failed, output_target)?;
    Ok(RunSummary::from(state))
}
