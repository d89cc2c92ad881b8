// Fan-out: submit every job to a fixed-size worker pool, report completions
// over a channel in finish order.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use rayon::ThreadPoolBuilder;

use crate::error::RunnerError;

/// The per-job processing function. Receives the job identifier and the
/// shared output target; signals failure through its `Result`.
pub trait JobTask: Fn(&str, &Path) -> crate::error::Result<()> + Send + Sync {}

impl<T> JobTask for T where T: Fn(&str, &Path) -> crate::error::Result<()> + Send + Sync {}

/// Completion report for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { job: String },
    Failure { job: String, reason: String },
}

/// Fixed-size pool of worker threads.
///
/// Submission is unbounded: every job is handed to the pool up front and the
/// pool queues whatever exceeds its thread count. Threads are joined when the
/// pool is dropped, on every exit path.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    pub fn new(worker_count: usize) -> crate::error::Result<Self> {
        if worker_count < 1 {
            return Err(RunnerError::config(format!(
                "worker count must be at least 1, got {worker_count}"
            )));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .build()
            .map_err(|e| RunnerError::config(format!("failed to build worker pool: {e}")))?;
        Ok(WorkerPool { pool })
    }

    /// Submit all jobs at once and return the completion channel.
    ///
    /// Outcomes arrive in the order jobs finish, not submission order. The
    /// channel yields exactly one outcome per submitted job and closes once
    /// the last worker reports.
    pub fn dispatch<T>(
        &self,
        jobs: Vec<String>,
        output_target: &Path,
        task: T,
    ) -> Receiver<Outcome>
    where
        T: JobTask + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let task = Arc::new(task);
        let output_target: Arc<PathBuf> = Arc::new(output_target.to_path_buf());

        for job in jobs {
            let sender = sender.clone();
            let task = Arc::clone(&task);
            let output_target = Arc::clone(&output_target);

            self.pool.spawn(move || {
                let outcome = run_one(&*task, &job, &output_target);
                // Receiver only disappears if the collector is gone; nothing
                // left to report to then.
                let _ = sender.send(outcome);
            });
        }

        receiver
    }
}

/// Execute one job, containing both task errors and panics.
///
/// A panic in the task must not take down the pool thread's siblings, so it
/// is caught here and converted into a `Failure` like any other task error.
fn run_one<T: JobTask>(task: &T, job: &str, output_target: &Path) -> Outcome {
    let result = catch_unwind(AssertUnwindSafe(|| task(job, output_target)));
    match result {
        Ok(Ok(())) => Outcome::Success {
            job: job.to_string(),
        },
        Ok(Err(e)) => Outcome::Failure {
            job: job.to_string(),
            reason: e.to_string(),
        },
        Err(panic) => Outcome::Failure {
            job: job.to_string(),
            reason: panic_description(panic),
        },
    }
}

fn panic_description(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("task panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("task panicked: {s}")
    } else {
        "task panicked".to_string()
    }
}
