// Fan-in: drain completion events as they arrive and keep the run statistics.

use std::sync::mpsc::Receiver;

use tracing::{error, info};

use crate::pipeline::dispatcher::Outcome;

/// Bookkeeping for an in-progress run.
///
/// Mutated only by [`collect_outcomes`], which is the sole consumer of the
/// completion channel, so no locking is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub total: usize,
    pub completed: usize,
    /// Failed job identifiers, in completion arrival order.
    pub failed: Vec<String>,
}

impl RunState {
    pub fn new(total: usize) -> Self {
        RunState {
            total,
            completed: 0,
            failed: Vec::new(),
        }
    }

    fn record(&mut self, outcome: Outcome) {
        self.completed += 1;
        match outcome {
            Outcome::Success { job } => {
                info!(
                    "{} processed successfully [{}/{} completed]",
                    job, self.completed, self.total
                );
            }
            Outcome::Failure { job, reason } => {
                error!(
                    "{} failed: {} [{}/{} completed]",
                    job, reason, self.completed, self.total
                );
                self.failed.push(job);
            }
        }
    }
}

/// Consume completion events until every submitted job has reported.
///
/// The channel closes when the last worker drops its sender, which happens
/// exactly after `total` outcomes have been sent, so this drains the full run.
pub fn collect_outcomes(outcomes: Receiver<Outcome>, total: usize) -> RunState {
    let mut state = RunState::new(total);
    for outcome in outcomes {
        state.record(outcome);
    }
    debug_assert_eq!(state.completed, state.total);
    state
}
