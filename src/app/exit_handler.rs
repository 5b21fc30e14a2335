//! Exit code logic for the lwget process.
//!
//! Maps the session outcome to the process exit outcome and writes the one
//! closing log line for it.

use lwget_core::download::DownloadOutcome;
use tracing::{error, info};

use crate::ProcessExit;

/// Determines the process exit outcome for a finished session.
pub(crate) fn determine_exit_outcome(outcome: &DownloadOutcome) -> ProcessExit {
    match outcome {
        DownloadOutcome::Completed { .. } => ProcessExit::Success,
        DownloadOutcome::Cancelled { .. } => ProcessExit::Interrupted,
        DownloadOutcome::Failed(_) => ProcessExit::Failure,
    }
}

/// Logs the closing line for `outcome` and returns the exit outcome.
pub(crate) fn report_outcome(outcome: &DownloadOutcome) -> ProcessExit {
    match outcome {
        DownloadOutcome::Completed { path, .. } => info!("Done, file: {}", path.display()),
        DownloadOutcome::Cancelled { .. } => info!("Interrupted by user"),
        DownloadOutcome::Failed(e) => error!("{e}"),
    }
    determine_exit_outcome(outcome)
}
