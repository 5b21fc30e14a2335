//! Background task that reports transfer progress at a fixed cadence.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::sink::ProgressSink;
use super::state::{TransferSnapshot, TransferState};

/// Shortest accepted tick interval; `tokio::time::interval` rejects zero.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// What the reporter saw before it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReporterSummary {
    /// Number of lines emitted.
    pub ticks: u64,
    /// Snapshot rendered by the final tick.
    pub last_snapshot: TransferSnapshot,
}

/// Polls a [`TransferState`] and renders it through a [`ProgressSink`].
///
/// The first tick fires immediately and every `interval` after that. A tick
/// also fires as soon as the state is marked done, and that tick is the last:
/// its snapshot is taken after completion was observed, so it carries the
/// final byte count. A state that is already done yields exactly one tick.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    state: Arc<TransferState>,
    interval: Duration,
}

impl ProgressReporter {
    /// Creates a reporter for `state` ticking every `interval`.
    #[must_use]
    pub fn new(state: Arc<TransferState>, interval: Duration) -> Self {
        Self {
            state,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// Runs the reporter on the tokio runtime.
    ///
    /// Await the handle after the transfer finished to avoid leaving the task
    /// orphaned.
    pub fn spawn<S: ProgressSink>(self, sink: S) -> JoinHandle<ReporterSummary> {
        tokio::spawn(self.run(sink))
    }

    /// Reports until the state is done.
    pub async fn run<S: ProgressSink>(self, mut sink: S) -> ReporterSummary {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks: u64 = 0;
        let last_snapshot = loop {
            tokio::select! {
                biased;
                () = self.state.wait_done() => {}
                _ = ticker.tick() => {}
            }

            let finished = self.state.is_done();
            let snapshot = self.state.snapshot();
            sink.emit(&snapshot);
            ticks += 1;

            if finished {
                break snapshot;
            }
        };

        sink.finish();
        debug!(
            ticks,
            bytes = last_snapshot.bytes_transferred,
            "progress reporter stopped"
        );

        ReporterSummary {
            ticks,
            last_snapshot,
        }
    }
}
