//! Shared transfer state written by the worker and polled by the reporter.

use std::sync::{Mutex, PoisonError};

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// Point-in-time view of a transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferSnapshot {
    /// Bytes written to the staging file so far.
    pub bytes_transferred: u64,
    /// Size announced by the server, `None` when it sent no length.
    pub total: Option<u64>,
}

/// Progress of a single download.
///
/// One writer (the transfer worker) and any number of readers. The byte
/// counter and the total are guarded together so a [`snapshot`](Self::snapshot)
/// never pairs a fresh count with a stale total. Completion is a
/// [`CancellationToken`] so readers can both poll it and await it.
#[derive(Debug, Default)]
pub struct TransferState {
    progress: Mutex<TransferSnapshot>,
    done: CancellationToken,
}

impl TransferState {
    /// Creates an empty, not-yet-done state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta_bytes` to the counter.
    ///
    /// The first known `total` is kept; later values are ignored.
    pub fn record_progress(&self, delta_bytes: u64, total: Option<u64>) {
        let mut progress = self.progress.lock().unwrap_or_else(PoisonError::into_inner);
        progress.bytes_transferred = progress.bytes_transferred.saturating_add(delta_bytes);
        if progress.total.is_none() {
            progress.total = total;
        }
    }

    /// Returns the current byte count and total as one consistent pair.
    #[must_use]
    pub fn snapshot(&self) -> TransferSnapshot {
        *self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the transfer finished. Safe to call more than once.
    pub fn mark_done(&self) {
        self.done.cancel();
    }

    /// True once [`mark_done`](Self::mark_done) has been called.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done.is_cancelled()
    }

    /// Resolves once the transfer is marked done.
    pub fn wait_done(&self) -> WaitForCancellationFuture<'_> {
        self.done.cancelled()
    }
}

/// Calls [`TransferState::mark_done`] when dropped.
///
/// Held by the worker for the duration of a transfer so every exit path
/// (return, `?`, panic, or the future being dropped) flips the flag.
#[derive(Debug)]
pub struct DoneGuard<'a> {
    state: &'a TransferState,
}

impl<'a> DoneGuard<'a> {
    /// Arms a guard for `state`.
    #[must_use]
    pub fn new(state: &'a TransferState) -> Self {
        Self { state }
    }
}

impl Drop for DoneGuard<'_> {
    fn drop(&mut self) {
        self.state.mark_done();
    }
}
