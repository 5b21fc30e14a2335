//! Progress tracking and periodic reporting for a running transfer.
//!
//! The transfer worker writes into a [`TransferState`]; a [`ProgressReporter`]
//! task polls it on a fixed cadence and renders each tick through a
//! [`ProgressSink`] until the state is marked done.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use lwget_core::progress::{LogSink, ProgressReporter, TransferState};
//!
//! # async fn example() {
//! let state = Arc::new(TransferState::new());
//! let reporter = ProgressReporter::new(Arc::clone(&state), Duration::from_secs(1)).spawn(LogSink);
//!
//! state.record_progress(0, Some(4096));
//! state.record_progress(4096, Some(4096));
//! state.mark_done();
//!
//! let summary = reporter.await.unwrap();
//! assert_eq!(summary.last_snapshot.bytes_transferred, 4096);
//! # }
//! ```

mod format;
mod reporter;
mod sink;
mod state;

pub use format::{format_bytes, format_size};
pub use reporter::{ProgressReporter, ReporterSummary};
pub use sink::{BarSink, LogSink, ProgressSink, format_total, progress_line};
pub use state::{DoneGuard, TransferSnapshot, TransferState};
