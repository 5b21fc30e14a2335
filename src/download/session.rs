//! One download from URL to final file, with progress reporting.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::client::HttpClient;
use super::constants::DEFAULT_REPORT_INTERVAL;
use super::destination::staging_dir_for;
use super::error::TransferError;
use super::finalize::move_into_place;
use super::worker::TransferWorker;
use crate::progress::{ProgressReporter, ProgressSink, TransferState};

/// Parameters of a single download.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Source URL (http or https).
    pub url: String,
    /// Where the file ends up.
    pub destination: PathBuf,
    /// Directory for the staging file; defaults to the destination's directory.
    pub temp_dir: Option<PathBuf>,
    /// Progress reporting cadence.
    pub report_interval: Duration,
}

impl DownloadRequest {
    /// Creates a request with the default reporting interval.
    #[must_use]
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            temp_dir: None,
            report_interval: DEFAULT_REPORT_INTERVAL,
        }
    }

    /// Sets the staging directory.
    #[must_use]
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(temp_dir.into());
        self
    }

    /// Sets the reporting interval.
    #[must_use]
    pub fn with_report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval;
        self
    }

    fn staging_dir(&self) -> PathBuf {
        self.temp_dir
            .clone()
            .unwrap_or_else(|| staging_dir_for(&self.destination))
    }
}

/// How a download session ended.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The file is at `path`.
    Completed {
        /// Final location of the file.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
    },
    /// The user stopped the transfer; nothing was written to the destination.
    Cancelled {
        /// Bytes received before the stop.
        bytes_transferred: u64,
    },
    /// The transfer or the final move failed.
    Failed(TransferError),
}

impl DownloadOutcome {
    /// Returns true for [`DownloadOutcome::Completed`].
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

impl From<TransferError> for DownloadOutcome {
    fn from(error: TransferError) -> Self {
        match error {
            TransferError::Cancelled { bytes_transferred } => Self::Cancelled { bytes_transferred },
            other => Self::Failed(other),
        }
    }
}

/// Runs downloads: reporter task, transfer worker and final move.
#[derive(Debug, Clone)]
pub struct DownloadSession {
    worker: TransferWorker,
}

impl DownloadSession {
    /// Creates a session sending requests through `client`.
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self {
            worker: TransferWorker::new(client),
        }
    }

    /// Downloads `request.url` to `request.destination`.
    ///
    /// Progress goes to `sink` every `request.report_interval` while the
    /// transfer runs. The reporter task is always joined before this returns,
    /// so `sink` sees no output afterwards.
    #[instrument(skip_all, fields(url = %request.url))]
    pub async fn run<S: ProgressSink>(
        &self,
        request: &DownloadRequest,
        sink: S,
        cancel: &CancellationToken,
    ) -> DownloadOutcome {
        let state = Arc::new(TransferState::new());
        let reporter =
            ProgressReporter::new(Arc::clone(&state), request.report_interval).spawn(sink);

        let staging_dir = request.staging_dir();
        debug!(
            destination = %request.destination.display(),
            staging_dir = %staging_dir.display(),
            "starting transfer"
        );
        let transfer = self
            .worker
            .download(&request.url, &staging_dir, &state, cancel)
            .await;

        match reporter.await {
            Ok(summary) => debug!(ticks = summary.ticks, "reporter joined"),
            Err(e) => warn!(error = %e, "progress reporter task failed"),
        }

        let staged = match transfer {
            Ok(staged) => staged,
            Err(e) => return e.into(),
        };

        let bytes = staged.bytes();
        match move_into_place(staged, &request.destination).await {
            Ok(path) => {
                info!(path = %path.display(), bytes, "download complete");
                DownloadOutcome::Completed { path, bytes }
            }
            Err(e) => DownloadOutcome::Failed(e),
        }
    }
}
