//! Transfer worker: streams one HTTP response body into a staging file.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::Response;
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::client::HttpClient;
use super::constants::{TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX, WRITE_BUFFER_SIZE};
use super::error::TransferError;
use crate::progress::{DoneGuard, TransferState};

/// A fully downloaded body waiting in its staging file.
///
/// Dropping it removes the staging file; see
/// [`move_into_place`](super::move_into_place).
#[derive(Debug)]
pub struct StagedFile {
    temp_path: TempPath,
    bytes: u64,
    content_length: Option<u64>,
}

impl StagedFile {
    /// Path of the staging file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Bytes written to the staging file.
    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Length announced by the server, if any.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    pub(crate) fn into_temp_path(self) -> TempPath {
        self.temp_path
    }

    #[cfg(test)]
    pub(crate) fn for_tests(temp_path: TempPath, bytes: u64) -> Self {
        Self {
            temp_path,
            bytes,
            content_length: Some(bytes),
        }
    }
}

/// Downloads a URL into a staging file while publishing progress.
#[derive(Debug, Clone)]
pub struct TransferWorker {
    client: HttpClient,
}

impl TransferWorker {
    /// Creates a worker sending requests through `client`.
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Downloads `url` into a fresh staging file inside `temp_dir`.
    ///
    /// Publishes the announced length before the first chunk and the size of
    /// every chunk after it is written. `state` is marked done on every exit
    /// path, including errors, cancellation and the future being dropped.
    ///
    /// `cancel` is raced against the request and every body read, so a
    /// cancellation is observed within one network operation.
    ///
    /// # Errors
    ///
    /// - [`TransferError::InvalidUrl`], [`TransferError::Network`],
    ///   [`TransferError::Timeout`], [`TransferError::HttpStatus`] for request failures
    /// - [`TransferError::Io`] if the staging file cannot be created or written
    /// - [`TransferError::Cancelled`] if `cancel` fired first
    #[instrument(skip(self, state, cancel), fields(url = %url))]
    pub async fn download(
        &self,
        url: &str,
        temp_dir: &Path,
        state: &TransferState,
        cancel: &CancellationToken,
    ) -> Result<StagedFile, TransferError> {
        let _done = DoneGuard::new(state);

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("cancelled before response headers");
                return Err(TransferError::cancelled(0));
            }
            response = self.client.get(url) => response?,
        };

        let content_length = response.content_length();
        state.record_progress(0, content_length);

        let temp_file = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .suffix(TEMP_FILE_SUFFIX)
            .tempfile_in(temp_dir)
            .map_err(|e| TransferError::io(temp_dir, e))?;
        let (file, temp_path) = temp_file.into_parts();
        debug!(path = %temp_path.display(), ?content_length, "streaming to staging file");

        let bytes = stream_to_file(
            File::from_std(file),
            response,
            url,
            &temp_path,
            content_length,
            state,
            cancel,
        )
        .await?;

        debug!(path = %temp_path.display(), bytes, "body fully received");
        Ok(StagedFile {
            temp_path,
            bytes,
            content_length,
        })
    }
}

/// Streams the response body to `file`, recording each chunk in `state`.
///
/// Returns bytes written.
async fn stream_to_file(
    file: File,
    response: Response,
    url: &str,
    file_path: &Path,
    content_length: Option<u64>,
    state: &TransferState,
    cancel: &CancellationToken,
) -> Result<u64, TransferError> {
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(bytes_written, "cancelled mid-transfer");
                return Err(TransferError::cancelled(bytes_written));
            }
            next = stream.next() => next,
        };
        let Some(chunk_result) = next else {
            break;
        };
        let chunk = chunk_result.map_err(|e| TransferError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| TransferError::io(file_path, e))?;

        let len = chunk.len() as u64;
        bytes_written += len;
        state.record_progress(len, content_length);
    }

    writer
        .flush()
        .await
        .map_err(|e| TransferError::io(file_path, e))?;

    Ok(bytes_written)
}
