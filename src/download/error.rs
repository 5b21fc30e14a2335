//! Error types for the download module.
//!
//! Every failure of a transfer carries the URL or path it happened on, and
//! falls into one of three classes (see [`ErrorKind`]).

use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`TransferError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection, DNS, TLS, timeout, bad URL or non-success HTTP status.
    Network,
    /// Creating, writing or moving the local file failed.
    Filesystem,
    /// The user asked the transfer to stop.
    Interrupted,
}

/// Errors that can end a transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, truncated body, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Connect or read timed out.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Non-success HTTP status after redirects were followed.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The provided URL is malformed or not http(s).
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// File system error (temp file creation, chunk write, final move).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Transfer stopped on user request.
    #[error("download interrupted after {bytes_transferred} bytes")]
    Cancelled {
        /// Bytes written before the stop was observed.
        bytes_transferred: u64,
    },
}

impl TransferError {
    /// Creates a network error from a reqwest error, promoting timeouts.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::timeout(url);
        }
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a cancellation outcome.
    #[must_use]
    pub fn cancelled(bytes_transferred: u64) -> Self {
        Self::Cancelled { bytes_transferred }
    }

    /// Returns the error class.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. }
            | Self::Timeout { .. }
            | Self::HttpStatus { .. }
            | Self::InvalidUrl { .. } => ErrorKind::Network,
            Self::Io { .. } => ErrorKind::Filesystem,
            Self::Cancelled { .. } => ErrorKind::Interrupted,
        }
    }

    /// True when the transfer was stopped by the user rather than failing.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.kind() == ErrorKind::Interrupted
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// url or path, which the source errors do not carry.
