//! lwget Core Library
//!
//! This library provides the core functionality for the `lwget` tool: a
//! single-file HTTP(S) download streamed to disk while a background task
//! reports progress at a fixed interval.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`progress`] - Shared transfer state, size formatting and the progress reporter
//! - [`download`] - HTTP client, transfer worker, final move and the download session

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod progress;

mod user_agent;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use download::{
    DownloadOutcome, DownloadRequest, DownloadSession, ErrorKind, HttpClient, TransferError,
    resolve_destination,
};
pub use progress::{ProgressReporter, ProgressSink, TransferState, format_bytes, format_size};
