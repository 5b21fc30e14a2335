//! HTTP download of a single file to disk.
//!
//! A [`DownloadSession`] streams the body into a staging file next to the
//! destination while a progress reporter polls the shared transfer state, then
//! moves the staging file into place.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Progress reporting at a fixed interval, with a final line on completion
//! - Cancellation through a [`CancellationToken`](tokio_util::sync::CancellationToken)
//! - Configurable timeouts (30s connect, 5min read by default)
//! - Structured error types with full context
//!
//! # Example
//!
//! ```no_run
//! use lwget_core::download::{DownloadOutcome, DownloadRequest, DownloadSession, HttpClient};
//! use lwget_core::progress::LogSink;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() {
//! let session = DownloadSession::new(HttpClient::new());
//! let request = DownloadRequest::new("https://example.com/paper.pdf", "./paper.pdf");
//!
//! match session.run(&request, LogSink, &CancellationToken::new()).await {
//!     DownloadOutcome::Completed { path, .. } => println!("Downloaded: {}", path.display()),
//!     DownloadOutcome::Cancelled { .. } => println!("Interrupted"),
//!     DownloadOutcome::Failed(e) => eprintln!("{e}"),
//! }
//! # }
//! ```

mod client;
pub mod constants;
mod destination;
mod error;
mod finalize;
mod session;
mod worker;

pub use client::HttpClient;
pub use destination::{basename_from_url, resolve_destination, staging_dir_for};
pub use error::{ErrorKind, TransferError};
pub use finalize::move_into_place;
pub use session::{DownloadOutcome, DownloadRequest, DownloadSession};
pub use worker::{StagedFile, TransferWorker};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, TransferError>` explicitly in function signatures.
