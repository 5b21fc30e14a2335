//! Constants for the download module (timeouts, reporting cadence, naming).

use std::time::Duration;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default per-read timeout while streaming the body (5 minutes).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Maximum redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 10;

/// Default progress reporting interval.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Shown in place of the total when the server sent no length.
pub const UNKNOWN_TOTAL_PLACEHOLDER: &str = "?";

/// Prefix of staging files created next to the destination.
pub const TEMP_FILE_PREFIX: &str = ".lwget-";

/// Suffix of staging files.
pub const TEMP_FILE_SUFFIX: &str = ".part";

/// Destination name used when the URL has no usable path segment.
pub const FALLBACK_FILENAME: &str = "index.html";

/// Capacity of the write buffer between the network stream and the staging file.
pub const WRITE_BUFFER_SIZE: usize = 64 * 1024;
