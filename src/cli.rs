//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use lwget_core::download::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};

/// Default seconds between progress lines.
pub(crate) const DEFAULT_INTERVAL_SECS: u64 = 1;

/// Download a single file over HTTP(S) with periodic progress reports.
///
/// The body is streamed to a staging file next to the destination and moved
/// into place once complete. Ctrl-C stops the transfer and removes the
/// partial file.
#[derive(Parser, Debug, Clone)]
#[command(name = "lwget")]
#[command(author, version, about)]
#[command(after_help = "Exit codes:\n  0 = file downloaded\n  1 = download failed\n  130 = interrupted (Ctrl-C)")]
pub struct Args {
    /// URL to download (http or https)
    pub url: String,

    /// Destination path (default: URL basename in the current directory)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Seconds between progress lines (1-3600)
    #[arg(short, long, value_name = "SECS", default_value_t = DEFAULT_INTERVAL_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub interval: u64,

    /// Directory for the partial file (default: destination's directory)
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Connect timeout in seconds (1-3600)
    #[arg(long, value_name = "SECS", default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: u64,

    /// Timeout between body reads in seconds (1-3600)
    #[arg(long, value_name = "SECS", default_value_t = READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: u64,

    /// Show a progress bar instead of log lines when stderr is a terminal
    #[arg(long)]
    pub progress_bar: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,
}
