//! Output surfaces for progress ticks.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::format::format_bytes;
use super::state::TransferSnapshot;
use crate::download::constants::UNKNOWN_TOTAL_PLACEHOLDER;

/// Receives one snapshot per reporter tick.
pub trait ProgressSink: Send + 'static {
    /// Renders a tick.
    fn emit(&mut self, snapshot: &TransferSnapshot);

    /// Called once after the last tick, when the reporter stops.
    fn finish(&mut self) {}
}

impl<S: ProgressSink + ?Sized> ProgressSink for Box<S> {
    fn emit(&mut self, snapshot: &TransferSnapshot) {
        (**self).emit(snapshot);
    }

    fn finish(&mut self) {
        (**self).finish();
    }
}

/// Renders the progress line text, e.g. `Currently downloaded: 1.5KiB of 10.0MiB`.
///
/// The count is shown as-is even when it exceeds a (wrong) announced total.
#[must_use]
pub fn progress_line(snapshot: &TransferSnapshot) -> String {
    format!(
        "Currently downloaded: {} of {}",
        format_bytes(snapshot.bytes_transferred),
        format_total(snapshot.total)
    )
}

/// Formats the announced total, or `?` when the server did not send one.
#[must_use]
pub fn format_total(total: Option<u64>) -> String {
    total.map_or_else(|| UNKNOWN_TOTAL_PLACEHOLDER.to_string(), format_bytes)
}

/// Default sink: one `info` log line per tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn emit(&mut self, snapshot: &TransferSnapshot) {
        info!("{}", progress_line(snapshot));
    }
}

/// Terminal sink backed by an indicatif bar.
///
/// Shows a bounded bar once the total is known and a spinner otherwise.
pub struct BarSink {
    bar: ProgressBar,
    bounded: bool,
}

impl BarSink {
    /// Starts as a spinner until a total shows up.
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self {
            bar,
            bounded: false,
        }
    }

    fn make_bounded(&mut self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_style(
            ProgressStyle::with_template(
                "{bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        self.bounded = true;
    }
}

impl Default for BarSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarSink {
    fn emit(&mut self, snapshot: &TransferSnapshot) {
        if let Some(total) = snapshot.total
            && !self.bounded
        {
            self.make_bounded(total);
        }
        self.bar.set_position(snapshot.bytes_transferred);
        if !self.bounded {
            self.bar.set_message(progress_line(snapshot));
            self.bar.tick();
        }
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}
