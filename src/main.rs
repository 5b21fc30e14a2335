//! CLI entry point for lwget.

use std::process::ExitCode;

mod app;
mod app_config;
mod cli;

/// Process exit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// File downloaded and moved into place.
    Success,
    /// Transfer, final move or setup failed.
    Failure,
    /// Stopped by Ctrl-C.
    Interrupted,
}

impl ProcessExit {
    /// Shell exit code; 130 is the conventional code for SIGINT.
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Interrupted => 130,
        }
    }
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        ExitCode::from(exit.code())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match app::runtime::run_lwget().await {
        Ok(exit) => exit.into(),
        Err(e) => {
            // Tracing may not be initialized yet (config errors happen first).
            eprintln!("Error: {e:#}");
            ProcessExit::Failure.into()
        }
    }
}
