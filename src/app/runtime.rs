use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use lwget_core::download::{
    DownloadOutcome, DownloadRequest, DownloadSession, HttpClient, resolve_destination,
};
use lwget_core::progress::{BarSink, LogSink, ProgressSink};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::ProcessExit;
use crate::app::{config_manager, config_runtime, exit_handler, terminal};

pub(crate) async fn run_lwget() -> Result<ProcessExit> {
    let (cli, cli_sources) = config_runtime::parse_cli_with_sources();
    let resolved = config_manager::resolve_config(cli, &cli_sources)?;
    let args = resolved.args;

    let default_level = config_runtime::resolve_default_log_level(&args);
    let force_cli_log_level = config_runtime::should_force_cli_log_level(&cli_sources);
    let no_color = terminal::is_no_color_requested(&args);
    terminal::init_tracing(default_level, force_cli_log_level, no_color);

    if let Some(path) = &resolved.config_path {
        debug!(path = %path.display(), "Loaded config file");
    }
    debug!(?args, "CLI arguments parsed");

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let destination = match resolve_destination(&args.url, args.out.as_deref(), &cwd) {
        Ok(destination) => destination,
        Err(e) => return Ok(exit_handler::report_outcome(&DownloadOutcome::Failed(e))),
    };

    let client = HttpClient::with_timeouts(args.connect_timeout, args.read_timeout)
        .context("Failed to build HTTP client")?;

    let mut request = DownloadRequest::new(args.url.clone(), destination)
        .with_report_interval(Duration::from_secs(args.interval));
    if let Some(temp_dir) = &args.temp_dir {
        request = request.with_temp_dir(temp_dir.clone());
    }

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Ctrl-C received, cancelling transfer");
            signal_cancel.cancel();
        }
    });

    let use_bar = terminal::should_use_progress_bar(
        args.progress_bar,
        io::stderr().is_terminal(),
        args.quiet,
        terminal::is_dumb_terminal(),
    );
    let sink: Box<dyn ProgressSink> = if use_bar {
        Box::new(BarSink::new())
    } else {
        Box::new(LogSink)
    };

    info!(
        url = %request.url,
        destination = %request.destination.display(),
        "Downloading"
    );
    let outcome = DownloadSession::new(client)
        .run(&request, sink, &cancel)
        .await;
    signal_task.abort();

    Ok(exit_handler::report_outcome(&outcome))
}
