use clap::{ArgMatches, CommandFactory, FromArgMatches, parser::ValueSource};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Args;

/// Which options were given explicitly on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliValueSources {
    pub(crate) interval: bool,
    pub(crate) temp_dir: bool,
    pub(crate) connect_timeout: bool,
    pub(crate) read_timeout: bool,
    pub(crate) progress_bar: bool,
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
}

pub(crate) fn parse_cli_with_sources() -> (Args, CliValueSources) {
    let command = Args::command();
    let matches = command.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    (args, sources_from_matches(&matches))
}

fn sources_from_matches(matches: &ArgMatches) -> CliValueSources {
    CliValueSources {
        interval: is_commandline_value(matches, "interval"),
        temp_dir: is_commandline_value(matches, "temp_dir"),
        connect_timeout: is_commandline_value(matches, "connect_timeout"),
        read_timeout: is_commandline_value(matches, "read_timeout"),
        progress_bar: is_commandline_value(matches, "progress_bar"),
        verbose: is_commandline_value(matches, "verbose"),
        quiet: is_commandline_value(matches, "quiet"),
    }
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Fills every option not given on the command line from the config file.
pub(crate) fn apply_config_defaults(
    mut args: Args,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Args {
    let Some(file_config) = file_config else {
        return args;
    };

    if !cli_sources.interval
        && let Some(interval) = file_config.interval_secs
    {
        args.interval = interval;
    }

    if !cli_sources.temp_dir
        && let Some(temp_dir) = &file_config.temp_dir
    {
        args.temp_dir = Some(temp_dir.clone());
    }

    if !cli_sources.connect_timeout
        && let Some(secs) = file_config.connect_timeout_secs
    {
        args.connect_timeout = secs;
    }

    if !cli_sources.read_timeout
        && let Some(secs) = file_config.read_timeout_secs
    {
        args.read_timeout = secs;
    }

    if !cli_sources.progress_bar
        && let Some(progress_bar) = file_config.progress_bar
    {
        args.progress_bar = progress_bar;
    }

    if !cli_sources.verbose
        && !cli_sources.quiet
        && let Some(verbosity) = file_config.verbosity
    {
        apply_config_verbosity(&mut args, verbosity);
    }

    args
}

fn apply_config_verbosity(args: &mut Args, verbosity: VerbositySetting) {
    match verbosity {
        VerbositySetting::Default => {
            args.quiet = false;
            args.verbose = 0;
        }
        VerbositySetting::Verbose => {
            args.quiet = false;
            args.verbose = 1;
        }
        VerbositySetting::Quiet => {
            args.quiet = true;
            args.verbose = 0;
        }
        VerbositySetting::Debug => {
            args.quiet = false;
            args.verbose = 2;
        }
    }
}

pub(crate) fn resolve_default_log_level(args: &Args) -> &'static str {
    if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Explicit `-v`/`-q` beat `RUST_LOG`.
pub(crate) fn should_force_cli_log_level(cli_sources: &CliValueSources) -> bool {
    cli_sources.verbose || cli_sources.quiet
}
