//! Configuration lifecycle: load file config, merge CLI.

use std::path::PathBuf;

use anyhow::Result;

use crate::app::config_runtime::{self, CliValueSources};
use crate::app_config::load_default_file_config;
use crate::cli::Args;

/// Resolved configuration bundle used by the runtime.
pub(crate) struct ResolvedConfig {
    pub(crate) args: Args,
    /// Config file that contributed values, if one was found.
    pub(crate) config_path: Option<PathBuf>,
}

/// Loads the file config and merges it under the command-line arguments.
pub(crate) fn resolve_config(args: Args, cli_sources: &CliValueSources) -> Result<ResolvedConfig> {
    let loaded_config = load_default_file_config()?;
    let config_path = loaded_config
        .config
        .as_ref()
        .and(loaded_config.path.clone());
    let args =
        config_runtime::apply_config_defaults(args, cli_sources, loaded_config.config.as_ref());
    Ok(ResolvedConfig { args, config_path })
}
