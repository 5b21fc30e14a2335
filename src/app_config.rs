//! Application configuration loading for CLI defaults.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// TOML-backed file configuration for lwget defaults.
///
/// Every field is optional; an explicit command-line flag always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default seconds between progress lines.
    pub interval_secs: Option<u64>,
    /// Default directory for partial files.
    pub temp_dir: Option<PathBuf>,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Timeout between body reads in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Prefer the progress bar when stderr is a terminal.
    pub progress_bar: Option<bool>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against the same ranges the CLI accepts.
    pub fn validate(&self) -> Result<()> {
        validate_secs("interval_secs", self.interval_secs)?;
        validate_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }
}

fn validate_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/lwget/config.toml`
/// 2. `$HOME/.config/lwget/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    config_path_from(
        env_var_non_empty_os("XDG_CONFIG_HOME"),
        env_var_non_empty_os("HOME"),
    )
}

fn config_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(xdg_config_home) = xdg_config_home {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("lwget")
                .join("config.toml"),
        );
    }

    let home = home?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("lwget")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let config: FileConfig = toml::from_str(raw)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config_all_fields() {
        let config = parse_config_str(
            r#"
interval_secs = 5
temp_dir = "/scratch"
connect_timeout_secs = 10
read_timeout_secs = 120
progress_bar = true
verbosity = "verbose"
"#,
        )
        .unwrap();

        assert_eq!(
            config,
            FileConfig {
                interval_secs: Some(5),
                temp_dir: Some(PathBuf::from("/scratch")),
                connect_timeout_secs: Some(10),
                read_timeout_secs: Some(120),
                progress_bar: Some(true),
                verbosity: Some(VerbositySetting::Verbose),
            }
        );
    }

    #[test]
    fn test_parse_config_empty_is_default() {
        assert_eq!(parse_config_str("").unwrap(), FileConfig::default());
        assert_eq!(
            parse_config_str("# only a comment\n").unwrap(),
            FileConfig::default()
        );
    }

    #[test]
    fn test_parse_config_rejects_unknown_key() {
        assert!(parse_config_str("concurrency = 4").is_err());
    }

    #[test]
    fn test_parse_config_rejects_out_of_range_values() {
        let err = parse_config_str("interval_secs = 0").unwrap_err();
        assert!(err.to_string().contains("interval_secs"), "{err}");

        let err = parse_config_str("read_timeout_secs = 3601").unwrap_err();
        assert!(err.to_string().contains("read_timeout_secs"), "{err}");
    }

    #[test]
    fn test_parse_config_rejects_unknown_verbosity() {
        assert!(parse_config_str(r#"verbosity = "loud""#).is_err());
    }

    #[test]
    fn test_config_path_prefers_xdg_config_home() {
        let path = config_path_from(Some("/xdg".into()), Some("/home/u".into()));
        assert_eq!(path, Some(PathBuf::from("/xdg/lwget/config.toml")));
    }

    #[test]
    fn test_config_path_falls_back_to_home() {
        let path = config_path_from(None, Some("/home/u".into()));
        assert_eq!(path, Some(PathBuf::from("/home/u/.config/lwget/config.toml")));
        assert_eq!(config_path_from(None, None), None);
    }

    #[test]
    fn test_load_file_config_reports_path_on_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "interval_secs = \"soon\"").unwrap();

        let err = load_file_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"), "{err:#}");
    }

    #[test]
    fn test_load_file_config_reads_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "progress_bar = false\n").unwrap();

        let config = load_file_config(&path).unwrap();
        assert_eq!(config.progress_bar, Some(false));
    }
}
