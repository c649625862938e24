//! Settings file loading
//!
//! Settings live in a single TOML file. Two ways in:
//! - **Explicit path**: [`load_config`] / [`save_config`], used by tools
//! - **User config dir**: [`load_user_config`], resolved by `confy`
//!
//! Every successful load is clamped, so callers never see an out-of-range
//! warning threshold or sampling interval.

use std::fs;
use std::path::{Path, PathBuf};

use buffwatch_types::BuffWatchConfig;

/// Application name used for the per-user config location
pub const APP_NAME: &str = "buffwatch";

/// Errors that can occur while reading or writing settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error accessing {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },
}

/// Parse settings from TOML text, clamping out-of-range values.
pub fn parse_config(contents: &str, path: &Path) -> Result<BuffWatchConfig, ConfigError> {
    let config: BuffWatchConfig = toml::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let clamped = config.clamped();
    if clamped != config {
        tracing::warn!(
            path = %path.display(),
            requested_threshold = config.warning_threshold_seconds,
            applied_threshold = clamped.warning_threshold_seconds,
            requested_interval = config.sample_interval_ticks,
            applied_interval = clamped.sample_interval_ticks,
            "Settings out of range, clamped"
        );
    }
    Ok(clamped)
}

/// Load a settings file
pub fn load_config(path: &Path) -> Result<BuffWatchConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config(&contents, path)
}

/// Save settings to a TOML file
pub fn save_config(path: &Path, config: &BuffWatchConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(|e| ConfigError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Load settings from the per-user config directory, falling back to
/// defaults if the file is unreadable.
pub fn load_user_config() -> BuffWatchConfig {
    let loaded: Result<BuffWatchConfig, _> = confy::load(APP_NAME, None);
    match loaded {
        Ok(config) => config.clamped(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load user settings, using defaults");
            BuffWatchConfig::default()
        }
    }
}

/// Location of the per-user settings file, if one can be determined
pub fn user_config_path() -> Option<PathBuf> {
    confy::get_configuration_file_path(APP_NAME, None).ok()
}
