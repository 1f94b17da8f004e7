use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    sync::Arc,
};

pub use deskclock_proto::config::*;

use log::{info, warn};
use masterror::{AppError, Error};
use shellexpand::full;

/// Failure to locate or load the configuration file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigLoadError {
    #[error("config path could not be expanded: {context}")]
    Expand { context: Arc<str> },

    #[error("config file does not exist: {path}")]
    Missing { path: Arc<str> },

    #[error("failed to prepare config directory {path}: {context}")]
    Directory { path: Arc<str>, context: Arc<str> },

    #[error("invalid configuration: {source}")]
    Invalid {
        #[source]
        source: ConfigValidationError,
    },
}

impl From<ConfigLoadError> for AppError {
    fn from(err: ConfigLoadError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// Resolve the config file and load it.
///
/// An explicit path must exist. The default location is created lazily; a
/// missing or unreadable file there yields [`Config::default`]. A file that
/// fails to decode is logged and replaced with defaults, but a decoded file
/// that fails [`Config::validate`] is an error.
pub fn get_config(path: Option<PathBuf>) -> Result<(Config, PathBuf), ConfigLoadError> {
    let expanded = match path {
        Some(path) => {
            info!("Config path provided {path:?}");
            let expanded = expand_path(&path)?;

            if !expanded.exists() {
                return Err(ConfigLoadError::Missing {
                    path: Arc::from(expanded.display().to_string()),
                });
            }

            expanded
        }
        None => {
            let expanded = expand_path(Path::new(DEFAULT_CONFIG_FILE_PATH))?;

            if let Some(parent) = expanded.parent()
                && !parent.exists()
            {
                std::fs::create_dir_all(parent).map_err(|err| ConfigLoadError::Directory {
                    path:    Arc::from(parent.display().to_string()),
                    context: Arc::from(err.to_string()),
                })?;
            }

            expanded
        }
    };

    let config = read_config(&expanded).unwrap_or_default();
    config
        .validate()
        .map_err(|source| ConfigLoadError::Invalid { source })?;

    Ok((config, expanded))
}

fn expand_path(path: &Path) -> Result<PathBuf, ConfigLoadError> {
    let str_path = path.to_string_lossy();
    let expanded = full(&str_path).map_err(|err| ConfigLoadError::Expand {
        context: Arc::from(err.to_string()),
    })?;

    Ok(PathBuf::from(expanded.to_string()))
}

fn read_config(path: &Path) -> Option<Config> {
    let mut content = String::new();
    let read_result = File::open(path).and_then(|mut file| file.read_to_string(&mut content));

    if let Err(err) = read_result {
        warn!("Failed to read config file: {err}");
        return None;
    }

    info!("Decoding config file {path:?}");

    match toml::from_str(&content) {
        Ok(config) => {
            info!("Config file loaded successfully");
            Some(config)
        }
        Err(err) => {
            warn!("Failed to parse config file: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");

        let err = get_config(Some(path)).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Missing { .. }));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "log_level = \"debug\"\n[analog_clock]\ntime_zone = \"Asia/Tokyo\"\nshow_seconds = false\n",
        )
        .expect("write config");

        let (config, resolved) = get_config(Some(path.clone())).expect("config");

        assert_eq!(resolved, path);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.analog_clock.time_zone.as_deref(), Some("Asia/Tokyo"));
        assert!(!config.analog_clock.show_seconds);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = [").expect("write config");

        let (config, _) = get_config(Some(path)).expect("config");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[analog_clock]\ntick_interval_ms = 0\n").expect("write config");

        let err = get_config(Some(path)).unwrap_err();
        assert_eq!(
            err,
            ConfigLoadError::Invalid {
                source: ConfigValidationError::ZeroTickInterval,
            }
        );
    }
}
