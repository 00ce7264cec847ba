use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub use clockface_proto::config::*;

use log::{info, warn};
use masterror::AppError;
use shellexpand::full;

/// Errors raised while locating or validating the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file does not exist: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to expand config path `{path}`: {source}")]
    Expand {
        path: String,
        #[source]
        source: shellexpand::LookupError<std::env::VarError>,
    },
    #[error("failed to create config directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { .. } => AppError::not_found(err.to_string()),
            ConfigError::Invalid(_) => AppError::validation(err.to_string()),
            ConfigError::Expand { .. } | ConfigError::CreateDir { .. } => {
                AppError::internal(err.to_string())
            }
        }
    }
}

/// Load the configuration, returning it together with the resolved path.
///
/// An explicit `path` must exist. Without one the default location is used and
/// its parent directory is created; a missing default file means defaults.
/// Files that cannot be read or parsed fall back to the default configuration.
///
/// # Errors
///
/// [`ConfigError::NotFound`] for a missing explicit path, [`ConfigError::Invalid`]
/// when the loaded values fail validation, and path expansion or directory
/// creation failures.
pub fn get_config(path: Option<PathBuf>) -> Result<(Config, PathBuf), ConfigError> {
    let expanded = match path {
        Some(path) => {
            info!("Config path provided {path:?}");
            let expanded = expand_path(&path)?;

            if !expanded.exists() {
                return Err(ConfigError::NotFound { path: expanded });
            }

            expanded
        }
        None => {
            let expanded = expand_path(Path::new(DEFAULT_CONFIG_FILE_PATH))?;

            if let Some(parent) = expanded.parent()
                && !parent.exists()
            {
                fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            expanded
        }
    };

    let config = if expanded.exists() {
        read_config(&expanded).unwrap_or_default()
    } else {
        info!("No config file at {expanded:?}, using defaults");
        Config::default()
    };

    config.validate()?;

    Ok((config, expanded))
}

fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let str_path = path.to_string_lossy();
    let expanded = full(&str_path).map_err(|source| ConfigError::Expand {
        path: str_path.to_string(),
        source,
    })?;

    Ok(PathBuf::from(expanded.into_owned()))
}

fn read_config(path: &Path) -> Option<Config> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read config file: {e}");
            return None;
        }
    };

    info!("Decoding config file {path:?}");

    match toml::from_str(&content) {
        Ok(config) => {
            info!("Config file loaded successfully");
            Some(config)
        }
        Err(e) => {
            warn!("Failed to parse config file: {e}");
            None
        }
    }
}
