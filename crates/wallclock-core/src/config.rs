use std::{
    fs,
    path::{Path, PathBuf},
};

pub use wallclock_proto::config::*;

use log::{info, warn};
use masterror::AppError;
use shellexpand::full;

/// Failures that prevent a usable configuration from being produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The path could not be shell-expanded.
    Expand { path: PathBuf, context: String },
    /// An explicitly requested config file does not exist.
    NotFound { path: PathBuf },
    /// Reading the configuration file from disk failed.
    Read { path: PathBuf, context: String },
    /// Parsing TOML content failed.
    Parse { path: PathBuf, context: String },
    /// Validation detected a logical inconsistency.
    Validation(ConfigValidationError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expand { path, context } => {
                write!(f, "failed to expand config path {:?}: {}", path, context)
            }
            Self::NotFound { path } => {
                write!(f, "config file does not exist: {}", path.display())
            }
            Self::Read { path, context } => {
                write!(f, "failed to read config at {:?}: {}", path, context)
            }
            Self::Parse { path, context } => {
                write!(f, "failed to parse config at {:?}: {}", path, context)
            }
            Self::Validation(err) => write!(f, "invalid config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigValidationError> for ConfigError {
    fn from(err: ConfigValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation(_) => AppError::validation(err.to_string()),
            ConfigError::NotFound { .. } => AppError::not_found(err.to_string()),
            _ => AppError::internal(err.to_string()),
        }
    }
}

impl ConfigError {
    fn read(path: &Path, err: &std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            context: err.to_string(),
        }
    }

    fn parse(path: &Path, err: &toml::de::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            context: err.to_string(),
        }
    }
}

/// Resolve, load and validate the configuration.
///
/// An explicit `path` must exist. Without one the default location is used
/// and a missing file simply means defaults. Files that cannot be read or
/// parsed are reported with a warning and replaced by defaults; validation
/// failures are returned.
pub fn get_config(path: Option<PathBuf>) -> Result<(Config, PathBuf), ConfigError> {
    get_config_with_default(path, Path::new(DEFAULT_CONFIG_FILE_PATH))
}

/// Same as [`get_config`], with `default` used when no path is given.
pub fn get_config_with_default(
    path: Option<PathBuf>,
    default: &Path,
) -> Result<(Config, PathBuf), ConfigError> {
    let (config, path) = match path {
        Some(path) => {
            info!("Config path provided {path:?}");
            let expanded = expand_path(path)?;

            if !expanded.exists() {
                return Err(ConfigError::NotFound { path: expanded });
            }

            (load_or_default(&expanded), expanded)
        }
        None => {
            let expanded = expand_path(default.to_path_buf())?;

            if expanded.exists() {
                (load_or_default(&expanded), expanded)
            } else {
                info!("No config file at {expanded:?}, using defaults");
                (Config::default(), expanded)
            }
        }
    };

    config.validate()?;

    Ok((config, path))
}

fn expand_path(path: PathBuf) -> Result<PathBuf, ConfigError> {
    let str_path = path.to_string_lossy();
    let expanded = full(&str_path).map_err(|e| ConfigError::Expand {
        path: path.clone(),
        context: e.to_string(),
    })?;

    Ok(PathBuf::from(expanded.to_string()))
}

fn load_or_default(path: &Path) -> Config {
    read_config(path).unwrap_or_else(|err| {
        warn!("{err}, falling back to defaults");
        Config::default()
    })
}

pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::read(path, &e))?;

    info!("Decoding config file {path:?}");

    let config = toml::from_str(&content).map_err(|e| ConfigError::parse(path, &e))?;
    info!("Config file loaded successfully");

    Ok(config)
}
