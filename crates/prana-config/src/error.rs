use std::fmt;
use std::path::PathBuf;

use prana_core::ConfigError;

#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml(toml::de::Error),
    Json(serde_json::Error),
    UnsupportedFormat(PathBuf),
    Invalid(ConfigError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            LoadError::Toml(e) => write!(f, "TOML error: {e}"),
            LoadError::Json(e) => write!(f, "JSON error: {e}"),
            LoadError::UnsupportedFormat(path) => write!(
                f,
                "unsupported config format: {} (expected .toml or .json)",
                path.display()
            ),
            LoadError::Invalid(e) => write!(f, "invalid breath configuration: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Toml(e) => Some(e),
            LoadError::Json(e) => Some(e),
            LoadError::Invalid(e) => Some(e),
            LoadError::UnsupportedFormat(_) => None,
        }
    }
}

impl From<toml::de::Error> for LoadError {
    fn from(e: toml::de::Error) -> Self {
        LoadError::Toml(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
