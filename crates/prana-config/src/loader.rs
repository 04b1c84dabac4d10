use std::fs;
use std::path::Path;

use prana_core::{BreathConfig, ConfigDocument};

use crate::error::{LoadError, Result};
use crate::source::{ConfigSource, resolve_source};

/// Compiled-in configuration used when no file is found.
pub const DEFAULT_CONFIG: &str = include_str!("../assets/breath.toml");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(Format::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Format::Json),
            _ => None,
        }
    }
}

/// A validated configuration and the place it was read from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: BreathConfig,
    pub source: ConfigSource,
}

pub fn parse_document(text: &str, format: Format) -> Result<ConfigDocument> {
    let doc = match format {
        Format::Toml => toml::from_str(text)?,
        Format::Json => serde_json::from_str(text)?,
    };
    Ok(doc)
}

/// Parse and validate. Fails on the first invalid entry; a declared cycle
/// length that disagrees with its phases is only logged.
pub fn parse_config(text: &str, format: Format) -> Result<BreathConfig> {
    let config = BreathConfig::from_document(parse_document(text, format)?)?;
    for (chakra, level, cfg) in config.iter() {
        if let Some(diff) = cfg.cycle_length_mismatch() {
            tracing::warn!(
                "{chakra}/{level}: cycle_length_seconds {} differs from phase sum by {diff:+}",
                cfg.cycle_length_seconds
            );
        }
    }
    Ok(config)
}

pub fn default_config() -> Result<BreathConfig> {
    parse_config(DEFAULT_CONFIG, Format::Toml)
}

pub fn load_from(source: ConfigSource) -> Result<LoadedConfig> {
    let config = match source.path() {
        None => default_config()?,
        Some(path) => {
            let format =
                Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.into()))?;
            let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&text, format)?
        }
    };
    tracing::info!("loaded {} breath levels from {source}", config.len());
    Ok(LoadedConfig { config, source })
}

/// Resolve the configuration source and load it.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    load_from(resolve_source(explicit))
}
