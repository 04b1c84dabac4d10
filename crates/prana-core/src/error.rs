use std::fmt;

use crate::chakra::{ChakraId, ExperienceLevel};
use crate::phase::PhaseName;

/// A breath configuration that cannot safely drive a session.
#[derive(Debug)]
pub enum ConfigError {
    NegativeDuration {
        chakra: ChakraId,
        level: ExperienceLevel,
        phase: PhaseName,
        value: f64,
    },
    CycleLengthOutOfRange {
        chakra: ChakraId,
        level: ExperienceLevel,
        value: f64,
    },
    MissingLevel {
        chakra: ChakraId,
        level: ExperienceLevel,
    },
    DuplicateLevel {
        chakra: ChakraId,
        level: ExperienceLevel,
    },
    UnknownChakra(String),
    UnknownLevel(String),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NegativeDuration {
                chakra,
                level,
                phase,
                value,
            } => write!(f, "{chakra}/{level}: {phase} duration must be >= 0, got {value}"),
            ConfigError::CycleLengthOutOfRange {
                chakra,
                level,
                value,
            } => write!(
                f,
                "{chakra}/{level}: cycle_length_seconds must be within [6, 30], got {value}"
            ),
            ConfigError::MissingLevel { chakra, level } => {
                write!(f, "no breath configuration for {chakra}/{level}")
            }
            ConfigError::DuplicateLevel { chakra, level } => {
                write!(f, "{chakra}/{level} is defined more than once")
            }
            ConfigError::UnknownChakra(id) => write!(f, "unknown chakra id: {id}"),
            ConfigError::UnknownLevel(level) => write!(f, "unknown experience level: {level}"),
            ConfigError::Parse(e) => write!(f, "malformed breath configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failure to start a breath session on this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// No usable high-resolution timing source.
    ClockUnavailable,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ClockUnavailable => write!(f, "no usable timing source on this platform"),
        }
    }
}

impl std::error::Error for EngineError {}
