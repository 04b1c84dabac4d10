use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The seven energy centres, ordered crown (top of the figure) to root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChakraId {
    Crown,
    ThirdEye,
    Throat,
    Heart,
    SolarPlexus,
    Sacral,
    Root,
}

impl ChakraId {
    pub const ALL: [ChakraId; 7] = [
        ChakraId::Crown,
        ChakraId::ThirdEye,
        ChakraId::Throat,
        ChakraId::Heart,
        ChakraId::SolarPlexus,
        ChakraId::Sacral,
        ChakraId::Root,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChakraId::Crown => "crown",
            ChakraId::ThirdEye => "third_eye",
            ChakraId::Throat => "throat",
            ChakraId::Heart => "heart",
            ChakraId::SolarPlexus => "solar_plexus",
            ChakraId::Sacral => "sacral",
            ChakraId::Root => "root",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            ChakraId::Crown => "Crown",
            ChakraId::ThirdEye => "Third Eye",
            ChakraId::Throat => "Throat",
            ChakraId::Heart => "Heart",
            ChakraId::SolarPlexus => "Solar Plexus",
            ChakraId::Sacral => "Sacral",
            ChakraId::Root => "Root",
        }
    }
}

impl fmt::Display for ChakraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts canonical ids plus the historical spellings still found in
/// stored links and older configuration files.
impl FromStr for ChakraId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = match s.trim() {
            "crown" => ChakraId::Crown,
            "third_eye" | "thirdEye" | "third-eye" | "brow" => ChakraId::ThirdEye,
            "throat" => ChakraId::Throat,
            "heart" => ChakraId::Heart,
            "solar_plexus" | "solar" | "solarPlexus" | "solar-plexus" => ChakraId::SolarPlexus,
            "sacral" => ChakraId::Sacral,
            "root" => ChakraId::Root,
            other => return Err(ConfigError::UnknownChakra(other.to_string())),
        };
        Ok(id)
    }
}

/// Experience tier selecting a set of phase durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Beginner,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "advanced" => Ok(ExperienceLevel::Advanced),
            other => Err(ConfigError::UnknownLevel(other.to_string())),
        }
    }
}
