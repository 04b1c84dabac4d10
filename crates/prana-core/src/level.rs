//! Per-(chakra, level) breath configuration and its load-time validation.
//!
//! The configuration document is parsed once into [`ConfigDocument`] and
//! converted into a validated, immutable [`BreathConfig`]. Any malformed
//! entry fails the whole load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chakra::{ChakraId, ExperienceLevel};
use crate::constants::{CYCLE_LENGTH_MAX, CYCLE_LENGTH_MIN};
use crate::cycle::build_cycle;
use crate::error::{ConfigError, Result};
use crate::phase::{Direction, PhaseName};

/// Raw phase durations in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseDurations {
    pub inhale: f64,
    #[serde(default)]
    pub hold_top: f64,
    pub exhale: f64,
    #[serde(default)]
    pub hold_bottom: f64,
}

impl PhaseDurations {
    pub fn get(&self, phase: PhaseName) -> f64 {
        match phase {
            PhaseName::Inhale => self.inhale,
            PhaseName::HoldTop => self.hold_top,
            PhaseName::Exhale => self.exhale,
            PhaseName::HoldBottom => self.hold_bottom,
        }
    }

    pub fn total(&self) -> f64 {
        PhaseName::ALL.iter().map(|&p| self.get(p)).sum()
    }
}

/// Fill direction for the two moving phases. Holds never fill.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FillDirections {
    #[serde(default = "default_inhale_direction")]
    pub inhale: Direction,
    #[serde(default = "default_exhale_direction")]
    pub exhale: Direction,
}

fn default_inhale_direction() -> Direction {
    Direction::Ltr
}

fn default_exhale_direction() -> Direction {
    Direction::Rtl
}

impl Default for FillDirections {
    fn default() -> Self {
        Self {
            inhale: default_inhale_direction(),
            exhale: default_exhale_direction(),
        }
    }
}

/// Numbers shown as counting cues per phase. Display only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountCues {
    #[serde(default)]
    pub inhale: u32,
    #[serde(default)]
    pub hold_top: u32,
    #[serde(default)]
    pub exhale: u32,
    #[serde(default)]
    pub hold_bottom: u32,
}

impl CountCues {
    pub fn get(&self, phase: PhaseName) -> u32 {
        match phase {
            PhaseName::Inhale => self.inhale,
            PhaseName::HoldTop => self.hold_top,
            PhaseName::Exhale => self.exhale,
            PhaseName::HoldBottom => self.hold_bottom,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelUi {
    #[serde(default)]
    pub directions: FillDirections,
    #[serde(default)]
    pub count_cues: CountCues,
}

/// Recommended number of cycles for a preset session length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPreset {
    pub minutes: u32,
    pub cycles: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelConfig {
    /// Label such as "4:2:6:2". Display only.
    #[serde(default)]
    pub breath_ratio: String,
    pub cycle_length_seconds: f64,
    pub phases: PhaseDurations,
    #[serde(default)]
    pub presets: Vec<SessionPreset>,
    #[serde(default)]
    pub ui: LevelUi,
}

impl LevelConfig {
    /// Check durations and the declared cycle length. NaN counts as invalid.
    pub fn validate(&self, chakra: ChakraId, level: ExperienceLevel) -> Result<()> {
        for phase in PhaseName::ALL {
            let value = self.phases.get(phase);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeDuration {
                    chakra,
                    level,
                    phase,
                    value,
                });
            }
        }
        let length = self.cycle_length_seconds;
        if !(CYCLE_LENGTH_MIN..=CYCLE_LENGTH_MAX).contains(&length) {
            return Err(ConfigError::CycleLengthOutOfRange {
                chakra,
                level,
                value: length,
            });
        }
        Ok(())
    }

    /// Declared cycle length minus the phase sum, when they disagree.
    pub fn cycle_length_mismatch(&self) -> Option<f64> {
        let diff = self.cycle_length_seconds - self.phases.total();
        (diff.abs() > 1e-9).then_some(diff)
    }

    /// Session length for `cycles` full cycles of the built cycle.
    pub fn session_seconds(&self, cycles: u32, include_holds: bool) -> f64 {
        f64::from(cycles) * build_cycle(self, include_holds).length()
    }

    pub fn recommended_cycles(&self, minutes: u32) -> Option<u32> {
        self.presets
            .iter()
            .find(|p| p.minutes == minutes)
            .map(|p| p.cycles)
    }
}

/// On-disk shape: `chakras.<chakra>.<level>`. Keys are resolved (aliases
/// included) during [`BreathConfig::from_document`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub chakras: BTreeMap<String, BTreeMap<String, LevelConfig>>,
}

/// Validated, immutable breath configuration.
#[derive(Clone, Debug, Default)]
pub struct BreathConfig {
    levels: BTreeMap<(ChakraId, ExperienceLevel), LevelConfig>,
}

impl BreathConfig {
    /// Two keys naming the same (chakra, level), e.g. `solar` and
    /// `solar_plexus`, are rejected rather than one silently winning.
    pub fn from_document(doc: ConfigDocument) -> Result<Self> {
        let mut levels = BTreeMap::new();
        for (chakra_key, by_level) in doc.chakras {
            let chakra: ChakraId = chakra_key.parse()?;
            for (level_key, config) in by_level {
                let level: ExperienceLevel = level_key.parse()?;
                config.validate(chakra, level)?;
                if levels.insert((chakra, level), config).is_some() {
                    return Err(ConfigError::DuplicateLevel { chakra, level });
                }
            }
        }
        Ok(Self { levels })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: ConfigDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    pub fn get(&self, chakra: ChakraId, level: ExperienceLevel) -> Option<&LevelConfig> {
        self.levels.get(&(chakra, level))
    }

    pub fn require(
        &self,
        chakra: ChakraId,
        level: ExperienceLevel,
    ) -> Result<&LevelConfig> {
        self.get(chakra, level)
            .ok_or(ConfigError::MissingLevel { chakra, level })
    }

    /// Look up by application-level strings, aliases allowed.
    pub fn lookup(&self, chakra: &str, level: &str) -> Result<&LevelConfig> {
        self.require(chakra.parse()?, level.parse()?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChakraId, ExperienceLevel, &LevelConfig)> {
        self.levels.iter().map(|(&(c, l), cfg)| (c, l, cfg))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
