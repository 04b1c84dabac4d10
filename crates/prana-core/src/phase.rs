use std::fmt;

use serde::{Deserialize, Serialize};

/// One quarter of a breath cycle. Cycles always run in `PhaseName::ALL` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    Inhale,
    HoldTop,
    Exhale,
    HoldBottom,
}

impl PhaseName {
    pub const ALL: [PhaseName; 4] = [
        PhaseName::Inhale,
        PhaseName::HoldTop,
        PhaseName::Exhale,
        PhaseName::HoldBottom,
    ];

    pub fn is_hold(self) -> bool {
        matches!(self, PhaseName::HoldTop | PhaseName::HoldBottom)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PhaseName::Inhale => "inhale",
            PhaseName::HoldTop => "hold_top",
            PhaseName::Exhale => "exhale",
            PhaseName::HoldBottom => "hold_bottom",
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fill direction of the progress animation. Presentation-only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
    #[default]
    None,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
            Direction::None => "none",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete, timed phase within a built cycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseSpec {
    pub name: PhaseName,
    /// Seconds, never negative.
    pub duration: f64,
    pub direction: Direction,
}

impl PhaseSpec {
    pub fn new(name: PhaseName, duration: f64, direction: Direction) -> Self {
        Self {
            name,
            duration: if duration > 0.0 { duration } else { 0.0 },
            direction,
        }
    }

    /// Zero-length phases stay in the cycle but consume no time.
    pub fn is_skipped(&self) -> bool {
        self.duration <= 0.0
    }
}
