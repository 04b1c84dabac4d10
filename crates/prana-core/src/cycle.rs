//! Converts a level configuration into a playable four-phase cycle and
//! locates a point in time within it.

use serde::{Deserialize, Serialize};

use crate::constants::{MIN_CYCLE_SECONDS, PHASE_EPSILON};
use crate::level::LevelConfig;
use crate::phase::{Direction, PhaseName, PhaseSpec};

/// Four phases in fixed order plus their floored total length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreathCycle {
    phases: [PhaseSpec; 4],
    length: f64,
}

/// Where a moment falls inside a cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhasePosition {
    pub index: usize,
    pub phase: PhaseSpec,
    /// Seconds into the cycle at which this phase begins.
    pub phase_start: f64,
    /// Fraction through the phase, in [0, 1].
    pub progress: f64,
}

/// Sum of phase durations.
pub fn cycle_length(phases: &[PhaseSpec]) -> f64 {
    phases.iter().map(|p| p.duration).sum()
}

/// Build the cycle for a level. With `include_holds == false` both holds
/// are kept but zeroed.
pub fn build_cycle(level: &LevelConfig, include_holds: bool) -> BreathCycle {
    let phases = PhaseName::ALL.map(|name| {
        let mut duration = level.phases.get(name);
        if name.is_hold() && !include_holds {
            duration = 0.0;
        }
        let direction = match name {
            PhaseName::Inhale => level.ui.directions.inhale,
            PhaseName::Exhale => level.ui.directions.exhale,
            PhaseName::HoldTop | PhaseName::HoldBottom => Direction::None,
        };
        PhaseSpec::new(name, duration, direction)
    });
    BreathCycle::from_phases(phases)
}

impl BreathCycle {
    pub fn from_phases(phases: [PhaseSpec; 4]) -> Self {
        let length = cycle_length(&phases).max(MIN_CYCLE_SECONDS);
        Self { phases, length }
    }

    pub fn phases(&self) -> &[PhaseSpec; 4] {
        &self.phases
    }

    /// Total length in seconds, never below one second.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn phase(&self, name: PhaseName) -> &PhaseSpec {
        &self.phases[name as usize]
    }

    /// Locate `elapsed` seconds since session start within the cycle.
    ///
    /// The first phase with `t < cumulative_end` wins, so a time exactly on
    /// a boundary belongs to the following phase and zero-length phases are
    /// never selected while a later one can absorb `t`.
    pub fn locate(&self, elapsed: f64) -> PhasePosition {
        let t = elapsed.max(0.0).rem_euclid(self.length);
        let mut start = 0.0;
        for (index, phase) in self.phases.iter().enumerate() {
            let end = start + phase.duration;
            if t < end {
                return PhasePosition {
                    index,
                    phase: *phase,
                    phase_start: start,
                    progress: progress_within(t, start, phase.duration),
                };
            }
            start = end;
        }

        // Only reachable when the floor stretched the cycle past its phases.
        let index = self.phases.len() - 1;
        let phase = self.phases[index];
        let phase_start = start - phase.duration;
        PhasePosition {
            index,
            phase,
            phase_start,
            progress: progress_within(t, phase_start, phase.duration),
        }
    }
}

fn progress_within(t: f64, start: f64, duration: f64) -> f64 {
    ((t - start) / duration.max(PHASE_EPSILON)).clamp(0.0, 1.0)
}
