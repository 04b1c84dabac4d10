//! Breath timing and chakra layout engine.
//!
//! Two independent subsystems: a pause-aware phase scheduler that turns a
//! per-chakra breathing configuration into a per-frame readout, and a
//! geometry pipeline that places seven chakra hotspots on a measured
//! figure.
//!
//! Zero I/O: clocks, frame scheduling, element measurement and diagnostics
//! are all supplied by the host through traits.

pub mod anchors;
pub mod chakra;
pub mod clock;
pub mod constants;
pub mod cycle;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod frame;
pub mod layout;
pub mod level;
pub mod phase;

pub use anchors::{ChakraAnchor, SpineRange, anchor, chakra_positions, spine_range};
pub use chakra::{ChakraId, ExperienceLevel};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use cycle::{BreathCycle, PhasePosition, build_cycle, cycle_length};
pub use diagnostics::Diagnostics;
pub use engine::{BreathEngine, BreathUpdate, EngineStatus};
pub use error::{ConfigError, EngineError, Result};
pub use frame::{FrameHandle, FrameQueue, FrameScheduler};
pub use layout::{
    ChakraPosition, FigureHost, LayoutEngine, LayoutGeometry, LayoutTrigger, Rect, SpineRect,
    SpineStyle, compute_layout, layout_scale, spine_rect, spine_width,
};
pub use level::{
    BreathConfig, ConfigDocument, CountCues, FillDirections, LevelConfig, LevelUi,
    PhaseDurations, SessionPreset,
};
pub use phase::{Direction, PhaseName, PhaseSpec};
