/// Floor on a cycle's total length (seconds) so modulo and division never see zero.
pub const MIN_CYCLE_SECONDS: f64 = 1.0;

/// Divisor floor for progress through a zero-length phase.
pub const PHASE_EPSILON: f64 = 1e-6;

/// Accepted range for a level's declared `cycle_length_seconds`.
pub const CYCLE_LENGTH_MIN: f64 = 6.0;
pub const CYCLE_LENGTH_MAX: f64 = 30.0;

/// Designed spine height in pixels; hotspot scale is 1.0 at this height.
pub const REFERENCE_SPINE_HEIGHT: f64 = 560.0;

/// Smallest spine rectangle the layout will produce (pixels).
pub const MIN_SPINE_HEIGHT: f64 = 200.0;

/// Share of container height used before the figure image has been measured.
pub const FALLBACK_SPINE_RATIO: f64 = 0.70;

/// Hotspot scale bounds.
pub const SCALE_MIN: f64 = 0.85;
pub const SCALE_MAX: f64 = 1.25;

/// Guide line width as a fraction of container width, and its pixel bounds.
pub const SPINE_WIDTH_RATIO: f64 = 0.006;
pub const SPINE_WIDTH_MIN: f64 = 2.0;
pub const SPINE_WIDTH_MAX: f64 = 8.0;
