//! Binds the core's diagnostics slot to `tracing`. Only installed under
//! `--verbose`.

use prana_core::{BreathUpdate, Diagnostics, EngineStatus, LayoutGeometry, LayoutTrigger};

pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn on_state_change(&mut self, from: EngineStatus, to: EngineStatus) {
        tracing::debug!("engine {from:?} -> {to:?}");
    }

    fn on_phase_change(&mut self, update: &BreathUpdate) {
        tracing::debug!(
            "phase {} at {:.2}s ({:.2}s remaining)",
            update.phase,
            update.total_elapsed,
            update.total_remaining
        );
    }

    fn on_layout(&mut self, trigger: LayoutTrigger, geometry: &LayoutGeometry) {
        tracing::debug!(
            "layout {trigger:?}: spine top={:.1} height={:.1} scale={:.3}",
            geometry.spine.top,
            geometry.spine.height,
            geometry.scale
        );
    }
}
