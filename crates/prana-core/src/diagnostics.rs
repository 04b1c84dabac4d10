//! Optional inspection hooks. The core never logs on its own; a host can
//! plug an implementation in with `with_diagnostics` on either engine.

use crate::engine::{BreathUpdate, EngineStatus};
use crate::layout::{LayoutGeometry, LayoutTrigger};

pub trait Diagnostics {
    fn on_state_change(&mut self, _from: EngineStatus, _to: EngineStatus) {}

    /// Called on the first update of each new phase.
    fn on_phase_change(&mut self, _update: &BreathUpdate) {}

    fn on_layout(&mut self, _trigger: LayoutTrigger, _geometry: &LayoutGeometry) {}
}
