//! Clock-driven breath session scheduler.
//!
//! Elapsed time is always derived from the clock and two references
//! (`start_time`, `paused_at`), never accumulated, so frame jitter and
//! pauses cannot introduce drift. One frame is in flight at most.
//!
//! States: Idle -> Running <-> Paused -> Completed. `stop()` moves any
//! non-terminal state to Stopped without firing the completion callback.

use serde::Serialize;

use crate::clock::Clock;
use crate::cycle::BreathCycle;
use crate::diagnostics::Diagnostics;
use crate::error::EngineError;
use crate::frame::{FrameHandle, FrameScheduler};
use crate::phase::{Direction, PhaseName};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineStatus {
    Idle,
    Running,
    Paused,
    Completed,
    Stopped,
}

/// Per-frame readout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BreathUpdate {
    pub phase: PhaseName,
    pub progress: f64,
    pub direction: Direction,
    pub total_elapsed: f64,
    pub total_remaining: f64,
}

impl BreathUpdate {
    fn terminal(total_seconds: f64) -> Self {
        Self {
            phase: PhaseName::Exhale,
            progress: 1.0,
            direction: Direction::Ltr,
            total_elapsed: total_seconds,
            total_remaining: 0.0,
        }
    }
}

type UpdateFn = Box<dyn FnMut(&BreathUpdate)>;
type CompleteFn = Box<dyn FnMut()>;

pub struct BreathEngine<C, S> {
    cycle: BreathCycle,
    total_seconds: f64,
    clock: C,
    scheduler: S,
    on_update: Option<UpdateFn>,
    on_complete: Option<CompleteFn>,
    diagnostics: Option<Box<dyn Diagnostics>>,
    status: EngineStatus,
    start_time: Option<f64>,
    paused_at: Option<f64>,
    pending: Option<FrameHandle>,
    last_phase: Option<PhaseName>,
}

impl<C: Clock, S: FrameScheduler> BreathEngine<C, S> {
    /// A session of `total_seconds` (negative or NaN treated as zero).
    pub fn new(cycle: BreathCycle, total_seconds: f64, clock: C, scheduler: S) -> Self {
        Self {
            cycle,
            total_seconds: if total_seconds > 0.0 { total_seconds } else { 0.0 },
            clock,
            scheduler,
            on_update: None,
            on_complete: None,
            diagnostics: None,
            status: EngineStatus::Idle,
            start_time: None,
            paused_at: None,
            pending: None,
            last_phase: None,
        }
    }

    pub fn on_update(mut self, f: impl FnMut(&BreathUpdate) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Invoked once per session, only when the session runs out naturally.
    pub fn on_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Box<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn cycle(&self) -> &BreathCycle {
        &self.cycle
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.status == EngineStatus::Paused
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Begin (or restart) the session. Fails when the clock has no time to give.
    pub fn start(&mut self) -> Result<(), EngineError> {
        let now = self.clock.now().ok_or(EngineError::ClockUnavailable)?;
        self.cancel_frame();
        self.start_time = Some(now);
        self.paused_at = None;
        self.last_phase = None;
        self.set_status(EngineStatus::Running);
        self.request_frame();
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.status != EngineStatus::Running {
            return;
        }
        let Some(now) = self.clock.now() else {
            return;
        };
        self.paused_at = Some(now);
        self.set_status(EngineStatus::Paused);
    }

    /// Shift the start reference forward by the paused interval.
    pub fn resume(&mut self) {
        if self.status != EngineStatus::Paused {
            return;
        }
        if let (Some(start), Some(paused_at)) = (self.start_time, self.paused_at) {
            let now = self.clock.now().unwrap_or(paused_at);
            self.start_time = Some(start + (now - paused_at).max(0.0));
        }
        self.paused_at = None;
        self.set_status(EngineStatus::Running);
        self.request_frame();
    }

    pub fn toggle(&mut self) {
        match self.status {
            EngineStatus::Running => self.pause(),
            EngineStatus::Paused => self.resume(),
            _ => {}
        }
    }

    /// Cancel the frame loop. The clock is left untouched so a restart is
    /// immediate.
    pub fn stop(&mut self) {
        if matches!(self.status, EngineStatus::Completed | EngineStatus::Stopped) {
            return;
        }
        self.cancel_frame();
        self.start_time = None;
        self.paused_at = None;
        self.set_status(EngineStatus::Stopped);
    }

    /// Frame callback. Stale frames after stop or completion are ignored;
    /// paused frames keep the loop alive without emitting.
    pub fn on_frame(&mut self) {
        self.pending = None;
        match self.status {
            EngineStatus::Running => self.tick(),
            EngineStatus::Paused => self.request_frame(),
            EngineStatus::Idle | EngineStatus::Completed | EngineStatus::Stopped => {}
        }
    }

    /// Seconds of session time consumed, pauses excluded.
    pub fn elapsed(&self) -> f64 {
        match self.status {
            EngineStatus::Idle | EngineStatus::Stopped => 0.0,
            EngineStatus::Completed => self.total_seconds,
            EngineStatus::Running | EngineStatus::Paused => self
                .clock
                .now()
                .map(|now| self.elapsed_at(now))
                .unwrap_or(0.0),
        }
    }

    pub fn remaining(&self) -> f64 {
        (self.total_seconds - self.elapsed()).max(0.0)
    }

    /// The readout for the current moment, without emitting it.
    pub fn snapshot(&self) -> Option<BreathUpdate> {
        match self.status {
            EngineStatus::Running | EngineStatus::Paused => {
                let elapsed = self.elapsed();
                Some(self.readout(elapsed, (self.total_seconds - elapsed).max(0.0)))
            }
            EngineStatus::Completed => Some(BreathUpdate::terminal(self.total_seconds)),
            EngineStatus::Idle | EngineStatus::Stopped => None,
        }
    }

    fn tick(&mut self) {
        let Some(now) = self.clock.now() else {
            self.request_frame();
            return;
        };
        let elapsed = self.elapsed_at(now);
        let remaining = (self.total_seconds - elapsed).max(0.0);

        if remaining <= 0.0 {
            let update = BreathUpdate::terminal(self.total_seconds);
            self.emit(&update);
            self.set_status(EngineStatus::Completed);
            if let Some(on_complete) = self.on_complete.as_mut() {
                on_complete();
            }
            return;
        }

        let update = self.readout(elapsed, remaining);
        self.emit(&update);
        self.request_frame();
    }

    fn readout(&self, elapsed: f64, remaining: f64) -> BreathUpdate {
        let position = self.cycle.locate(elapsed);
        BreathUpdate {
            phase: position.phase.name,
            progress: position.progress,
            direction: position.phase.direction,
            total_elapsed: elapsed,
            total_remaining: remaining,
        }
    }

    fn elapsed_at(&self, now: f64) -> f64 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        let reference = self.paused_at.unwrap_or(now);
        (reference - start).max(0.0)
    }

    fn emit(&mut self, update: &BreathUpdate) {
        if self.last_phase != Some(update.phase) {
            self.last_phase = Some(update.phase);
            if let Some(diag) = self.diagnostics.as_mut() {
                diag.on_phase_change(update);
            }
        }
        if let Some(on_update) = self.on_update.as_mut() {
            on_update(update);
        }
    }

    fn request_frame(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn set_status(&mut self, to: EngineStatus) {
        let from = self.status;
        self.status = to;
        if from != to
            && let Some(diag) = self.diagnostics.as_mut()
        {
            diag.on_state_change(from, to);
        }
    }
}
