//! Live terminal session: a scaled monotonic clock, a tokio interval as the
//! display refresh, and a line-per-phase readout.

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use prana_core::{
    BreathCycle, BreathEngine, BreathUpdate, EngineStatus, FrameQueue, MonotonicClock, PhaseName,
};
use tokio::time::MissedTickBehavior;

use crate::diagnostics::TracingDiagnostics;

/// Roughly one display refresh at 60 Hz.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct SessionOptions {
    pub total_seconds: f64,
    pub time_scale: f64,
    pub verbose: bool,
}

/// Prints one line each time the phase changes.
struct PhaseReporter<W> {
    out: W,
    last: Option<PhaseName>,
}

impl<W: Write> PhaseReporter<W> {
    fn new(out: W) -> Self {
        Self { out, last: None }
    }

    fn report(&mut self, update: &BreathUpdate) -> io::Result<()> {
        if update.total_remaining <= 0.0 || self.last == Some(update.phase) {
            return Ok(());
        }
        self.last = Some(update.phase);
        writeln!(
            self.out,
            "{:>7.1}s  {:<11} {:>4}  {:.0}s left",
            update.total_elapsed,
            update.phase.as_str(),
            update.direction.as_str(),
            update.total_remaining.ceil()
        )?;
        self.out.flush()
    }
}

pub async fn run_session(cycle: BreathCycle, opts: SessionOptions) -> Result<EngineStatus> {
    let completed = Rc::new(Cell::new(false));
    let done = Rc::clone(&completed);
    let write_error: Rc<RefCell<Option<io::Error>>> = Rc::new(RefCell::new(None));
    let failed = Rc::clone(&write_error);
    let mut reporter = PhaseReporter::new(io::stdout());

    let clock = MonotonicClock::scaled(opts.time_scale);
    let mut engine = BreathEngine::new(cycle, opts.total_seconds, clock, FrameQueue::new())
        .on_update(move |update| {
            if let Err(e) = reporter.report(update) {
                failed.borrow_mut().get_or_insert(e);
            }
        })
        .on_complete(move || done.set(true));
    if opts.verbose {
        engine = engine.with_diagnostics(Box::new(TracingDiagnostics));
    }

    engine.start().context("cannot start breath session")?;
    tracing::info!(
        "session started: {:.1}s total, cycle {:.1}s, time scale {}",
        engine.total_seconds(),
        engine.cycle().length(),
        clock.scale()
    );

    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = frames.tick() => {
                if engine.scheduler_mut().take_due().is_some() {
                    engine.on_frame();
                }
                let failure = write_error.borrow_mut().take();
                if let Some(e) = failure {
                    engine.stop();
                    return Err(e).context("failed to write session output");
                }
                if !engine.scheduler().is_pending() {
                    break;
                }
            }
            signal = &mut ctrl_c => {
                signal.context("failed to listen for Ctrl-C")?;
                engine.stop();
                break;
            }
        }
    }

    if completed.get() {
        println!("session complete ({:.0}s)", engine.total_seconds());
    } else {
        println!("session stopped");
    }
    Ok(engine.status())
}
