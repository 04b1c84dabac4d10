//! Time sources for the breath engine.
//!
//! The engine only ever asks for "now" in seconds on a monotonic scale.
//! `None` means the platform has no usable source.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

pub trait Clock {
    fn now(&self) -> Option<f64>;
}

/// Lets a host pass the result of platform detection straight through.
impl<C: Clock> Clock for Option<C> {
    fn now(&self) -> Option<f64> {
        self.as_ref()?.now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> Option<f64> {
        (**self).now()
    }
}

/// Monotonic wall time since construction, optionally sped up.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
    scale: f64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::scaled(1.0)
    }

    /// A clock running `scale` times faster than real time.
    /// Non-positive or non-finite scales fall back to real time.
    pub fn scaled(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self {
            origin: Instant::now(),
            scale,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Option<f64> {
        Some(self.origin.elapsed().as_secs_f64() * self.scale)
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    pub fn get(&self) -> f64 {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Option<f64> {
        Some(self.now.get())
    }
}
