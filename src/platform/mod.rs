//! Platform abstraction layer
//!
//! Host-side collaborators of the frame loop:
//! - Input (ascend held, quit requested), polled once per frame
//! - Monotonic clock and per-frame delta time

use std::time::Instant;

/// Polled input state
pub trait InputSource {
    /// Ascend key currently held
    fn ascend_held(&self) -> bool;
    /// Host asked to stop (window close, escape)
    fn quit_requested(&self) -> bool;
}

/// Monotonic time source in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock advanced by hand (headless runs and tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    pub time: f64,
}

impl ManualClock {
    pub fn advance(&mut self, seconds: f64) {
        self.time += seconds;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.time
    }
}

/// Derives per-frame delta time from a [`Clock`]
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: f64,
    /// Optional cap on a single delta; `None` passes hitches through as-is
    max_dt: Option<f32>,
}

impl FrameClock {
    pub fn new(clock: &impl Clock, max_dt: Option<f32>) -> Self {
        Self {
            last: clock.now(),
            max_dt,
        }
    }

    /// Seconds since the previous call (or since construction)
    pub fn delta(&mut self, clock: &impl Clock) -> f32 {
        let now = clock.now();
        let dt = (now - self.last).max(0.0) as f32;
        self.last = now;
        match self.max_dt {
            Some(max) => dt.min(max),
            None => dt,
        }
    }
}

/// Key state fed by host key events
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState {
    pub ascend: bool,
    pub quit: bool,
}

impl KeyState {
    /// Forget held keys; their release may never arrive once focus is gone
    pub fn release_held(&mut self) {
        self.ascend = false;
    }
}

impl InputSource for KeyState {
    fn ascend_held(&self) -> bool {
        self.ascend
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}
