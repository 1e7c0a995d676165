//! Simulated-time bookkeeping.
//!
//! Time here is simulated seconds as `f64`, advanced only by the tick delta the
//! host supplies. Nothing in this module reads the wall clock.

use serde::{Deserialize, Serialize};

/// Elapsed time since the last transition into the current state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElapsedClock {
    seconds: f64,
}

impl ElapsedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart from zero. Called on every transition.
    pub fn reset(&mut self) {
        self.seconds = 0.0;
    }

    pub fn accumulate(&mut self, delta: f64) {
        self.seconds += delta;
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Strictly more than `threshold` seconds have elapsed.
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.seconds > threshold
    }
}

/// One-shot countdown timer.
///
/// Owners use these for windows such as coyote time, buffered jump input, or
/// how long an enemy keeps chasing after losing sight of its target. A stopped
/// countdown has no time left; `tick` stops it once it runs out.
///
/// # Example
///
/// ```rust
/// use tickstate::core::Countdown;
///
/// let mut coyote = Countdown::new(0.1);
/// assert!(coyote.is_stopped());
///
/// coyote.start();
/// coyote.tick(0.05);
/// assert!(coyote.is_running());
///
/// coyote.tick(0.05);
/// assert!(coyote.is_stopped());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    wait_time: f64,
    time_left: f64,
}

impl Countdown {
    /// A stopped countdown that runs for `wait_time` seconds once started.
    pub fn new(wait_time: f64) -> Self {
        Self {
            wait_time: wait_time.max(0.0),
            time_left: 0.0,
        }
    }

    /// Start or restart from the full wait time.
    pub fn start(&mut self) {
        self.time_left = self.wait_time;
    }

    pub fn stop(&mut self) {
        self.time_left = 0.0;
    }

    pub fn tick(&mut self, delta: f64) {
        if self.time_left > 0.0 {
            self.time_left = (self.time_left - delta).max(0.0);
        }
    }

    pub fn time_left(&self) -> f64 {
        self.time_left
    }

    pub fn wait_time(&self) -> f64 {
        self.wait_time
    }

    pub fn is_stopped(&self) -> bool {
        self.time_left <= 0.0
    }

    pub fn is_running(&self) -> bool {
        !self.is_stopped()
    }
}
