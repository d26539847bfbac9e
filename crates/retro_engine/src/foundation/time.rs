//! Time sources for frame timing
//!
//! The game loop never reads the wall clock directly. It asks a [`Clock`] for
//! a monotonic timestamp, so tests and replays can substitute [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source
pub trait Clock {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;
}

/// Clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced clock
///
/// Clones share the same timestamp, so a test can keep one handle and give
/// the other to a [`GameLoop`](crate::game_loop::GameLoop).
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    current: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward
    pub fn advance(&self, delta: Duration) {
        self.current.set(self.current.get() + delta);
    }

    /// Jump to an absolute timestamp
    pub fn set(&self, timestamp: Duration) {
        self.current.set(timestamp);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.current.get()
    }
}
