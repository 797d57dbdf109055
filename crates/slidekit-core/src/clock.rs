//! Time sources for the engine.
//!
//! All timestamps handed to a slider (pointer events, frame ticks) are
//! milliseconds on the same time base as its [`Clock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::time::Instant;

/// Monotonic millisecond clock
pub trait Clock: Send + Sync {
    /// Milliseconds since the clock's origin
    fn now(&self) -> f64;
}

/// Wall clock measured from its creation.
///
/// Backed by tokio's `Instant`, so it follows paused time inside
/// `#[tokio::test(start_paused = true)]`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for replays and tests.
///
/// Clones share the same time, so a test can keep one handle while the
/// slider owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start_ms.to_bits())),
        }
    }

    pub fn set(&self, ms: f64) {
        self.bits.store(ms.to_bits(), Ordering::SeqCst);
    }

    /// Move the clock forward and return the new time
    pub fn advance(&self, ms: f64) -> f64 {
        let next = self.now() + ms;
        self.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}
