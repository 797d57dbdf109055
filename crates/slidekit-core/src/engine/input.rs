//! Velocity estimation from raw positional deltas.

use std::collections::VecDeque;

use tracing::trace;

/// Samples kept in the velocity window
pub const MAX_SAMPLES: usize = 6;

/// A window that receives no sample for this long is discarded
pub const IDLE_TIMEOUT_MS: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocitySample {
    pub delta: f64,
    pub timestamp: f64,
}

/// Time-windowed velocity estimate in px/ms.
///
/// The window only ever holds samples of one sign; a reversal starts a new
/// window. The most recent sample's delta is left out of the sum, which
/// trades one frame of latency for a steadier estimate.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    samples: VecDeque<VelocitySample>,
    direction: i8,
    speed: f64,
    idle_deadline: Option<f64>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a delta observed at `now`
    pub fn record(&mut self, delta: f64, now: f64) {
        if !delta.is_finite() || !now.is_finite() {
            trace!(delta, now, "ignoring non-finite velocity sample");
            return;
        }

        // The idle timer may have run out since the previous sample
        self.expire(now);

        let direction = sign(delta);
        if direction != self.direction {
            self.samples.clear();
        }
        self.direction = direction;

        // Keep the window time-ordered even if a host delivers a stale stamp
        let timestamp = self
            .samples
            .back()
            .map_or(now, |last| now.max(last.timestamp));
        self.samples.push_back(VelocitySample { delta, timestamp });
        while self.samples.len() > MAX_SAMPLES {
            self.samples.pop_front();
        }

        self.idle_deadline = Some(now + IDLE_TIMEOUT_MS);
        self.speed = self.estimate();
    }

    /// Fire the idle timer if it is due. Returns true when the window was dropped.
    pub fn expire(&mut self, now: f64) -> bool {
        match self.idle_deadline {
            Some(deadline) if now >= deadline => {
                self.samples.clear();
                self.speed = 0.0;
                self.idle_deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Speed as seen at `now`, honouring a pending idle timeout
    pub fn speed_at(&self, now: f64) -> f64 {
        match self.idle_deadline {
            Some(deadline) if now >= deadline => 0.0,
            _ => self.speed,
        }
    }

    /// Speed as of the last sample
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Sign of the last recorded delta
    pub fn direction(&self) -> i8 {
        self.direction
    }

    pub fn samples(&self) -> impl Iterator<Item = &VelocitySample> {
        self.samples.iter()
    }

    pub fn is_armed(&self) -> bool {
        self.idle_deadline.is_some()
    }

    /// Drop the window and disarm the idle timer
    pub fn reset(&mut self) {
        self.samples.clear();
        self.direction = 0;
        self.speed = 0.0;
        self.idle_deadline = None;
    }

    fn estimate(&self) -> f64 {
        if self.samples.len() <= 1 || self.direction == 0 {
            return 0.0;
        }
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };

        let span = last.timestamp - first.timestamp;
        if span <= 0.0 {
            return 0.0;
        }

        let distance: f64 = self
            .samples
            .iter()
            .take(self.samples.len() - 1)
            .map(|sample| sample.delta)
            .sum();
        distance / span
    }
}

/// -1, 0 or 1
pub fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
