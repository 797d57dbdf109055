//! Continuous track position and everything derived from it.

use serde::Serialize;
use tracing::warn;

use super::input::InputTracker;
use super::layout::LayoutParams;

/// Where a slide sits relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlidePosition {
    /// Offset from the viewport start, in viewport widths
    pub distance: f64,
    /// Visible fraction in [0, 1]
    pub portion: f64,
}

/// Read-only snapshot handed to collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackDetails {
    pub direction: i8,
    pub progress_track: f64,
    pub progress_slides: f64,
    pub positions: Vec<SlidePosition>,
    pub position: f64,
    pub speed: f64,
    pub relative_slide: usize,
    pub absolute_slide: i64,
    pub size: usize,
    pub width_or_height: f64,
}

/// Owns the scroll position and applies the boundary policy.
///
/// `positions` is rebuilt as a fresh vector on every change, so a snapshot
/// taken earlier never observes later frames.
#[derive(Debug, Clone)]
pub struct PositionTrack {
    layout: LayoutParams,
    position: f64,
    current_index: i64,
    progress: f64,
    positions: Vec<SlidePosition>,
    input: InputTracker,
}

impl PositionTrack {
    pub fn new(layout: LayoutParams) -> Self {
        let mut track = Self {
            layout,
            position: 0.0,
            current_index: 0,
            progress: 0.0,
            positions: Vec::new(),
            input: InputTracker::new(),
        };
        track.recompute();
        track
    }

    pub fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    /// Swap the geometry in place. Returns true when the index changed.
    pub fn set_layout(&mut self, layout: LayoutParams) -> bool {
        self.layout = layout;
        self.recompute()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn current_index(&self) -> i64 {
        self.current_index
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn positions(&self) -> &[SlidePosition] {
        &self.positions
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputTracker {
        &mut self.input
    }

    pub fn direction(&self) -> i8 {
        self.input.direction()
    }

    pub fn speed_at(&self, now: f64) -> f64 {
        self.input.speed_at(now)
    }

    /// Move the track by `delta`.
    ///
    /// Every delta is fed to the velocity tracker. With `boundary_checked`
    /// the delta first goes through the loop/rubberband/clamp policy.
    /// Returns true when the current index changed.
    pub fn apply_delta(&mut self, delta: f64, boundary_checked: bool, now: f64) -> bool {
        self.input.record(delta, now);

        let effective = if boundary_checked {
            self.constrain(delta)
        } else {
            delta
        };

        let previous = self.position;
        self.position += effective;
        if !self.position.is_finite() {
            let recovered = self.nearest_valid(previous, self.position);
            warn!(
                position = self.position,
                recovered, "non-finite track position, resetting"
            );
            self.position = recovered;
        }

        self.recompute()
    }

    /// How far `position + delta` would land outside `[0, track_length]`.
    ///
    /// Positive past the end, negative before the start, zero inside.
    pub fn overflow(&self, delta: f64) -> f64 {
        let track_length = self.layout.track_length();
        let position = self.position + delta;
        if position > track_length {
            position - track_length
        } else if position < 0.0 {
            position
        } else {
            0.0
        }
    }

    /// Delta that would bring the track to rest on `index`
    pub fn index_distance(&self, index: f64) -> f64 {
        self.layout.slide_width() * index - self.position
    }

    /// Restrict an index to the reachable range of a bounded track
    pub fn clamp_index(&self, index: f64) -> f64 {
        if self.layout.loop_slides {
            return index;
        }
        let hidden = if self.layout.centered {
            0.0
        } else {
            self.layout.slides_per_view - 1.0
        };
        let last = (self.layout.length as f64 - 1.0 - hidden).max(0.0);
        index.max(0.0).min(last)
    }

    pub fn details(&self, now: f64) -> TrackDetails {
        let length = self.layout.length;
        let progress_slides = if length > 1 {
            self.progress.abs() * length as f64 / (length as f64 - 1.0)
        } else {
            0.0
        };
        let relative_slide = if length > 0 {
            self.current_index.rem_euclid(length as i64) as usize
        } else {
            0
        };

        TrackDetails {
            direction: self.direction(),
            progress_track: self.progress.abs(),
            progress_slides,
            positions: self.positions.clone(),
            position: self.position,
            speed: self.speed_at(now),
            relative_slide,
            absolute_slide: self.current_index,
            size: length,
            width_or_height: self.layout.width,
        }
    }

    fn constrain(&self, delta: f64) -> f64 {
        if self.layout.loop_slides {
            return delta;
        }
        let overflow = self.overflow(delta);
        if !self.layout.rubberband {
            return delta - overflow;
        }
        if overflow == 0.0 {
            return delta;
        }
        if self.layout.width <= 0.0 {
            return delta - overflow;
        }
        let resistance = (1.0 - (overflow / self.layout.width).abs()).max(0.0);
        delta * resistance * resistance
    }

    fn nearest_valid(&self, previous: f64, attempted: f64) -> f64 {
        if self.layout.loop_slides {
            return previous;
        }
        let track_length = self.layout.track_length();
        if attempted == f64::INFINITY {
            track_length
        } else if attempted == f64::NEG_INFINITY {
            0.0
        } else {
            previous.clamp(0.0, track_length)
        }
    }

    /// Rebuild progress, index and slide positions. Returns true on index change.
    fn recompute(&mut self) -> bool {
        let layout = self.layout;
        let length = layout.length as f64;
        let slide_width = layout.slide_width();
        let total = slide_width * length;

        self.progress = if total <= 0.0 {
            0.0
        } else if layout.loop_slides {
            (self.position % total) / total
        } else {
            self.position / total
        };

        let previous_index = self.current_index;
        self.current_index = if slide_width > 0.0 {
            round_half_up(self.position / slide_width) as i64
        } else {
            0
        };

        self.positions = if slide_width > 0.0 {
            (0..layout.length)
                .map(|idx| slide_position(&layout, self.progress, idx))
                .collect()
        } else {
            vec![
                SlidePosition {
                    distance: 0.0,
                    portion: 0.0,
                };
                layout.length
            ]
        };

        previous_index != self.current_index
    }
}

fn slide_position(layout: &LayoutParams, progress: f64, idx: usize) -> SlidePosition {
    let length = layout.length as f64;
    let per_view = layout.slides_per_view;

    let progress = if progress < 0.0 && layout.loop_slides {
        progress + 1.0
    } else {
        progress
    };
    let mut distance = ((idx as f64 / length - progress) * length) / per_view + layout.origin;
    if layout.loop_slides {
        if distance > (length - 1.0) / per_view {
            distance -= length / per_view;
        } else if distance < -(length / per_view) + 1.0 {
            distance += length / per_view;
        }
    }

    let slide_width = 1.0 / per_view;
    let left = distance + slide_width;
    let portion = if left < slide_width {
        left / slide_width
    } else if left > 1.0 {
        1.0 - (left - 1.0) * per_view
    } else {
        1.0
    };
    let portion = if (0.0..=1.0).contains(&portion) {
        portion
    } else {
        0.0
    };

    SlidePosition { distance, portion }
}

/// Rounds .5 towards positive infinity
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
