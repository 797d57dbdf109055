//! Turns a released gesture or a navigation request into a [`MotionPlan`].

use serde::Serialize;
use tracing::{debug, warn};

use super::easing::EasingType;
use super::input::sign;
use super::track::PositionTrack;
use crate::config::{SliderMode, SliderOptions};

/// Travel multiplier of free glides
const FREE_DURATION_FACTOR: f64 = 6.0;

/// Lower bound for friction coefficients
const MIN_FRICTION: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Snap,
    Free,
    FreeSnap,
    RubberbandReturn,
}

/// Follow-up run by the engine when a plan completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Settle onto the current index, bypassing boundary aborts
    SnapToCurrent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPlan {
    pub kind: PlanKind,
    /// Total signed travel in pixels
    pub target_distance: f64,
    /// Milliseconds
    pub duration: f64,
    pub easing: EasingType,
    /// Skip boundary aborts and rubberband switches
    pub force_finish: bool,
    pub on_complete: Option<Completion>,
}

/// Borrowed view over the options and track a plan is computed from
pub struct MotionPlanner<'a> {
    options: &'a SliderOptions,
    track: &'a PositionTrack,
}

impl<'a> MotionPlanner<'a> {
    pub fn new(options: &'a SliderOptions, track: &'a PositionTrack) -> Self {
        Self { options, track }
    }

    /// Plan for a released gesture.
    ///
    /// `drag_start_index` is the index the gesture began on. Returns `None`
    /// when nothing needs to move.
    pub fn release(&self, speed: f64, drag_start_index: Option<i64>) -> Option<MotionPlan> {
        match self.options.mode {
            SliderMode::Snap => Some(self.snap(drag_start_index)),
            SliderMode::Free => self.free(speed),
            SliderMode::FreeSnap => Some(self.free_snap(speed)),
        }
    }

    /// Settle on a slide over the given (or default) duration
    pub fn to_index(&self, index: f64, force_finish: bool, duration: Option<f64>) -> MotionPlan {
        let index = self.track.clamp_index(index);
        let duration = duration.unwrap_or(self.options.duration).max(0.0);
        MotionPlan {
            kind: PlanKind::Snap,
            target_distance: self.track.index_distance(index),
            duration,
            easing: self.options.snap_easing,
            force_finish,
            on_complete: None,
        }
    }

    /// Move at most one slide in the direction of travel
    pub fn snap(&self, drag_start_index: Option<i64>) -> MotionPlan {
        let direction = self.track.direction();
        let base = match drag_start_index {
            // Index changes mid-drag would otherwise add to the step
            Some(start) if self.track.layout().slides_per_view == 1.0 && direction != 0 => start,
            _ => self.track.current_index(),
        };
        self.to_index((base + direction as i64) as f64, false, None)
    }

    /// Glide with friction; re-snap a resting track that sits out of bounds
    pub fn free(&self, speed: f64) -> Option<MotionPlan> {
        if speed == 0.0 {
            let layout = self.track.layout();
            if !layout.loop_slides && self.track.overflow(0.0) != 0.0 {
                return Some(self.to_index(self.track.current_index() as f64, false, None));
            }
            return None;
        }
        let (distance, duration) = glide(speed, self.options.friction, FREE_DURATION_FACTOR);
        Some(MotionPlan {
            kind: PlanKind::Free,
            target_distance: distance,
            duration,
            easing: self.options.free_easing,
            force_finish: false,
            on_complete: None,
        })
    }

    /// Glide with friction and stop on the slide edge beyond the natural stop
    pub fn free_snap(&self, speed: f64) -> MotionPlan {
        if speed == 0.0 {
            return self.to_index(self.track.current_index() as f64, false, None);
        }
        let (distance, duration) = glide(speed, self.options.friction, FREE_DURATION_FACTOR);

        let direction = self.track.direction();
        if direction != sign(speed) {
            warn!(
                direction,
                speed, "free-snap rounding direction disagrees with release velocity"
            );
        }

        let slide_width = self.track.layout().slide_width();
        let position = self.track.position();
        let target_distance = if slide_width > 0.0 {
            let trend = (position + distance) / slide_width;
            let index = if direction == -1 {
                trend.floor()
            } else {
                trend.ceil()
            };
            index * slide_width - position
        } else {
            0.0
        };

        MotionPlan {
            kind: PlanKind::FreeSnap,
            target_distance,
            duration,
            easing: self.options.free_easing,
            force_finish: false,
            on_complete: None,
        }
    }

    /// Elastic overshoot after an edge was hit mid-flight.
    ///
    /// Returns `None` when there is no momentum left; the caller then runs
    /// the [`Completion::SnapToCurrent`] follow-up right away.
    pub fn rubberband_return(&self, speed: f64) -> Option<MotionPlan> {
        if speed == 0.0 {
            return None;
        }
        let (distance, duration) = glide(
            speed,
            self.options.rubberband_friction,
            self.options.rubberband_duration_factor,
        );
        debug!(speed, distance, duration, "rubberband return");
        Some(MotionPlan {
            kind: PlanKind::RubberbandReturn,
            target_distance: distance,
            duration,
            easing: EasingType::QuadOut,
            force_finish: true,
            on_complete: Some(Completion::SnapToCurrent),
        })
    }
}

/// Travel distance and duration of a friction-decelerated glide
fn glide(speed: f64, friction: f64, duration_factor: f64) -> (f64, f64) {
    let friction = if friction.is_finite() {
        friction.max(MIN_FRICTION)
    } else {
        MIN_FRICTION
    };
    let effective = friction / speed.abs().sqrt();
    let distance = speed * speed / effective * speed.signum();
    let duration = (speed / effective).abs() * duration_factor.max(0.0);
    (distance, duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::layout::LayoutParams;

    fn setup(options: &SliderOptions) -> PositionTrack {
        PositionTrack::new(LayoutParams::resolve(options, 300.0))
    }

    fn options(slides: usize, mode: SliderMode) -> SliderOptions {
        SliderOptions {
            slides,
            mode,
            ..Default::default()
        }
    }

    #[test]
    fn test_snap_steps_back_from_drag_start() {
        let opts = options(5, SliderMode::Snap);
        let mut track = setup(&opts);
        track.apply_delta(600.0, false, 0.0);
        assert_eq!(track.current_index(), 2);

        // Drag left-to-right: position decreases
        track.apply_delta(-20.0, true, 10.0);
        track.apply_delta(-30.0, true, 20.0);

        let plan = MotionPlanner::new(&opts, &track).snap(Some(2));
        let target = track.position() + plan.target_distance;
        assert_eq!(target, 300.0);
        assert_eq!(plan.duration, 500.0);
        assert_eq!(plan.easing, EasingType::Quintic);
        assert!(!plan.force_finish);
    }

    #[test]
    fn test_snap_uses_drag_start_index_for_single_view() {
        let opts = options(5, SliderMode::Snap);
        let mut track = setup(&opts);
        track.apply_delta(600.0, false, 0.0);
        // Dragged far enough that the live index already moved to 3
        track.apply_delta(200.0, true, 10.0);
        assert_eq!(track.current_index(), 3);

        let plan = MotionPlanner::new(&opts, &track).snap(Some(2));
        assert_eq!(track.position() + plan.target_distance, 900.0);
    }

    #[test]
    fn test_snap_without_direction_stays() {
        let opts = options(5, SliderMode::Snap);
        let mut track = setup(&opts);
        track.apply_delta(300.0, false, 0.0);
        track.apply_delta(0.0, true, 10.0);
        let plan = MotionPlanner::new(&opts, &track).snap(Some(1));
        assert_eq!(plan.target_distance, 0.0);
    }

    #[test]
    fn test_snap_is_clamped_at_edges() {
        let opts = options(3, SliderMode::Snap);
        let mut track = setup(&opts);
        track.apply_delta(-10.0, true, 0.0);
        let plan = MotionPlanner::new(&opts, &track).snap(Some(0));
        assert!((track.position() + plan.target_distance).abs() < 1e-9);
    }

    #[test]
    fn test_free_glide_physics() {
        let opts = options(10, SliderMode::Free);
        let track = setup(&opts);
        let plan = MotionPlanner::new(&opts, &track).free(4.0).unwrap();
        // f' = 0.0025 / 2
        assert!((plan.target_distance - 16.0 / 0.00125).abs() < 1e-6);
        assert!((plan.duration - 4.0 / 0.00125 * 6.0).abs() < 1e-6);
        assert_eq!(plan.kind, PlanKind::Free);

        let plan = MotionPlanner::new(&opts, &track).free(-1.0).unwrap();
        assert!((plan.target_distance + 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_free_at_rest_inside_bounds_is_noop() {
        let opts = options(5, SliderMode::Free);
        let mut track = setup(&opts);
        track.apply_delta(130.0, false, 0.0);
        assert!(MotionPlanner::new(&opts, &track).free(0.0).is_none());
    }

    #[test]
    fn test_free_at_rest_out_of_bounds_resnaps() {
        let mut opts = options(3, SliderMode::Free);
        opts.rubberband = false;
        let mut track = setup(&opts);
        track.apply_delta(700.0, false, 0.0);
        assert_eq!(track.current_index(), 2);

        let plan = MotionPlanner::new(&opts, &track).free(0.0).unwrap();
        assert_eq!(plan.kind, PlanKind::Snap);
        assert_eq!(track.position() + plan.target_distance, 600.0);
    }

    #[test]
    fn test_free_at_rest_while_looping_is_noop() {
        let mut opts = options(3, SliderMode::Free);
        opts.loop_slides = true;
        let mut track = setup(&opts);
        track.apply_delta(-700.0, false, 0.0);
        assert!(MotionPlanner::new(&opts, &track).free(0.0).is_none());
    }

    #[test]
    fn test_free_snap_lands_on_slide_edge() {
        let opts = options(20, SliderMode::FreeSnap);
        let mut track = setup(&opts);
        track.apply_delta(10.0, false, 0.0);
        track.apply_delta(10.0, false, 10.0);
        let speed = track.input().speed();
        assert!(speed > 0.0);

        let plan = MotionPlanner::new(&opts, &track).free_snap(speed);
        let target = track.position() + plan.target_distance;
        assert!((target / 300.0 - (target / 300.0).round()).abs() < 1e-9);
        // Rounded up in the direction of travel
        let (raw, _) = glide(speed, opts.friction, FREE_DURATION_FACTOR);
        assert!(target >= track.position() + raw);
    }

    #[test]
    fn test_free_snap_rounds_down_when_moving_back() {
        let opts = options(20, SliderMode::FreeSnap);
        let mut track = setup(&opts);
        track.apply_delta(3000.0, false, 0.0);
        track.apply_delta(-10.0, false, 100.0);
        track.apply_delta(-10.0, false, 110.0);
        let speed = track.input().speed();
        assert!(speed < 0.0);

        let plan = MotionPlanner::new(&opts, &track).free_snap(speed);
        let target = track.position() + plan.target_distance;
        let (raw, _) = glide(speed, opts.friction, FREE_DURATION_FACTOR);
        assert!(target <= track.position() + raw);
        assert!((target / 300.0 - (target / 300.0).round()).abs() < 1e-9);
    }

    #[test]
    fn test_rubberband_return_plan() {
        let opts = options(3, SliderMode::Snap);
        let track = setup(&opts);
        let planner = MotionPlanner::new(&opts, &track);
        assert!(planner.rubberband_return(0.0).is_none());

        let plan = planner.rubberband_return(-1.0).unwrap();
        assert!((plan.target_distance + 1.0 / 0.05).abs() < 1e-9);
        assert!((plan.duration - 2.0 / 0.05).abs() < 1e-9);
        assert!(plan.force_finish);
        assert_eq!(plan.easing, EasingType::QuadOut);
        assert_eq!(plan.on_complete, Some(Completion::SnapToCurrent));
    }

    #[test]
    fn test_rubberband_constants_are_configurable() {
        let mut opts = options(3, SliderMode::Snap);
        opts.rubberband_friction = 0.1;
        opts.rubberband_duration_factor = 4.0;
        let track = setup(&opts);
        let plan = MotionPlanner::new(&opts, &track).rubberband_return(1.0).unwrap();
        assert!((plan.target_distance - 10.0).abs() < 1e-9);
        assert!((plan.duration - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_to_index_honours_explicit_duration() {
        let opts = options(5, SliderMode::Snap);
        let track = setup(&opts);
        let plan = MotionPlanner::new(&opts, &track).to_index(3.0, true, Some(120.0));
        assert_eq!(plan.target_distance, 900.0);
        assert_eq!(plan.duration, 120.0);
        assert!(plan.force_finish);
    }
}
