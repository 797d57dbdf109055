//! Frame-stepped execution of a [`MotionPlan`].
//!
//! The runner never schedules anything itself: it raises a "frame wanted"
//! flag and the host calls [`AnimationRunner::tick`] from its frame source.

use tracing::{debug, trace};

use super::planner::{Completion, MotionPlan};
use super::track::PositionTrack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// How the last started plan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Completed,
    Aborted,
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No frame was scheduled
    Idle,
    /// Moved one step; the next frame is scheduled
    Continue { slide_changed: bool },
    /// Reached the target; run `on_complete` or announce the change
    Completed {
        on_complete: Option<Completion>,
        slide_changed: bool,
    },
    /// Stopped exactly at a hard boundary
    Aborted { slide_changed: bool },
    /// Hit a rubberband boundary; the caller starts the elastic return
    Rubberband,
}

#[derive(Debug, Clone)]
pub struct AnimationRunner {
    state: RunState,
    plan: Option<MotionPlan>,
    start_time: Option<f64>,
    moved: f64,
    scheduled: bool,
    last_terminal: Option<Terminal>,
}

impl Default for AnimationRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationRunner {
    pub fn new() -> Self {
        Self {
            state: RunState::Idle,
            plan: None,
            start_time: None,
            moved: 0.0,
            scheduled: false,
            last_terminal: None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Whether a frame is wanted
    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn plan(&self) -> Option<&MotionPlan> {
        self.plan.as_ref()
    }

    pub fn last_terminal(&self) -> Option<Terminal> {
        self.last_terminal
    }

    /// Replace any running plan and request the first frame
    pub fn start(&mut self, plan: MotionPlan) {
        self.abort();
        debug!(
            kind = ?plan.kind,
            distance = plan.target_distance,
            duration = plan.duration,
            force_finish = plan.force_finish,
            "animation started"
        );
        self.plan = Some(plan);
        self.moved = 0.0;
        self.start_time = None;
        self.scheduled = true;
        self.state = RunState::Running;
    }

    /// Drop the running plan without running its completion.
    ///
    /// Safe to call in any state; returns true when a plan was cancelled.
    pub fn abort(&mut self) -> bool {
        self.scheduled = false;
        self.start_time = None;
        if self.state == RunState::Running {
            self.finish(Terminal::Aborted);
            debug!("animation aborted");
            true
        } else {
            false
        }
    }

    /// Advance the plan to `now`
    pub fn tick(&mut self, now: f64, track: &mut PositionTrack) -> TickOutcome {
        if !self.scheduled {
            return TickOutcome::Idle;
        }
        let Some(plan) = self.plan else {
            self.scheduled = false;
            return TickOutcome::Idle;
        };

        let start = *self.start_time.get_or_insert(now);
        let elapsed = (now - start).max(0.0);

        if elapsed >= plan.duration {
            let slide_changed = track.apply_delta(plan.target_distance - self.moved, false, now);
            self.finish(Terminal::Completed);
            trace!(elapsed, "animation completed");
            return TickOutcome::Completed {
                on_complete: plan.on_complete,
                slide_changed,
            };
        }

        let increment = plan.target_distance * plan.easing.apply(elapsed / plan.duration) - self.moved;

        if !plan.force_finish {
            let layout = *track.layout();
            let overflow = track.overflow(increment);
            if overflow != 0.0 && !layout.loop_slides {
                if layout.is_rubberband() {
                    self.finish(Terminal::Aborted);
                    return TickOutcome::Rubberband;
                }
                let slide_changed = track.apply_delta(increment - overflow, false, now);
                self.finish(Terminal::Aborted);
                debug!(position = track.position(), "animation stopped at boundary");
                return TickOutcome::Aborted { slide_changed };
            }
        }

        self.moved += increment;
        // Forced plans are allowed past the edges untouched
        let slide_changed = track.apply_delta(increment, !plan.force_finish, now);
        TickOutcome::Continue { slide_changed }
    }

    fn finish(&mut self, terminal: Terminal) {
        self.state = RunState::Idle;
        self.plan = None;
        self.scheduled = false;
        self.start_time = None;
        self.last_terminal = Some(terminal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderOptions;
    use crate::engine::easing::EasingType;
    use crate::engine::layout::LayoutParams;
    use crate::engine::planner::PlanKind;

    fn track(slides: usize, rubberband: bool) -> PositionTrack {
        let options = SliderOptions {
            slides,
            rubberband,
            ..Default::default()
        };
        PositionTrack::new(LayoutParams::resolve(&options, 300.0))
    }

    fn plan(distance: f64, duration: f64) -> MotionPlan {
        MotionPlan {
            kind: PlanKind::Snap,
            target_distance: distance,
            duration,
            easing: EasingType::Quintic,
            force_finish: false,
            on_complete: None,
        }
    }

    fn run(runner: &mut AnimationRunner, track: &mut PositionTrack, mut now: f64) -> TickOutcome {
        loop {
            let outcome = runner.tick(now, track);
            if !matches!(outcome, TickOutcome::Continue { .. }) {
                return outcome;
            }
            now += 16.0;
        }
    }

    #[test]
    fn test_runs_to_exact_target() {
        let mut track = track(5, true);
        let mut runner = AnimationRunner::new();
        runner.start(plan(600.0, 500.0));
        assert!(runner.is_scheduled());

        let outcome = run(&mut runner, &mut track, 1000.0);
        assert!(matches!(
            outcome,
            TickOutcome::Completed {
                on_complete: None,
                ..
            }
        ));
        assert_eq!(track.position(), 600.0);
        assert_eq!(track.current_index(), 2);
        assert_eq!(runner.state(), RunState::Idle);
        assert_eq!(runner.last_terminal(), Some(Terminal::Completed));
        assert!(!runner.is_scheduled());
    }

    #[test]
    fn test_first_tick_latches_start_time() {
        let mut track = track(5, true);
        let mut runner = AnimationRunner::new();
        runner.start(plan(300.0, 100.0));
        // Elapsed is zero on the first frame whatever the clock reads
        assert!(matches!(
            runner.tick(5000.0, &mut track),
            TickOutcome::Continue { .. }
        ));
        assert_eq!(track.position(), 0.0);
        runner.tick(5050.0, &mut track);
        assert!(track.position() > 0.0 && track.position() < 300.0);
    }

    #[test]
    fn test_abort_is_idempotent() {
        let mut runner = AnimationRunner::new();
        assert!(!runner.abort());
        runner.start(plan(300.0, 100.0));
        assert!(runner.abort());
        assert!(!runner.abort());
        assert_eq!(runner.state(), RunState::Idle);
        assert!(!runner.is_scheduled());
        assert_eq!(runner.last_terminal(), Some(Terminal::Aborted));

        let mut track = track(3, true);
        assert_eq!(runner.tick(10.0, &mut track), TickOutcome::Idle);
        assert_eq!(track.position(), 0.0);
    }

    #[test]
    fn test_restart_supersedes_running_plan() {
        let mut track = track(5, true);
        let mut runner = AnimationRunner::new();
        runner.start(plan(900.0, 200.0));
        runner.tick(0.0, &mut track);
        runner.tick(50.0, &mut track);
        let midway = track.position();

        runner.start(plan(300.0 - midway, 100.0));
        assert_eq!(runner.last_terminal(), Some(Terminal::Aborted));
        let outcome = run(&mut runner, &mut track, 60.0);
        assert!(matches!(outcome, TickOutcome::Completed { .. }));
        assert!((track.position() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_hard_boundary_stops_exactly() {
        let mut track = track(3, false);
        let mut runner = AnimationRunner::new();
        runner.start(plan(2000.0, 400.0));

        let outcome = run(&mut runner, &mut track, 0.0);
        assert!(matches!(outcome, TickOutcome::Aborted { .. }));
        assert!((track.position() - 600.0).abs() < 1e-9);
        assert_eq!(runner.last_terminal(), Some(Terminal::Aborted));
        assert!(!runner.is_scheduled());
    }

    #[test]
    fn test_rubberband_boundary_requests_return() {
        let mut track = track(3, true);
        let mut runner = AnimationRunner::new();
        runner.start(plan(-400.0, 400.0));
        let outcome = run(&mut runner, &mut track, 0.0);
        assert_eq!(outcome, TickOutcome::Rubberband);
        assert_eq!(runner.state(), RunState::Idle);
        assert!(track.position() >= 0.0);
    }

    #[test]
    fn test_force_finish_passes_boundary() {
        let mut track = track(3, true);
        let mut runner = AnimationRunner::new();
        let mut overshoot = plan(-120.0, 200.0);
        overshoot.force_finish = true;
        overshoot.easing = EasingType::QuadOut;
        overshoot.on_complete = Some(Completion::SnapToCurrent);
        runner.start(overshoot);

        let outcome = run(&mut runner, &mut track, 0.0);
        assert!(matches!(
            outcome,
            TickOutcome::Completed {
                on_complete: Some(Completion::SnapToCurrent),
                ..
            }
        ));
        assert!((track.position() + 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let mut track = track(5, true);
        let mut runner = AnimationRunner::new();
        runner.start(plan(300.0, 0.0));
        assert!(matches!(
            runner.tick(0.0, &mut track),
            TickOutcome::Completed { .. }
        ));
        assert_eq!(track.position(), 300.0);
    }
}
