//! The slider engine: one owner for options, track, animation and gesture.

use tracing::{debug, info, trace};

use super::animation::{AnimationRunner, TickOutcome};
use super::events::{EventSink, SliderEvent};
use super::layout::LayoutParams;
use super::planner::{Completion, MotionPlan, MotionPlanner};
use super::pointer::{DragState, PointerEvent};
use super::track::{PositionTrack, TrackDetails};
use crate::clock::{Clock, SystemClock};
use crate::config::SliderOptions;

/// A carousel motion engine.
///
/// Pointer events and frames are pushed in by the host; positions come out
/// through [`Slider::details`] and the [`EventSink`]. Nothing here blocks or
/// spawns: the host drives frames while [`Slider::needs_frame`] is true.
pub struct Slider<C: Clock = SystemClock> {
    options: SliderOptions,
    clock: C,
    track: PositionTrack,
    runner: AnimationRunner,
    sink: Option<Box<dyn EventSink>>,
    drag: Option<DragState>,
    /// Runtime override of `options.controls`
    controls: Option<bool>,
    container_size: Option<f64>,
    mounted: bool,
    created: bool,
    options_changed: bool,
}

impl<C: Clock> Slider<C> {
    /// Create an unmounted slider. Call [`Slider::mount`] once the container size is known.
    pub fn new(options: SliderOptions, clock: C) -> Self {
        let track = PositionTrack::new(LayoutParams::resolve(&options, 0.0));
        Self {
            options,
            clock,
            track,
            runner: AnimationRunner::new(),
            sink: None,
            drag: None,
            controls: None,
            container_size: None,
            mounted: false,
            created: false,
            options_changed: false,
        }
    }

    /// Set the receiver of lifecycle notifications
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn set_sink(&mut self, sink: impl EventSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    pub fn layout(&self) -> &LayoutParams {
        self.track.layout()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn current_index(&self) -> i64 {
        self.track.current_index()
    }

    pub fn position(&self) -> f64 {
        self.track.position()
    }

    /// Plan currently being animated
    pub fn active_plan(&self) -> Option<&MotionPlan> {
        self.runner.plan()
    }

    /// Whether the host should deliver another frame
    pub fn needs_frame(&self) -> bool {
        self.runner.is_scheduled()
    }

    /// Fresh snapshot of the track
    pub fn details(&self) -> TrackDetails {
        self.track.details(self.clock.now())
    }

    /// Attach to a container of the given size along the slider axis
    pub fn mount(&mut self, container_size: f64) {
        self.container_size = None;
        self.resize(container_size, true);
        self.mounted = true;
        info!(
            slides = self.options.slides,
            size = container_size,
            mode = ?self.options.mode,
            "slider mounted"
        );
        self.emit(SliderEvent::Mounted);
        if !self.created {
            self.created = true;
            self.emit(SliderEvent::Created);
        }
    }

    /// Re-resolve the layout for a new container size.
    ///
    /// Unchanged sizes are skipped unless `force` is set. Returns true when
    /// the layout was rebuilt.
    pub fn resize(&mut self, container_size: f64, force: bool) -> bool {
        if !force && self.container_size == Some(container_size) {
            return false;
        }
        if self.runner.abort() {
            debug!("motion cancelled by resize");
        }
        self.container_size = Some(container_size);

        // The index is read before the new slide width shifts it
        let index = if !self.created || (self.options_changed && self.options.reset_slide) {
            self.options.initial
        } else {
            self.track.current_index()
        };
        self.track
            .set_layout(LayoutParams::resolve(&self.options, container_size));
        self.options_changed = false;
        debug!(
            size = container_size,
            width = self.track.layout().width,
            index,
            "layout resolved"
        );

        self.position_at(index);
        true
    }

    /// Replace the options (if given) and rebind
    pub fn refresh(&mut self, options: Option<SliderOptions>) {
        if let Some(options) = options {
            self.options = options;
            self.options_changed = true;
        }
        self.unbind();
        if let Some(size) = self.container_size {
            self.mount(size);
        }
    }

    /// Stop all motion and detach pointer input
    pub fn destroy(&mut self) {
        self.unbind();
        info!("slider destroyed");
    }

    /// Enable or disable pointer input at runtime
    pub fn set_controls(&mut self, active: bool) {
        self.controls = Some(active);
    }

    fn accepts_input(&self) -> bool {
        self.mounted && self.controls.unwrap_or(self.options.controls)
    }

    pub fn drag_start(&mut self, event: PointerEvent) {
        if self.drag.is_some() || !self.accepts_input() {
            trace!(pointer = event.pointer, "drag start ignored");
            return;
        }
        self.runner.abort();

        let index_start = self.track.current_index();
        self.drag = Some(DragState::begin(&event, self.options.vertical, index_start));
        let slide_changed = self.track.apply_delta(0.0, true, event.timestamp);
        self.after_move(slide_changed);
        self.emit(SliderEvent::DragStart);
    }

    pub fn drag_move(&mut self, event: PointerEvent) {
        if !self.accepts_input() {
            return;
        }
        let vertical = self.options.vertical;
        let Some(drag) = self.drag.as_mut().filter(|drag| drag.pointer == event.pointer) else {
            trace!(pointer = event.pointer, "stale pointer move ignored");
            return;
        };

        let slide = drag.is_slide(&event, vertical);
        if !slide && drag.just_started {
            debug!(pointer = event.pointer, "cross-axis gesture, releasing drag");
            self.drag_end(event);
            return;
        }
        drag.just_started = false;

        let (main, _) = event.axes(vertical);
        let delta = (drag.last_main - main) * self.options.drag_speed;
        drag.last_main = main;

        let slide_changed = self.track.apply_delta(delta, true, event.timestamp);
        self.after_move(slide_changed);
    }

    pub fn drag_end(&mut self, event: PointerEvent) {
        if !self.accepts_input() {
            return;
        }
        let drag = match self.drag {
            Some(drag) if drag.pointer == event.pointer => drag,
            _ => {
                trace!(pointer = event.pointer, "stale pointer release ignored");
                return;
            }
        };
        self.drag = None;

        // A pointer that stalled before release has no momentum
        self.track.input_mut().expire(event.timestamp);
        let speed = self.track.input().speed();

        self.emit(SliderEvent::BeforeChange);
        let plan = MotionPlanner::new(&self.options, &self.track).release(speed, Some(drag.index_start));
        if let Some(plan) = plan {
            self.runner.start(plan);
        }
        self.emit(SliderEvent::DragEnd);
    }

    /// Settle on `index`, clamped unless looping
    pub fn move_to_index(&mut self, index: i64, force_finish: bool, duration: Option<f64>) {
        self.emit(SliderEvent::BeforeChange);
        let plan = MotionPlanner::new(&self.options, &self.track).to_index(index as f64, force_finish, duration);
        self.runner.start(plan);
    }

    pub fn next(&mut self) {
        self.move_to_index(self.track.current_index() + 1, false, None);
    }

    pub fn prev(&mut self) {
        self.move_to_index(self.track.current_index() - 1, false, None);
    }

    pub fn move_to_slide(&mut self, index: i64, duration: Option<f64>) {
        self.move_to_index(index, false, duration);
    }

    /// Run one animation frame at the clock's current time
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        self.frame(now)
    }

    /// Run one animation frame at `now`. Returns true while more frames are wanted.
    pub fn frame(&mut self, now: f64) -> bool {
        match self.runner.tick(now, &mut self.track) {
            TickOutcome::Idle => {}
            TickOutcome::Continue { slide_changed } | TickOutcome::Aborted { slide_changed } => {
                self.after_move(slide_changed);
            }
            TickOutcome::Completed {
                on_complete,
                slide_changed,
            } => {
                self.after_move(slide_changed);
                match on_complete {
                    Some(completion) => self.complete(completion),
                    None => self.emit(SliderEvent::AfterChange),
                }
            }
            TickOutcome::Rubberband => {
                let speed = self.track.speed_at(now);
                let plan = MotionPlanner::new(&self.options, &self.track).rubberband_return(speed);
                match plan {
                    Some(plan) => self.runner.start(plan),
                    None => self.complete(Completion::SnapToCurrent),
                }
            }
        }
        self.runner.is_scheduled()
    }

    fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::SnapToCurrent => {
                let index = self.track.current_index() as f64;
                let plan = MotionPlanner::new(&self.options, &self.track).to_index(index, true, None);
                self.runner.start(plan);
            }
        }
    }

    /// Jump straight to `index` without animating
    fn position_at(&mut self, index: i64) {
        self.emit(SliderEvent::BeforeChange);
        let index = self.track.clamp_index(index as f64);
        let distance = self.track.index_distance(index);
        let slide_changed = self.track.apply_delta(distance, false, self.clock.now());
        self.after_move(slide_changed);
        self.emit(SliderEvent::AfterChange);
    }

    fn unbind(&mut self) {
        self.runner.abort();
        self.drag = None;
        self.track.input_mut().reset();
        if self.mounted {
            self.mounted = false;
            self.emit(SliderEvent::Destroyed);
        }
    }

    fn after_move(&mut self, slide_changed: bool) {
        if slide_changed {
            self.emit(SliderEvent::SlideChanged);
        }
        self.emit(SliderEvent::Move);
    }

    fn emit(&mut self, event: SliderEvent) {
        if let Some(sink) = self.sink.as_mut() {
            let details = self.track.details(self.clock.now());
            sink.notify(event, &details);
        }
    }
}

impl<C: Clock> std::fmt::Debug for Slider<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("options", &self.options)
            .field("track", &self.track)
            .field("runner", &self.runner)
            .field("dragging", &self.drag.is_some())
            .field("mounted", &self.mounted)
            .finish()
    }
}
