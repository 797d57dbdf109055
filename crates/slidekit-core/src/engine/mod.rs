//! Carousel motion engine
//!
//! Maps pointer input and elapsed time to a continuous track position, a
//! discrete slide index and per-slide visibility.
//!
//! # Layers
//!
//! ## Atoms
//! - `easing` - Pure easing curves
//! - `input` - Velocity window over raw deltas
//! - `layout` - Geometry resolved from options and container size
//! - `pointer` - Pointer samples and drag book-keeping
//! - `events` - Lifecycle notifications and their sink
//!
//! ## Molecules
//! - `track` - Position, boundary policy and derived metrics
//! - `planner` - Settle plans per interaction mode
//! - `animation` - Frame-stepped plan execution
//!
//! ## Organism
//! - `slider` - The engine that owns all of the above
//!
//! # Usage
//!
//! ```ignore
//! use slidekit_core::{ManualClock, PointerEvent, Slider, SliderEvent, SliderOptions, TrackDetails};
//!
//! let clock = ManualClock::new(0.0);
//! let options = SliderOptions { slides: 5, ..Default::default() };
//! let mut slider = Slider::new(options, clock.clone())
//!     .with_sink(|event: SliderEvent, details: &TrackDetails| println!("{} {}", event, details.position));
//! slider.mount(300.0);
//!
//! slider.drag_start(PointerEvent::mouse(200.0, 0.0, clock.now()));
//! slider.drag_move(PointerEvent::mouse(120.0, 0.0, clock.advance(16.0)));
//! slider.drag_end(PointerEvent::mouse(120.0, 0.0, clock.advance(16.0)));
//!
//! while slider.needs_frame() {
//!     clock.advance(16.0);
//!     slider.tick();
//! }
//! ```

// Atoms
pub mod easing;
pub mod events;
pub mod input;
pub mod layout;
pub mod pointer;

// Molecules
pub mod animation;
pub mod planner;
pub mod track;

// Organism
pub mod slider;

pub use animation::{AnimationRunner, RunState, Terminal, TickOutcome};
pub use easing::EasingType;
pub use events::{EventSink, SliderEvent};
pub use input::{InputTracker, VelocitySample};
pub use layout::LayoutParams;
pub use planner::{Completion, MotionPlan, MotionPlanner, PlanKind};
pub use pointer::{PointerEvent, PointerId, PointerKind};
pub use slider::Slider;
pub use track::{PositionTrack, SlidePosition, TrackDetails};
