pub mod clock;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod script;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AnimationConfig, AppConfig, EasingType, SliderMode, SliderOptions};
pub use driver::{drive_until_settled, FrameSource, IntervalFrames, ManualFrames};
pub use engine::{PointerEvent, PointerKind, Slider, SliderEvent, TrackDetails};
pub use error::{Error, Result};
pub use script::{GestureScript, PlayStats, ScriptPlayer, ScriptStep};
