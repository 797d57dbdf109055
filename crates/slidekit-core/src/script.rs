//! Gesture scripts: recorded or hand-written interaction sequences that can
//! be replayed against a [`Slider`].
//!
//! ```toml
//! container = 300
//!
//! [slider]
//! slides = 5
//! mode = "free-snap"
//!
//! [[step]]
//! action = "drag_start"
//! x = 200
//!
//! [[step]]
//! action = "drag_move"
//! x = 150
//! dt = 16
//!
//! [[step]]
//! action = "drag_end"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;
use crate::config::SliderOptions;
use crate::driver::{drive_until_settled, FrameSource};
use crate::engine::pointer::DEFAULT_POINTER;
use crate::engine::{PointerEvent, PointerId, PointerKind, Slider};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureScript {
    /// Container size along the slider axis
    pub container: f64,
    /// Overrides applied on top of the configured slider options
    #[serde(default)]
    pub slider: Option<toml::Table>,
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    DragStart {
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default)]
        pointer: PointerId,
        #[serde(default)]
        touch: bool,
    },
    DragMove {
        x: f64,
        #[serde(default)]
        y: f64,
        /// Milliseconds since the previous step
        #[serde(default = "default_move_dt")]
        dt: f64,
    },
    DragEnd {
        #[serde(default)]
        dt: f64,
    },
    Wait {
        ms: f64,
    },
    Next,
    Prev,
    MoveTo {
        index: i64,
        #[serde(default)]
        duration: Option<f64>,
    },
    Resize {
        size: f64,
    },
}

fn default_move_dt() -> f64 {
    16.0
}

impl GestureScript {
    pub fn parse(content: &str) -> Result<Self> {
        let script: GestureScript =
            toml::from_str(content).map_err(|e| Error::Script(e.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Slider options with this script's overrides merged over `base`
    pub fn options(&self, base: &SliderOptions) -> Result<SliderOptions> {
        let mut merged = toml::Value::try_from(base).map_err(|e| Error::Config(e.to_string()))?;
        if let (Some(table), Some(overrides)) = (merged.as_table_mut(), self.slider.as_ref()) {
            for (key, value) in overrides {
                table.insert(key.clone(), value.clone());
            }
        }
        merged
            .try_into()
            .map_err(|e| Error::Script(format!("invalid [slider] table: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if !(self.container.is_finite() && self.container >= 0.0) {
            return Err(Error::Script(format!(
                "container size must be a non-negative number, got {}",
                self.container
            )));
        }
        for (idx, step) in self.steps.iter().enumerate() {
            let (name, value) = match step {
                ScriptStep::DragMove { dt, .. } | ScriptStep::DragEnd { dt } => ("dt", *dt),
                ScriptStep::Wait { ms } => ("ms", *ms),
                ScriptStep::Resize { size } => ("size", *size),
                ScriptStep::MoveTo {
                    duration: Some(duration),
                    ..
                } => ("duration", *duration),
                _ => continue,
            };
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::Script(format!(
                    "step {}: {} must be a non-negative number, got {}",
                    idx + 1,
                    name,
                    value
                )));
            }
        }
        Ok(())
    }
}

/// Frames consumed while replaying a script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayStats {
    pub steps: usize,
    pub frames: u32,
}

/// Replays script steps against a mounted slider.
///
/// Time only moves through `frames`: waits and step gaps pump frames until
/// the slider clock has advanced far enough, running any animation on the
/// way, so the slider clock and the frame source must share a time base.
pub struct ScriptPlayer<'a, C: Clock, F: FrameSource + ?Sized> {
    slider: &'a mut Slider<C>,
    frames: &'a mut F,
    max_frames: u32,
    used: u32,
    pointer: (PointerId, PointerKind),
    last: (f64, f64),
}

impl<'a, C: Clock, F: FrameSource + ?Sized> ScriptPlayer<'a, C, F> {
    pub fn new(slider: &'a mut Slider<C>, frames: &'a mut F, max_frames: u32) -> Self {
        Self {
            slider,
            frames,
            max_frames,
            used: 0,
            pointer: (DEFAULT_POINTER, PointerKind::Mouse),
            last: (0.0, 0.0),
        }
    }

    /// Run every step, then let the slider settle
    pub async fn play(mut self, script: &GestureScript) -> Result<PlayStats> {
        for (idx, step) in script.steps.iter().enumerate() {
            debug!(step = idx + 1, ?step, "script step");
            self.step(step).await?;
        }
        let remaining = self.max_frames.saturating_sub(self.used);
        self.used += drive_until_settled(&mut *self.slider, &mut *self.frames, remaining).await;
        if self.slider.needs_frame() {
            return Err(self.budget_exhausted());
        }
        Ok(PlayStats {
            steps: script.steps.len(),
            frames: self.used,
        })
    }

    async fn step(&mut self, step: &ScriptStep) -> Result<()> {
        match *step {
            ScriptStep::DragStart { x, y, pointer, touch } => {
                let kind = if touch {
                    PointerKind::Touch
                } else {
                    PointerKind::Mouse
                };
                self.pointer = (pointer, kind);
                let event = self.event(x, y);
                self.slider.drag_start(event);
            }
            ScriptStep::DragMove { x, y, dt } => {
                self.advance(dt).await?;
                let event = self.event(x, y);
                self.slider.drag_move(event);
            }
            ScriptStep::DragEnd { dt } => {
                self.advance(dt).await?;
                let (x, y) = self.last;
                let event = self.event(x, y);
                self.slider.drag_end(event);
            }
            ScriptStep::Wait { ms } => self.advance(ms).await?,
            ScriptStep::Next => self.slider.next(),
            ScriptStep::Prev => self.slider.prev(),
            ScriptStep::MoveTo { index, duration } => self.slider.move_to_slide(index, duration),
            ScriptStep::Resize { size } => {
                self.slider.resize(size, false);
            }
        }
        Ok(())
    }

    fn event(&mut self, x: f64, y: f64) -> PointerEvent {
        self.last = (x, y);
        let (pointer, kind) = self.pointer;
        PointerEvent {
            pointer,
            x,
            y,
            timestamp: self.slider.clock().now(),
            kind,
        }
    }

    /// Pump frames until `ms` have passed on the slider clock
    async fn advance(&mut self, ms: f64) -> Result<()> {
        let target = self.slider.clock().now() + ms;
        while self.slider.clock().now() < target {
            if self.used >= self.max_frames {
                return Err(self.budget_exhausted());
            }
            let now = self.frames.next_frame().await;
            self.used += 1;
            if self.slider.needs_frame() {
                self.slider.frame(now);
            }
        }
        Ok(())
    }

    fn budget_exhausted(&self) -> Error {
        Error::Script(format!("frame budget of {} exhausted", self.max_frames))
    }
}
