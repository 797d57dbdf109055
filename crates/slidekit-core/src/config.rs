use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub slider: SliderOptions,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// How a released gesture settles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SliderMode {
    /// Move at most one slide per gesture and always rest on a slide
    #[default]
    Snap,
    /// Glide with friction and stop wherever the momentum runs out
    Free,
    /// Glide with friction, then round the stop onto a slide edge
    FreeSnap,
}

/// Easing curve selection for plan overrides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// No easing: jump at the end
    None,
    /// Constant velocity
    Linear,
    /// 1 - (1-t)^3
    Cubic,
    /// 1 - (1-t)^5
    #[default]
    Quintic,
    /// 1 - 2^(-10t)
    EaseOut,
    /// t * (2 - t)
    QuadOut,
}

/// Options a host passes when creating a slider.
///
/// Values are taken as given here and clamped into a usable range when the
/// layout is resolved, so a malformed option never turns into an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderOptions {
    /// Number of slides
    #[serde(default)]
    pub slides: usize,
    /// Slides visible at once (fractional values allowed)
    #[serde(default = "default_slides_per_view")]
    pub slides_per_view: f64,
    /// Gap between slides in pixels
    #[serde(default)]
    pub spacing: f64,
    /// Center the active slide
    #[serde(default)]
    pub centered: bool,
    /// Wrap around after the last slide
    #[serde(default, rename = "loop")]
    pub loop_slides: bool,
    /// Elastic resistance past the edges (ignored when looping)
    #[serde(default = "default_true")]
    pub rubberband: bool,
    /// Use the vertical pointer axis
    #[serde(default)]
    pub vertical: bool,
    /// Interaction mode
    #[serde(default)]
    pub mode: SliderMode,
    /// Deceleration coefficient for free modes
    #[serde(default = "default_friction")]
    pub friction: f64,
    /// Default transition duration in milliseconds
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Slide shown after the first layout
    #[serde(default)]
    pub initial: i64,
    /// Multiplier applied to every drag delta
    #[serde(default = "default_drag_speed")]
    pub drag_speed: f64,
    /// Accept pointer input
    #[serde(default = "default_true")]
    pub controls: bool,
    /// Jump back to `initial` when options change
    #[serde(default)]
    pub reset_slide: bool,
    /// Friction used by the elastic return after an edge is hit
    #[serde(default = "default_rubberband_friction")]
    pub rubberband_friction: f64,
    /// Duration multiplier of the elastic return
    #[serde(default = "default_rubberband_duration_factor")]
    pub rubberband_duration_factor: f64,
    /// Easing of snap transitions
    #[serde(default)]
    pub snap_easing: EasingType,
    /// Easing of free glides
    #[serde(default)]
    pub free_easing: EasingType,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            slides: 0,
            slides_per_view: default_slides_per_view(),
            spacing: 0.0,
            centered: false,
            loop_slides: false,
            rubberband: default_true(),
            vertical: false,
            mode: SliderMode::default(),
            friction: default_friction(),
            duration: default_duration(),
            initial: 0,
            drag_speed: default_drag_speed(),
            controls: default_true(),
            reset_slide: false,
            rubberband_friction: default_rubberband_friction(),
            rubberband_duration_factor: default_rubberband_duration_factor(),
            snap_easing: EasingType::default(),
            free_easing: EasingType::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Frame rate of the real-time frame source
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Upper bound on frames pumped while waiting for a slider to settle
    #[serde(default = "default_max_frames")]
    pub max_frames: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_frames: default_max_frames(),
        }
    }
}

impl AnimationConfig {
    /// Milliseconds between two frames
    pub fn frame_interval_ms(&self) -> f64 {
        if self.fps == 0 {
            16.0 // ~60fps fallback
        } else {
            1000.0 / self.fps as f64
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_slides_per_view() -> f64 {
    1.0
}

fn default_friction() -> f64 {
    0.0025
}

fn default_duration() -> f64 {
    500.0
}

fn default_drag_speed() -> f64 {
    1.0
}

fn default_rubberband_friction() -> f64 {
    0.05
}

fn default_rubberband_duration_factor() -> f64 {
    2.0
}

fn default_fps() -> u32 {
    60
}

fn default_max_frames() -> u32 {
    10_000
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/slidekit/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("slidekit")
            .join("config.toml")
    }
}
