use serde::Serialize;

use crate::config::SliderOptions;

/// Geometry the track works against.
///
/// Produced from [`SliderOptions`] and the container size along the active
/// axis. Every value is clamped into a usable range here so the track never
/// has to deal with a malformed option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutParams {
    /// Container size plus one spacing, in pixels
    pub width: f64,
    pub slides_per_view: f64,
    pub spacing: f64,
    /// Offset of the resting slide as a fraction of `width`
    pub origin: f64,
    pub length: usize,
    pub loop_slides: bool,
    pub rubberband: bool,
    pub centered: bool,
    pub vertical: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            width: 0.0,
            slides_per_view: 1.0,
            spacing: 0.0,
            origin: 0.0,
            length: 0,
            loop_slides: false,
            rubberband: true,
            centered: false,
            vertical: false,
        }
    }
}

impl LayoutParams {
    pub fn resolve(options: &SliderOptions, container_size: f64) -> Self {
        let size = finite_or(container_size, 0.0).max(0.0);
        let length = options.slides;

        let max_per_view = (length.saturating_sub(1) as f64).max(1.0);
        let slides_per_view = finite_or(options.slides_per_view, 1.0)
            .max(1.0)
            .min(max_per_view);

        let spacing = finite_or(options.spacing, 0.0).max(0.0);
        // A single slide per view has no gaps inside the viewport to bound spacing
        let spacing = if slides_per_view > 1.0 {
            spacing.min((size / (slides_per_view - 1.0) - 1.0).max(0.0))
        } else {
            spacing
        };

        let width = size + spacing;
        let origin = if options.centered && width > 0.0 {
            (width / 2.0 - width / slides_per_view / 2.0) / width
        } else {
            0.0
        };

        Self {
            width,
            slides_per_view,
            spacing,
            origin,
            length,
            loop_slides: options.loop_slides,
            rubberband: options.rubberband,
            centered: options.centered,
            vertical: options.vertical,
        }
    }

    /// Pixels between two resting positions
    pub fn slide_width(&self) -> f64 {
        if self.width <= 0.0 {
            0.0
        } else {
            self.width / self.slides_per_view
        }
    }

    /// Largest valid position of a bounded track
    pub fn track_length(&self) -> f64 {
        let visible = if self.centered {
            1.0
        } else {
            self.slides_per_view
        };
        (self.slide_width() * (self.length as f64 - visible)).max(0.0)
    }

    /// Rubberband only applies to bounded tracks
    pub fn is_rubberband(&self) -> bool {
        !self.loop_slides && self.rubberband
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
