//! Pointer input as delivered by the host, and the state of an active drag.

use serde::{Deserialize, Serialize};

/// Identifies one pointer across a gesture
pub type PointerId = u64;

/// Pointer used by hosts that only ever see one mouse
pub const DEFAULT_POINTER: PointerId = 0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// One pointer sample in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub x: f64,
    pub y: f64,
    /// Milliseconds, same time base as the slider's clock
    pub timestamp: f64,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn mouse(x: f64, y: f64, timestamp: f64) -> Self {
        Self {
            pointer: DEFAULT_POINTER,
            x,
            y,
            timestamp,
            kind: PointerKind::Mouse,
        }
    }

    pub fn touch(pointer: PointerId, x: f64, y: f64, timestamp: f64) -> Self {
        Self {
            pointer,
            x,
            y,
            timestamp,
            kind: PointerKind::Touch,
        }
    }

    /// (main, cross) coordinates for the slider's axis
    pub fn axes(&self, vertical: bool) -> (f64, f64) {
        if vertical {
            (self.y, self.x)
        } else {
            (self.x, self.y)
        }
    }
}

/// Book-keeping for the gesture in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragState {
    pub pointer: PointerId,
    /// Index under the viewport when the gesture began
    pub index_start: i64,
    /// Main-axis coordinate of the previous sample
    pub last_main: f64,
    last_cross: f64,
    /// No move has been applied yet
    pub just_started: bool,
}

impl DragState {
    pub fn begin(event: &PointerEvent, vertical: bool, index_start: i64) -> Self {
        let (main, cross) = event.axes(vertical);
        Self {
            pointer: event.pointer,
            index_start,
            last_main: main,
            last_cross: cross,
            just_started: true,
        }
    }

    /// Whether this move slides the track rather than scrolling the page.
    ///
    /// Mouse input always slides. A touch slides while it travels at least
    /// as far along the main axis as across it.
    pub fn is_slide(&mut self, event: &PointerEvent, vertical: bool) -> bool {
        let (main, cross) = event.axes(vertical);
        let slide = match event.kind {
            PointerKind::Mouse => true,
            PointerKind::Touch => {
                (self.last_cross - cross).abs() <= (self.last_main - main).abs()
            }
        };
        self.last_cross = cross;
        slide
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_swaps_axes() {
        let event = PointerEvent::mouse(10.0, 20.0, 0.0);
        assert_eq!(event.axes(false), (10.0, 20.0));
        assert_eq!(event.axes(true), (20.0, 10.0));
    }

    #[test]
    fn test_touch_axis_lock() {
        let start = PointerEvent::touch(7, 100.0, 100.0, 0.0);
        let mut drag = DragState::begin(&start, false, 0);

        // Mostly vertical movement on a horizontal slider
        let scroll = PointerEvent::touch(7, 102.0, 130.0, 10.0);
        assert!(!drag.is_slide(&scroll, false));

        let mut drag = DragState::begin(&start, false, 0);
        let swipe = PointerEvent::touch(7, 60.0, 104.0, 10.0);
        assert!(drag.is_slide(&swipe, false));
    }

    #[test]
    fn test_mouse_always_slides() {
        let start = PointerEvent::mouse(0.0, 0.0, 0.0);
        let mut drag = DragState::begin(&start, false, 3);
        assert!(drag.is_slide(&PointerEvent::mouse(0.0, 500.0, 5.0), false));
        assert_eq!(drag.index_start, 3);
    }
}
