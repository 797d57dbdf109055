use serde::Serialize;

use super::track::TrackDetails;

/// Lifecycle notifications emitted by a [`Slider`](super::Slider)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderEvent {
    /// First successful mount
    Created,
    /// Layout resolved and pointer input attached
    Mounted,
    DragStart,
    DragEnd,
    /// A settle or jump is about to begin
    BeforeChange,
    /// A settle or jump finished on its target
    AfterChange,
    /// The current index changed
    SlideChanged,
    /// The position changed
    Move,
    /// Pointer input detached
    Destroyed,
}

impl SliderEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SliderEvent::Created => "created",
            SliderEvent::Mounted => "mounted",
            SliderEvent::DragStart => "drag_start",
            SliderEvent::DragEnd => "drag_end",
            SliderEvent::BeforeChange => "before_change",
            SliderEvent::AfterChange => "after_change",
            SliderEvent::SlideChanged => "slide_changed",
            SliderEvent::Move => "move",
            SliderEvent::Destroyed => "destroyed",
        }
    }
}

impl std::fmt::Display for SliderEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver of lifecycle notifications.
///
/// Called synchronously at the transition point with a snapshot that the
/// receiver may keep; the engine never touches it again.
pub trait EventSink {
    fn notify(&mut self, event: SliderEvent, details: &TrackDetails);
}

impl<F> EventSink for F
where
    F: FnMut(SliderEvent, &TrackDetails),
{
    fn notify(&mut self, event: SliderEvent, details: &TrackDetails) {
        self(event, details)
    }
}
