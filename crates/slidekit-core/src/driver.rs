//! Frame sources and the loop that pumps a slider until it comes to rest.

use std::time::Duration;

use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{trace, warn};

use crate::clock::{Clock, ManualClock};
use crate::config::AnimationConfig;
use crate::engine::Slider;

/// Yields display refresh timestamps in milliseconds
#[async_trait::async_trait]
pub trait FrameSource: Send {
    /// Wait for the next frame and return its timestamp
    async fn next_frame(&mut self) -> f64;
}

/// Real-time frames from a tokio interval
pub struct IntervalFrames<C: Clock> {
    interval: Interval,
    clock: C,
}

impl<C: Clock> IntervalFrames<C> {
    pub fn new(frame_interval_ms: f64, clock: C) -> Self {
        let period = Duration::from_secs_f64(frame_interval_ms.max(1.0) / 1000.0);
        let mut interval = interval(period);
        // A late frame is dropped rather than replayed in a burst
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval, clock }
    }

    pub fn from_config(config: &AnimationConfig, clock: C) -> Self {
        Self::new(config.frame_interval_ms(), clock)
    }
}

#[async_trait::async_trait]
impl<C: Clock> FrameSource for IntervalFrames<C> {
    async fn next_frame(&mut self) -> f64 {
        self.interval.tick().await;
        self.clock.now()
    }
}

/// Deterministic frames that step a [`ManualClock`]
#[derive(Debug, Clone)]
pub struct ManualFrames {
    clock: ManualClock,
    step: f64,
}

impl ManualFrames {
    pub fn new(clock: ManualClock, step_ms: f64) -> Self {
        let step = if step_ms.is_finite() && step_ms > 0.0 {
            step_ms
        } else {
            16.0
        };
        Self { clock, step }
    }

    pub fn from_config(config: &AnimationConfig, clock: ManualClock) -> Self {
        Self::new(clock, config.frame_interval_ms())
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

#[async_trait::async_trait]
impl FrameSource for ManualFrames {
    async fn next_frame(&mut self) -> f64 {
        self.clock.advance(self.step)
    }
}

/// Deliver frames while the slider asks for them.
///
/// Stops after `max_frames`; returns the number of frames delivered.
pub async fn drive_until_settled<C, F>(slider: &mut Slider<C>, frames: &mut F, max_frames: u32) -> u32
where
    C: Clock,
    F: FrameSource + ?Sized,
{
    let mut count = 0;
    while slider.needs_frame() {
        if count >= max_frames {
            warn!(max_frames, "slider still animating after frame budget");
            break;
        }
        let now = frames.next_frame().await;
        slider.frame(now);
        count += 1;
    }
    trace!(frames = count, "slider settled");
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::config::SliderOptions;

    fn options() -> SliderOptions {
        SliderOptions {
            slides: 4,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_manual_frames_settle() {
        let clock = ManualClock::new(0.0);
        let mut slider = Slider::new(options(), clock.clone());
        slider.mount(300.0);
        slider.next();

        let mut frames = ManualFrames::new(clock.clone(), 16.0);
        let count = drive_until_settled(&mut slider, &mut frames, 1000).await;
        // 500 ms at 16 ms per frame, plus the frame that latches the start
        assert_eq!(count, 33);
        assert_eq!(slider.current_index(), 1);
        assert_eq!(clock.now(), 33.0 * 16.0);
    }

    #[tokio::test]
    async fn test_frame_budget_is_respected() {
        let clock = ManualClock::new(0.0);
        let mut slider = Slider::new(options(), clock.clone());
        slider.mount(300.0);
        slider.next();

        let mut frames = ManualFrames::new(clock, 16.0);
        assert_eq!(drive_until_settled(&mut slider, &mut frames, 3).await, 3);
        assert!(slider.needs_frame());
    }

    #[tokio::test]
    async fn test_idle_slider_needs_no_frames() {
        let clock = ManualClock::new(0.0);
        let mut slider = Slider::new(options(), clock.clone());
        slider.mount(300.0);
        let mut frames = ManualFrames::new(clock, 16.0);
        assert_eq!(drive_until_settled(&mut slider, &mut frames, 10).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_frames_follow_paused_time() {
        let clock = SystemClock::new();
        let mut slider = Slider::new(options(), clock);
        slider.mount(300.0);
        slider.move_to_index(2, false, Some(200.0));

        let mut frames = IntervalFrames::new(10.0, clock);
        let count = drive_until_settled(&mut slider, &mut frames, 1000).await;
        assert!(count > 1);
        assert_eq!(slider.current_index(), 2);
        assert!((slider.position() - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_manual_frames_reject_bad_step() {
        let frames = ManualFrames::new(ManualClock::new(0.0), 0.0);
        assert_eq!(frames.step(), 16.0);
    }
}
