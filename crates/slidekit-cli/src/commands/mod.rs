pub mod config;
pub mod play;
pub mod simulate;

use serde::Serialize;

use slidekit_core::{Clock, SliderEvent, TrackDetails};

#[derive(Serialize)]
struct EventRecord<'a> {
    time: f64,
    event: SliderEvent,
    details: &'a TrackDetails,
}

/// Event sink that prints every notification to stdout
pub fn report<C: Clock + 'static>(clock: C, json: bool) -> impl FnMut(SliderEvent, &TrackDetails) + 'static {
    move |event: SliderEvent, details: &TrackDetails| {
        let time = clock.now();
        if json {
            let record = EventRecord {
                time,
                event,
                details,
            };
            match serde_json::to_string(&record) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("Failed to encode {} notification: {}", event, e),
            }
        } else {
            println!(
                "{:>9.1}ms  {:<14} slide {:>3} ({})  pos {:>9.2}  speed {:>7.3}",
                time,
                event.as_str(),
                details.absolute_slide,
                details.relative_slide,
                details.position,
                details.speed,
            );
        }
    }
}

/// One-line summary printed after a replay
pub fn summary(details: &TrackDetails, steps: usize, frames: u32) {
    println!(
        "\nSettled on slide {} of {} (position {:.2}) after {} steps and {} frames",
        details.relative_slide + 1,
        details.size,
        details.position,
        steps,
        frames
    );
}
