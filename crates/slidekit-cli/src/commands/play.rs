use std::path::Path;

use anyhow::Result;
use tracing::info;

use slidekit_core::{AppConfig, GestureScript, IntervalFrames, ScriptPlayer, Slider, SystemClock};

pub async fn run(config: &AppConfig, script_path: &Path) -> Result<()> {
    let script = GestureScript::load(script_path)?;
    let options = script.options(&config.slider)?;
    info!(
        "Playing {} steps from {} at {} fps",
        script.steps.len(),
        script_path.display(),
        config.animation.fps
    );

    let clock = SystemClock::new();
    let mut slider = Slider::new(options, clock).with_sink(super::report(clock, false));
    slider.mount(script.container);

    let mut frames = IntervalFrames::from_config(&config.animation, clock);
    let stats = ScriptPlayer::new(&mut slider, &mut frames, config.animation.max_frames)
        .play(&script)
        .await?;

    super::summary(&slider.details(), stats.steps, stats.frames);
    Ok(())
}
