use std::path::Path;

use anyhow::Result;
use tracing::info;

use slidekit_core::{AppConfig, GestureScript, ManualClock, ManualFrames, ScriptPlayer, Slider};

pub async fn run(config: &AppConfig, script_path: &Path, json: bool) -> Result<()> {
    let script = GestureScript::load(script_path)?;
    let options = script.options(&config.slider)?;
    info!(
        "Simulating {} steps from {}",
        script.steps.len(),
        script_path.display()
    );

    let clock = ManualClock::new(0.0);
    let mut slider = Slider::new(options, clock.clone()).with_sink(super::report(clock.clone(), json));
    slider.mount(script.container);

    let mut frames = ManualFrames::from_config(&config.animation, clock);
    let stats = ScriptPlayer::new(&mut slider, &mut frames, config.animation.max_frames)
        .play(&script)
        .await?;

    if !json {
        super::summary(&slider.details(), stats.steps, stats.frames);
    }
    Ok(())
}
