use bevy::{log::LogPlugin, prelude::*};
use serde::Serialize;
use std::{env, path::Path};

use aerorace::{
    components::{EpisodeComponent, EpisodeStatus, Identifier, LastOutcome, RaceAgent},
    plugins::RacePlugin,
    resources::RaceConfig,
};

const DEFAULT_CONFIG: &str = "config/race.yaml";
const DEFAULT_TICKS: u32 = 3000;

/// One line of output per finished episode
#[derive(Debug, Serialize)]
struct EpisodeReport {
    agent: String,
    episode: u32,
    steps: u32,
    cumulative_reward: f64,
    reason: String,
    next_checkpoint: usize,
}

/// Run a headless race for a fixed number of ticks.
///
/// Usage: `race [CONFIG] [TICKS]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => RaceConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => RaceConfig::load(DEFAULT_CONFIG)?,
        None => RaceConfig::default(),
    };
    let ticks = match args.get(2) {
        Some(ticks) => ticks.parse()?,
        None => DEFAULT_TICKS,
    };

    let mut app = App::new();
    app.add_plugins(LogPlugin::default());
    app.add_plugins(RacePlugin::new(config)?.in_schedule(Update));

    let mut finished = 0;
    for _ in 0..ticks {
        app.update();

        let world = app.world_mut();
        let mut query = world.query::<(&Identifier, &RaceAgent, &EpisodeComponent, &LastOutcome)>();
        for (id, agent, episode, last) in query.iter(world) {
            if let EpisodeStatus::Terminate { reason, .. } = last.0.status {
                let report = EpisodeReport {
                    agent: id.to_string(),
                    episode: episode.episode,
                    steps: episode.step_count,
                    cumulative_reward: episode.cumulative_reward,
                    reason: format!("{:?}", reason),
                    next_checkpoint: agent.next_checkpoint_index,
                };
                println!("{}", serde_json::to_string(&report)?);
                finished += 1;
            }
        }
    }

    info!("Ran {} ticks, {} episodes finished", ticks, finished);
    Ok(())
}
