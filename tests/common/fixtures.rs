use aerorace::{
    components::FlightConfig,
    policy::ActionSpace,
    resources::{PilotConfig, RaceConfig},
};

pub const TEST_CHECKPOINT_RADIUS: f64 = 50.0;

/// Racing area with a single agent that never steers or boosts
pub fn idle_racing_config() -> RaceConfig {
    RaceConfig::racing().with_agents(1, PilotConfig::Idle)
}

/// Training area with one externally driven agent
pub fn training_config() -> RaceConfig {
    RaceConfig::training(TEST_CHECKPOINT_RADIUS)
}

/// Training area whose agent has no thrust and stays on its spawn point
pub fn hovering_training_config() -> RaceConfig {
    let mut config = training_config();
    config.flight = no_thrust();
    config
}

pub fn no_thrust() -> FlightConfig {
    FlightConfig {
        thrust: 0.0,
        ..Default::default()
    }
}

pub fn external_pilot() -> PilotConfig {
    PilotConfig::External {
        action_space: ActionSpace::DiscreteBranches,
    }
}
