use bevy::prelude::*;

use super::config::{RaceConfig, RewardConfig};
use crate::utils::{ConfigError, DEFAULT_TRAINING_MAX_STEPS};

/// Validated, tick-based view of a [`RaceConfig`] shared by every system
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RaceSettings {
    pub training_mode: bool,
    pub time_step: f64,
    /// Episode step budget, 0 when unlimited
    pub max_steps: u32,
    pub step_timeout: u32,
    pub rewards: RewardConfig,
    pub spawn_spacing: f64,
    pub explosion_ticks: u32,
    pub recover_ticks: u32,
    pub checkpoint_radius: Option<f64>,
    pub agent_count: usize,
}

impl RaceSettings {
    pub fn from_config(config: &RaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let ticks = |seconds: f64| (seconds / config.time_step).round() as u32;
        let max_steps = match (config.max_steps, config.training_mode) {
            (Some(steps), _) => steps,
            (None, true) => DEFAULT_TRAINING_MAX_STEPS,
            (None, false) => 0,
        };

        Ok(Self {
            training_mode: config.training_mode,
            time_step: config.time_step,
            max_steps,
            step_timeout: config.step_timeout,
            rewards: config.rewards,
            spawn_spacing: config.spawn_spacing,
            explosion_ticks: ticks(config.explosion.effect_duration),
            recover_ticks: ticks(config.explosion.recover_duration),
            checkpoint_radius: config.checkpoint_radius(),
            agent_count: config.agents.len(),
        })
    }

    /// Radius of the distance-based crossing check, only used in training
    pub fn distance_trigger_radius(&self) -> Option<f64> {
        if self.training_mode {
            self.checkpoint_radius
        } else {
            None
        }
    }
}
