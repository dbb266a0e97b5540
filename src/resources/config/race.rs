use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, collections::HashSet, path::Path};

use super::{AgentConfig, CourseConfig, PilotConfig};
use crate::{
    components::FlightConfig,
    observation::PerceptionConfig,
    policy::ActionSpace,
    utils::{ConfigError, CHECKPOINT_RADIUS_PARAM, MAX_TIMESTEP, MIN_TIMESTEP},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub checkpoint_reward: f64,
    pub timeout_penalty: f64,
    pub collision_penalty: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            checkpoint_reward: 0.5,
            timeout_penalty: -0.5,
            collision_penalty: -1.0,
        }
    }
}

/// Timings of the crash sequence used outside training [s]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    /// Aircraft hidden while the explosion plays
    pub effect_duration: f64,
    /// Aircraft back on the course but still frozen
    pub recover_duration: f64,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            effect_duration: 2.0,
            recover_duration: 1.0,
        }
    }
}

/// Everything needed to set up one racing area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    pub training_mode: bool,
    pub seed: u64,
    /// Fixed tick length [s]
    pub time_step: f64,
    /// Episode step budget; unset means 5000 in training and unlimited otherwise
    pub max_steps: Option<u32>,
    /// Steps allowed between checkpoints before a training episode times out
    pub step_timeout: u32,
    pub rewards: RewardConfig,
    /// Lateral gap between agents at spawn [m]
    pub spawn_spacing: f64,
    pub explosion: ExplosionConfig,
    /// Parameters supplied by the training run, e.g. `checkpoint_radius`
    pub reset_parameters: BTreeMap<String, f64>,
    pub flight: FlightConfig,
    /// Agent collision sphere radius [m]
    pub collision_radius: f64,
    pub perception: PerceptionConfig,
    pub course: CourseConfig,
    pub agents: Vec<AgentConfig>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            training_mode: false,
            seed: 0,
            time_step: 1.0 / 50.0,
            max_steps: None,
            step_timeout: 300,
            rewards: RewardConfig::default(),
            spawn_spacing: 10.0,
            explosion: ExplosionConfig::default(),
            reset_parameters: BTreeMap::new(),
            flight: FlightConfig::default(),
            collision_radius: 5.0,
            perception: PerceptionConfig::default(),
            course: CourseConfig::default(),
            agents: vec![AgentConfig::new("agent_0", PilotConfig::default())],
        }
    }
}

impl RaceConfig {
    /// Training setup with a single externally driven agent
    pub fn training(checkpoint_radius: f64) -> Self {
        let mut config = Self {
            training_mode: true,
            agents: vec![AgentConfig::new(
                "agent_0",
                PilotConfig::External {
                    action_space: ActionSpace::DiscreteBranches,
                },
            )],
            ..Default::default()
        };
        config
            .reset_parameters
            .insert(CHECKPOINT_RADIUS_PARAM.to_string(), checkpoint_radius);
        config
    }

    /// Interactive setup with a single heuristic pilot
    pub fn racing() -> Self {
        Self::default()
    }

    /// Replace the roster with `count` agents sharing one pilot setup
    pub fn with_agents(mut self, count: usize, pilot: PilotConfig) -> Self {
        self.agents = (0..count)
            .map(|i| AgentConfig::new(format!("agent_{}", i), pilot.clone()))
            .collect();
        self
    }

    pub fn checkpoint_radius(&self) -> Option<f64> {
        self.reset_parameters.get(CHECKPOINT_RADIUS_PARAM).copied()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config = serde_yaml::from_reader(file)?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TIMESTEP..=MAX_TIMESTEP).contains(&self.time_step) {
            return Err(ConfigError::invalid("time_step", self.time_step));
        }
        if self.step_timeout == 0 {
            return Err(ConfigError::invalid("step_timeout", self.step_timeout));
        }
        if !self.spawn_spacing.is_finite() {
            return Err(ConfigError::invalid("spawn_spacing", self.spawn_spacing));
        }
        for (name, value) in [
            ("explosion.effect_duration", self.explosion.effect_duration),
            ("explosion.recover_duration", self.explosion.recover_duration),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(name, value));
            }
        }
        self.flight.validate()?;
        for (name, value) in [
            ("flight.mass", self.flight.mass),
            ("collision_radius", self.collision_radius),
            ("perception.ray_length", self.perception.ray_length),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::invalid(name, value));
            }
        }

        if self.training_mode {
            match self.checkpoint_radius() {
                None => {
                    return Err(ConfigError::MissingResetParameter(
                        CHECKPOINT_RADIUS_PARAM.to_string(),
                    ))
                }
                Some(radius) if radius.is_nan() || radius <= 0.0 => {
                    return Err(ConfigError::invalid(CHECKPOINT_RADIUS_PARAM, radius));
                }
                Some(_) => {}
            }
        }

        if self.agents.is_empty() {
            return Err(ConfigError::NoAgents);
        }
        let mut names = HashSet::new();
        if let Some(duplicate) = self.agents.iter().find(|a| !names.insert(&a.name)) {
            return Err(ConfigError::invalid("agents.name", &duplicate.name));
        }
        Ok(())
    }
}
