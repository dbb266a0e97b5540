use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{ConfigError, CONTROL_SMOOTHING_RATE};

/// Handling parameters of a racing aircraft
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Forward thrust force [N]
    pub thrust: f64,
    /// Pitch rate at full smoothed input [deg/s]
    pub pitch_speed: f64,
    /// Yaw rate at full smoothed input [deg/s]
    pub yaw_speed: f64,
    /// Roll rate at full smoothed input [deg/s]
    pub roll_speed: f64,
    /// Thrust multiplier while boosting
    pub boost_multiplier: f64,
    /// Pitch limit [deg]
    pub max_pitch_angle: f64,
    /// Roll limit [deg]
    pub max_roll_angle: f64,
    /// Rate at which smoothed deltas track commanded deltas [1/s]
    pub smoothing_rate: f64,
    /// Rigid body mass [kg]
    pub mass: f64,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            thrust: 100_000.0,
            pitch_speed: 100.0,
            yaw_speed: 100.0,
            roll_speed: 100.0,
            boost_multiplier: 2.0,
            max_pitch_angle: 45.0,
            max_roll_angle: 45.0,
            smoothing_rate: CONTROL_SMOOTHING_RATE,
            mass: 1000.0,
        }
    }
}

impl FlightConfig {
    /// Reject parameters the flight controller cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("flight.max_pitch_angle", self.max_pitch_angle),
            ("flight.max_roll_angle", self.max_roll_angle),
        ] {
            if value.is_nan() || value <= 0.0 || value > 180.0 {
                return Err(ConfigError::invalid(name, value));
            }
        }
        if self.smoothing_rate.is_nan() || self.smoothing_rate <= 0.0 {
            return Err(ConfigError::invalid(
                "flight.smoothing_rate",
                self.smoothing_rate,
            ));
        }
        for (name, value) in [
            ("flight.thrust", self.thrust),
            ("flight.pitch_speed", self.pitch_speed),
            ("flight.yaw_speed", self.yaw_speed),
            ("flight.roll_speed", self.roll_speed),
            ("flight.boost_multiplier", self.boost_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(name, value));
            }
        }
        Ok(())
    }
}
