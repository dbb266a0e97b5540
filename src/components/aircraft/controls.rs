use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Discretized per-tick flight command.
///
/// `pitch` and `yaw` are always one of -1, 0 or 1; every constructor
/// discretizes its input before storing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    pitch: i8,
    yaw: i8,
    boost: bool,
}

impl Command {
    pub const IDLE: Command = Command {
        pitch: 0,
        yaw: 0,
        boost: false,
    };

    /// Build a command from continuous values, rounding each axis to -1, 0 or 1
    pub fn new(pitch: f64, yaw: f64, boost: bool) -> Self {
        Self {
            pitch: discretize(pitch),
            yaw: discretize(yaw),
            boost,
        }
    }

    /// Build a command from raw input axes (e.g. a gamepad or keyboard reading).
    ///
    /// The boost axis counts as pressed once it rounds to a positive value.
    pub fn from_axes(pitch: f64, yaw: f64, boost: f64) -> Self {
        Self::new(pitch, yaw, discretize(boost) > 0)
    }

    /// Decode a discrete branch action: `[pitch, yaw, boost]` where for the
    /// steering branches 0 is no change, 1 is positive and 2 is negative.
    pub fn from_discrete_action(action: &[f64]) -> Self {
        let branch = |i: usize| action.get(i).copied().unwrap_or(0.0).round();
        let steer = |value: f64| if value == 2.0 { -1.0 } else { value };
        Self::new(steer(branch(0)), steer(branch(1)), branch(2) == 1.0)
    }

    /// Encode as discrete branch values, the inverse of [`Command::from_discrete_action`]
    pub fn to_discrete_action(&self) -> [f64; 3] {
        let encode = |value: i8| match value {
            -1 => 2.0,
            v => v as f64,
        };
        [
            encode(self.pitch),
            encode(self.yaw),
            if self.boost { 1.0 } else { 0.0 },
        ]
    }

    pub fn pitch(&self) -> f64 {
        self.pitch as f64
    }

    pub fn yaw(&self) -> f64 {
        self.yaw as f64
    }

    pub fn boost(&self) -> bool {
        self.boost
    }
}

fn discretize(value: f64) -> i8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(-1.0, 1.0) as i8
}

/// Command applied to an agent on the current tick
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct AgentCommand(pub Command);
