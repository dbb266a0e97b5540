use crate::components::Command;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const PITCH_AXIS: &str = "pitch";
pub const YAW_AXIS: &str = "yaw";
pub const BOOST_AXIS: &str = "boost";

pub trait ToCommand {
    fn to_command(&self, action: &HashMap<String, f64>) -> Command;
}

/// How raw actions from a policy or input device map onto a [`Command`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSpace {
    /// Three discrete branches `[pitch, yaw, boost]`; steering branches use
    /// 0 = none, 1 = positive, 2 = negative
    #[default]
    DiscreteBranches,
    /// Continuous axis readings rounded to -1, 0 or 1
    Axes,
}

impl ActionSpace {
    /// Decode a positional `[pitch, yaw, boost]` action vector
    pub fn decode(&self, action: &[f64]) -> Command {
        match self {
            ActionSpace::DiscreteBranches => Command::from_discrete_action(action),
            ActionSpace::Axes => {
                let axis = |i: usize| action.get(i).copied().unwrap_or(0.0);
                Command::from_axes(axis(0), axis(1), axis(2))
            }
        }
    }
}

impl ToCommand for ActionSpace {
    fn to_command(&self, action: &HashMap<String, f64>) -> Command {
        let axis = |name: &str| action.get(name).copied().unwrap_or(0.0);
        self.decode(&[axis(PITCH_AXIS), axis(YAW_AXIS), axis(BOOST_AXIS)])
    }
}
