use serde::{Deserialize, Serialize};

use crate::{
    components::Controller,
    policy::{
        ActionSpace, ExternalPolicy, HeuristicPilot, IdleSource, PolicyHandle, ScriptedCommands,
    },
};

/// One entry of the area's agent roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    #[serde(default)]
    pub pilot: PilotConfig,
}

impl AgentConfig {
    pub fn new(name: impl Into<String>, pilot: PilotConfig) -> Self {
        Self {
            name: name.into(),
            pilot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PilotConfig {
    /// Driven through a [`PolicyHandle`]
    External {
        #[serde(default)]
        action_space: ActionSpace,
    },
    Heuristic(HeuristicPilot),
    /// Fixed action list decoded with `action_space`
    Scripted {
        actions: Vec<Vec<f64>>,
        #[serde(default)]
        action_space: ActionSpace,
        #[serde(default)]
        looped: bool,
    },
    Idle,
}

impl Default for PilotConfig {
    fn default() -> Self {
        PilotConfig::Heuristic(HeuristicPilot::default())
    }
}

impl PilotConfig {
    /// Build the agent's controller, plus a handle when the pilot is external
    pub fn controller(&self, agent: &str) -> (Controller, Option<PolicyHandle>) {
        match self {
            PilotConfig::External { action_space } => {
                let (policy, handle) = ExternalPolicy::channel(agent, *action_space);
                (Controller::new(policy), Some(handle))
            }
            PilotConfig::Heuristic(pilot) => (Controller::new(*pilot), None),
            PilotConfig::Scripted {
                actions,
                action_space,
                looped,
            } => {
                let commands = actions.iter().map(|a| action_space.decode(a)).collect();
                let script = ScriptedCommands::new(commands);
                let script = if *looped { script.looped() } else { script };
                (Controller::new(script), None)
            }
            PilotConfig::Idle => (Controller::new(IdleSource), None),
        }
    }
}
