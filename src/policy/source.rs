use crossbeam_channel::{Receiver, Sender};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::act::{ActionSpace, ToCommand};
use crate::{
    components::{Command, FlightAttitude},
    utils::RaceError,
};

/// What a pilot can see when choosing the next command
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PilotContext {
    /// Step of the current episode
    pub step: u32,
    /// Offset to the next checkpoint in the agent's body frame
    pub to_next: Vector3<f64>,
    pub attitude: FlightAttitude,
}

/// Produces one command per tick for a single agent
pub trait CommandSource: Send + Sync + 'static {
    fn next_command(&mut self, context: &PilotContext) -> Command;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdleSource;

impl CommandSource for IdleSource {
    fn next_command(&mut self, _context: &PilotContext) -> Command {
        Command::IDLE
    }

    fn name(&self) -> &'static str {
        "idle"
    }
}

/// Replays a fixed command list, then idles (or starts over when looped)
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommands {
    commands: Vec<Command>,
    cursor: usize,
    looped: bool,
}

impl ScriptedCommands {
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands,
            cursor: 0,
            looped: false,
        }
    }

    pub fn looped(mut self) -> Self {
        self.looped = true;
        self
    }
}

impl CommandSource for ScriptedCommands {
    fn next_command(&mut self, _context: &PilotContext) -> Command {
        if self.commands.is_empty() {
            return Command::IDLE;
        }
        if self.cursor >= self.commands.len() {
            if !self.looped {
                return Command::IDLE;
            }
            self.cursor = 0;
        }
        let command = self.commands[self.cursor];
        self.cursor += 1;
        command
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Commands supplied by an outside decision maker (e.g. a training policy).
///
/// Actions arrive over a channel through a [`PolicyHandle`]; only the newest
/// action is used each tick and it is held until a new one arrives.
#[derive(Debug)]
pub struct ExternalPolicy {
    receiver: Receiver<Command>,
    last: Command,
}

impl ExternalPolicy {
    pub fn channel(agent: impl Into<String>, space: ActionSpace) -> (Self, PolicyHandle) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (
            Self {
                receiver,
                last: Command::IDLE,
            },
            PolicyHandle {
                agent: agent.into(),
                sender,
                space,
            },
        )
    }
}

impl CommandSource for ExternalPolicy {
    fn next_command(&mut self, _context: &PilotContext) -> Command {
        while let Ok(command) = self.receiver.try_recv() {
            self.last = command;
        }
        self.last
    }

    fn name(&self) -> &'static str {
        "external"
    }
}

/// Sending side of an [`ExternalPolicy`]
#[derive(Debug, Clone)]
pub struct PolicyHandle {
    agent: String,
    sender: Sender<Command>,
    space: ActionSpace,
}

impl PolicyHandle {
    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn submit_command(&self, command: Command) -> Result<(), RaceError> {
        self.sender
            .try_send(command)
            .map_err(|_| RaceError::PolicyDisconnected(self.agent.clone()))
    }

    /// Submit a positional action vector decoded with this handle's action space
    pub fn submit(&self, action: &[f64]) -> Result<(), RaceError> {
        self.submit_command(self.space.decode(action))
    }

    pub fn submit_named(&self, action: &HashMap<String, f64>) -> Result<(), RaceError> {
        self.submit_command(self.space.to_command(action))
    }
}

/// Simple interactive pilot that steers toward the next checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicPilot {
    /// Bearing dead band in degrees
    pub tolerance: f64,
    /// Boost when lined up and at least this far from the checkpoint
    pub boost_distance: f64,
}

impl Default for HeuristicPilot {
    fn default() -> Self {
        Self {
            tolerance: 5.0,
            boost_distance: 200.0,
        }
    }
}

impl HeuristicPilot {
    fn steer(&self, angle: f64) -> f64 {
        if angle > self.tolerance {
            1.0
        } else if angle < -self.tolerance {
            -1.0
        } else {
            0.0
        }
    }
}

impl CommandSource for HeuristicPilot {
    fn next_command(&mut self, context: &PilotContext) -> Command {
        let to_next = context.to_next;
        let bearing = to_next.y.atan2(to_next.x).to_degrees();
        let elevation = (-to_next.z).atan2(to_next.xy().norm()).to_degrees();
        let lined_up = bearing.abs() <= self.tolerance;

        Command::new(
            self.steer(elevation),
            self.steer(bearing),
            lined_up && to_next.norm() >= self.boost_distance,
        )
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}
