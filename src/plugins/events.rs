use bevy::prelude::*;
use nalgebra::Vector3;

use crate::{components::StepOutcome, course::CrossingTrigger};

/// An agent passed its next checkpoint
#[derive(Event, Debug, Clone, Copy)]
pub struct CheckpointReached {
    pub entity: Entity,
    /// Index of the checkpoint just passed
    pub checkpoint: usize,
    pub trigger: CrossingTrigger,
    pub step: u32,
}

/// Boost switched on or off; hosts use it to restart or stop the trail
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoostStateChanged {
    pub entity: Entity,
    pub active: bool,
}

/// Host request to stop or resume an agent outside training
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreezeRequest {
    pub entity: Entity,
    pub frozen: bool,
}

impl FreezeRequest {
    pub fn freeze(entity: Entity) -> Self {
        Self {
            entity,
            frozen: true,
        }
    }

    pub fn thaw(entity: Entity) -> Self {
        Self {
            entity,
            frozen: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionStage {
    /// Hide the aircraft and play the explosion effect
    Started,
    /// Show the aircraft again at its restart pose
    Repositioned,
    /// Agent is flying again
    Recovered,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ExplosionEvent {
    pub entity: Entity,
    pub stage: ExplosionStage,
    pub position: Vector3<f64>,
}

/// Per-tick reward and termination signal for one agent
#[derive(Event, Debug, Clone, Copy)]
pub struct StepCompleteEvent {
    pub entity: Entity,
    pub outcome: StepOutcome,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct EpisodeResetEvent {
    pub entity: Entity,
    pub episode: u32,
    pub next_checkpoint: usize,
}
