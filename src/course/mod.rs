//! Checkpoint course: construction from a continuous path and per-agent
//! progress tracking.

pub mod builder;
pub mod path;
pub mod tracker;

pub use builder::{CourseBuilder, FinishPlacement};
pub use path::{frame_from_forward, RacePath, Waypoint, WaypointPath};
pub use tracker::{
    advance, detect_crossing, orientation_to_next, vector_to_next, within_distance_trigger,
    CrossingTrigger,
};

use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::{next_index, previous_index, RaceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckpointKind {
    Normal,
    Finish,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub index: usize,
    pub position: Vector3<f64>,
    /// Body-to-world rotation; x points along the course
    pub orientation: UnitQuaternion<f64>,
    pub kind: CheckpointKind,
    /// Radius of the spherical trigger volume [m]
    pub trigger_radius: f64,
}

impl Checkpoint {
    pub fn forward(&self) -> Vector3<f64> {
        self.orientation * Vector3::x()
    }

    pub fn right(&self) -> Vector3<f64> {
        self.orientation * Vector3::y()
    }

    pub fn is_finish(&self) -> bool {
        self.kind == CheckpointKind::Finish
    }
}

/// Ordered, cyclic list of checkpoints shared by every agent in an area.
///
/// Always holds at least one checkpoint with indices `0..len`.
#[derive(Resource, Debug, Clone)]
pub struct Course {
    checkpoints: Vec<Checkpoint>,
}

impl Course {
    pub fn new(checkpoints: Vec<Checkpoint>) -> Result<Self, RaceError> {
        if checkpoints.is_empty() {
            return Err(RaceError::EmptyCourse { max_unit: 0.0 });
        }
        if let Some((position, checkpoint)) = checkpoints
            .iter()
            .enumerate()
            .find(|(i, c)| c.index != *i)
        {
            return Err(RaceError::InvalidPath(format!(
                "checkpoint at position {} has index {}",
                position, checkpoint.index
            )));
        }
        Ok(Self { checkpoints })
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn checkpoint(&self, index: usize) -> Result<&Checkpoint, RaceError> {
        self.checkpoints
            .get(index)
            .ok_or(RaceError::CheckpointOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Checkpoint at `index` wrapped onto the course
    pub fn at(&self, index: usize) -> &Checkpoint {
        &self.checkpoints[index % self.len()]
    }

    pub fn next_index(&self, index: usize) -> usize {
        next_index(index, self.len())
    }

    pub fn previous_index(&self, index: usize) -> usize {
        previous_index(index, self.len())
    }

    pub fn finish(&self) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.is_finish())
    }

    /// Starting pose for an agent heading to `next_index`.
    ///
    /// Agents start on the previous checkpoint, spread along its right axis by
    /// `(slot - total / 2) * spacing` so that a roster lines up abreast.
    pub fn spawn_pose(
        &self,
        next_index: usize,
        slot: usize,
        total: usize,
        spacing: f64,
    ) -> (Vector3<f64>, UnitQuaternion<f64>) {
        let start = self.at(self.previous_index(next_index));
        let offset = (slot as f64 - total as f64 / 2.0) * spacing;
        (start.position + start.right() * offset, start.orientation)
    }
}
