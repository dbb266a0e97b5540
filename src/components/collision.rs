use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What an agent's collision volume touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Another racing aircraft; never fatal
    Agent(Entity),
    /// Any non-agent body
    Obstacle(Entity),
}

#[derive(Event, Debug, Clone)]
pub struct CollisionEvent {
    /// Entity that collided
    pub entity: Entity,
    pub other: ContactKind,
    /// Point of impact in space
    pub impact_point: Vector3<f64>,
}

/// Fired when an agent's collision volume enters a checkpoint trigger volume
#[derive(Event, Debug, Clone, Copy)]
pub struct CheckpointTriggerEvent {
    pub entity: Entity,
    pub checkpoint: usize,
}

#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct CollisionComponent {
    /// Radius of the spherical collision volume
    pub radius: f64,
    /// Whether the entity has hit anything this episode
    #[serde(skip)]
    pub has_collided: bool,
    /// Collision metrics for the current episode
    #[serde(skip)]
    pub collision_count: u32,
    /// Checkpoint trigger volumes currently overlapped
    #[serde(skip)]
    pub overlapping_checkpoints: HashSet<usize>,
    /// Obstacles currently in contact
    #[serde(skip)]
    pub touching: HashSet<Entity>,
}

impl Default for CollisionComponent {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl CollisionComponent {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            has_collided: false,
            collision_count: 0,
            overlapping_checkpoints: HashSet::new(),
            touching: HashSet::new(),
        }
    }

    pub fn reset(&mut self) {
        self.has_collided = false;
        self.collision_count = 0;
        self.overlapping_checkpoints.clear();
        self.touching.clear();
    }

    pub fn register_collision(&mut self) {
        self.has_collided = true;
        self.collision_count += 1;
    }

    /// Record the trigger volumes overlapped this tick, returning the ones newly entered
    pub fn update_overlaps(&mut self, overlapping: HashSet<usize>) -> Vec<usize> {
        let mut entered: Vec<usize> = overlapping
            .difference(&self.overlapping_checkpoints)
            .copied()
            .collect();
        entered.sort_unstable();
        self.overlapping_checkpoints = overlapping;
        entered
    }

    /// Record the bodies touched this tick, returning the ones newly touched
    pub fn update_contacts(&mut self, touching: HashSet<Entity>) -> Vec<Entity> {
        let entered: Vec<Entity> = touching.difference(&self.touching).copied().collect();
        self.touching = touching;
        entered
    }
}

/// A static non-agent body with a spherical collision volume
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub radius: f64,
}
