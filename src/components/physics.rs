use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Rigid body properties the host integrator needs
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsComponent {
    pub mass: f64,
    /// Sum of the forces applied this tick [N]
    pub net_force: Vector3<f64>,
    /// Sleeping bodies are not integrated
    pub sleeping: bool,
}

impl Default for PhysicsComponent {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

impl PhysicsComponent {
    pub fn new(mass: f64) -> Self {
        Self {
            mass,
            net_force: Vector3::zeros(),
            sleeping: false,
        }
    }

    pub fn add_force(&mut self, force: Vector3<f64>) {
        self.net_force += force;
    }

    pub fn clear_forces(&mut self) {
        self.net_force = Vector3::zeros();
    }

    /// Stop integrating and drop accumulated forces
    pub fn sleep(&mut self) {
        self.sleeping = true;
        self.clear_forces();
    }

    pub fn wake_up(&mut self) {
        self.sleeping = false;
    }
}
