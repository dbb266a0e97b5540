use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Component for storing spatial state of an entity in the north-east-down world frame
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialComponent {
    /// Position in world space [m]
    pub position: Vector3<f64>,

    /// Linear velocity in world space [m/s]
    pub velocity: Vector3<f64>,

    /// Attitude quaternion (rotation from body to world frame)
    pub attitude: UnitQuaternion<f64>,
}

impl Default for SpatialComponent {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
        }
    }
}

impl SpatialComponent {
    /// Create a resting spatial component at a pose
    pub fn at_pose(position: Vector3<f64>, attitude: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            attitude,
            ..Default::default()
        }
    }

    /// Create a new spatial component at a specific position
    pub fn at_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Body x axis (nose) in world frame
    pub fn forward(&self) -> Vector3<f64> {
        self.attitude * Vector3::x()
    }

    /// Body y axis (right wing) in world frame
    pub fn right(&self) -> Vector3<f64> {
        self.attitude * Vector3::y()
    }

    /// Velocity expressed in the body frame
    pub fn local_velocity(&self) -> Vector3<f64> {
        self.attitude.inverse_transform_vector(&self.velocity)
    }
}
