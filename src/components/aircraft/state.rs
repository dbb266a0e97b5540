use bevy::prelude::*;
use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};

/// Aircraft attitude in degrees.
///
/// Pitch is positive nose-up and yaw positive to the right. Roll is positive for
/// a left bank, so banking into a right turn is a negative roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightAttitude {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl FlightAttitude {
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Body-to-world rotation in the north-east-down frame
    pub fn to_quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(
            (-self.roll).to_radians(),
            self.pitch.to_radians(),
            self.yaw.to_radians(),
        )
    }

    /// Inverse of [`FlightAttitude::to_quaternion`]
    pub fn from_quaternion(attitude: &UnitQuaternion<f64>) -> Self {
        let (roll, pitch, yaw) = attitude.euler_angles();
        Self {
            pitch: pitch.to_degrees(),
            yaw: yaw.to_degrees(),
            roll: -roll.to_degrees(),
        }
    }
}

/// Per-axis control deltas, raw or smoothed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlDeltas {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Flight controller state carried between ticks
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub attitude: FlightAttitude,
    /// Deltas commanded on the last tick
    pub commanded: ControlDeltas,
    /// Smoothed deltas actually applied
    pub smoothed: ControlDeltas,
    pub boost: bool,
}

impl FlightState {
    pub fn from_attitude(attitude: &UnitQuaternion<f64>) -> Self {
        Self {
            attitude: FlightAttitude::from_quaternion(attitude),
            ..Default::default()
        }
    }

    /// Drop any control memory, keeping the current attitude
    pub fn clear_controls(&mut self) {
        self.commanded = ControlDeltas::default();
        self.smoothed = ControlDeltas::default();
        self.boost = false;
    }
}
