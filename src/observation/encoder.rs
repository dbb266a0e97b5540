use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::perception::{DetectableTag, RayPerception};
use crate::{
    components::SpatialComponent,
    course::{orientation_to_next, vector_to_next, Course},
};

/// Values before the ray block: local velocity, vector to the next
/// checkpoint and that checkpoint's forward axis
pub const KINEMATIC_OBSERVATIONS: usize = 9;

/// A planar sweep of rays in the agent's body frame.
///
/// Angles are in degrees measured from the right wing, so 90 points along
/// the nose. `end_offset` lifts (positive) or lowers every ray's end point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayFan {
    pub name: String,
    pub angles: Vec<f64>,
    #[serde(default)]
    pub end_offset: f64,
}

impl RayFan {
    pub fn new(name: impl Into<String>, angles: Vec<f64>, end_offset: f64) -> Self {
        Self {
            name: name.into(),
            angles,
            end_offset,
        }
    }

    pub fn upward() -> Self {
        Self::new("upward", vec![60.0, 90.0, 120.0], 75.0)
    }

    pub fn horizontal() -> Self {
        Self::new(
            "horizontal",
            vec![60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0],
            0.0,
        )
    }

    pub fn downward() -> Self {
        Self::new("downward", vec![60.0, 90.0, 120.0], -75.0)
    }

    /// Unit ray directions in the body frame, in angle order
    pub fn directions(&self, ray_length: f64) -> impl Iterator<Item = Vector3<f64>> + '_ {
        self.angles.iter().map(move |angle| {
            let angle = angle.to_radians();
            Vector3::new(
                angle.sin() * ray_length,
                angle.cos() * ray_length,
                -self.end_offset,
            )
            .normalize()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    /// Cast distance of every ray [m]
    pub ray_length: f64,
    /// One-hot slots per ray, in order
    pub detectable_tags: Vec<DetectableTag>,
    pub fans: Vec<RayFan>,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            ray_length: 250.0,
            detectable_tags: vec![DetectableTag::Obstacle, DetectableTag::Checkpoint],
            fans: vec![RayFan::upward(), RayFan::horizontal(), RayFan::downward()],
        }
    }
}

impl PerceptionConfig {
    pub fn ray_count(&self) -> usize {
        self.fans.iter().map(|fan| fan.angles.len()).sum()
    }

    /// Values written per ray: tag one-hot, no-hit flag, hit fraction
    pub fn values_per_ray(&self) -> usize {
        self.detectable_tags.len() + 2
    }
}

/// Builds the fixed-length observation vector for one agent
#[derive(Resource, Debug, Clone, Default)]
pub struct ObservationEncoder {
    config: PerceptionConfig,
}

impl ObservationEncoder {
    pub fn new(config: PerceptionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        KINEMATIC_OBSERVATIONS + self.config.ray_count() * self.config.values_per_ray()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn encode(
        &self,
        spatial: &SpatialComponent,
        course: &Course,
        next_index: usize,
        perception: &impl RayPerception,
    ) -> Vec<f64> {
        let mut observation = Vec::with_capacity(self.len());
        observation.extend(spatial.local_velocity().iter());
        observation.extend(vector_to_next(spatial, course, next_index).iter());
        observation.extend(orientation_to_next(spatial, course, next_index).iter());
        self.encode_rays(spatial, perception, &mut observation);
        observation
    }

    fn encode_rays(
        &self,
        spatial: &SpatialComponent,
        perception: &impl RayPerception,
        out: &mut Vec<f64>,
    ) {
        let tags = &self.config.detectable_tags;
        let length = self.config.ray_length;

        for fan in &self.config.fans {
            for local in fan.directions(length) {
                let direction = spatial.attitude * local;
                let start = out.len();
                out.resize(start + self.config.values_per_ray(), 0.0);
                let slots = &mut out[start..];

                match perception.cast(&spatial.position, &direction, length) {
                    Some(hit) => {
                        // Untagged geometry leaves the whole block at zero
                        if let Some(slot) = hit
                            .tag
                            .and_then(|tag| tags.iter().position(|t| *t == tag))
                        {
                            slots[slot] = 1.0;
                            slots[tags.len() + 1] = hit.distance / length;
                        }
                    }
                    // Miss: only the no-hit flag is set, the hit fraction stays zero
                    None => slots[tags.len()] = 1.0,
                }
            }
        }
    }
}
