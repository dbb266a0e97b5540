use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::course::Course;

/// Object classes a ray can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectableTag {
    Obstacle,
    Checkpoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin [m]
    pub distance: f64,
    /// Class of the object hit, `None` for untagged geometry
    pub tag: Option<DetectableTag>,
}

/// Ray casting collaborator used by the observation encoder
pub trait RayPerception {
    /// Nearest hit along a unit `direction` from `origin` within `max_distance`
    fn cast(&self, origin: &Vector3<f64>, direction: &Vector3<f64>, max_distance: f64)
        -> Option<RayHit>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SceneSphere {
    center: Vector3<f64>,
    radius: f64,
    tag: Option<DetectableTag>,
    owner: Option<Entity>,
}

impl SceneSphere {
    /// Entry distance of a unit ray, ignoring spheres that contain the origin
    fn intersect(&self, origin: &Vector3<f64>, direction: &Vector3<f64>) -> Option<f64> {
        let oc = origin - self.center;
        let c = oc.norm_squared() - self.radius * self.radius;
        if c <= 0.0 {
            return None;
        }
        let b = oc.dot(direction);
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let t = -b - discriminant.sqrt();
        (t >= 0.0).then_some(t)
    }
}

/// Sphere-only scene used as the built-in [`RayPerception`]
#[derive(Debug, Clone, Default)]
pub struct SceneGeometry {
    spheres: Vec<SceneSphere>,
}

impl SceneGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene holding every checkpoint trigger volume of `course`
    pub fn from_course(course: &Course) -> Self {
        let mut scene = Self::new();
        for checkpoint in course.checkpoints() {
            scene.add_sphere(
                checkpoint.position,
                checkpoint.trigger_radius,
                Some(DetectableTag::Checkpoint),
                None,
            );
        }
        scene
    }

    pub fn add_sphere(
        &mut self,
        center: Vector3<f64>,
        radius: f64,
        tag: Option<DetectableTag>,
        owner: Option<Entity>,
    ) {
        self.spheres.push(SceneSphere {
            center,
            radius,
            tag,
            owner,
        });
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// View of the scene that cannot see spheres owned by `entity`
    pub fn view_from(&self, entity: Entity) -> SceneView<'_> {
        SceneView {
            scene: self,
            exclude: Some(entity),
        }
    }

    fn nearest(
        &self,
        origin: &Vector3<f64>,
        direction: &Vector3<f64>,
        max_distance: f64,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        self.spheres
            .iter()
            .filter(|s| s.owner.is_none() || s.owner != exclude)
            .filter_map(|s| {
                s.intersect(origin, direction)
                    .filter(|d| *d <= max_distance)
                    .map(|distance| RayHit {
                        distance,
                        tag: s.tag,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl RayPerception for SceneGeometry {
    fn cast(
        &self,
        origin: &Vector3<f64>,
        direction: &Vector3<f64>,
        max_distance: f64,
    ) -> Option<RayHit> {
        self.nearest(origin, direction, max_distance, None)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    scene: &'a SceneGeometry,
    exclude: Option<Entity>,
}

impl RayPerception for SceneView<'_> {
    fn cast(
        &self,
        origin: &Vector3<f64>,
        direction: &Vector3<f64>,
        max_distance: f64,
    ) -> Option<RayHit> {
        self.scene
            .nearest(origin, direction, max_distance, self.exclude)
    }
}
