use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    course::{Course, CourseBuilder, FinishPlacement, Waypoint, WaypointPath},
    utils::RaceError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    pub waypoints: Vec<Waypoint>,
    pub looped: bool,
    pub finish: FinishPlacement,
    /// Checkpoint trigger volume radius [m]
    pub trigger_radius: f64,
    pub obstacles: Vec<ObstacleConfig>,
}

/// Static spherical obstacle placed in the area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleConfig {
    pub position: Vector3<f64>,
    pub radius: f64,
}

impl Default for CourseConfig {
    fn default() -> Self {
        let corner = |n: f64, e: f64| Waypoint::new(Vector3::new(n, e, -100.0));
        Self {
            waypoints: vec![
                corner(0.0, 0.0),
                corner(1000.0, 0.0),
                corner(1000.0, 1000.0),
                corner(0.0, 1000.0),
            ],
            looped: true,
            finish: FinishPlacement::Auto,
            trigger_radius: 30.0,
            obstacles: vec![ObstacleConfig {
                position: Vector3::new(500.0, 500.0, -100.0),
                radius: 150.0,
            }],
        }
    }
}

impl CourseConfig {
    pub fn build_course(&self) -> Result<Course, RaceError> {
        let path = WaypointPath::new(self.waypoints.clone(), self.looped)?;
        CourseBuilder::new()
            .with_finish(self.finish)
            .with_trigger_radius(self.trigger_radius)
            .build(&path)
    }
}
