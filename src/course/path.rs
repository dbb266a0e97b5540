use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::RaceError;

/// A continuous course path parameterized by a unit distance.
///
/// Whole units mark checkpoint positions; `max_unit` is the parameter value at
/// the end of the path.
pub trait RacePath {
    fn max_unit(&self) -> f64;

    fn is_looped(&self) -> bool;

    /// World position at `unit`
    fn position_at(&self, unit: f64) -> Vector3<f64>;

    /// Body-to-world rotation at `unit`, x along the path and z toward the ground
    fn orientation_at(&self, unit: f64) -> UnitQuaternion<f64>;
}

/// Control point of a [`WaypointPath`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// North-east-down position [m]
    pub position: Vector3<f64>,
    /// Bank about the path tangent [deg], positive right wing down
    #[serde(default)]
    pub roll: f64,
}

impl Waypoint {
    pub fn new(position: Vector3<f64>) -> Self {
        Self { position, roll: 0.0 }
    }

    pub fn with_roll(mut self, roll: f64) -> Self {
        self.roll = roll;
        self
    }
}

/// Catmull-Rom spline through a list of waypoints, one unit per segment
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointPath {
    waypoints: Vec<Waypoint>,
    looped: bool,
}

impl WaypointPath {
    pub fn new(waypoints: Vec<Waypoint>, looped: bool) -> Result<Self, RaceError> {
        if waypoints.len() < 2 {
            return Err(RaceError::InvalidPath(format!(
                "need at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }
        if let Some(i) = waypoints
            .iter()
            .position(|w| !w.position.iter().all(|c| c.is_finite()) || !w.roll.is_finite())
        {
            return Err(RaceError::InvalidPath(format!(
                "waypoint {} is not finite",
                i
            )));
        }

        let count = waypoints.len();
        let segments = if looped { count } else { count - 1 };
        for i in 0..segments {
            let a = waypoints[i].position;
            let b = waypoints[(i + 1) % count].position;
            if (b - a).norm() < f64::EPSILON {
                return Err(RaceError::InvalidPath(format!(
                    "waypoints {} and {} coincide",
                    i,
                    (i + 1) % count
                )));
            }
        }

        Ok(Self { waypoints, looped })
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    fn segment_count(&self) -> usize {
        if self.looped {
            self.waypoints.len()
        } else {
            self.waypoints.len() - 1
        }
    }

    /// Waypoint at a possibly out-of-range index: wrapped on loops, clamped otherwise
    fn point(&self, index: isize) -> &Waypoint {
        let len = self.waypoints.len() as isize;
        let index = if self.looped {
            index.rem_euclid(len)
        } else {
            index.clamp(0, len - 1)
        };
        &self.waypoints[index as usize]
    }

    /// Split a unit into a segment index and the fraction along it
    fn locate(&self, unit: f64) -> (isize, f64) {
        let segments = self.segment_count() as f64;
        let unit = if self.looped {
            unit.rem_euclid(segments)
        } else {
            unit.clamp(0.0, segments)
        };
        let segment = unit.floor().min(segments - 1.0);
        (segment as isize, unit - segment)
    }

    fn controls(&self, segment: isize) -> [Vector3<f64>; 4] {
        [
            self.point(segment - 1).position,
            self.point(segment).position,
            self.point(segment + 1).position,
            self.point(segment + 2).position,
        ]
    }

    fn tangent_at(&self, unit: f64) -> Vector3<f64> {
        let (segment, t) = self.locate(unit);
        let [p0, p1, p2, p3] = self.controls(segment);
        let tangent = 0.5
            * ((p2 - p0)
                + 2.0 * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t
                + 3.0 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t * t);
        if tangent.norm() > f64::EPSILON {
            tangent
        } else {
            p2 - p1
        }
    }

    fn roll_at(&self, unit: f64) -> f64 {
        let (segment, t) = self.locate(unit);
        let from = self.point(segment).roll;
        let to = self.point(segment + 1).roll;
        from + (to - from) * t
    }
}

impl RacePath for WaypointPath {
    fn max_unit(&self) -> f64 {
        self.segment_count() as f64
    }

    fn is_looped(&self) -> bool {
        self.looped
    }

    fn position_at(&self, unit: f64) -> Vector3<f64> {
        let (segment, t) = self.locate(unit);
        let [p0, p1, p2, p3] = self.controls(segment);
        let t2 = t * t;
        let t3 = t2 * t;
        0.5 * (2.0 * p1
            + (p2 - p0) * t
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
            + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
    }

    fn orientation_at(&self, unit: f64) -> UnitQuaternion<f64> {
        let base = frame_from_forward(&self.tangent_at(unit));
        base * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.roll_at(unit).to_radians())
    }
}

/// Level frame with x along `forward` and z as close to world down as possible
pub fn frame_from_forward(forward: &Vector3<f64>) -> UnitQuaternion<f64> {
    let x = forward.normalize();
    let mut y = Vector3::z().cross(&x);
    if y.norm() < 1e-9 {
        // Vertical tangent: keep east as the right wing
        y = Vector3::y();
    }
    let y = y.normalize();
    let z = x.cross(&y);
    let rotation = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[x, y, z]));
    UnitQuaternion::from_rotation_matrix(&rotation)
}
