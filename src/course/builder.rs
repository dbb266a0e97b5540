use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::{path::RacePath, Checkpoint, CheckpointKind, Course};
use crate::utils::RaceError;

/// Which checkpoint, if any, is tagged as the finish line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishPlacement {
    /// Loops finish on checkpoint 0; open paths get an extra checkpoint at
    /// the path's end
    #[default]
    Auto,
    First,
    Last,
    None,
}

/// Samples a [`RacePath`] at whole units to build a [`Course`]
#[derive(Debug, Clone, Copy)]
pub struct CourseBuilder {
    finish: FinishPlacement,
    trigger_radius: f64,
}

impl Default for CourseBuilder {
    fn default() -> Self {
        Self {
            finish: FinishPlacement::Auto,
            trigger_radius: 30.0,
        }
    }
}

impl CourseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_finish(mut self, finish: FinishPlacement) -> Self {
        self.finish = finish;
        self
    }

    pub fn with_trigger_radius(mut self, radius: f64) -> Self {
        self.trigger_radius = radius;
        self
    }

    pub fn build(&self, path: &impl RacePath) -> Result<Course, RaceError> {
        let max_unit = path.max_unit();
        if !max_unit.is_finite() || max_unit < 1.0 {
            return Err(RaceError::EmptyCourse { max_unit });
        }
        if self.trigger_radius.is_nan() || self.trigger_radius <= 0.0 {
            return Err(RaceError::InvalidPath(format!(
                "trigger radius must be positive, got {}",
                self.trigger_radius
            )));
        }

        let count = max_unit.floor() as usize;
        let mut checkpoints: Vec<Checkpoint> = (0..count)
            .map(|unit| self.sample(path, unit))
            .collect();

        match self.finish {
            FinishPlacement::Auto if path.is_looped() => {
                checkpoints[0].kind = CheckpointKind::Finish;
            }
            FinishPlacement::Auto => {
                let mut finish = self.sample(path, count);
                finish.kind = CheckpointKind::Finish;
                checkpoints.push(finish);
            }
            FinishPlacement::First => checkpoints[0].kind = CheckpointKind::Finish,
            FinishPlacement::Last => {
                if let Some(last) = checkpoints.last_mut() {
                    last.kind = CheckpointKind::Finish;
                }
            }
            FinishPlacement::None => {}
        }

        info!(
            "Built course with {} checkpoints (path length {} units, {})",
            checkpoints.len(),
            max_unit,
            if path.is_looped() { "looped" } else { "open" }
        );
        Course::new(checkpoints)
    }

    fn sample(&self, path: &impl RacePath, unit: usize) -> Checkpoint {
        Checkpoint {
            index: unit,
            position: path.position_at(unit as f64),
            orientation: path.orientation_at(unit as f64),
            kind: CheckpointKind::Normal,
            trigger_radius: self.trigger_radius,
        }
    }
}
