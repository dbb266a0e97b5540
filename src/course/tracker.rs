use nalgebra::Vector3;

use super::{Checkpoint, Course};
use crate::{
    components::{RaceAgent, SpatialComponent},
    utils::world_to_body,
};

/// What detected a checkpoint crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingTrigger {
    /// Agent came within the reset-parameter radius of the checkpoint
    Distance,
    /// Agent's collision volume entered the checkpoint trigger volume
    Volume,
}

/// Offset from the agent to checkpoint `next`, in the agent's body frame
pub fn vector_to_next(spatial: &SpatialComponent, course: &Course, next: usize) -> Vector3<f64> {
    world_to_body(&spatial.attitude, &(course.at(next).position - spatial.position))
}

/// Forward axis of checkpoint `next`, in the agent's body frame
pub fn orientation_to_next(
    spatial: &SpatialComponent,
    course: &Course,
    next: usize,
) -> Vector3<f64> {
    world_to_body(&spatial.attitude, &course.at(next).forward())
}

pub fn within_distance_trigger(
    spatial: &SpatialComponent,
    checkpoint: &Checkpoint,
    radius: f64,
) -> bool {
    (checkpoint.position - spatial.position).norm() < radius
}

/// Check whether the agent crossed its next checkpoint this tick.
///
/// `entered` lists checkpoint volumes newly entered this tick; entries for any
/// checkpoint other than the next one are ignored. The distance trigger is
/// only checked when `distance_radius` is set.
pub fn detect_crossing(
    agent: &RaceAgent,
    spatial: &SpatialComponent,
    course: &Course,
    distance_radius: Option<f64>,
    entered: &[usize],
) -> Option<CrossingTrigger> {
    let next = agent.next_checkpoint_index;
    if entered.contains(&next) {
        return Some(CrossingTrigger::Volume);
    }
    match distance_radius {
        Some(radius) if within_distance_trigger(spatial, course.at(next), radius) => {
            Some(CrossingTrigger::Distance)
        }
        _ => None,
    }
}

/// Move the agent on to the following checkpoint, returning the one reached
pub fn advance(agent: &mut RaceAgent, course: &Course) -> usize {
    let reached = agent.next_checkpoint_index % course.len();
    agent.next_checkpoint_index = course.next_index(reached);
    reached
}
