use aerorace::components::{EpisodeStatus, SpatialComponent, StepOutcome, TerminationReason};
use approx::assert_relative_eq;
use nalgebra::Vector3;

/// Assert that a spatial component's state is valid
#[track_caller]
pub fn assert_spatial_valid(spatial: &SpatialComponent) {
    assert!(
        spatial.position.iter().all(|x| x.is_finite()),
        "Position contains non-finite values"
    );
    assert!(
        spatial.velocity.iter().all(|x| x.is_finite()),
        "Velocity contains non-finite values"
    );
    assert_relative_eq!(spatial.attitude.norm(), 1.0, epsilon = 1e-9);
}

/// Assert that two positions are approximately equal
#[track_caller]
pub fn assert_position_eq(actual: &Vector3<f64>, expected: &Vector3<f64>, epsilon: f64) {
    assert!(
        (actual - expected).norm() <= epsilon,
        "Positions differ: {:?} vs {:?}",
        actual,
        expected
    );
}

/// Assert that an outcome ends the episode for `reason` with `reward_delta`
#[track_caller]
pub fn assert_terminated(outcome: &StepOutcome, reason: TerminationReason, reward_delta: f64) {
    match outcome.status {
        EpisodeStatus::Terminate {
            reason: actual,
            reward_delta: delta,
        } => {
            assert_eq!(actual, reason);
            assert_relative_eq!(delta, reward_delta);
        }
        EpisodeStatus::Continue => panic!("Expected {:?} termination, episode continued", reason),
    }
}
