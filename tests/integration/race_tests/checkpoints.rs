use aerorace::{
    components::{EpisodeComponent, LastOutcome, RaceAgent},
    course::CrossingTrigger,
    plugins::CheckpointReached,
};
use approx::assert_relative_eq;
use nalgebra::Vector3;

use crate::common::{
    hovering_training_config, idle_racing_config, TestAppBuilder, TEST_CHECKPOINT_RADIUS,
};

#[test]
fn test_checkpoints_advance_in_course_order() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .build();
    let agent = app.agent("agent_0");
    assert_eq!(app.get::<RaceAgent>(agent).next_checkpoint_index, 0);

    let positions: Vec<_> = app
        .course()
        .checkpoints()
        .iter()
        .map(|c| c.position)
        .collect();
    assert_eq!(positions.len(), 4);

    let mut visited = Vec::new();
    for position in positions {
        app.teleport(agent, position);
        app.run_frame();
        visited.push(app.get::<RaceAgent>(agent).next_checkpoint_index);
    }
    assert_eq!(visited, vec![1, 2, 3, 0]);
}

#[test]
fn test_only_next_checkpoint_counts() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .build();
    let agent = app.agent("agent_0");

    // Checkpoint 2 is not the next one
    let skipped = app.course().at(2).position;
    app.teleport(agent, skipped);
    app.run_frame();
    assert_eq!(app.get::<RaceAgent>(agent).next_checkpoint_index, 0);
    assert!(app.events::<CheckpointReached>().is_empty());
}

#[test]
fn test_staying_inside_a_checkpoint_advances_once() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .build();
    let agent = app.agent("agent_0");

    let first = app.course().at(0).position;
    app.teleport(agent, first);
    app.run_frame();
    let reached = app.events::<CheckpointReached>();
    assert_eq!(reached.len(), 1);
    assert_eq!(reached[0].checkpoint, 0);
    assert_eq!(reached[0].trigger, CrossingTrigger::Volume);

    app.run_steps(3);
    assert_eq!(app.get::<RaceAgent>(agent).next_checkpoint_index, 1);
}

#[test]
fn test_training_checkpoint_reward_and_window() {
    let mut app = TestAppBuilder::new()
        .with_config(hovering_training_config())
        .build();
    let agent = app.agent("agent_0");
    app.run_steps(9);
    assert_eq!(app.get::<EpisodeComponent>(agent).step_count, 10);

    let next = app.get::<RaceAgent>(agent).next_checkpoint_index;
    let target = app.course().at(next).position;
    app.teleport(agent, target);
    app.run_frame();

    let episode = app.get::<EpisodeComponent>(agent);
    assert_eq!(episode.step_count, 11);
    assert_eq!(episode.next_timeout, 311);
    let outcome = app.get::<LastOutcome>(agent).0;
    assert!(!outcome.is_terminal());
    assert_relative_eq!(outcome.reward, 0.5 - 1.0 / 5000.0, epsilon = 1e-12);
    assert_eq!(
        app.get::<RaceAgent>(agent).next_checkpoint_index,
        app.course().next_index(next)
    );
}

#[test]
fn test_distance_trigger_only_in_training() {
    // Inside the distance trigger but outside the trigger volume
    let offset = Vector3::new(40.0, 0.0, 0.0);
    assert!(offset.norm() < TEST_CHECKPOINT_RADIUS);

    let mut training = TestAppBuilder::new()
        .with_config(hovering_training_config())
        .build();
    let agent = training.agent("agent_0");
    let next = training.get::<RaceAgent>(agent).next_checkpoint_index;
    let target = training.course().at(next).position + offset;
    training.teleport(agent, target);
    training.run_frame();
    let reached = training.events::<CheckpointReached>();
    assert_eq!(reached.len(), 1);
    assert_eq!(reached[0].trigger, CrossingTrigger::Distance);

    let mut racing = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .build();
    let agent = racing.agent("agent_0");
    let target = racing.course().at(0).position + offset;
    racing.teleport(agent, target);
    racing.run_frame();
    assert!(racing.events::<CheckpointReached>().is_empty());
    assert_eq!(racing.get::<RaceAgent>(agent).next_checkpoint_index, 0);
}
