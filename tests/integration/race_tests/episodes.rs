use aerorace::{
    components::{
        CollisionEvent, ContactKind, EpisodeComponent, EpisodeState, LastOutcome,
        PhysicsComponent, RaceAgent, SpatialComponent, TerminationReason,
    },
    plugins::{setup_app, EpisodeResetEvent, ExplosionEvent, FreezeRequest, StepCompleteEvent},
    resources::PilotConfig,
    utils::{ConfigError, RaceError},
};
use approx::assert_relative_eq;
use nalgebra::Vector3;

use crate::common::{
    assert_position_eq, assert_spatial_valid, assert_terminated, external_pilot,
    hovering_training_config, idle_racing_config, TestAppBuilder,
};

/// Open airspace away from the checkpoints and the central obstacle
fn open_air() -> Vector3<f64> {
    Vector3::new(500.0, -300.0, -100.0)
}

#[test]
fn test_first_tick_starts_episode() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .build();
    let agent = app.agent("agent_0");

    let episode = app.get::<EpisodeComponent>(agent);
    assert_eq!(episode.state, EpisodeState::Running);
    assert_eq!(episode.episode, 1);
    assert_eq!(episode.step_count, 1);
    assert_eq!(episode.next_timeout, 300);

    let resets = app.events::<EpisodeResetEvent>();
    assert_eq!(resets.len(), 1);
    assert_eq!(resets[0].next_checkpoint, 0);
    assert_spatial_valid(app.get::<SpatialComponent>(agent));
}

#[test]
fn test_timeout_at_step_300() {
    let mut app = TestAppBuilder::new()
        .with_config(hovering_training_config())
        .build();
    let agent = app.agent("agent_0");

    app.run_steps(298);
    let episode = app.get::<EpisodeComponent>(agent);
    assert_eq!(episode.step_count, 299);
    assert!(episode.is_running());

    app.run_frame();
    let episode = app.get::<EpisodeComponent>(agent);
    assert_eq!(episode.step_count, 300);
    assert_eq!(episode.state, EpisodeState::Terminated);
    let cumulative = episode.cumulative_reward;

    let outcome = app.get::<LastOutcome>(agent).0;
    assert_terminated(&outcome, TerminationReason::Timeout, -0.5);
    assert_relative_eq!(outcome.reward, -0.5 - 1.0 / 5000.0, epsilon = 1e-12);
    assert_relative_eq!(cumulative, -0.5 - 300.0 / 5000.0, epsilon = 1e-9);

    // The next tick starts a fresh episode
    app.run_frame();
    let episode = app.get::<EpisodeComponent>(agent);
    assert_eq!(episode.episode, 2);
    assert_eq!(episode.step_count, 1);
    assert!(!app.get::<LastOutcome>(agent).0.is_terminal());
}

#[test]
fn test_max_steps_ends_training_episode() {
    let mut app = TestAppBuilder::new()
        .with_config(hovering_training_config())
        .with_max_steps(10)
        .build();
    let agent = app.agent("agent_0");

    app.run_steps(9);
    let outcome = app.get::<LastOutcome>(agent).0;
    assert_terminated(&outcome, TerminationReason::MaxSteps, 0.0);
    assert_relative_eq!(outcome.reward, -0.1);
}

#[test]
fn test_training_collision_terminates() {
    let mut app = TestAppBuilder::new()
        .with_config(hovering_training_config())
        .build();
    let agent = app.agent("agent_0");

    app.teleport(agent, Vector3::new(500.0, 500.0, -100.0));
    app.run_frame();

    let outcome = app.get::<LastOutcome>(agent).0;
    assert_terminated(&outcome, TerminationReason::Collision, -1.0);
    assert_eq!(app.get::<EpisodeComponent>(agent).state, EpisodeState::Terminated);

    // Respawned on the course for the next episode
    app.run_frame();
    let next = app.get::<RaceAgent>(agent).next_checkpoint_index;
    let start = app.course().at(app.course().previous_index(next)).position;
    assert!((app.get::<SpatialComponent>(agent).position - start).norm() <= 5.0 + 1e-9);
    assert_eq!(app.get::<EpisodeComponent>(agent).episode, 2);
}

#[test]
fn test_agent_contact_harmless_in_training() {
    let mut app = TestAppBuilder::new()
        .with_config(hovering_training_config())
        .with_agents(2, external_pilot())
        .build();
    let first = app.agent("agent_0");
    let second = app.agent("agent_1");

    app.teleport(first, open_air());
    app.teleport(second, open_air());
    app.run_frame();

    let contacts = app.events::<CollisionEvent>();
    assert_eq!(contacts.len(), 2);
    assert!(contacts
        .iter()
        .all(|event| matches!(event.other, ContactKind::Agent(_))));

    for agent in [first, second] {
        let outcome = app.get::<LastOutcome>(agent).0;
        assert!(!outcome.is_terminal());
        // Only the per-step penalty applies
        assert_relative_eq!(outcome.reward, -1.0 / 5000.0, epsilon = 1e-12);
        assert!(app.get::<EpisodeComponent>(agent).is_running());
    }
}

#[test]
fn test_agent_contact_harmless_while_racing() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .with_agents(2, PilotConfig::Idle)
        .build();
    let first = app.agent("agent_0");
    let second = app.agent("agent_1");

    app.teleport(first, open_air());
    app.teleport(second, open_air());
    app.run_frame();

    assert_eq!(app.events::<CollisionEvent>().len(), 2);
    assert!(app.events::<ExplosionEvent>().is_empty());
    for agent in [first, second] {
        let episode = app.get::<EpisodeComponent>(agent);
        assert!(episode.is_running());
        assert!(episode.explosion.is_none());
        assert!(!app.get::<PhysicsComponent>(agent).sleeping);
    }
}

#[test]
fn test_freeze_rejected_in_training() {
    let mut app = TestAppBuilder::new()
        .with_config(hovering_training_config())
        .build();
    let agent = app.agent("agent_0");

    app.send_event(FreezeRequest::freeze(agent));
    app.run_frame();

    let episode = app.get::<EpisodeComponent>(agent);
    assert_eq!(episode.state, EpisodeState::Running);
    assert_eq!(episode.step_count, 2);
    assert!(!app.get::<PhysicsComponent>(agent).sleeping);
}

#[test]
fn test_freeze_and_thaw_while_racing() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .build();
    let agent = app.agent("agent_0");
    app.run_steps(10);

    app.send_event(FreezeRequest::freeze(agent));
    app.run_frame();
    assert!(app.get::<EpisodeComponent>(agent).is_frozen());
    assert!(app.get::<PhysicsComponent>(agent).sleeping);
    let held = app.get::<SpatialComponent>(agent).position;
    assert_relative_eq!(app.get::<SpatialComponent>(agent).velocity, Vector3::zeros());

    app.run_steps(20);
    assert_position_eq(&app.get::<SpatialComponent>(agent).position, &held, 1e-12);
    // Steps keep counting while frozen
    assert_eq!(app.get::<EpisodeComponent>(agent).step_count, 32);

    app.send_event(FreezeRequest::thaw(agent));
    app.run_frame();
    assert!(app.get::<EpisodeComponent>(agent).is_running());
    assert!(app.get::<SpatialComponent>(agent).position != held);
}

#[test]
fn test_agents_spawn_abreast() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .with_agents(3, PilotConfig::Idle)
        .build();
    let agents: Vec<_> = ["agent_0", "agent_1", "agent_2"]
        .iter()
        .map(|name| app.agent(name))
        .collect();

    let start = app.course().at(3);
    let (origin, right) = (start.position, start.right());
    let positions: Vec<_> = agents
        .iter()
        .map(|agent| app.get::<SpatialComponent>(*agent).position)
        .collect();

    // All agents moved the same distance forward on the first tick
    assert_position_eq(&(positions[1] - positions[0]), &(right * 10.0), 1e-9);
    assert_position_eq(&(positions[2] - positions[1]), &(right * 10.0), 1e-9);
    let lateral = (positions[0] - origin).dot(&right);
    assert_relative_eq!(lateral, -15.0, epsilon = 1e-6);
}

#[test]
fn test_step_outcome_reported_every_tick() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .with_agents(2, PilotConfig::Idle)
        .build();

    for _ in 0..3 {
        app.run_frame();
        let outcomes = app.events::<StepCompleteEvent>();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|e| !e.outcome.is_terminal()));
        // No per-step penalty outside training
        assert!(outcomes.iter().all(|e| e.outcome.reward == 0.0));
    }
}

#[test]
fn test_training_resets_are_seeded() {
    let next_indices = |seed: u64| {
        let mut app = TestAppBuilder::new()
            .with_config(hovering_training_config())
            .with_seed(seed)
            .build();
        let agent = app.agent("agent_0");
        let mut indices = vec![app.get::<RaceAgent>(agent).next_checkpoint_index];
        for _ in 0..5 {
            app.teleport(agent, Vector3::new(500.0, 500.0, -100.0));
            app.run_steps(2);
            indices.push(app.get::<RaceAgent>(agent).next_checkpoint_index);
        }
        assert_eq!(app.get::<EpisodeComponent>(agent).episode, 6);
        indices
    };

    let first = next_indices(7);
    assert_eq!(first, next_indices(7));
    assert!(first.iter().all(|i| *i < 4));
}

#[test]
fn test_setup_app_runs_one_tick_per_update() {
    let mut app = setup_app(idle_racing_config()).unwrap();
    app.update();
    app.update();

    let world = app.world_mut();
    let mut query = world.query::<&EpisodeComponent>();
    let episode = query.single(world);
    assert_eq!(episode.episode, 1);
    assert_eq!(episode.step_count, 2);
}

#[test]
fn test_setup_app_rejects_invalid_config() {
    let mut config = hovering_training_config();
    config.reset_parameters.clear();
    assert!(matches!(
        setup_app(config),
        Err(RaceError::Config(ConfigError::MissingResetParameter(_)))
    ));

    let mut config = idle_racing_config();
    config.course.waypoints.truncate(1);
    assert!(matches!(setup_app(config), Err(RaceError::InvalidPath(_))));
}
