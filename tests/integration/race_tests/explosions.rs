use aerorace::{
    components::{EpisodeComponent, ExplosionPhase, PhysicsComponent, SpatialComponent},
    plugins::{ExplosionEvent, ExplosionStage},
};
use approx::assert_relative_eq;
use nalgebra::Vector3;

use crate::common::{assert_position_eq, idle_racing_config, TestAppBuilder};

fn stages(events: &[ExplosionEvent]) -> Vec<ExplosionStage> {
    events.iter().map(|e| e.stage).collect()
}

#[test]
fn test_racing_collision_explosion_sequence() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .build();
    let agent = app.agent("agent_0");

    app.teleport(agent, Vector3::new(500.0, 500.0, -100.0));
    app.run_frame();

    assert_eq!(
        stages(&app.events::<ExplosionEvent>()),
        vec![ExplosionStage::Started]
    );
    let episode = app.get::<EpisodeComponent>(agent);
    assert!(episode.is_frozen());
    let crash_step = episode.step_count;
    assert_eq!(
        episode.explosion,
        Some(ExplosionPhase::Burning {
            until: crash_step + 100
        })
    );
    assert!(app.get::<PhysicsComponent>(agent).sleeping);
    assert_relative_eq!(app.get::<SpatialComponent>(agent).velocity, Vector3::zeros());

    // The effect plays for two seconds
    app.run_steps(100);
    assert!(app.events::<ExplosionEvent>().is_empty());
    assert!(app.get::<EpisodeComponent>(agent).is_frozen());

    app.run_frame();
    assert_eq!(
        stages(&app.events::<ExplosionEvent>()),
        vec![ExplosionStage::Repositioned]
    );
    let restart = app.course().spawn_pose(0, 0, 1, 10.0).0;
    assert_position_eq(&app.get::<SpatialComponent>(agent).position, &restart, 1e-9);
    assert!(app.get::<EpisodeComponent>(agent).is_frozen());

    // Then stays frozen for one more second
    app.run_steps(49);
    assert!(app.get::<EpisodeComponent>(agent).is_frozen());
    assert_position_eq(&app.get::<SpatialComponent>(agent).position, &restart, 1e-9);

    app.run_frame();
    assert_eq!(
        stages(&app.events::<ExplosionEvent>()),
        vec![ExplosionStage::Recovered]
    );
    let episode = app.get::<EpisodeComponent>(agent);
    assert!(episode.is_running());
    assert_eq!(episode.explosion, None);
    assert_eq!(episode.episode, 1);
    assert!(!app.get::<PhysicsComponent>(agent).sleeping);
}
