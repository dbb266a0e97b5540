use bevy::prelude::*;

use crate::{
    components::{CollisionComponent, Observation, Obstacle, RaceAgent, SpatialComponent},
    course::Course,
    observation::{DetectableTag, ObservationEncoder, SceneGeometry},
};

/// Encode every agent's observation against the current scene
pub fn observation_system(
    mut agents: Query<(Entity, &RaceAgent, &SpatialComponent, &mut Observation)>,
    bodies: Query<(Entity, &SpatialComponent, &CollisionComponent), With<RaceAgent>>,
    obstacles: Query<(&SpatialComponent, &Obstacle)>,
    course: Res<Course>,
    encoder: Res<ObservationEncoder>,
) {
    let mut scene = SceneGeometry::from_course(&course);
    for (spatial, obstacle) in obstacles.iter() {
        scene.add_sphere(
            spatial.position,
            obstacle.radius,
            Some(DetectableTag::Obstacle),
            None,
        );
    }
    // Other aircraft read as obstacles
    for (entity, spatial, collision) in bodies.iter() {
        scene.add_sphere(
            spatial.position,
            collision.radius,
            Some(DetectableTag::Obstacle),
            Some(entity),
        );
    }

    for (entity, agent, spatial, mut observation) in agents.iter_mut() {
        observation.0 = encoder.encode(
            spatial,
            &course,
            agent.next_checkpoint_index,
            &scene.view_from(entity),
        );
    }
}
