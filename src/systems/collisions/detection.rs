use bevy::prelude::*;
use nalgebra::Vector3;
use std::collections::HashSet;

use crate::{
    components::{
        CheckpointTriggerEvent, CollisionComponent, CollisionEvent, ContactKind, EpisodeComponent,
        Obstacle, RaceAgent, SpatialComponent,
    },
    course::Course,
};

#[derive(Debug, Clone, Copy)]
struct Body {
    entity: Entity,
    position: Vector3<f64>,
    radius: f64,
    kind: ContactKind,
}

/// Sphere contacts between agents and every other body, plus checkpoint
/// trigger volume overlaps. Only newly started contacts produce events.
pub fn contact_detection_system(
    mut agents: Query<
        (
            Entity,
            &SpatialComponent,
            &EpisodeComponent,
            &mut CollisionComponent,
        ),
        With<RaceAgent>,
    >,
    obstacles: Query<(Entity, &SpatialComponent, &Obstacle)>,
    course: Res<Course>,
    mut collision_events: EventWriter<CollisionEvent>,
    mut trigger_events: EventWriter<CheckpointTriggerEvent>,
) {
    let mut bodies: Vec<Body> = obstacles
        .iter()
        .map(|(entity, spatial, obstacle)| Body {
            entity,
            position: spatial.position,
            radius: obstacle.radius,
            kind: ContactKind::Obstacle(entity),
        })
        .collect();
    bodies.extend(
        agents
            .iter()
            .filter(|(_, _, episode, _)| !episode.is_terminated())
            .map(|(entity, spatial, _, collision)| Body {
                entity,
                position: spatial.position,
                radius: collision.radius,
                kind: ContactKind::Agent(entity),
            }),
    );

    for (entity, spatial, episode, mut collision) in agents.iter_mut() {
        if episode.is_terminated() {
            continue;
        }

        let touching: HashSet<Entity> = bodies
            .iter()
            .filter(|body| body.entity != entity)
            .filter(|body| spheres_overlap(&spatial.position, collision.radius, body))
            .map(|body| body.entity)
            .collect();

        for other in collision.update_contacts(touching) {
            let Some(body) = bodies.iter().find(|b| b.entity == other) else {
                continue;
            };
            collision.register_collision();
            collision_events.send(CollisionEvent {
                entity,
                other: body.kind,
                impact_point: impact_point(&spatial.position, collision.radius, &body.position),
            });
        }

        let overlapping: HashSet<usize> = course
            .checkpoints()
            .iter()
            .filter(|c| (c.position - spatial.position).norm() < c.trigger_radius + collision.radius)
            .map(|c| c.index)
            .collect();

        for checkpoint in collision.update_overlaps(overlapping) {
            trigger_events.send(CheckpointTriggerEvent { entity, checkpoint });
        }
    }
}

fn spheres_overlap(position: &Vector3<f64>, radius: f64, body: &Body) -> bool {
    (body.position - position).norm() < radius + body.radius
}

/// Point on the agent's sphere facing the other body
fn impact_point(position: &Vector3<f64>, radius: f64, other: &Vector3<f64>) -> Vector3<f64> {
    let offset = other - position;
    match offset.try_normalize(f64::EPSILON) {
        Some(direction) => position + direction * radius,
        None => *position,
    }
}
