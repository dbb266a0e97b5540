use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use super::freeze::freeze_body;
use crate::{
    components::{
        CheckpointTriggerEvent, CollisionEvent, CollisionResponse, ContactKind, EpisodeComponent,
        FlightState, Identifier, PhysicsComponent, RaceAgent, SpatialComponent,
    },
    course::{advance, detect_crossing, Course},
    plugins::{BoostStateChanged, CheckpointReached, ExplosionEvent, ExplosionStage},
    resources::RaceSettings,
};

/// Per-tick episode rules: step bookkeeping, checkpoint progress and
/// collision handling, in that order.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn episode_progress_system(
    mut query: Query<(
        Entity,
        &Identifier,
        &mut RaceAgent,
        &mut EpisodeComponent,
        &mut SpatialComponent,
        &mut PhysicsComponent,
        &mut FlightState,
    )>,
    course: Res<Course>,
    settings: Res<RaceSettings>,
    mut collision_events: EventReader<CollisionEvent>,
    mut trigger_events: EventReader<CheckpointTriggerEvent>,
    mut reached_events: EventWriter<CheckpointReached>,
    mut explosion_events: EventWriter<ExplosionEvent>,
    mut boost_events: EventWriter<BoostStateChanged>,
) {
    let mut entered: HashMap<Entity, Vec<usize>> = HashMap::new();
    for event in trigger_events.read() {
        entered.entry(event.entity).or_default().push(event.checkpoint);
    }
    // Contacts with other aircraft are harmless
    let crashed: HashSet<Entity> = collision_events
        .read()
        .filter(|event| matches!(event.other, ContactKind::Obstacle(_)))
        .map(|event| event.entity)
        .collect();

    let distance_radius = settings.distance_trigger_radius();

    for (entity, id, mut agent, mut episode, mut spatial, mut physics, mut flight) in
        query.iter_mut()
    {
        episode.begin_tick(&settings);

        if episode.is_running() {
            let volumes = entered.get(&entity).map(Vec::as_slice).unwrap_or_default();
            if let Some(trigger) =
                detect_crossing(&agent, &spatial, &course, distance_radius, volumes)
            {
                let checkpoint = advance(&mut agent, &course);
                episode.on_checkpoint(&settings);
                debug!(
                    "Agent {} reached checkpoint {} ({:?}) at step {}",
                    id, checkpoint, trigger, episode.step_count
                );
                reached_events.send(CheckpointReached {
                    entity,
                    checkpoint,
                    trigger,
                    step: episode.step_count,
                });
            }
        }

        if crashed.contains(&entity) {
            match episode.on_collision(&settings) {
                CollisionResponse::Terminated => {
                    info!("Agent {} crashed at step {}", id, episode.step_count);
                }
                CollisionResponse::Exploded => {
                    info!("Agent {} exploded at step {}", id, episode.step_count);
                    freeze_body(&mut physics, &mut spatial);
                    if flight.boost {
                        flight.boost = false;
                        boost_events.send(BoostStateChanged {
                            entity,
                            active: false,
                        });
                    }
                    explosion_events.send(ExplosionEvent {
                        entity,
                        stage: ExplosionStage::Started,
                        position: spatial.position,
                    });
                }
                CollisionResponse::Ignored => {}
            }
        }

        if let Some(reason) = episode.termination() {
            info!(
                "Agent {} episode {} ended ({:?}) after {} steps, return {:.3}",
                id, episode.episode, reason, episode.step_count, episode.cumulative_reward
            );
        }
    }
}
