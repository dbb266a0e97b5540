use bevy::prelude::*;

use crate::{
    components::{
        CollisionComponent, EpisodeComponent, ExplosionStep, FlightState, Identifier,
        PhysicsComponent, RaceAgent, SpatialComponent,
    },
    course::Course,
    plugins::{ExplosionEvent, ExplosionStage},
    resources::RaceSettings,
};

/// Move pending explosion sequences along once their deadlines pass
#[allow(clippy::type_complexity)]
pub fn explosion_sequence_system(
    mut query: Query<(
        Entity,
        &Identifier,
        &RaceAgent,
        &mut EpisodeComponent,
        &mut SpatialComponent,
        &mut PhysicsComponent,
        &mut FlightState,
        &mut CollisionComponent,
    )>,
    course: Res<Course>,
    settings: Res<RaceSettings>,
    mut explosion_events: EventWriter<ExplosionEvent>,
) {
    for (entity, id, agent, mut episode, mut spatial, mut physics, mut flight, mut collision) in
        query.iter_mut()
    {
        let Some(step) = episode.advance_explosion(&settings) else {
            continue;
        };

        let stage = match step {
            ExplosionStep::Reposition => {
                let (position, attitude) = course.spawn_pose(
                    agent.next_checkpoint_index,
                    agent.slot,
                    settings.agent_count,
                    settings.spawn_spacing,
                );
                *spatial = SpatialComponent::at_pose(position, attitude);
                *flight = FlightState::from_attitude(&attitude);
                collision.reset();
                ExplosionStage::Repositioned
            }
            ExplosionStep::Recovered => {
                physics.wake_up();
                ExplosionStage::Recovered
            }
        };

        info!(
            "Agent {} explosion {:?} at step {}",
            id, stage, episode.step_count
        );
        explosion_events.send(ExplosionEvent {
            entity,
            stage,
            position: spatial.position,
        });
    }
}
