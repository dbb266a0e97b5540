use bevy::prelude::*;

use crate::{
    components::{
        AgentCommand, CollisionComponent, EpisodeComponent, FlightState, Identifier, LastOutcome,
        PhysicsComponent, RaceAgent, SpatialComponent,
    },
    course::Course,
    plugins::{BoostStateChanged, EpisodeResetEvent},
    resources::RaceSettings,
    utils::SpawnRng,
};

/// Start a new episode for every terminated agent.
///
/// In training the next checkpoint is drawn at random; the agent is then
/// placed on the checkpoint before it, at rest.
#[allow(clippy::type_complexity)]
pub fn reset_episode_system(
    mut query: Query<(
        Entity,
        &Identifier,
        &mut RaceAgent,
        &mut EpisodeComponent,
        &mut SpatialComponent,
        &mut PhysicsComponent,
        &mut FlightState,
        &mut CollisionComponent,
        &mut AgentCommand,
        &mut LastOutcome,
    )>,
    course: Res<Course>,
    settings: Res<RaceSettings>,
    mut rng: ResMut<SpawnRng>,
    mut reset_events: EventWriter<EpisodeResetEvent>,
    mut boost_events: EventWriter<BoostStateChanged>,
) {
    for (
        entity,
        id,
        mut agent,
        mut episode,
        mut spatial,
        mut physics,
        mut flight,
        mut collision,
        mut command,
        mut outcome,
    ) in query.iter_mut()
    {
        if !episode.is_terminated() {
            continue;
        }

        if settings.training_mode {
            agent.next_checkpoint_index = rng.checkpoint_index(course.len());
        }
        let (position, attitude) = course.spawn_pose(
            agent.next_checkpoint_index,
            agent.slot,
            settings.agent_count,
            settings.spawn_spacing,
        );

        *spatial = SpatialComponent::at_pose(position, attitude);
        physics.clear_forces();
        physics.wake_up();
        if flight.boost {
            boost_events.send(BoostStateChanged {
                entity,
                active: false,
            });
        }
        *flight = FlightState::from_attitude(&attitude);
        collision.reset();
        command.0 = Default::default();
        outcome.0 = Default::default();
        episode.begin_episode(&settings);

        info!(
            "Agent {} starting episode {} toward checkpoint {}",
            id, episode.episode, agent.next_checkpoint_index
        );
        reset_events.send(EpisodeResetEvent {
            entity,
            episode: episode.episode,
            next_checkpoint: agent.next_checkpoint_index,
        });
    }
}
