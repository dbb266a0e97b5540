use bevy::prelude::*;

use crate::{
    components::{AgentCommand, Controller, EpisodeComponent, FlightState, RaceAgent, SpatialComponent},
    course::{vector_to_next, Course},
    plugins::BoostStateChanged,
    policy::PilotContext,
};

/// Ask each agent's controller for this tick's command.
///
/// Frozen agents still receive commands so that the boost state keeps
/// tracking the pilot's input.
pub fn command_input_system(
    mut query: Query<(
        Entity,
        &RaceAgent,
        &SpatialComponent,
        &EpisodeComponent,
        &mut Controller,
        &mut AgentCommand,
        &mut FlightState,
    )>,
    course: Res<Course>,
    mut boost_events: EventWriter<BoostStateChanged>,
) {
    for (entity, agent, spatial, episode, mut controller, mut command, mut flight) in
        query.iter_mut()
    {
        if episode.is_terminated() {
            continue;
        }

        let context = PilotContext {
            step: episode.step_count,
            to_next: vector_to_next(spatial, &course, agent.next_checkpoint_index),
            attitude: flight.attitude,
        };
        command.0 = controller.next_command(&context);

        let boost = command.0.boost();
        if flight.boost != boost {
            flight.boost = boost;
            debug!(
                "Boost {} for {} pilot",
                if boost { "on" } else { "off" },
                controller.source_name()
            );
            boost_events.send(BoostStateChanged {
                entity,
                active: boost,
            });
        }
    }
}
