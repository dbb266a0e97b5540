use bevy::prelude::*;
use nalgebra::Vector3;

use crate::{
    components::{EpisodeComponent, FlightState, Identifier, PhysicsComponent, SpatialComponent},
    plugins::{BoostStateChanged, FreezeRequest},
    resources::RaceSettings,
};

/// Apply host freeze and thaw requests. Requests made in training are
/// rejected and logged without touching the agent.
pub fn freeze_request_system(
    mut requests: EventReader<FreezeRequest>,
    mut query: Query<(
        &Identifier,
        &mut EpisodeComponent,
        &mut PhysicsComponent,
        &mut SpatialComponent,
        &mut FlightState,
    )>,
    settings: Res<RaceSettings>,
    mut boost_events: EventWriter<BoostStateChanged>,
) {
    for request in requests.read() {
        let Ok((id, mut episode, mut physics, mut spatial, mut flight)) =
            query.get_mut(request.entity)
        else {
            warn!("Freeze request for unknown agent {}", request.entity);
            continue;
        };

        let action = if request.frozen { "freeze" } else { "thaw" };
        let result = if request.frozen {
            episode.freeze(&settings)
        } else {
            episode.thaw(&settings)
        };
        if let Err(e) = result {
            warn!("Ignoring {} request for agent {}: {}", action, id, e);
            continue;
        }

        if request.frozen {
            freeze_body(&mut physics, &mut spatial);
            if flight.boost {
                flight.boost = false;
                boost_events.send(BoostStateChanged {
                    entity: request.entity,
                    active: false,
                });
            }
        } else if episode.is_running() {
            physics.wake_up();
        }
        info!("Agent {} {:?} after {} request", id, episode.state, action);
    }
}

/// Stop a body in place until it is woken again
pub fn freeze_body(physics: &mut PhysicsComponent, spatial: &mut SpatialComponent) {
    physics.sleep();
    spatial.velocity = Vector3::zeros();
}
