use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};

use crate::{
    components::{
        AgentCommand, Command, ControlDeltas, EpisodeComponent, FlightAttitude, FlightConfig,
        FlightState, PhysicsComponent, SpatialComponent,
    },
    resources::RaceSettings,
    utils::{clamp_angle, move_towards, normalize_angle},
};

/// Apply one tick of a command to the flight state.
///
/// Roll is never commanded directly: while turning the aircraft banks
/// against the yaw command, otherwise it levels out in proportion to the
/// current bank.
pub fn update_attitude(state: &mut FlightState, command: &Command, config: &FlightConfig, dt: f64) {
    let attitude = state.attitude;
    let roll_change = if command.yaw() == 0.0 {
        -attitude.roll / config.max_roll_angle
    } else {
        -command.yaw()
    };
    state.commanded = ControlDeltas {
        pitch: command.pitch(),
        yaw: command.yaw(),
        roll: roll_change,
    };

    let max_delta = config.smoothing_rate * dt;
    state.smoothed = ControlDeltas {
        pitch: move_towards(state.smoothed.pitch, state.commanded.pitch, max_delta),
        yaw: move_towards(state.smoothed.yaw, state.commanded.yaw, max_delta),
        roll: move_towards(state.smoothed.roll, state.commanded.roll, max_delta),
    };

    let pitch = attitude.pitch + state.smoothed.pitch * config.pitch_speed * dt;
    let yaw = attitude.yaw + state.smoothed.yaw * config.yaw_speed * dt;
    let roll = attitude.roll + state.smoothed.roll * config.roll_speed * dt;

    state.attitude = FlightAttitude {
        pitch: clamp_angle(pitch, -config.max_pitch_angle, config.max_pitch_angle),
        yaw: normalize_angle(yaw),
        roll: clamp_angle(roll, -config.max_roll_angle, config.max_roll_angle),
    };
}

/// Forward thrust in the world frame
pub fn thrust_force(attitude: &UnitQuaternion<f64>, boost: bool, config: &FlightConfig) -> Vector3<f64> {
    let multiplier = if boost { config.boost_multiplier } else { 1.0 };
    attitude * Vector3::x() * config.thrust * multiplier
}

/// Steer every flying agent and queue its thrust for the integrator
pub fn flight_control_system(
    mut query: Query<(
        &AgentCommand,
        &FlightConfig,
        &EpisodeComponent,
        &mut FlightState,
        &mut SpatialComponent,
        &mut PhysicsComponent,
    )>,
    settings: Res<RaceSettings>,
) {
    let dt = settings.time_step;

    for (command, config, episode, mut flight, mut spatial, mut physics) in query.iter_mut() {
        if !episode.is_running() {
            continue;
        }

        update_attitude(&mut flight, &command.0, config, dt);
        spatial.attitude = flight.attitude.to_quaternion();

        physics.add_force(thrust_force(&spatial.attitude, flight.boost, config));
    }
}
