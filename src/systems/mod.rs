mod agent;
mod collisions;
pub mod flight;
pub mod physics;

pub use agent::{
    command_input_system, episode_progress_system, explosion_sequence_system, freeze_body,
    freeze_request_system, observation_system, outcome_report_system, reset_episode_system,
};
pub use collisions::contact_detection_system;
pub use flight::{flight_control_system, thrust_force, update_attitude};
pub use physics::{integrate, physics_integrator_system};
