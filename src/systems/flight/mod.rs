mod controller;

pub use controller::{flight_control_system, thrust_force, update_attitude};
