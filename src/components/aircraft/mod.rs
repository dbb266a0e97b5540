pub mod config;
pub mod controls;
pub mod state;

pub use config::FlightConfig;
pub use controls::{AgentCommand, Command};
pub use state::{ControlDeltas, FlightAttitude, FlightState};
