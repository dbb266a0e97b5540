mod action;
mod explosion;
mod freeze;
mod progress;
mod reset;
mod sending;
mod state;

pub use action::command_input_system;
pub use explosion::explosion_sequence_system;
pub use freeze::{freeze_body, freeze_request_system};
pub use progress::episode_progress_system;
pub use reset::reset_episode_system;
pub use sending::outcome_report_system;
pub use state::observation_system;
