pub mod agent;
pub mod course;
pub mod race;

pub use agent::{AgentConfig, PilotConfig};
pub use course::{CourseConfig, ObstacleConfig};
pub use race::{ExplosionConfig, RaceConfig, RewardConfig};
