pub mod config;
mod policy;
mod settings;

pub use config::{
    AgentConfig, CourseConfig, ExplosionConfig, ObstacleConfig, PilotConfig, RaceConfig,
    RewardConfig,
};
pub use policy::PolicyHandles;
pub use settings::RaceSettings;
