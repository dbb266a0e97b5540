use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaceError {
    #[error("Course has no checkpoints (path spans {max_unit} units)")]
    EmptyCourse { max_unit: f64 },

    #[error("Invalid race path: {0}")]
    InvalidPath(String),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Freeze/thaw is not supported in training mode")]
    FreezeInTraining,

    #[error("Checkpoint index {index} out of range for course of {len} checkpoints")]
    CheckpointOutOfRange { index: usize, len: usize },

    #[error("Policy channel for agent '{0}' is disconnected")]
    PolicyDisconnected(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("Missing reset parameter: {0}")]
    MissingResetParameter(String),

    #[error("Invalid parameter '{name}' with value '{value}'")]
    InvalidParameter { name: String, value: String },

    #[error("No agents configured")]
    NoAgents,
}

impl ConfigError {
    pub fn invalid(name: &str, value: impl ToString) -> Self {
        ConfigError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
