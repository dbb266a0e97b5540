use bevy::prelude::*;
use std::fmt;

/// Stable name used in logs and reports
#[derive(Component, Hash, Eq, PartialEq, Debug, Clone)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Marks an entity as a racing agent and tracks its course progress
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceAgent {
    /// Position in the area's agent roster, used for the spawn offset
    pub slot: usize,
    pub next_checkpoint_index: usize,
}

impl RaceAgent {
    pub fn new(slot: usize) -> Self {
        Self {
            slot,
            next_checkpoint_index: 0,
        }
    }
}

/// Latest encoded observation vector
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Observation(pub Vec<f64>);
