pub mod agent;
pub mod aircraft;
pub mod collision;
pub mod controller;
pub mod episode;
pub mod physics;
pub mod spatial;

pub use agent::{Identifier, Observation, RaceAgent};
pub use aircraft::{
    AgentCommand, Command, ControlDeltas, FlightAttitude, FlightConfig, FlightState,
};
pub use collision::{
    CheckpointTriggerEvent, CollisionComponent, CollisionEvent, ContactKind, Obstacle,
};
pub use controller::Controller;
pub use episode::{
    CollisionResponse, EpisodeComponent, EpisodeState, EpisodeStatus, ExplosionPhase,
    ExplosionStep, LastOutcome, StepOutcome, TerminationReason,
};
pub use physics::PhysicsComponent;
pub use spatial::SpatialComponent;
