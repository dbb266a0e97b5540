mod events;
mod race;
mod staging;
mod startup;

pub use events::{
    BoostStateChanged, CheckpointReached, EpisodeResetEvent, ExplosionEvent, ExplosionStage,
    FreezeRequest, StepCompleteEvent,
};
pub use race::RacePlugin;
pub use staging::RaceSet;
pub use startup::setup_app;
