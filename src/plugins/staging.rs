use bevy::prelude::*;

/// Ordered stages of one race tick
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum RaceSet {
    /// Resets, freeze requests and explosion deadlines
    Lifecycle,
    /// Pull commands from each agent's controller
    Input,
    Flight,
    Physics,
    Contacts,
    /// Step bookkeeping, checkpoint crossings, rewards and termination
    Progress,
    /// Outcomes and observations
    Report,
}
