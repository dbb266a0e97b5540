use bevy::prelude::*;

use crate::{
    components::{EpisodeComponent, LastOutcome},
    plugins::StepCompleteEvent,
};

/// Publish each agent's reward and termination signal for this tick
pub fn outcome_report_system(
    mut query: Query<(Entity, &EpisodeComponent, &mut LastOutcome)>,
    mut outcome_events: EventWriter<StepCompleteEvent>,
) {
    for (entity, episode, mut last) in query.iter_mut() {
        let outcome = episode.outcome();
        last.0 = outcome;
        outcome_events.send(StepCompleteEvent { entity, outcome });
    }
}
