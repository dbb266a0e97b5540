use bevy::prelude::*;

use crate::{
    components::Command,
    policy::{CommandSource, PilotContext},
};

/// Source of an agent's per-tick commands
#[derive(Component)]
pub struct Controller {
    source: Box<dyn CommandSource>,
}

impl Controller {
    pub fn new(source: impl CommandSource) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    pub fn next_command(&mut self, context: &PilotContext) -> Command {
        self.source.next_command(context)
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}
