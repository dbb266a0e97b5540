use bevy::prelude::*;

use super::RacePlugin;
use crate::{resources::RaceConfig, utils::RaceError};

/// Build a headless app where every `App::update` runs exactly one race tick
pub fn setup_app(config: RaceConfig) -> Result<App, RaceError> {
    let plugin = RacePlugin::new(config)?.in_schedule(Update);
    let mut app = App::new();
    app.add_plugins(plugin);
    Ok(app)
}
