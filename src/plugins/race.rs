use bevy::{
    ecs::schedule::{InternedScheduleLabel, ScheduleLabel},
    prelude::*,
};

use super::{
    BoostStateChanged, CheckpointReached, EpisodeResetEvent, ExplosionEvent, FreezeRequest,
    RaceSet, StepCompleteEvent,
};
use crate::{
    components::{
        AgentCommand, CheckpointTriggerEvent, CollisionComponent, CollisionEvent,
        EpisodeComponent, FlightState, Identifier, LastOutcome, Observation, Obstacle,
        PhysicsComponent, RaceAgent, SpatialComponent,
    },
    course::Course,
    observation::ObservationEncoder,
    resources::{PolicyHandles, RaceConfig, RaceSettings},
    systems::{
        command_input_system, contact_detection_system, episode_progress_system,
        explosion_sequence_system, flight_control_system, freeze_request_system,
        observation_system, outcome_report_system, physics_integrator_system,
        reset_episode_system,
    },
    utils::{RaceError, RngManager, SpawnRng},
};

/// Sets up one racing area: resources, events, the ordered tick systems and
/// the configured agents and obstacles.
///
/// Agents are spawned terminated, so their first episode starts on the
/// first tick.
pub struct RacePlugin {
    config: RaceConfig,
    settings: RaceSettings,
    course: Course,
    schedule: InternedScheduleLabel,
}

impl RacePlugin {
    /// Validate `config` and build the course it describes
    pub fn new(config: RaceConfig) -> Result<Self, RaceError> {
        let course = config.course.build_course()?;
        Self::with_course(config, course)
    }

    /// Use a course built elsewhere instead of the configured one
    pub fn with_course(config: RaceConfig, course: Course) -> Result<Self, RaceError> {
        let settings = RaceSettings::from_config(&config)?;
        Ok(Self {
            config,
            settings,
            course,
            schedule: FixedUpdate.intern(),
        })
    }

    /// Run the race systems in `schedule` instead of `FixedUpdate`
    pub fn in_schedule(mut self, schedule: impl ScheduleLabel) -> Self {
        self.schedule = schedule.intern();
        self
    }

    fn spawn_area(&self, world: &mut World) -> PolicyHandles {
        for obstacle in &self.config.course.obstacles {
            world.spawn((
                SpatialComponent::at_position(obstacle.position),
                Obstacle {
                    radius: obstacle.radius,
                },
            ));
        }

        let mut handles = PolicyHandles::default();
        for (slot, agent) in self.config.agents.iter().enumerate() {
            let (controller, handle) = agent.pilot.controller(&agent.name);
            if let Some(handle) = handle {
                handles.insert(handle);
            }
            info!(
                "Spawning agent {} in slot {} with {} pilot",
                agent.name,
                slot,
                controller.source_name()
            );
            world.spawn((
                Identifier::named(agent.name.clone()),
                RaceAgent::new(slot),
                SpatialComponent::default(),
                PhysicsComponent::new(self.config.flight.mass),
                FlightState::default(),
                self.config.flight.clone(),
                AgentCommand::default(),
                controller,
                EpisodeComponent::default(),
                CollisionComponent::new(self.config.collision_radius),
                Observation::default(),
                LastOutcome::default(),
            ));
        }
        handles
    }
}

impl Plugin for RacePlugin {
    fn build(&self, app: &mut App) {
        let schedule = self.schedule;
        let rng = RngManager::new(self.config.seed);

        app.insert_resource(self.settings.clone())
            .insert_resource(self.course.clone())
            .insert_resource(SpawnRng::new(&rng))
            .insert_resource(ObservationEncoder::new(self.config.perception.clone()))
            .add_event::<CollisionEvent>()
            .add_event::<CheckpointTriggerEvent>()
            .add_event::<CheckpointReached>()
            .add_event::<BoostStateChanged>()
            .add_event::<FreezeRequest>()
            .add_event::<ExplosionEvent>()
            .add_event::<StepCompleteEvent>()
            .add_event::<EpisodeResetEvent>()
            .configure_sets(
                schedule,
                (
                    RaceSet::Lifecycle,
                    RaceSet::Input,
                    RaceSet::Flight,
                    RaceSet::Physics,
                    RaceSet::Contacts,
                    RaceSet::Progress,
                    RaceSet::Report,
                )
                    .chain(),
            )
            .add_systems(
                schedule,
                (
                    (
                        reset_episode_system,
                        freeze_request_system,
                        explosion_sequence_system,
                    )
                        .chain()
                        .in_set(RaceSet::Lifecycle),
                    command_input_system.in_set(RaceSet::Input),
                    flight_control_system.in_set(RaceSet::Flight),
                    physics_integrator_system.in_set(RaceSet::Physics),
                    contact_detection_system.in_set(RaceSet::Contacts),
                    episode_progress_system.in_set(RaceSet::Progress),
                    (outcome_report_system, observation_system).in_set(RaceSet::Report),
                ),
            );

        let handles = self.spawn_area(app.world_mut());
        app.insert_resource(handles);

        info!(
            "Race area ready: {} agents, {} checkpoints, {} mode",
            self.config.agents.len(),
            self.course.len(),
            if self.settings.training_mode {
                "training"
            } else {
                "racing"
            }
        );
    }
}
