use aerorace::{
    components::{AgentCommand, Command, FlightState, RaceAgent, SpatialComponent},
    course::vector_to_next,
    plugins::BoostStateChanged,
    policy::ActionSpace,
    resources::{PilotConfig, PolicyHandles},
};

use crate::common::{external_pilot, idle_racing_config, training_config, TestAppBuilder};

#[test]
fn test_external_policy_drives_agent() {
    let mut app = TestAppBuilder::new().with_config(training_config()).build();
    let agent = app.agent("agent_0");
    let handle = app
        .resource::<PolicyHandles>()
        .get("agent_0")
        .cloned()
        .expect("external agent has a handle");

    // Pitch up with boost
    handle.submit(&[1.0, 0.0, 1.0]).unwrap();
    app.run_frame();
    assert_eq!(
        app.get::<AgentCommand>(agent).0,
        Command::new(1.0, 0.0, true)
    );
    assert!(app.get::<FlightState>(agent).boost);
    let boosts = app.events::<BoostStateChanged>();
    assert_eq!(boosts.len(), 1);
    assert!(boosts[0].active);

    // Held until the next action arrives
    app.run_frame();
    assert!(app.events::<BoostStateChanged>().is_empty());
    assert!(app.get::<AgentCommand>(agent).0.boost());

    handle.submit(&[0.0, 2.0, 0.0]).unwrap();
    app.run_frame();
    assert_eq!(
        app.get::<AgentCommand>(agent).0,
        Command::new(0.0, -1.0, false)
    );
    let boosts = app.events::<BoostStateChanged>();
    assert_eq!(boosts.len(), 1);
    assert!(!boosts[0].active);
}

#[test]
fn test_only_external_agents_have_handles() {
    let app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .with_agents(2, PilotConfig::default())
        .build();
    assert!(app.resource::<PolicyHandles>().is_empty());

    let app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .with_agents(3, external_pilot())
        .build();
    let handles = app.resource::<PolicyHandles>();
    assert_eq!(handles.len(), 3);
    assert!(handles.get("agent_2").is_some());
}

#[test]
fn test_heuristic_pilot_turns_toward_next_checkpoint() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .with_agents(1, PilotConfig::default())
        .build();
    let agent = app.agent("agent_0");

    let bearing_error = |app: &crate::common::TestApp| {
        let next = app.get::<RaceAgent>(agent).next_checkpoint_index;
        let to_next = vector_to_next(app.get::<SpatialComponent>(agent), app.course(), next);
        to_next.y.atan2(to_next.x).to_degrees().abs()
    };

    let initial = bearing_error(&app);
    assert!(initial > 10.0);
    app.run_steps(20);
    assert!(bearing_error(&app) < initial);
}

#[test]
fn test_scripted_pilot_pitch_is_limited() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .with_agents(
            1,
            PilotConfig::Scripted {
                actions: vec![vec![1.0, 0.0, 0.0]],
                action_space: ActionSpace::DiscreteBranches,
                looped: true,
            },
        )
        .build();
    let agent = app.agent("agent_0");

    app.run_steps(100);
    assert_eq!(app.get::<AgentCommand>(agent).0, Command::new(1.0, 0.0, false));
    let pitch = app.get::<FlightState>(agent).attitude.pitch;
    assert!(pitch > 40.0 && pitch <= 45.0, "pitch {}", pitch);
}
