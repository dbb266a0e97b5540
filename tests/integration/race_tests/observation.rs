use aerorace::{
    components::{FlightState, Observation, SpatialComponent},
    observation::ObservationEncoder,
};
use approx::assert_relative_eq;
use nalgebra::Vector3;

use crate::common::{idle_racing_config, TestAppBuilder};

const VALUES_PER_RAY: usize = 4;

#[test]
fn test_observation_has_fixed_length() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .build();
    let agent = app.agent("agent_0");

    assert_eq!(app.resource::<ObservationEncoder>().len(), 61);
    assert_eq!(app.get::<Observation>(agent).0.len(), 61);

    app.run_steps(5);
    let observation = &app.get::<Observation>(agent).0;
    assert_eq!(observation.len(), 61);
    assert!(observation.iter().all(|v| v.is_finite()));
}

#[test]
fn test_forward_ray_sees_obstacle() {
    let mut app = TestAppBuilder::new()
        .with_config(idle_racing_config())
        .build();
    let agent = app.agent("agent_0");

    // Level, facing north, 100 m short of the obstacle's surface
    *app.get_mut::<FlightState>(agent) = FlightState::default();
    {
        let mut spatial = app.get_mut::<SpatialComponent>(agent);
        spatial.position = Vector3::new(245.0, 500.0, -100.0);
        spatial.velocity = Vector3::zeros();
    }
    app.run_frame();

    let position = app.get::<SpatialComponent>(agent).position;
    let observation = &app.get::<Observation>(agent).0;

    // Body-frame velocity after one tick of thrust
    assert_relative_eq!(observation[0], 2.0, epsilon = 1e-9);
    assert_relative_eq!(observation[1], 0.0, epsilon = 1e-9);

    // Upward fan has three rays; the fourth horizontal ray points straight ahead
    let start = 9 + (3 + 3) * VALUES_PER_RAY;
    let ray = &observation[start..start + VALUES_PER_RAY];
    let expected = (350.0 - position.x) / 250.0;
    assert_eq!(&ray[..3], &[1.0, 0.0, 0.0]);
    assert_relative_eq!(ray[3], expected, epsilon = 1e-9);

    for block in observation[9..].chunks(VALUES_PER_RAY) {
        let tags: f64 = block[..2].iter().sum();
        if block[2] == 1.0 {
            assert_eq!(block, &[0.0, 0.0, 1.0, 0.0]);
        } else {
            assert!(tags <= 1.0);
            assert!((0.0..=1.0).contains(&block[3]));
        }
    }
}
