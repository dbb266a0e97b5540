use bevy::prelude::*;

use crate::{
    components::{PhysicsComponent, SpatialComponent},
    resources::RaceSettings,
};

/// Advance every awake body by one tick and drop the forces it accumulated
pub fn physics_integrator_system(
    mut query: Query<(&mut PhysicsComponent, &mut SpatialComponent)>,
    settings: Res<RaceSettings>,
) {
    let dt = settings.time_step;

    for (mut physics, mut spatial) in query.iter_mut() {
        if !physics.sleeping {
            integrate(&physics, &mut spatial, dt);
        }
        physics.clear_forces();
    }
}

/// Semi-implicit Euler step: velocity first, then position with the new velocity
pub fn integrate(physics: &PhysicsComponent, spatial: &mut SpatialComponent, dt: f64) {
    let acceleration = physics.net_force / physics.mass;
    spatial.velocity += acceleration * dt;
    spatial.position += spatial.velocity * dt;
}
