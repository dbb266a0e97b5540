pub const MAX_TIMESTEP: f64 = 1.0 / 10.0; // Maximum simulation timestep
pub const MIN_TIMESTEP: f64 = 1.0 / 1000.0; // Minimum simulation timestep

/// Reset parameter holding the distance-based checkpoint trigger radius
pub const CHECKPOINT_RADIUS_PARAM: &str = "checkpoint_radius";

/// Rate at which a smoothed control delta tracks its commanded value (1/s)
pub const CONTROL_SMOOTHING_RATE: f64 = 2.0;

/// Max step budget per training episode when none is configured
pub const DEFAULT_TRAINING_MAX_STEPS: u32 = 5000;
