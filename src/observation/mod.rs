pub mod encoder;
pub mod perception;

pub use encoder::{ObservationEncoder, PerceptionConfig, RayFan, KINEMATIC_OBSERVATIONS};
pub use perception::{DetectableTag, RayHit, RayPerception, SceneGeometry, SceneView};
