mod assertions;
mod fixtures;

// Re-export
pub use assertions::{assert_position_eq, assert_spatial_valid, assert_terminated};
pub use fixtures::*;
pub use test_app::{TestApp, TestAppBuilder};
