pub mod components;
pub mod course;
pub mod observation;
pub mod plugins;
pub mod policy;
pub mod resources;
pub mod systems;
pub mod utils;
