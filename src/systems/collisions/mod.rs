mod detection;

pub use detection::contact_detection_system;
