pub mod logging;
pub mod ring_gestures;
pub mod settings;
