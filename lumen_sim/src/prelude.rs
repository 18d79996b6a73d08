// lumen_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the entire lumen_core prelude so you can easily access
// pure types like `Pose`, `Simulation`, `SteeringLaw`, etc.
pub use lumen_core::prelude::*;

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::config::LumenConfig;
pub use crate::simulation::core::app_state::{AppState, SimulationSet};
pub use crate::simulation::core::transforms::RasterFrame;
