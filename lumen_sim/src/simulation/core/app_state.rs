// lumen_sim/src/simulation/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of the application's lifecycle.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// The initial state. The background raster is being loaded; nothing is
    /// sensed or ticked until it is ready.
    #[default]
    AssetLoading,

    /// The raster is loaded into the `Simulation`. The tick and render loops run.
    Running,
}

// =========================================================================
// == Main Simulation Sets (The "Data Flow Graph") ==
// =========================================================================

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Keyboard and mouse handling. Runs in `Update`, before rendering, so a
    /// click or key press is visible in the same frame.
    Input,
    /// The fixed-rate control loop tick. Runs in `FixedUpdate`.
    Tick,
    /// Sprite sync, overlays and the readout panel. Runs in `Update`.
    Render,
}
