// lumen_sim/src/simulation/plugins/debugging/mod.rs

use bevy::prelude::*;

// --- Sub-modules for organization ---
mod components;
mod systems;

// Re-export the marker so the agent plugin can enable overlays at spawn time.
pub use components::{PredictionArrowhead, ReadoutPanel, ShowDebugGizmos};

use crate::prelude::{AppState, SimulationSet};

/// Overlays drawn on top of the simulation: the sensor window, the predicted
/// path with its arrowhead, and the readout panel.
pub struct DebuggingPlugin;

impl Plugin for DebuggingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::Running),
            (
                systems::spawn_readout_panel,
                systems::spawn_prediction_arrowhead,
            ),
        )
            .add_systems(
                Update,
                (
                    // Global hotkey toggle
                    systems::toggle_overlays,
                    // The actual drawing systems
                    systems::draw_sensor_window,
                    systems::draw_predicted_path,
                    systems::place_prediction_arrowhead,
                    systems::update_readout_panel,
                )
                    .in_set(SimulationSet::Render)
                    .run_if(in_state(AppState::Running)),
            );
    }
}
