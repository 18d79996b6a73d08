// lumen_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::config::LumenConfig;
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::agent::AgentPlugin;
use crate::simulation::plugins::debugging::DebuggingPlugin;
use crate::simulation::plugins::input::InputPlugin;

// This prelude is for convenience for other files WITHIN the lumen_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
/// A binary only needs to add `DefaultPlugins` and this one plugin.
pub struct LumenSimulationPlugin {
    pub config: LumenConfig,
}

impl Plugin for LumenSimulationPlugin {
    fn build(&self, app: &mut App) {
        // The setup plugin reads the config while building, so it goes in first.
        app.insert_resource(self.config.clone());
        app.add_plugins((
            // Simulation context, fixed tick rate, background loading.
            SimulationSetupPlugin,
            // The agent sprite and the control loop tick.
            AgentPlugin,
            // Keyboard and mouse hooks.
            InputPlugin,
            // Sensor circle, predicted path and the readout panel.
            DebuggingPlugin,
        ));
    }
}
