// lumen_sim/src/simulation/plugins/debugging/components.rs

use bevy::prelude::Component;

/// A marker component that enables the sensor and look-ahead overlays for the
/// agent it's attached to.
///
/// `draw_sensor_window` and `draw_predicted_path` only draw for agents that
/// carry it; F1 adds or removes it.
#[derive(Component)]
pub struct ShowDebugGizmos;

/// Marker for the text node of the readout panel.
#[derive(Component)]
pub struct ReadoutPanel;

/// Marker for the filled triangle drawn at the end of the predicted path.
#[derive(Component)]
pub struct PredictionArrowhead;
