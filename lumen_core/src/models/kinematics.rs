// lumen_core/src/models/kinematics.rs

use crate::control::{SteeringLaw, SteeringOutput};
use crate::types::{ControlParams, Pose};

/// Point kinematics of the agent: rotate by `correction`, then move `speed`
/// pixels along the new heading. The turn applied in a tick therefore already
/// bends that tick's translation.
pub fn rotate_then_advance(pose: &mut Pose, correction_deg: f64, speed: f64) {
    pose.rotate(correction_deg);
    pose.advance(speed);
}

/// The live agent. Its pose is mutated once per simulation tick and nowhere else
/// except the explicit input hooks of the `Simulation` context.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AgentState {
    pub pose: Pose,
}

impl AgentState {
    pub fn new(pose: Pose) -> Self {
        Self { pose }
    }

    /// Advances the agent by one tick using an already sensed `brightness`.
    ///
    /// Returns `None` and leaves the pose untouched while paused.
    pub fn tick(
        &mut self,
        control: &ControlParams,
        brightness: f64,
        law: &dyn SteeringLaw,
    ) -> Option<SteeringOutput> {
        if control.paused {
            return None;
        }
        let output = law.evaluate(brightness, control.gain);
        rotate_then_advance(&mut self.pose, output.correction, control.speed);
        Some(output)
    }
}
