// lumen_core/src/control/proportional.rs

use crate::config::SteeringConfig;
use crate::control::SteeringLaw;

/// Single-term proportional controller: `correction = (midpoint - brightness) * gain`.
///
/// There is no integral or derivative term. The control panel labels the output
/// "PID angle" but only the P term exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalSteering {
    pub midpoint: f64,
}

impl ProportionalSteering {
    pub fn new(midpoint: f64) -> Self {
        Self { midpoint }
    }

    pub fn from_config(steering: &SteeringConfig) -> Self {
        Self::new(steering.midpoint())
    }
}

impl Default for ProportionalSteering {
    fn default() -> Self {
        Self::from_config(&SteeringConfig::default())
    }
}

impl SteeringLaw for ProportionalSteering {
    fn setpoint(&self) -> f64 {
        self.midpoint
    }

    fn correction(&self, brightness: f64, gain: f64) -> f64 {
        self.error(brightness) * gain
    }
}
