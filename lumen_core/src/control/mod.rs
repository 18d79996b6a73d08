// lumen_core/src/control/mod.rs

use dyn_clone::DynClone;
use std::fmt::Debug;

// --- STEERING LAW TRAIT ---
// Maps a brightness reading to a heading correction. `delta = f(b, k)`
/// The contract for any controller that turns a brightness reading into a
/// heading correction. Implementations must be pure: the same reading and gain
/// always give the same correction, which lets the predictor replay the law
/// without touching the live agent.
pub trait SteeringLaw: DynClone + Debug + Send + Sync {
    /// The brightness level, in percent, the law tries to hold under the sensor.
    fn setpoint(&self) -> f64;

    /// Signed distance from the setpoint: positive when the sensor sees too little light.
    fn error(&self, brightness: f64) -> f64 {
        self.setpoint() - brightness
    }

    /// Heading change in degrees for one tick.
    fn correction(&self, brightness: f64, gain: f64) -> f64;

    /// Evaluates the law and keeps the intermediate values for diagnostics.
    fn evaluate(&self, brightness: f64, gain: f64) -> SteeringOutput {
        SteeringOutput {
            brightness,
            error: self.error(brightness),
            correction: self.correction(brightness, gain),
        }
    }
}

// This macro automatically generates the implementation of `Clone` for `Box<dyn SteeringLaw>`.
dyn_clone::clone_trait_object!(SteeringLaw);

/// The values one evaluation of a `SteeringLaw` produced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteeringOutput {
    pub brightness: f64,
    pub error: f64,
    /// Degrees added to the heading.
    pub correction: f64,
}

mod proportional;

pub use proportional::ProportionalSteering;
