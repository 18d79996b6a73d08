// lumen_core/src/types.rs

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::config::ControlsConfig;
use crate::error::SimulationError;

// --- Core Pose ---

/// Position and heading of the agent in raster coordinates.
///
/// The frame matches the background image: `x` grows to the right, `y` grows
/// downward and the origin is the top-left pixel. A heading of 0° points along
/// +x and positive headings turn toward +y, i.e. clockwise on screen.
///
/// The heading is never wrapped into `[0, 360)`. It only ever feeds `sin`/`cos`,
/// so an unbounded value is harmless and keeps accumulated turns observable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point2<f64>,
    pub heading_deg: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading_deg: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            heading_deg,
        }
    }

    /// Unit vector pointing along the current heading.
    pub fn forward(&self) -> Vector2<f64> {
        let rad = self.heading_deg.to_radians();
        Vector2::new(rad.cos(), rad.sin())
    }

    /// Moves `distance` pixels along the current heading.
    pub fn advance(&mut self, distance: f64) {
        self.position += self.forward() * distance;
    }

    pub fn rotate(&mut self, delta_deg: f64) {
        self.heading_deg += delta_deg;
    }
}

impl Default for Pose {
    fn default() -> Self {
        // Centre of the default 1280x720 canvas, facing "up" on screen.
        Self::new(640.0, 360.0, -90.0)
    }
}

// --- Control Parameters ---

/// The motion parameters the input layer hands to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlParams {
    /// Distance travelled per tick, in pixels.
    pub speed: f64,
    /// Degrees of turn per percentage point of brightness error.
    pub gain: f64,
    pub paused: bool,
}

impl ControlParams {
    pub fn new(speed: f64, gain: f64) -> Self {
        Self {
            speed,
            gain,
            paused: false,
        }
    }

    /// Rejects NaN and infinite values before they can reach the pose.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.speed.is_finite() {
            return Err(SimulationError::NonFiniteParameter {
                name: "speed",
                value: self.speed,
            });
        }
        if !self.gain.is_finite() {
            return Err(SimulationError::NonFiniteParameter {
                name: "gain",
                value: self.gain,
            });
        }
        Ok(())
    }
}

// --- Slider Positions ---

/// Integer positions of the speed and gain sliders of the control panel.
///
/// The panel works in whole slider steps; the physical parameters are the
/// positions multiplied by the configured scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::prelude::Resource))]
pub struct SliderPositions {
    pub speed: u32,
    pub gain: u32,
}

impl SliderPositions {
    pub fn new(speed: u32, gain: u32) -> Self {
        Self { speed, gain }
    }

    /// Moves the speed slider by `steps`, staying within `[0, max]`.
    pub fn nudge_speed(&mut self, steps: i32, max: u32) {
        self.speed = nudge(self.speed, steps, max);
    }

    /// Moves the gain slider by `steps`, staying within `[0, max]`.
    pub fn nudge_gain(&mut self, steps: i32, max: u32) {
        self.gain = nudge(self.gain, steps, max);
    }

    /// Converts slider positions into control parameters, keeping `paused`.
    pub fn to_params(&self, controls: &ControlsConfig, paused: bool) -> ControlParams {
        ControlParams {
            speed: self.speed as f64 * controls.speed_scale,
            gain: self.gain as f64 * controls.gain_scale,
            paused,
        }
    }
}

fn nudge(value: u32, steps: i32, max: u32) -> u32 {
    let moved = value as i64 + steps as i64;
    moved.clamp(0, max as i64) as u32
}
