// lumen_core/src/config.rs

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Pose, SliderPositions};

/// Largest accepted sensor square, in pixels. The sampler allocates `side²`
/// entries per reading.
pub const MAX_AREA_SIZE: u32 = 4096;

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

/// # SimulationConfig
/// Every constant the sensing, steering, kinematics and prediction code share.
/// One value of this struct is handed to each component instead of relying on
/// module-level constants, so the sensor circle that is drawn and the one that
/// is sampled can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Canvas size in pixels. The background raster is expected to match it.
    pub canvas: CanvasConfig,
    pub sensor: SensorConfig,
    pub steering: SteeringConfig,
    pub agent: AgentConfig,
    pub controls: ControlsConfig,
    pub prediction: PredictionConfig,
    /// Rate of the simulation tick in Hz.
    pub tick_hz: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            sensor: SensorConfig::default(),
            steering: SteeringConfig::default(),
            agent: AgentConfig::default(),
            controls: ControlsConfig::default(),
            prediction: PredictionConfig::default(),
            tick_hz: 30.0,
        }
    }
}

impl SimulationConfig {
    /// Checks the values that would otherwise produce NaN poses or a stalled schedule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("tick_hz", self.tick_hz)?;
        if self.sensor.area_size > MAX_AREA_SIZE {
            return Err(ConfigError::new(
                "sensor.area_size",
                format!("must be at most {MAX_AREA_SIZE}, got {}", self.sensor.area_size),
            ));
        }
        finite("sensor.offset", self.sensor.offset)?;
        finite("steering.black", self.steering.black)?;
        finite("steering.white", self.steering.white)?;
        finite("controls.speed_scale", self.controls.speed_scale)?;
        finite("controls.gain_scale", self.controls.gain_scale)?;
        if self.controls.gain_scale == 0.0 {
            return Err(ConfigError::new(
                "controls.gain_scale",
                "must not be zero",
            ));
        }
        finite("agent.heading_step_deg", self.agent.heading_step_deg)?;
        finite("agent.initial_pose.x", self.agent.initial_pose.position.x)?;
        finite("agent.initial_pose.y", self.agent.initial_pose.position.y)?;
        finite(
            "agent.initial_pose.heading_deg",
            self.agent.initial_pose.heading_deg,
        )?;
        positive("prediction.speed_divisor", self.prediction.speed_divisor)?;
        if self.controls.initial.speed > self.controls.slider_max
            || self.controls.initial.gain > self.controls.slider_max
        {
            return Err(ConfigError::new(
                "controls.initial",
                format!("slider positions must be within 0..={}", self.controls.slider_max),
            ));
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::new(field, format!("must be finite, got {value}")))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::new(field, format!("must be positive, got {value}")))
    }
}

// =========================================================================
// == Configuration Sub-Structs ==
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Geometry of the forward-facing brightness sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorConfig {
    /// Side of the sampled square in pixels; the circular mask is inscribed in it.
    pub area_size: u32,
    /// Stand-off distance of the window centre ahead of the agent, in pixels.
    pub offset: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            area_size: 50,
            offset: 30.0,
        }
    }
}

impl SensorConfig {
    pub fn radius(&self) -> f64 {
        self.area_size as f64 / 2.0
    }
}

/// Reference brightness levels, in percent. The controller steers toward the
/// level half-way between them, i.e. the edge of a dark line on a light floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SteeringConfig {
    pub black: f64,
    pub white: f64,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            black: 0.0,
            white: 100.0,
        }
    }
}

impl SteeringConfig {
    pub fn midpoint(&self) -> f64 {
        (self.black + self.white) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    pub initial_pose: Pose,
    /// Heading change applied by a single turn-left/turn-right key press.
    pub heading_step_deg: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial_pose: Pose::default(),
            heading_step_deg: 10.0,
        }
    }
}

/// Mapping between control panel slider steps and physical parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlsConfig {
    /// Pixels per tick for one step of the speed slider.
    pub speed_scale: f64,
    /// Degrees per brightness percent for one step of the gain slider.
    pub gain_scale: f64,
    pub slider_max: u32,
    pub initial: SliderPositions,
    pub start_paused: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            speed_scale: 0.06,
            gain_scale: 0.02,
            slider_max: 100,
            initial: SliderPositions::default(),
            start_paused: false,
        }
    }
}

/// Parameters of the look-ahead preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictionConfig {
    pub horizon_steps: usize,
    /// The preview travels at `speed / speed_divisor` per step, giving a
    /// shorter, denser path than the real motion would.
    pub speed_divisor: f64,
    pub arrow_size: f64,
    /// Half-angle between the arrowhead's tip and its back corners, in radians.
    pub arrow_spread_rad: f64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            horizon_steps: 150,
            speed_divisor: 3.0,
            arrow_size: 10.0,
            arrow_spread_rad: 2.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.steering.midpoint(), 50.0);
        assert_eq!(config.sensor.radius(), 25.0);
    }

    #[test]
    fn validate_names_the_offending_field() {
        let mut config = SimulationConfig::default();
        config.prediction.speed_divisor = 0.0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "prediction.speed_divisor");

        let mut config = SimulationConfig::default();
        config.tick_hz = f64::NAN;
        assert_eq!(config.validate().unwrap_err().field, "tick_hz");

        let mut config = SimulationConfig::default();
        config.controls.initial.gain = 101;
        assert_eq!(config.validate().unwrap_err().field, "controls.initial");
    }

    #[test]
    fn sensor_area_is_capped() {
        let mut config = SimulationConfig::default();
        config.sensor.area_size = MAX_AREA_SIZE;
        assert!(config.validate().is_ok());
        config.sensor.area_size = 65_536;
        assert_eq!(config.validate().unwrap_err().field, "sensor.area_size");
    }
}
