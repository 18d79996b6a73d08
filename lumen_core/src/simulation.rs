// lumen_core/src/simulation.rs

use crate::config::SimulationConfig;
use crate::control::{ProportionalSteering, SteeringLaw, SteeringOutput};
use crate::error::{SensingError, SimulationError};
use crate::models::kinematics::AgentState;
use crate::models::perception::{sample_brightness, SensorWindow};
use crate::prediction::{PredictedPath, TrajectoryPredictor};
use crate::raster::RasterBuffer;
use crate::types::{ControlParams, Pose, SliderPositions};

/// What a single simulation tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// `None` when the tick was skipped because the simulation is paused.
    pub steering: Option<SteeringOutput>,
    /// The sensor saw no pixels and the last known brightness was used instead.
    pub held_brightness: bool,
    pub pose: Pose,
}

/// A diagnostic reading at the live pose, for the control panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub brightness: u8,
    pub error: f64,
    pub correction: f64,
    /// The correction expressed in gain-slider units, as the panel displays it.
    pub panel_angle: f64,
}

/// The explicit simulation context.
///
/// One value owns everything the control loop reads or writes: the background
/// raster, the live agent, the current control parameters, the steering law
/// and the shared configuration. The tick, the render-side queries and the
/// input hooks all go through it, so there is no ambient mutable state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::prelude::Resource))]
pub struct Simulation {
    config: SimulationConfig,
    raster: Option<RasterBuffer>,
    agent: AgentState,
    control: ControlParams,
    law: Box<dyn SteeringLaw>,
    last_brightness: Option<u8>,
}

impl Simulation {
    /// Creates a context from `config`. It stays not-ready until a raster is loaded.
    pub fn new(config: SimulationConfig) -> Self {
        let law = Box::new(ProportionalSteering::from_config(&config.steering));
        Self::with_law(config, law)
    }

    pub fn with_law(config: SimulationConfig, law: Box<dyn SteeringLaw>) -> Self {
        let control = config
            .controls
            .initial
            .to_params(&config.controls, config.controls.start_paused);
        Self {
            agent: AgentState::new(config.agent.initial_pose),
            control,
            law,
            raster: None,
            last_brightness: None,
            config,
        }
    }

    pub fn load_raster(&mut self, raster: RasterBuffer) {
        self.raster = Some(raster);
        self.last_brightness = None;
    }

    pub fn is_ready(&self) -> bool {
        self.raster.is_some()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn pose(&self) -> &Pose {
        &self.agent.pose
    }

    pub fn control(&self) -> &ControlParams {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut ControlParams {
        &mut self.control
    }

    /// Recomputes speed and gain from slider positions, keeping the pause flag.
    pub fn apply_sliders(&mut self, sliders: &SliderPositions) {
        self.control = sliders.to_params(&self.config.controls, self.control.paused);
    }

    pub fn sensor_window(&self) -> SensorWindow {
        SensorWindow::from_pose(&self.agent.pose, &self.config.sensor)
    }

    // --- Input hooks ---

    /// Moves the agent to `(x, y)` without changing its heading.
    ///
    /// Non-finite coordinates are rejected and leave the pose untouched.
    pub fn set_pose(&mut self, x: f64, y: f64) -> Result<(), SimulationError> {
        finite_pose("x", x)?;
        finite_pose("y", y)?;
        self.agent.pose.position.x = x;
        self.agent.pose.position.y = y;
        Ok(())
    }

    pub fn adjust_heading(&mut self, delta_deg: f64) -> Result<(), SimulationError> {
        finite_pose("heading_deg", self.agent.pose.heading_deg + delta_deg)?;
        self.agent.pose.rotate(delta_deg);
        Ok(())
    }

    /// Flips the pause flag and returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.control.paused = !self.control.paused;
        self.control.paused
    }

    // --- Tick and render-side queries ---

    /// Senses, steers and moves the agent once.
    ///
    /// When the sensor window has left the raster the tick does not fail: it
    /// steers with the last brightness that was successfully sensed, or with
    /// the setpoint (no turn) if nothing was ever sensed.
    pub fn tick(&mut self) -> Result<TickReport, SimulationError> {
        let raster = self.raster.as_ref().ok_or(SimulationError::NotReady)?;
        self.control.validate()?;

        if self.control.paused {
            return Ok(TickReport {
                steering: None,
                held_brightness: false,
                pose: self.agent.pose,
            });
        }

        let (brightness, held_brightness) =
            match sample_brightness(raster, &self.agent.pose, &self.config.sensor) {
                Ok(sample) => {
                    self.last_brightness = Some(sample.percentage);
                    (sample.percentage as f64, false)
                }
                Err(SensingError::NoSamplablePixels) => (
                    self.last_brightness
                        .map_or(self.law.setpoint(), |b| b as f64),
                    true,
                ),
            };

        let steering = self
            .agent
            .tick(&self.control, brightness, self.law.as_ref());
        Ok(TickReport {
            steering,
            held_brightness,
            pose: self.agent.pose,
        })
    }

    /// Brightness, error and correction at the live pose.
    pub fn sense(&self) -> Result<SensorReading, SimulationError> {
        let raster = self.raster.as_ref().ok_or(SimulationError::NotReady)?;
        self.control.validate()?;
        let sample = sample_brightness(raster, &self.agent.pose, &self.config.sensor)?;
        let output = self
            .law
            .evaluate(sample.percentage as f64, self.control.gain);
        Ok(SensorReading {
            brightness: sample.percentage,
            error: output.error,
            correction: output.correction,
            panel_angle: output.correction / self.config.controls.gain_scale,
        })
    }

    /// The look-ahead preview from the live pose.
    pub fn predict(&self) -> Result<PredictedPath, SimulationError> {
        self.predict_steps(self.config.prediction.horizon_steps)
    }

    pub fn predict_steps(&self, horizon_steps: usize) -> Result<PredictedPath, SimulationError> {
        let raster = self.raster.as_ref().ok_or(SimulationError::NotReady)?;
        self.control.validate()?;
        let predictor = TrajectoryPredictor::new(self.config.sensor, self.config.prediction);
        let path = predictor.predict(
            raster,
            &self.agent.pose,
            &self.control,
            self.law.as_ref(),
            horizon_steps,
        )?;
        Ok(path)
    }
}

fn finite_pose(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::NonFinitePose { name, value })
    }
}
