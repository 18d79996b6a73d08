// lumen_core/src/prediction.rs

use nalgebra::Point2;

use crate::config::{PredictionConfig, SensorConfig};
use crate::control::SteeringLaw;
use crate::error::SensingError;
use crate::models::perception::compute_brightness;
use crate::raster::RasterBuffer;
use crate::types::{ControlParams, Pose};

/// The look-ahead preview drawn in front of the agent.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedPath {
    pub points: Vec<Point2<f64>>,
    /// Heading after the last simulated step, used to orient the arrowhead.
    pub final_heading_deg: f64,
}

impl PredictedPath {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tip and two back corners of the direction arrow at the end of the path.
    pub fn arrowhead(&self, size: f64, spread_rad: f64) -> Option<[Point2<f64>; 3]> {
        let anchor = *self.points.last()?;
        Some(arrowhead_vertices(anchor, self.final_heading_deg, size, spread_rad))
    }
}

/// Vertices of a direction arrow anchored at `anchor`: the tip lies `size`
/// ahead along `heading_deg`, the back corners `size` away at `±spread_rad`
/// from the heading.
pub fn arrowhead_vertices(
    anchor: Point2<f64>,
    heading_deg: f64,
    size: f64,
    spread_rad: f64,
) -> [Point2<f64>; 3] {
    let heading = heading_deg.to_radians();
    let corner = |angle: f64| Point2::new(anchor.x + size * angle.cos(), anchor.y + size * angle.sin());
    [
        corner(heading),
        corner(heading + spread_rad),
        corner(heading - spread_rad),
    ]
}

/// Extrapolates the agent's motion for the preview overlay.
///
/// Brightness is sensed once, at the starting pose, and the resulting turn is
/// then applied unchanged at every simulated step. The result is a
/// constant-curvature arc, not a re-sensing forward simulation: after the
/// first step it will in general differ from what the real ticks produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPredictor {
    pub sensor: SensorConfig,
    pub prediction: PredictionConfig,
}

impl TrajectoryPredictor {
    pub fn new(sensor: SensorConfig, prediction: PredictionConfig) -> Self {
        Self { sensor, prediction }
    }

    /// Senses at `pose` and extrapolates `horizon_steps` positions.
    ///
    /// The preview ignores `control.paused`; a paused agent still shows where it
    /// would go.
    pub fn predict(
        &self,
        raster: &RasterBuffer,
        pose: &Pose,
        control: &ControlParams,
        law: &dyn SteeringLaw,
        horizon_steps: usize,
    ) -> Result<PredictedPath, SensingError> {
        let brightness = compute_brightness(raster, pose, &self.sensor)?;
        let increment = law.correction(brightness as f64, control.gain);
        let step_speed = control.speed / self.prediction.speed_divisor;
        Ok(extrapolate(pose, step_speed, increment, horizon_steps))
    }
}

/// Moves a copy of `start` forward `steps` times: translate along the current
/// heading, then turn by `increment_deg`, then record the position.
pub fn extrapolate(start: &Pose, step_speed: f64, increment_deg: f64, steps: usize) -> PredictedPath {
    let mut pose = *start;
    let mut points = Vec::with_capacity(steps);
    for _ in 0..steps {
        pose.advance(step_speed);
        pose.rotate(increment_deg);
        points.push(pose.position);
    }
    PredictedPath {
        points,
        final_heading_deg: pose.heading_deg,
    }
}
