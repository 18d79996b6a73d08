// lumen_core/src/models/perception/brightness.rs

use nalgebra::Point2;

use crate::config::SensorConfig;
use crate::error::SensingError;
use crate::raster::{RasterBuffer, Rgba};
use crate::types::Pose;

/// Rec. 709 luma of a pixel, in `[0, 255]`. Alpha is ignored.
pub fn luma(px: Rgba) -> f64 {
    0.2126 * px[0] as f64 + 0.7152 * px[1] as f64 + 0.0722 * px[2] as f64
}

/// The circular patch of raster the agent "looks at".
///
/// It is the disc inscribed in a `side` x `side` square whose centre sits
/// `offset` pixels ahead of the agent along its heading. The descriptor has no
/// lifetime of its own; it is rebuilt from the pose for every reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorWindow {
    pub center: Point2<f64>,
    pub side: u32,
}

impl SensorWindow {
    pub fn from_pose(pose: &Pose, sensor: &SensorConfig) -> Self {
        Self {
            center: pose.position + pose.forward() * sensor.offset,
            side: sensor.area_size,
        }
    }

    pub fn radius(&self) -> f64 {
        self.side as f64 / 2.0
    }

    /// Raster coordinates of the sampled square's top-left pixel.
    ///
    /// `None` when the centre is NaN or infinite: such a window has no place on
    /// any raster. Finite centres beyond the `i64` range saturate, which still
    /// lands them outside the raster.
    pub fn top_left(&self) -> Option<(i64, i64)> {
        if !(self.center.x.is_finite() && self.center.y.is_finite()) {
            return None;
        }
        let half = self.radius();
        Some((
            (self.center.x - half).floor() as i64,
            (self.center.y - half).floor() as i64,
        ))
    }

    /// Whether element `(col, row)` of the sampled square lies inside the disc.
    pub fn in_mask(&self, col: u32, row: u32) -> bool {
        let half = self.radius();
        let dx = col as f64 - half;
        let dy = row as f64 - half;
        dx * dx + dy * dy <= half * half
    }
}

/// A brightness reading together with the numbers it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessSample {
    /// Average luma as a rounded percentage in `[0, 100]`.
    pub percentage: u8,
    /// Average luma of the contributing pixels, in `[0, 255]`.
    pub average_luma: f64,
    /// Number of pixels that were both inside the disc and inside the raster.
    pub samples: usize,
    pub window: SensorWindow,
}

/// Samples the sensor disc in front of `pose`.
///
/// Pixels of the disc that fall outside the raster are left out of the average
/// entirely, so an agent at the edge of the image sees only the image. If no
/// pixel remains the reading fails with `NoSamplablePixels` instead of
/// dividing by zero.
pub fn sample_brightness(
    raster: &RasterBuffer,
    pose: &Pose,
    sensor: &SensorConfig,
) -> Result<BrightnessSample, SensingError> {
    let window = SensorWindow::from_pose(pose, sensor);
    let (x0, y0) = window.top_left().ok_or(SensingError::NoSamplablePixels)?;
    let region = raster.sample_region(x0, y0, window.side, window.side);

    let mut total = 0.0;
    let mut samples = 0usize;
    for (col, row, px) in region.iter() {
        let Some(px) = px else { continue };
        if window.in_mask(col, row) {
            total += luma(px);
            samples += 1;
        }
    }

    if samples == 0 {
        return Err(SensingError::NoSamplablePixels);
    }

    let average_luma = total / samples as f64;
    let percentage = (average_luma / 255.0 * 100.0).round().clamp(0.0, 100.0) as u8;
    Ok(BrightnessSample {
        percentage,
        average_luma,
        samples,
        window,
    })
}

/// Brightness under the sensor disc as an integer percentage in `[0, 100]`.
pub fn compute_brightness(
    raster: &RasterBuffer,
    pose: &Pose,
    sensor: &SensorConfig,
) -> Result<u8, SensingError> {
    sample_brightness(raster, pose, sensor).map(|s| s.percentage)
}
