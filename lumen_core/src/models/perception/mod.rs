// lumen_core/src/models/perception/mod.rs

//! Sensor models that turn raster pixels into scalar readings.

mod brightness;

pub use brightness::{compute_brightness, luma, sample_brightness, BrightnessSample, SensorWindow};
