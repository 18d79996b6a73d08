// lumen_core/src/error.rs

use thiserror::Error;

/// Failures of the brightness sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SensingError {
    /// The circular window covers no in-bounds pixel: the window lies entirely
    /// outside the raster, or its side length is zero.
    #[error("sensor window covers no samplable pixels")]
    NoSamplablePixels,
}

/// Failures while building a `RasterBuffer` from decoded image data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("raster of {width}x{height} needs {expected} bytes of RGBA8 data, got {actual}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),
    #[error("image has no pixel data in main memory")]
    MissingData,
}

/// A configuration value that the simulation cannot run with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration value `{field}`: {reason}")]
pub struct ConfigError {
    pub field: &'static str,
    pub reason: String,
}

impl ConfigError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the `Simulation` context.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// No background raster has been loaded yet; nothing may be sensed or ticked.
    #[error("simulation is not ready: no raster buffer has been loaded")]
    NotReady,
    /// Speed or gain is NaN or infinite. These are rejected before any state changes.
    #[error("control parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },
    /// An input hook tried to place or turn the agent with a NaN or infinite value.
    #[error("pose component `{name}` must be finite, got {value}")]
    NonFinitePose { name: &'static str, value: f64 },
    #[error(transparent)]
    Sensing(#[from] SensingError),
}
