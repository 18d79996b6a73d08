// lumen_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::control::{ProportionalSteering, SteeringLaw, SteeringOutput};
pub use crate::error::{ConfigError, RasterError, SensingError, SimulationError};

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::config::SimulationConfig;
pub use crate::raster::{PixelRegion, RasterBuffer, Rgba};
pub use crate::types::{ControlParams, Pose, SliderPositions};

// --- Sensing, Kinematics and Prediction ---
pub use crate::models::kinematics::AgentState;
pub use crate::models::perception::{compute_brightness, luma, BrightnessSample, SensorWindow};
pub use crate::prediction::{arrowhead_vertices, PredictedPath, TrajectoryPredictor};

// --- The Simulation Context ---
pub use crate::simulation::{SensorReading, Simulation, TickReport};
