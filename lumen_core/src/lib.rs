// lumen_core/src/lib.rs

// This file defines the public modules of the library.
pub mod config;
pub mod control;
pub mod error;
pub mod models;
pub mod prediction;
pub mod prelude;
pub mod raster;
pub mod simulation;
pub mod types;
