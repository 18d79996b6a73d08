// lumen_sim/src/simulation/core/mod.rs

pub mod app_state;
pub mod raster_import;
pub mod simulation_setup;
pub mod transforms;
