// lumen_sim/src/simulation/plugins/mod.rs

pub mod agent;
pub mod debugging;
pub mod input;
