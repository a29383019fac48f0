// strut_sim/src/simulation/core/mod.rs

pub mod app_state;
pub mod layers;
pub mod simulation_setup;
pub mod transforms;
