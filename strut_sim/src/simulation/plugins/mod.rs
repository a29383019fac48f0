// strut_sim/src/simulation/plugins/mod.rs

pub mod debugging;
pub mod vehicles;
pub mod world;
