// strut_core/src/models/mod.rs

pub mod friction;
pub mod suspension;
pub mod wheel;
