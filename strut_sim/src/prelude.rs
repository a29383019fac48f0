// strut_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the entire strut_core prelude so you can easily access
// pure types like `WheelModel`, `FrictionCurve`, `ChassisBody`, etc.
pub use strut_core::prelude::*;

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::core::app_state::{AppState, SceneBuildSet, SimulationSet};
pub use crate::simulation::core::layers::GameLayer;

pub use crate::simulation::plugins::vehicles::{VehicleControllerInput, VehiclePlugin, Wheel};
