// strut_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::core::app_state::AppState;
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::debugging::DebuggingPlugin;
use crate::simulation::plugins::vehicles::VehiclePlugin;
use crate::simulation::plugins::world::spawner::WorldSpawnerPlugin;

// This prelude is for convenience for other files WITHIN the strut_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
/// Insert a `ScenarioConfig` resource before adding it; the setup plugin
/// reads it while building.
pub struct StrutSimulationPlugin;

impl Plugin for StrutSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>().add_plugins((
            // Core setup (fixed rate, gravity, schedule sets, pause).
            SimulationSetupPlugin,
            // Spawns the ground, lighting, camera.
            WorldSpawnerPlugin,
            // Chassis assembly and the per-wheel physics.
            VehiclePlugin,
            DebuggingPlugin,
        ));
    }
}
