// strut_sim/src/simulation/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of the application's lifecycle.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// The initial state. The scene is built from the loaded scenario.
    #[default]
    SceneBuilding,

    /// The scene is built. The main simulation loop is now running.
    Running,

    /// The simulation is paused. Physics is stopped and no wheel ticks.
    Paused,
}

/// System sets to control the order of execution during the SceneBuilding state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneBuildSet {
    /// Pass 1: Static world, lighting and camera.
    World,

    /// Pass 2: Chassis bodies and their wheels.
    Vehicles,

    /// Pass 3: Leave scene building.
    Finalize,
}

// =========================================================================
// == Main Simulation Sets ==
// =========================================================================

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Reads driver input and updates motor targets.
    Control,

    /// Wheels trace the ground and push forces into their chassis.
    /// Runs before the physics step of the same fixed tick.
    Actuation,

    /// Checks that run after forces are queued (run timers, reporting).
    Validation,
}
