// strut_sim/src/simulation/plugins/vehicles/mod.rs

mod assembly;
mod components;
mod input;
mod wheel_physics;

pub use assembly::build_wheel_models;
pub use components::{
    DrivenWheel, VehicleControllerInput, VehicleParameters, Wheel, WheelOf, WheelVisual,
};
pub use wheel_physics::{AvianChassis, AvianGroundProbe};

use crate::prelude::*;

pub struct VehiclePlugin;

impl Plugin for VehiclePlugin {
    fn build(&self, app: &mut App) {
        app
            // Assembly: chassis bodies and wheels, bound once here.
            .add_systems(
                OnEnter(AppState::SceneBuilding),
                assembly::spawn_vehicles.in_set(SceneBuildSet::Vehicles),
            )
            // Driver input is sampled every frame.
            .add_systems(Update, input::keyboard_throttle)
            // The wheels run in lockstep with the physics step.
            .add_systems(
                FixedUpdate,
                (
                    wheel_physics::apply_motor_torque.in_set(SimulationSet::Control),
                    wheel_physics::tick_wheels.in_set(SimulationSet::Actuation),
                ),
            )
            .add_systems(
                Update,
                wheel_physics::sync_wheel_visuals.run_if(not(in_state(AppState::SceneBuilding))),
            );
    }
}
