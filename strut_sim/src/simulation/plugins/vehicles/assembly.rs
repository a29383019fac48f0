// strut_sim/src/simulation/plugins/vehicles/assembly.rs

use avian3d::prelude::*;
use bevy::prelude::*;
use nalgebra::Vector3;
use strut_core::prelude::{ConfigError, WheelModel};

use super::components::{
    DrivenWheel, VehicleControllerInput, VehicleParameters, Wheel, WheelOf, WheelVisual,
};
use crate::prelude::*;
use crate::simulation::core::layers::GameLayer;
use crate::simulation::core::transforms::{enu_iso_to_bevy_transform, enu_vector_to_bevy_vector};
use crate::simulation::plugins::debugging::ShowDebugGizmos;

/// Builds every wheel model of a vehicle, failing on the first invalid config.
pub fn build_wheel_models(vehicle: &VehicleConfig) -> Result<Vec<WheelModel>, (String, ConfigError)> {
    vehicle
        .wheels
        .iter()
        .map(|mount| WheelModel::new(mount.params).map_err(|e| (mount.name.clone(), e)))
        .collect()
}

/// Converts ENU body-frame box extents (forward, left, up) into Bevy's (x, y, z).
fn chassis_extents(size: [f32; 3]) -> Vec3 {
    let [forward, left, up] = size;
    Vec3::new(forward, up, left)
}

/// SPAWNING: Creates the chassis rigid body and one child entity per wheel.
pub fn spawn_vehicles(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let body_material = materials.add(Color::srgb(0.7, 0.2, 0.2));
    let wheel_material = materials.add(Color::srgb(0.1, 0.1, 0.1));

    for vehicle in &config.vehicles {
        // Validate every wheel before anything is spawned for this vehicle.
        let models = match build_wheel_models(vehicle) {
            Ok(models) => models,
            Err((wheel_name, e)) => {
                error!(
                    "Invalid wheel '{}' on vehicle '{}': {}. Skipping vehicle.",
                    wheel_name, vehicle.name, e
                );
                continue;
            }
        };

        info!(
            "Spawning vehicle '{}' with {} wheels.",
            vehicle.name,
            models.len()
        );

        let extents = chassis_extents(vehicle.chassis.size);
        let chassis = commands
            .spawn((
                Name::new(vehicle.name.clone()),
                enu_iso_to_bevy_transform(&vehicle.starting_pose.to_isometry()),
                RigidBody::Dynamic,
                Collider::cuboid(extents.x, extents.y, extents.z),
                Mass(vehicle.chassis.mass),
                GameLayer::vehicle_layers(),
                // Wheel forces are re-queued every fixed tick.
                ExternalForce::new(Vec3::ZERO).with_persistence(false),
                // We need to disable sleeping for the wheel forces to be applied consistently.
                SleepingDisabled,
                VehicleParameters {
                    max_motor_torque: vehicle.max_motor_torque,
                },
                VehicleControllerInput::default(),
                Mesh3d(meshes.add(Cuboid::new(extents.x, extents.y, extents.z))),
                MeshMaterial3d(body_material.clone()),
            ))
            .id();

        for (mount, model) in vehicle.wheels.iter().zip(models) {
            let radius = model.config().wheel_radius as f32;
            let wheel_mesh = meshes.add(Cylinder::new(radius, mount.width));

            let mut wheel = commands.spawn((
                Name::new(format!("{}_{}", vehicle.name, mount.name)),
                Wheel::new(model),
                WheelOf(chassis),
                Transform::from_translation(enu_vector_to_bevy_vector(&Vector3::from(
                    mount.mount,
                ))),
                Visibility::default(),
                ChildOf(chassis),
            ));
            if mount.driven {
                wheel.insert(DrivenWheel);
            }
            if vehicle.debug_visuals {
                wheel.insert(ShowDebugGizmos);
            }
            wheel.with_children(|parent| {
                // The cylinder's axis is Bevy Y; lay it along the axle (Bevy Z).
                parent.spawn((
                    WheelVisual,
                    Mesh3d(wheel_mesh),
                    MeshMaterial3d(wheel_material.clone()),
                    Transform::from_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
                ));
            });
        }
    }
}
