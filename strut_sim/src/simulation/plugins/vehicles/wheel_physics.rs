// strut_sim/src/simulation/plugins/vehicles/wheel_physics.rs

use avian3d::prelude::*;
use bevy::prelude::*;
use nalgebra::Vector3;

use strut_core::prelude::{
    ChassisBody, ContactState, FrameHandle, GroundHit, GroundProbe, TraceRequest,
};

use super::components::{
    DrivenWheel, VehicleControllerInput, VehicleParameters, Wheel, WheelOf, WheelVisual,
};
use crate::simulation::core::layers::GameLayer;
use crate::simulation::core::transforms::{
    bevy_to_wheel_pose, bevy_vector_to_enu_vector, enu_vector_to_bevy_vector,
};

// =========================================================================
// == Adapters: Avian -> core traits ==
// =========================================================================

/// Answers the core's ground traces with Avian shape casts.
pub struct AvianGroundProbe<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    shape: &'a Collider,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> AvianGroundProbe<'a, 'w, 's> {
    /// A probe that ignores the chassis itself and everything on the vehicle layer.
    pub fn new(spatial_query: &'a SpatialQuery<'w, 's>, shape: &'a Collider, chassis: Entity) -> Self {
        Self {
            spatial_query,
            shape,
            filter: SpatialQueryFilter::from_mask(GameLayer::probe_mask())
                .with_excluded_entities([chassis]),
        }
    }
}

impl GroundProbe for AvianGroundProbe<'_, '_, '_> {
    fn trace(&self, request: &TraceRequest) -> Option<GroundHit> {
        let start = enu_vector_to_bevy_vector(&request.start);
        let end = enu_vector_to_bevy_vector(&request.end);
        let direction = Dir3::new(end - start).ok()?;

        let config = ShapeCastConfig::from_max_distance(start.distance(end));
        let hit = self.spatial_query.cast_shape(
            self.shape,
            start,
            Quat::IDENTITY,
            direction,
            &config,
            &self.filter,
        )?;

        Some(GroundHit {
            distance: hit.distance as f64,
            point: bevy_vector_to_enu_vector(&hit.point1),
            normal: bevy_vector_to_enu_vector(&hit.normal1),
            surface: Some(FrameHandle::from_entity(hit.entity)),
        })
    }
}

/// A chassis rigid body as seen by the wheels for one fixed tick.
pub struct AvianChassis<'a> {
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    /// World-space center of mass.
    pub center_of_mass: Vec3,
    pub force: &'a mut ExternalForce,
}

impl ChassisBody for AvianChassis<'_> {
    fn velocity_at_point(&self, world_point: &Vector3<f64>) -> Vector3<f64> {
        let arm = enu_vector_to_bevy_vector(world_point) - self.center_of_mass;
        let velocity = self.linear_velocity + self.angular_velocity.cross(arm);
        bevy_vector_to_enu_vector(&velocity)
    }

    fn apply_force_at(&mut self, world_point: &Vector3<f64>, force: &Vector3<f64>) {
        self.force.apply_force_at_point(
            enu_vector_to_bevy_vector(force),
            enu_vector_to_bevy_vector(world_point),
            self.center_of_mass,
        );
    }
}

// =========================================================================
// == Runtime Systems ==
// =========================================================================

/// CONTROL: Smooths each driven wheel's motor torque toward the throttle command.
pub fn apply_motor_torque(
    time: Res<Time>,
    vehicles: Query<(&VehicleControllerInput, &VehicleParameters)>,
    mut wheels: Query<(&mut Wheel, &WheelOf), With<DrivenWheel>>,
) {
    let dt = time.delta_secs_f64();
    for (mut wheel, wheel_of) in &mut wheels {
        let Ok((input, params)) = vehicles.get(wheel_of.0) else {
            continue;
        };
        let target = input.throttle.clamp(-1.0, 1.0) as f64 * params.max_motor_torque;
        wheel.model.apply_motor_torque(target, dt);
    }
}

/// ACTUATION: Runs one tick of every wheel against its chassis.
pub fn tick_wheels(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut chassis_query: Query<(
        &Position,
        &Rotation,
        &LinearVelocity,
        &AngularVelocity,
        &ComputedCenterOfMass,
        &mut ExternalForce,
    )>,
    mut wheels: Query<(&Name, &mut Wheel, &WheelOf, &Transform)>,
) {
    let dt = time.delta_secs_f64();

    for (name, mut wheel, wheel_of, local) in &mut wheels {
        let Ok((position, rotation, lin_vel, ang_vel, com, force)) =
            chassis_query.get_mut(wheel_of.0)
        else {
            warn!("Wheel '{}' lost its chassis {:?}.", name, wheel_of.0);
            continue;
        };

        // Use the physics pose, not GlobalTransform, so the hub matches this tick.
        let hub = position.0 + rotation.0 * local.translation;
        let pose = bevy_to_wheel_pose(&hub, &(rotation.0 * local.rotation));

        let mut chassis = AvianChassis {
            linear_velocity: lin_vel.0,
            angular_velocity: ang_vel.0,
            center_of_mass: position.0 + rotation.0 * com.0,
            force: force.into_inner(),
        };

        let wheel = &mut *wheel;
        let probe = AvianGroundProbe::new(&spatial_query, &wheel.probe_shape, wheel_of.0);
        let previous = wheel.model.contact_state();
        let report = wheel.model.tick(&pose, dt, &probe, &mut chassis);

        match (previous, report.contact) {
            (ContactState::Airborne, ContactState::Grounded) => {
                debug!("Wheel '{}' touched down.", name)
            }
            (ContactState::Grounded, ContactState::Airborne) => {
                debug!("Wheel '{}' left the ground.", name)
            }
            _ => {}
        }
        wheel.last_report = Some(report);
    }
}

/// Moves each wheel's visual mesh to the current suspension length.
pub fn sync_wheel_visuals(
    wheels: Query<(&Wheel, &Children)>,
    mut visuals: Query<&mut Transform, With<WheelVisual>>,
) {
    for (wheel, children) in &wheels {
        let offset = wheel.model.wheel_center_offset() as f32;
        for &child in children {
            if let Ok(mut transform) = visuals.get_mut(child) {
                transform.translation = Vec3::NEG_Y * offset;
            }
        }
    }
}
