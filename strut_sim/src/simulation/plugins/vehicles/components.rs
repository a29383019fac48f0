// strut_sim/src/simulation/plugins/vehicles/components.rs

use avian3d::prelude::Collider;
use bevy::prelude::*;
use strut_core::prelude::{ContactState, WheelModel, WheelTickReport};

/// Static parameters of a vehicle chassis.
#[derive(Component, Clone, Debug)]
pub struct VehicleParameters {
    /// Motor torque sent to every driven wheel at full throttle.
    pub max_motor_torque: f64,
}

/// A "mailbox" component for control commands. The keyboard controller (or an AI)
/// writes to this, and the motor system reads from it.
#[derive(Component, Default, Debug)]
pub struct VehicleControllerInput {
    /// The desired throttle, from -1.0 (full reverse) to 1.0 (full forward).
    pub throttle: f32,
}

/// One simulated wheel. Lives on a child entity of its chassis.
#[derive(Component)]
pub struct Wheel {
    /// The pure wheel model from the core library.
    pub model: WheelModel,
    /// Sphere swept by the ground probe, built once from the wheel's config.
    pub probe_shape: Collider,
    /// Outcome of the most recent fixed tick, for gizmos and contact logging.
    pub last_report: Option<WheelTickReport>,
}

impl Wheel {
    pub fn new(model: WheelModel) -> Self {
        let probe_shape = Collider::sphere(model.config().probe_radius as f32);
        Self {
            model,
            probe_shape,
            last_report: None,
        }
    }

    pub fn contact(&self) -> ContactState {
        self.model.contact_state()
    }
}

/// The chassis a wheel pushes on. Set once at assembly.
#[derive(Component, Debug, Clone, Copy)]
pub struct WheelOf(pub Entity);

/// Marks wheels that receive motor torque from the throttle.
#[derive(Component, Debug, Default)]
pub struct DrivenWheel;

/// Marks the visual mesh of a wheel, moved along the suspension travel.
#[derive(Component, Debug, Default)]
pub struct WheelVisual;
