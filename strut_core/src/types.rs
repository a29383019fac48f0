// strut_core/src/types.rs

use nalgebra::{UnitQuaternion, Vector3};

// --- Core Identifier ---
/// An opaque handle to an object owned by the host engine (a collider, a chassis, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameHandle(pub u64);

impl FrameHandle {
    // A convenience method for use in the Bevy adapter crate.
    #[cfg(feature = "bevy")] // This will only compile if the "bevy" feature is enabled
    pub fn from_entity(entity: bevy_ecs::prelude::Entity) -> Self {
        Self(entity.to_bits())
    }
}

/// World pose of a wheel hub, expressed in the ENU world frame.
///
/// The wheel's body frame follows the robotics convention: +X forward,
/// +Y left, +Z up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelPose {
    pub position: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

impl WheelPose {
    pub fn new(position: Vector3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self { position, rotation }
    }

    /// Rolling direction of the wheel in world space.
    pub fn forward(&self) -> Vector3<f64> {
        self.rotation * Vector3::x()
    }

    /// Lateral (rightward) axis in world space.
    pub fn right(&self) -> Vector3<f64> {
        self.rotation * -Vector3::y()
    }

    pub fn down(&self) -> Vector3<f64> {
        self.rotation * -Vector3::z()
    }
}

impl Default for WheelPose {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }
}
