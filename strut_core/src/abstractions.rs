// strut_core/src/abstractions.rs

use nalgebra::Vector3;

use crate::types::FrameHandle;

// --- CHASSIS BODY TRAIT ---
/// The rigid body a wheel pushes on. The wheel never owns it.
///
/// The host physics engine implements this for its own body representation;
/// tests implement it with a recording mock.
pub trait ChassisBody {
    /// Velocity of the body, in world space, at the given world-space point.
    fn velocity_at_point(&self, world_point: &Vector3<f64>) -> Vector3<f64>;

    /// Accumulates a world-space force at a world-space point for the current
    /// integration step. How the force is integrated is up to the host.
    fn apply_force_at(&mut self, world_point: &Vector3<f64>, force: &Vector3<f64>);
}

// --- GROUND PROBE TRAIT ---
/// A swept-sphere query against the static world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRequest {
    pub start: Vector3<f64>,
    pub end: Vector3<f64>,
    /// Radius of the swept sphere.
    pub radius: f64,
}

impl TraceRequest {
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// The first thing the probe touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// Distance travelled from `TraceRequest::start` before the sphere touched.
    pub distance: f64,
    /// World-space contact point.
    pub point: Vector3<f64>,
    /// World-space surface normal at the contact.
    pub normal: Vector3<f64>,
    /// The host object that was hit, if the probe reports one.
    pub surface: Option<FrameHandle>,
}

/// Implemented by the host's shape-cast service.
///
/// Excluding the vehicle's own colliders is the implementor's responsibility:
/// the wheel only describes where to sweep.
pub trait GroundProbe {
    fn trace(&self, request: &TraceRequest) -> Option<GroundHit>;
}
