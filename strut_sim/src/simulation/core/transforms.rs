// strut_sim/src/simulation/core/transforms.rs

use bevy::prelude::{Quat as BevyQuat, Transform as BevyTransform, Vec3 as BevyVec3};
use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};
use std::f64::consts::FRAC_PI_2;
use strut_core::prelude::WheelPose;

// =========================================================================
// == ENU <-> Bevy Conversion Helpers ==
// =========================================================================
// The core works in ENU (x east, y north, z up). Bevy is y-up with -z north.

thread_local! {
    /// Quaternion representing the rotation from the ENU coordinate frame to the Bevy coordinate frame.
    /// ENU's X-axis (1,0,0) becomes (1,0,0) in Bevy coords.
    /// ENU's Y-axis (0,1,0) (North) becomes (0,0,-1) in Bevy coords (Bevy -Z).
    /// ENU's Z-axis (0,0,1) (Up) becomes (0,1,0) in Bevy coords (Bevy Y).
    /// This corresponds to a -90 degree rotation around the X-axis.
    pub static Q_ENU_FRAME_TO_BEVY_FRAME: UnitQuaternion<f64> =
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2);
}

/// Converts a 3D coordinate vector from ENU to Bevy world.
pub fn enu_vector_to_bevy_vector(enu_vec: &Vector3<f64>) -> BevyVec3 {
    BevyVec3::new(
        enu_vec.x as f32,  // East -> Bevy X
        enu_vec.z as f32,  // ENU Up -> Bevy Y
        -enu_vec.y as f32, // ENU North -> Bevy -Z
    )
}

/// Converts a 3D coordinate vector from Bevy world to ENU.
pub fn bevy_vector_to_enu_vector(bevy_vec: &BevyVec3) -> Vector3<f64> {
    Vector3::new(
        bevy_vec.x as f64,  // Bevy X -> ENU East
        -bevy_vec.z as f64, // Bevy -Z -> ENU North
        bevy_vec.y as f64,  // Bevy Y -> ENU Up
    )
}

/// Converts an object's orientation from ENU frame to Bevy world frame.
pub fn enu_quat_to_bevy_quat(enu_obj_quat: &UnitQuaternion<f64>) -> BevyQuat {
    // q_obj_in_Bevy = Q_Frame(Bevy_from_ENU) * q_obj_in_ENU * Q_Frame(Bevy_from_ENU)_inverse
    let q = Q_ENU_FRAME_TO_BEVY_FRAME.with(|q_frame| *q_frame * enu_obj_quat * q_frame.inverse());

    BevyQuat::from_xyzw(
        q.coords.x as f32,
        q.coords.y as f32,
        q.coords.z as f32,
        q.coords.w as f32,
    )
}

/// Converts an object's orientation from Bevy world frame to ENU frame.
pub fn bevy_quat_to_enu_quat(bevy_obj_quat: &BevyQuat) -> UnitQuaternion<f64> {
    let bevy_q_f64 = UnitQuaternion::from_quaternion(Quaternion::new(
        bevy_obj_quat.w as f64, // nalgebra Quaternion::new is w,x,y,z
        bevy_obj_quat.x as f64,
        bevy_obj_quat.y as f64,
        bevy_obj_quat.z as f64,
    ));

    // q_obj_in_ENU = Q_Frame(Bevy_from_ENU)_inverse * q_obj_in_Bevy * Q_Frame(Bevy_from_ENU)
    Q_ENU_FRAME_TO_BEVY_FRAME.with(|q_frame| q_frame.inverse() * bevy_q_f64 * *q_frame)
}

/// Converts a full pose (Isometry3) from ENU frame to Bevy Transform.
pub fn enu_iso_to_bevy_transform(enu_pose: &Isometry3<f64>) -> BevyTransform {
    BevyTransform {
        translation: enu_vector_to_bevy_vector(&enu_pose.translation.vector),
        rotation: enu_quat_to_bevy_quat(&enu_pose.rotation),
        scale: BevyVec3::ONE,
    }
}

/// Converts a Bevy Transform to a full pose (Isometry3) in the ENU frame.
pub fn bevy_transform_to_enu_iso(bevy_transform: &BevyTransform) -> Isometry3<f64> {
    Isometry3::from_parts(
        Translation3::from(bevy_vector_to_enu_vector(&bevy_transform.translation)),
        bevy_quat_to_enu_quat(&bevy_transform.rotation),
    )
}

/// Builds the core's wheel pose from a Bevy world translation and rotation.
pub fn bevy_to_wheel_pose(translation: &BevyVec3, rotation: &BevyQuat) -> WheelPose {
    WheelPose::new(
        bevy_vector_to_enu_vector(translation),
        bevy_quat_to_enu_quat(rotation),
    )
}
