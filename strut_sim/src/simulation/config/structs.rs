// strut_sim/src/simulation/config/structs.rs

use bevy::prelude::Resource;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use serde::Deserialize;
use strut_core::prelude::WheelConfig;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # ScenarioConfig
/// The primary Bevy resource holding all configuration for a simulation run.
/// This struct is the root of the data parsed from a `scenario.toml` file.
/// All positions and directions are in the ENU world frame (+Z up).
#[derive(Resource, Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: SimulationSettings,

    #[serde(default)]
    pub world: WorldConfig,

    // The TOML has `[[vehicles]]`, which becomes a Vec of VehicleConfig structs.
    #[serde(default)]
    pub vehicles: Vec<VehicleConfig>,
}

// =========================================================================
// == Configuration Sub-Structs ==
// =========================================================================

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct SimulationSettings {
    /// Rate of the fixed physics step, in Hz.
    pub fixed_rate_hz: f64,
    /// Headless runs exit after this many seconds. `None` runs forever.
    pub duration_seconds: Option<f32>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            fixed_rate_hz: 64.0,
            duration_seconds: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct WorldConfig {
    /// Global gravity vector in m/s^2.
    pub gravity: [f32; 3],
    /// Edge length of the square ground plane, in meters.
    pub ground_size: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 0.0, -9.81],
            ground_size: 200.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct VehicleConfig {
    pub name: String,
    #[serde(default)]
    pub starting_pose: Pose,
    #[serde(default)]
    pub chassis: ChassisConfig,
    /// Motor torque commanded to every driven wheel at full throttle.
    #[serde(default)]
    pub max_motor_torque: f64,
    #[serde(default)]
    pub debug_visuals: bool,
    #[serde(default)]
    pub wheels: Vec<WheelMountConfig>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct ChassisConfig {
    /// Box extents along the body's forward, left and up axes, in meters.
    pub size: [f32; 3],
    /// Mass in kilograms.
    pub mass: f32,
}

impl Default for ChassisConfig {
    fn default() -> Self {
        Self {
            size: [4.0, 1.8, 0.8],
            mass: 1500.0,
        }
    }
}

/// One wheel attached to a chassis.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct WheelMountConfig {
    pub name: String,
    /// Hub position in the chassis body frame.
    pub mount: [f64; 3],
    /// Driven wheels receive motor torque from the throttle.
    #[serde(default)]
    pub driven: bool,
    /// Visual wheel width, in meters.
    #[serde(default = "default_wheel_width")]
    pub width: f32,
    #[serde(default)]
    pub params: WheelConfig,
}

fn default_wheel_width() -> f32 {
    0.25
}

// =========================================================================
// == Helper Structs for Nested Configuration ==
// =========================================================================

#[derive(Deserialize, Debug, Clone, Copy, Default)]
#[serde(deny_unknown_fields, default)]
pub struct Pose {
    pub translation: [f64; 3],
    /// Roll, pitch and yaw in degrees.
    pub rotation_deg: [f64; 3],
}

impl Pose {
    pub fn to_isometry(&self) -> Isometry3<f64> {
        let [roll, pitch, yaw] = self.rotation_deg;
        Isometry3::from_parts(
            Translation3::from(Vector3::from(self.translation)),
            UnitQuaternion::from_euler_angles(
                roll.to_radians(),
                pitch.to_radians(),
                yaw.to_radians(),
            ),
        )
    }
}
