// strut_core/src/models/wheel.rs

use nalgebra::Vector3;
use serde::Deserialize;

use crate::abstractions::{ChassisBody, GroundHit, GroundProbe, TraceRequest};
use crate::error::{non_negative, positive, ConfigError, ConfigResult};
use crate::models::friction::FrictionCurve;
use crate::models::suspension::{rest_length, suspension_force_magnitude};
use crate::types::WheelPose;

/// Added to the speed before normalizing slip so a near-zero velocity never divides by zero.
const SLIP_EPSILON: f64 = 0.01;

/// Tunable parameters of a single wheel.
///
/// Lengths are measured along the wheel's local down axis, starting at the hub.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct WheelConfig {
    pub min_suspension_length: f64,
    pub max_suspension_length: f64,
    pub suspension_stiffness: f64,
    pub suspension_damping: f64,
    pub wheel_radius: f64,
    pub forward_friction: FrictionCurve,
    pub side_friction: FrictionCurve,
    /// Below this contact speed no friction is applied. Keeps a parked
    /// vehicle from jittering.
    pub low_speed_threshold: f64,
    /// Radius of the swept sphere used for the ground probe.
    pub probe_radius: f64,
    /// How fast the motor torque follows its commanded target, per second.
    pub motor_response_rate: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            min_suspension_length: 0.0,
            max_suspension_length: 8.0,
            suspension_stiffness: 3000.0,
            suspension_damping: 140.0,
            wheel_radius: 14.0,
            forward_friction: FrictionCurve::default(),
            side_friction: FrictionCurve::default(),
            low_speed_threshold: 20.0,
            probe_radius: 1.0,
            motor_response_rate: 1.0,
        }
    }
}

impl WheelConfig {
    /// Checks every bound. Friction curves are valid by construction.
    pub fn validate(&self) -> ConfigResult<()> {
        non_negative("min_suspension_length", self.min_suspension_length)?;
        non_negative("max_suspension_length", self.max_suspension_length)?;
        if self.max_suspension_length < self.min_suspension_length {
            return Err(ConfigError::InvertedSuspension {
                min: self.min_suspension_length,
                max: self.max_suspension_length,
            });
        }
        non_negative("suspension_stiffness", self.suspension_stiffness)?;
        non_negative("suspension_damping", self.suspension_damping)?;
        positive("wheel_radius", self.wheel_radius)?;
        non_negative("low_speed_threshold", self.low_speed_threshold)?;
        positive("probe_radius", self.probe_radius)?;
        non_negative("motor_response_rate", self.motor_response_rate)?;
        Ok(())
    }

    pub fn rest_length(&self) -> f64 {
        rest_length(
            self.min_suspension_length,
            self.max_suspension_length,
            self.wheel_radius,
        )
    }
}

/// Ground contact state, re-derived from every tick's trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactState {
    #[default]
    Airborne,
    Grounded,
}

/// What a single tick did. Forces are the world-space vectors handed to the
/// chassis (already divided by the timestep), or zero when nothing was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelTickReport {
    pub contact: ContactState,
    pub suspension_force: Vector3<f64>,
    pub wheel_force: Vector3<f64>,
}

impl WheelTickReport {
    fn idle(contact: ContactState) -> Self {
        Self {
            contact,
            suspension_force: Vector3::zeros(),
            wheel_force: Vector3::zeros(),
        }
    }
}

/// A single wheel: ground probe, suspension spring and tire friction.
///
/// The only state carried between ticks is the last trace and the smoothed
/// motor torque.
#[derive(Debug, Clone)]
pub struct WheelModel {
    config: WheelConfig,
    last_trace: Option<GroundHit>,
    motor_torque: f64,
}

impl WheelModel {
    pub fn new(config: WheelConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            last_trace: None,
            motor_torque: 0.0,
        })
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn last_trace(&self) -> Option<&GroundHit> {
        self.last_trace.as_ref()
    }

    pub fn is_grounded(&self) -> bool {
        self.last_trace.is_some()
    }

    pub fn contact_state(&self) -> ContactState {
        if self.is_grounded() {
            ContactState::Grounded
        } else {
            ContactState::Airborne
        }
    }

    pub fn motor_torque(&self) -> f64 {
        self.motor_torque
    }

    pub fn rest_length(&self) -> f64 {
        self.config.rest_length()
    }

    /// Current spring length: the trace distance when grounded, full travel otherwise.
    pub fn suspension_length(&self) -> f64 {
        self.last_trace
            .map(|hit| hit.distance)
            .unwrap_or_else(|| self.rest_length())
    }

    /// Distance from the hub down to the wheel's center, for placing visuals.
    pub fn wheel_center_offset(&self) -> f64 {
        let c = &self.config;
        (c.min_suspension_length + self.suspension_length() + c.probe_radius - c.wheel_radius)
            .clamp(c.min_suspension_length, c.max_suspension_length)
    }

    /// Smooths the motor torque toward `target`. Takes effect on the next tick.
    pub fn apply_motor_torque(&mut self, target: f64, dt: f64) {
        if !dt.is_finite() {
            return;
        }
        let blend = (self.config.motor_response_rate * dt).clamp(0.0, 1.0);
        self.motor_torque = if blend >= 1.0 {
            target
        } else {
            self.motor_torque + (target - self.motor_torque) * blend
        };
    }

    /// The sweep this wheel casts from the given hub pose.
    pub fn trace_request(&self, pose: &WheelPose) -> TraceRequest {
        let down = pose.down();
        TraceRequest {
            start: pose.position + down * self.config.min_suspension_length,
            end: pose.position
                + down * (self.config.max_suspension_length + self.config.wheel_radius),
            radius: self.config.probe_radius,
        }
    }

    /// Runs one fixed physics step.
    ///
    /// A non-positive or non-finite `dt` means the host is not simulating:
    /// nothing is traced and nothing is applied.
    pub fn tick(
        &mut self,
        pose: &WheelPose,
        dt: f64,
        probe: &dyn GroundProbe,
        chassis: &mut dyn ChassisBody,
    ) -> WheelTickReport {
        if !dt.is_finite() || dt <= 0.0 {
            return WheelTickReport::idle(self.contact_state());
        }

        self.last_trace = probe.trace(&self.trace_request(pose));

        let Some(hit) = self.last_trace else {
            return WheelTickReport::idle(ContactState::Airborne);
        };

        WheelTickReport {
            contact: ContactState::Grounded,
            suspension_force: self.update_suspension(pose, &hit, dt, chassis),
            wheel_force: self.update_wheel_forces(pose, dt, chassis),
        }
    }

    fn update_suspension(
        &self,
        pose: &WheelPose,
        hit: &GroundHit,
        dt: f64,
        chassis: &mut dyn ChassisBody,
    ) -> Vector3<f64> {
        let velocity = chassis.velocity_at_point(&pose.position);
        let magnitude = suspension_force_magnitude(
            self.config.suspension_stiffness,
            self.config.suspension_damping,
            self.rest_length(),
            hit.distance,
            velocity.z,
        );

        let force = Vector3::new(0.0, 0.0, magnitude) / dt;
        chassis.apply_force_at(&pose.position, &force);
        force
    }

    fn update_wheel_forces(
        &self,
        pose: &WheelPose,
        dt: f64,
        chassis: &mut dyn ChassisBody,
    ) -> Vector3<f64> {
        let forward = pose.forward();
        let velocity = chassis.velocity_at_point(&pose.position);

        let target = self.friction_force(&velocity, &forward, &pose.right())
            + forward * self.motor_torque;

        let force = target / dt;
        chassis.apply_force_at(&pose.position, &force);
        force
    }

    /// Per-step friction from the contact velocity, before division by the timestep.
    ///
    /// Exactly zero at or below `low_speed_threshold`.
    pub fn friction_force(
        &self,
        velocity: &Vector3<f64>,
        forward: &Vector3<f64>,
        side: &Vector3<f64>,
    ) -> Vector3<f64> {
        let speed = velocity.norm();
        if speed <= self.config.low_speed_threshold {
            return Vector3::zeros();
        }

        let side_slip = velocity.dot(side) / (speed + SLIP_EPSILON);
        let forward_slip = velocity.dot(forward) / (speed + SLIP_EPSILON);

        let side_force =
            side * (-self.config.side_friction.evaluate(side_slip.abs()) * sign(side_slip));
        let forward_force = forward
            * (-self.config.forward_friction.evaluate(forward_slip.abs()) * sign(forward_slip));

        side_force + forward_force
    }
}

// `f64::signum` maps 0.0 to 1.0; a zero slip must produce no force direction.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::UnitQuaternion;
    use std::cell::Cell;
    use std::f64::consts::FRAC_PI_2;

    const DT: f64 = 1.0 / 50.0;

    /// A chassis moving at constant velocity that records every force it receives.
    #[derive(Default)]
    struct RecordingChassis {
        velocity: Vector3<f64>,
        applied: Vec<(Vector3<f64>, Vector3<f64>)>,
    }

    impl RecordingChassis {
        fn moving(velocity: Vector3<f64>) -> Self {
            Self {
                velocity,
                applied: Vec::new(),
            }
        }
    }

    impl ChassisBody for RecordingChassis {
        fn velocity_at_point(&self, _world_point: &Vector3<f64>) -> Vector3<f64> {
            self.velocity
        }

        fn apply_force_at(&mut self, world_point: &Vector3<f64>, force: &Vector3<f64>) {
            self.applied.push((*world_point, *force));
        }
    }

    /// A probe that hits flat ground at a fixed distance, or never hits.
    struct FixedProbe {
        distance: Option<f64>,
        last_request: Cell<Option<TraceRequest>>,
    }

    impl FixedProbe {
        fn hit_at(distance: f64) -> Self {
            Self {
                distance: Some(distance),
                last_request: Cell::new(None),
            }
        }

        fn miss() -> Self {
            Self {
                distance: None,
                last_request: Cell::new(None),
            }
        }
    }

    impl GroundProbe for FixedProbe {
        fn trace(&self, request: &TraceRequest) -> Option<GroundHit> {
            self.last_request.set(Some(*request));
            let distance = self.distance?;
            let dir = (request.end - request.start).normalize();
            Some(GroundHit {
                distance,
                point: request.start + dir * (distance + request.radius),
                normal: Vector3::z(),
                surface: None,
            })
        }
    }

    fn hub() -> WheelPose {
        WheelPose::new(Vector3::new(1.0, -2.0, 30.0), UnitQuaternion::identity())
    }

    fn default_wheel() -> WheelModel {
        WheelModel::new(WheelConfig::default()).unwrap()
    }

    #[test]
    fn trace_spans_min_to_max_plus_radius() {
        let mut config = WheelConfig::default();
        config.min_suspension_length = 2.0;
        let wheel = WheelModel::new(config).unwrap();

        let request = wheel.trace_request(&hub());
        assert_relative_eq!(request.start, Vector3::new(1.0, -2.0, 28.0));
        assert_relative_eq!(request.end, Vector3::new(1.0, -2.0, 8.0));
        assert_relative_eq!(request.radius, 1.0);
        assert_relative_eq!(request.length(), wheel.rest_length());
    }

    #[test]
    fn airborne_tick_applies_nothing() {
        let mut wheel = default_wheel();
        wheel.apply_motor_torque(500.0, 1.0);
        let mut chassis = RecordingChassis::moving(Vector3::new(40.0, 5.0, -1.0));

        let report = wheel.tick(&hub(), DT, &FixedProbe::miss(), &mut chassis);

        assert_eq!(report.contact, ContactState::Airborne);
        assert!(!wheel.is_grounded());
        assert!(chassis.applied.is_empty());
        assert_eq!(report.suspension_force, Vector3::zeros());
        assert_eq!(report.wheel_force, Vector3::zeros());
    }

    #[test]
    fn non_simulating_step_is_a_no_op() {
        let mut wheel = default_wheel();
        let probe = FixedProbe::hit_at(10.0);
        let mut chassis = RecordingChassis::default();

        for dt in [0.0, -DT, f64::NAN] {
            let report = wheel.tick(&hub(), dt, &probe, &mut chassis);
            assert_eq!(report.contact, ContactState::Airborne);
        }
        assert!(probe.last_request.get().is_none());
        assert!(chassis.applied.is_empty());
    }

    #[test]
    fn rest_length_contact_at_rest_applies_no_suspension_force() {
        let mut wheel = default_wheel();
        let probe = FixedProbe::hit_at(wheel.rest_length());
        let mut chassis = RecordingChassis::default();

        let report = wheel.tick(&hub(), DT, &probe, &mut chassis);

        assert_eq!(report.contact, ContactState::Grounded);
        assert_eq!(report.suspension_force, Vector3::zeros());
        // Suspension then wheel forces, both at the hub.
        assert_eq!(chassis.applied.len(), 2);
        assert!(chassis.applied.iter().all(|(p, _)| *p == hub().position));
    }

    #[test]
    fn compressed_spring_pushes_up_scaled_by_timestep() {
        let mut wheel = default_wheel();
        let probe = FixedProbe::hit_at(20.0);
        let mut chassis = RecordingChassis::moving(Vector3::new(0.0, 0.0, -0.5));

        let report = wheel.tick(&hub(), DT, &probe, &mut chassis);

        // -140 * -0.5 - 3000 * (20 - 22) = 70 + 6000
        let expected = Vector3::new(0.0, 0.0, 6070.0 / DT);
        assert_relative_eq!(report.suspension_force, expected, epsilon = 1e-6);
        assert_relative_eq!(chassis.applied[0].1, expected, epsilon = 1e-6);
        assert_relative_eq!(wheel.suspension_length(), 20.0);
    }

    #[test]
    fn friction_is_zero_at_or_below_the_low_speed_threshold() {
        let wheel = default_wheel();
        let forward = Vector3::x();
        let side = -Vector3::y();

        // Pure sideways slide, the worst case for slip.
        for speed in [0.0, 5.0, 19.99, 20.0] {
            let velocity = side * speed;
            assert_eq!(
                wheel.friction_force(&velocity, &forward, &side),
                Vector3::zeros()
            );
        }
    }

    #[test]
    fn slow_slipping_wheel_only_receives_motor_thrust() {
        let mut wheel = default_wheel();
        wheel.apply_motor_torque(10.0, 1.0);
        let probe = FixedProbe::hit_at(wheel.rest_length());
        // Mostly sideways, but just under the 20 unit threshold.
        let mut chassis = RecordingChassis::moving(Vector3::new(3.0, 19.0, 0.0));

        let report = wheel.tick(&hub(), DT, &probe, &mut chassis);

        assert_eq!(report.contact, ContactState::Grounded);
        assert_relative_eq!(report.wheel_force, Vector3::new(10.0 / DT, 0.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(chassis.applied[1].1, report.wheel_force);

        // The same slide above the threshold picks up side friction.
        let mut fast = RecordingChassis::moving(Vector3::new(3.0, 25.0, 0.0));
        let report = wheel.tick(&hub(), DT, &probe, &mut fast);
        assert!(report.wheel_force.y.abs() > 1e-6);
    }

    #[test]
    fn sideways_slide_is_opposed_by_side_friction() {
        let wheel = default_wheel();
        let forward = Vector3::x();
        let side = -Vector3::y();
        let velocity = side * 30.0;

        let force = wheel.friction_force(&velocity, &forward, &side);

        let slip = 30.0 / 30.01;
        let expected = -FrictionCurve::default().evaluate(slip);
        assert_relative_eq!(force.dot(&side), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(force.dot(&forward), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn friction_sign_follows_slip_direction() {
        let wheel = default_wheel();
        let forward = Vector3::x();
        let side = -Vector3::y();

        let rolling_forward = wheel.friction_force(&Vector3::new(25.0, 0.0, 0.0), &forward, &side);
        let rolling_back = wheel.friction_force(&Vector3::new(-25.0, 0.0, 0.0), &forward, &side);

        assert!(rolling_forward.x < 0.0);
        assert!(rolling_back.x > 0.0);
        assert_relative_eq!(rolling_forward.x, -rolling_back.x);
    }

    #[test]
    fn grounded_wheel_adds_motor_thrust_along_forward() {
        let mut wheel = default_wheel();
        wheel.apply_motor_torque(100.0, 1.0);
        assert_relative_eq!(wheel.motor_torque(), 100.0);

        // Rotated 90 degrees to the left: forward is world +Y.
        let pose = WheelPose::new(
            Vector3::zeros(),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        );
        let probe = FixedProbe::hit_at(wheel.rest_length());
        let mut chassis = RecordingChassis::default();

        let report = wheel.tick(&pose, DT, &probe, &mut chassis);

        assert_relative_eq!(
            report.wheel_force,
            Vector3::new(0.0, 100.0 / DT, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn motor_torque_converges_without_overshoot() {
        let mut wheel = default_wheel();
        let target = 250.0;
        let mut previous = wheel.motor_torque();

        for _ in 0..200 {
            wheel.apply_motor_torque(target, 0.05);
            let current = wheel.motor_torque();
            assert!(current >= previous);
            assert!(current <= target);
            previous = current;
        }
        assert!(target - previous < 1.0);

        // A timestep longer than the response time snaps straight to the target.
        wheel.apply_motor_torque(-10.0, 5.0);
        assert_eq!(wheel.motor_torque(), -10.0);
    }

    #[test]
    fn saturated_response_lands_exactly_on_the_target() {
        let mut wheel = default_wheel();
        // Leave the motor at an awkward partial value first.
        wheel.apply_motor_torque(0.1, 0.7);
        wheel.apply_motor_torque(1e-3, 0.3);
        assert!(wheel.motor_torque() != 1e-3);

        for target in [-10.0, 0.3, 1234.5678, -0.7] {
            wheel.apply_motor_torque(target, 1.0);
            assert_eq!(wheel.motor_torque(), target);
        }
    }

    #[test]
    fn motor_torque_is_stable_at_its_target() {
        let mut wheel = default_wheel();
        wheel.apply_motor_torque(42.0, 2.0);
        assert_eq!(wheel.motor_torque(), 42.0);
        for _ in 0..10 {
            wheel.apply_motor_torque(42.0, DT);
            assert_eq!(wheel.motor_torque(), 42.0);
        }
    }

    #[test]
    fn contact_state_follows_the_latest_trace_only() {
        let mut wheel = default_wheel();
        let mut chassis = RecordingChassis::default();

        wheel.tick(&hub(), DT, &FixedProbe::hit_at(15.0), &mut chassis);
        assert_eq!(wheel.contact_state(), ContactState::Grounded);
        assert_eq!(wheel.last_trace().map(|h| h.distance), Some(15.0));

        wheel.tick(&hub(), DT, &FixedProbe::miss(), &mut chassis);
        assert_eq!(wheel.contact_state(), ContactState::Airborne);
        assert!(wheel.last_trace().is_none());
        assert_relative_eq!(wheel.suspension_length(), wheel.rest_length());
    }

    #[test]
    fn wheel_center_stays_within_travel() {
        let mut wheel = default_wheel();
        let mut chassis = RecordingChassis::default();

        wheel.tick(&hub(), DT, &FixedProbe::hit_at(0.0), &mut chassis);
        assert_relative_eq!(wheel.wheel_center_offset(), 0.0);

        wheel.tick(&hub(), DT, &FixedProbe::hit_at(17.0), &mut chassis);
        assert_relative_eq!(wheel.wheel_center_offset(), 4.0);

        wheel.tick(&hub(), DT, &FixedProbe::miss(), &mut chassis);
        assert_relative_eq!(wheel.wheel_center_offset(), 8.0);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let inverted = WheelConfig {
            min_suspension_length: 5.0,
            max_suspension_length: 2.0,
            ..WheelConfig::default()
        };
        assert_eq!(
            WheelModel::new(inverted).unwrap_err(),
            ConfigError::InvertedSuspension { min: 5.0, max: 2.0 }
        );

        let flat = WheelConfig {
            wheel_radius: 0.0,
            ..WheelConfig::default()
        };
        assert!(matches!(
            flat.validate(),
            Err(ConfigError::NotPositive { field: "wheel_radius", .. })
        ));

        let springy = WheelConfig {
            suspension_damping: -1.0,
            ..WheelConfig::default()
        };
        assert!(springy.validate().is_err());
    }
}
