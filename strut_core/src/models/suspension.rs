// strut_core/src/models/suspension.rs

/// Spring-damper force along the vertical axis.
///
/// Hooke's law on the displacement from `rest_length`, plus damping on the
/// vertical velocity of the contact point. Positive values push the chassis up.
pub fn suspension_force_magnitude(
    stiffness: f64,
    damping: f64,
    rest_length: f64,
    current_length: f64,
    vertical_velocity: f64,
) -> f64 {
    -damping * vertical_velocity - stiffness * (current_length - rest_length)
}

/// Natural length of the suspension spring, measured from the top of travel.
pub fn rest_length(min_length: f64, max_length: f64, wheel_radius: f64) -> f64 {
    (max_length + wheel_radius) - min_length
}
