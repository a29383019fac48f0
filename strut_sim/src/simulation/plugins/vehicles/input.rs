// strut_sim/src/simulation/plugins/vehicles/input.rs

use bevy::prelude::*;

use super::components::VehicleControllerInput;

/// Maps arrow keys (or W/S) to throttle on every vehicle.
pub fn keyboard_throttle(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut query: Query<&mut VehicleControllerInput>,
) {
    // Headless runs have no keyboard.
    let Some(keyboard) = keyboard else {
        return;
    };

    let mut throttle = 0.0;
    if keyboard.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW]) {
        throttle += 1.0;
    }
    if keyboard.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]) {
        throttle -= 1.0;
    }

    for mut input in &mut query {
        input.throttle = throttle;
    }
}
