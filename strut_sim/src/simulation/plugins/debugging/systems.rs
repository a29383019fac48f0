// strut_sim/src/simulation/plugins/debugging/systems.rs

use bevy::prelude::*;
use strut_core::prelude::ContactState;

use super::components::ShowDebugGizmos;
use crate::simulation::core::transforms::{bevy_to_wheel_pose, enu_vector_to_bevy_vector};
use crate::simulation::plugins::vehicles::Wheel;

/// Scales per-step forces down to something that fits on screen.
const FORCE_GIZMO_SCALE: f32 = 1e-4;

// =========================================================================
// == Toggle Systems (Hotkeys) ==
// =========================================================================

/// Toggles the `ShowDebugGizmos` component on all wheels with the F1 key.
pub fn toggle_wheel_visuals(
    mut commands: Commands,
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    query: Query<(Entity, Option<&ShowDebugGizmos>), With<Wheel>>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }

    // If any wheel is currently drawn, turn them all off.
    let are_any_on = query.iter().any(|(_, gizmo_opt)| gizmo_opt.is_some());
    for (entity, gizmo_opt) in &query {
        match (are_any_on, gizmo_opt.is_some()) {
            (true, true) => {
                commands.entity(entity).remove::<ShowDebugGizmos>();
            }
            (false, false) => {
                commands.entity(entity).insert(ShowDebugGizmos);
            }
            _ => {}
        }
    }
    info!(
        "[Debug] Toggled wheel contact visuals {}",
        if are_any_on { "OFF" } else { "ON" }
    );
}

// =========================================================================
// == Drawing Systems ==
// =========================================================================

/// Draws each wheel's ground probe, its contact point and the forces it applied.
pub fn draw_wheel_contacts(
    mut gizmos: Gizmos,
    query: Query<(&Wheel, &GlobalTransform), With<ShowDebugGizmos>>,
) {
    for (wheel, transform) in &query {
        let (_, rotation, translation) = transform.to_scale_rotation_translation();
        let pose = bevy_to_wheel_pose(&translation, &rotation);
        let request = wheel.model.trace_request(&pose);

        let start = enu_vector_to_bevy_vector(&request.start);
        let end = enu_vector_to_bevy_vector(&request.end);

        let probe_color = match wheel.contact() {
            ContactState::Grounded => Color::srgb(0.1, 0.9, 0.2),
            ContactState::Airborne => Color::srgb(0.9, 0.2, 0.1),
        };
        gizmos.line(start, end, probe_color);

        if let Some(hit) = wheel.model.last_trace() {
            let point = enu_vector_to_bevy_vector(&hit.point);
            gizmos.sphere(point, request.radius as f32 * 0.25, probe_color);
        }

        if let Some(report) = &wheel.last_report {
            let suspension = enu_vector_to_bevy_vector(&report.suspension_force);
            let wheel_force = enu_vector_to_bevy_vector(&report.wheel_force);
            gizmos.arrow(
                translation,
                translation + suspension * FORCE_GIZMO_SCALE,
                Color::srgb(0.2, 0.4, 1.0),
            );
            gizmos.arrow(
                translation,
                translation + wheel_force * FORCE_GIZMO_SCALE,
                Color::srgb(1.0, 0.8, 0.1),
            );
        }
    }
}
