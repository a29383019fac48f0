// strut_sim/src/simulation/plugins/debugging/mod.rs

use bevy::prelude::*;

// --- Sub-modules for organization ---
mod components;
mod systems;

// Re-export the public component for use in other plugins (like the vehicle assembly).
pub use components::ShowDebugGizmos;

use crate::prelude::AppState;

/// A top-level plugin that brings in all debugging visualization tools.
pub struct DebuggingPlugin;

impl Plugin for DebuggingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                // Global hotkey toggle
                systems::toggle_wheel_visuals,
                // The actual drawing system
                systems::draw_wheel_contacts,
            )
                .run_if(not(in_state(AppState::SceneBuilding))),
        );
    }
}
