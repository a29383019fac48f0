// strut_sim/src/simulation/plugins/debugging/components.rs

use bevy::prelude::*;

/// A marker component to enable debug visualizations for a specific entity.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct ShowDebugGizmos;
