// strut_sim/src/simulation/core/layers.rs

use avian3d::prelude::*;

/// Collision categories. Wheel probes never see `Vehicle` colliders.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    Ground,
    Vehicle,
}

impl GameLayer {
    /// Layers a wheel's ground probe is allowed to hit.
    pub fn probe_mask() -> LayerMask {
        LayerMask::from([GameLayer::Default, GameLayer::Ground])
    }

    pub fn vehicle_layers() -> CollisionLayers {
        CollisionLayers::new(GameLayer::Vehicle, [GameLayer::Default, GameLayer::Ground])
    }

    pub fn ground_layers() -> CollisionLayers {
        CollisionLayers::new(GameLayer::Ground, LayerMask::ALL)
    }
}
