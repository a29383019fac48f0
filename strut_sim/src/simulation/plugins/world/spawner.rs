// strut_sim/src/simulation/plugins/world/spawner.rs

use crate::prelude::*;
use crate::simulation::core::layers::GameLayer;
use avian3d::prelude::*;

/// Thickness of the ground slab collider, in meters.
const GROUND_THICKNESS: f32 = 0.2;

pub struct WorldSpawnerPlugin;

impl Plugin for WorldSpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            (spawn_lighting_and_camera, spawn_ground).in_set(SceneBuildSet::World),
        );
    }
}

/// Spawns a static ground slab whose top face sits at height zero.
fn spawn_ground(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let size = config.world.ground_size;
    info!("[SETUP] Spawning {size}m ground plane.");

    commands.spawn((
        Name::new("Ground"),
        RigidBody::Static,
        Collider::cuboid(size, GROUND_THICKNESS, size),
        GameLayer::ground_layers(),
        Transform::from_xyz(0.0, -GROUND_THICKNESS / 2.0, 0.0),
        Mesh3d(meshes.add(Cuboid::new(size, GROUND_THICKNESS, size))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
    ));
}

fn spawn_lighting_and_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 40.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("Camera"),
        Camera3d::default(),
        Transform::from_xyz(-12.0, 6.0, 12.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
