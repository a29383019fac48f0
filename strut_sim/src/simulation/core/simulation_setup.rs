// strut_sim/src/simulation/core/simulation_setup.rs

use avian3d::prelude::*;
use bevy::prelude::*;

use super::transforms::enu_vector_to_bevy_vector;
use crate::prelude::*;

/// Headless runs stop once this much simulated time has elapsed.
#[derive(Resource, Debug)]
pub struct RunDuration(pub Timer);

pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        // This plugin's job is to read the config and add resources and systems.
        let config = app
            .world()
            .get_resource::<ScenarioConfig>()
            .cloned()
            .unwrap_or_else(|| {
                warn!("No ScenarioConfig resource inserted, using an empty scenario.");
                ScenarioConfig::default()
            });

        app.insert_resource(Time::<Fixed>::from_hz(config.simulation.fixed_rate_hz));

        let gravity = nalgebra::Vector3::from(config.world.gravity.map(f64::from));
        app.insert_resource(Gravity(enu_vector_to_bevy_vector(&gravity)));

        if let Some(seconds) = config.simulation.duration_seconds {
            app.insert_resource(RunDuration(Timer::from_seconds(seconds, TimerMode::Once)));
        }

        app.insert_resource(config);

        // --- CONFIGURE THE SPAWNING PIPELINE ---
        app.configure_sets(
            OnEnter(AppState::SceneBuilding),
            (
                SceneBuildSet::World,
                SceneBuildSet::Vehicles,
                SceneBuildSet::Finalize,
            )
                .chain(),
        );

        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            transition_to_running.in_set(SceneBuildSet::Finalize),
        );

        // Configure the runtime schedule graph. Avian steps in FixedPostUpdate,
        // so every force queued here lands in the same tick.
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Control,
                SimulationSet::Actuation,
                SimulationSet::Validation,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );

        app.add_systems(Update, toggle_pause).add_systems(
            FixedUpdate,
            stop_after_duration.in_set(SimulationSet::Validation),
        );
    }
}

fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    info!("Scene building complete. Transitioning to Running state.");
    next_state.set(AppState::Running);
}

/// Space bar pauses and resumes both the wheel systems and the physics clock.
fn toggle_pause(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut physics_time: ResMut<Time<Physics>>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    if !keyboard.just_pressed(KeyCode::Space) {
        return;
    }

    match state.get() {
        AppState::Running => {
            physics_time.pause();
            next_state.set(AppState::Paused);
            info!("Simulation paused.");
        }
        AppState::Paused => {
            physics_time.unpause();
            next_state.set(AppState::Running);
            info!("Simulation resumed.");
        }
        AppState::SceneBuilding => {}
    }
}

fn stop_after_duration(
    time: Res<Time>,
    duration: Option<ResMut<RunDuration>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(mut duration) = duration else {
        return;
    };
    if duration.0.tick(time.delta()).just_finished() {
        info!(
            "Run duration of {:.1}s reached, exiting.",
            duration.0.duration().as_secs_f32()
        );
        exit.write(AppExit::Success);
    }
}
