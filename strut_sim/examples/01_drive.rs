// strut_sim/examples/01_drive.rs

//! Drive a vehicle around a flat ground plane.
//!
//! This example demonstrates how to:
//! 1. Parse the command line and load a scenario from a TOML file.
//! 2. Set up the core Bevy application and the Avian3D physics plugins.
//! 3. Add the main `StrutSimulationPlugin`, which assembles the vehicles
//!    and runs every wheel in the fixed physics step.
//!
//! Controls: Up/W accelerate, Down/S reverse, Space pause, F1 wheel gizmos.
//!
//! To run this example:
//! `cargo run --example 01_drive -- --scenario assets/scenarios/flat_ground.toml`

use std::time::Duration;

use avian3d::prelude::*;
use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*, window::ExitCondition};
use clap::Parser;

use strut_sim::cli::Cli;
use strut_sim::simulation::config::load_scenario;
use strut_sim::StrutSimulationPlugin;

fn main() {
    let cli = Cli::parse();

    // --- 1. Load Simulation Configuration ---
    let config = match load_scenario(&cli.scenario) {
        Ok(config) => config,
        Err(e) => panic!(
            "Failed to load or parse scenario file at {}: {}",
            cli.scenario.display(),
            e
        ),
    };

    let log_plugin = LogPlugin {
        level: bevy::log::Level::INFO,
        // A good filter for focusing on our crate's logs during development.
        filter: "info,wgpu_core=error,wgpu_hal=error,strut_sim=debug".to_string(),
        ..default()
    };

    let mut app = App::new();

    // --- 2. Add Core Bevy Plugins & Resources ---
    if cli.headless {
        app.add_plugins(
            DefaultPlugins
                .set(log_plugin)
                .set(WindowPlugin {
                    primary_window: None,
                    exit_condition: ExitCondition::DontExit,
                    ..default()
                })
                .disable::<bevy::winit::WinitPlugin>(),
        )
        .add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        )));
    } else {
        app.add_plugins(DefaultPlugins.set(log_plugin))
            // An Avian3D plugin to visualize colliders for debugging.
            .add_plugins(PhysicsDebugPlugin::default());
    }

    app
        // The Avian3D physics plugins.
        .add_plugins(PhysicsPlugins::default())
        // Insert the loaded configuration as a Bevy resource so all systems can access it.
        .insert_resource(config)
        .insert_resource(cli);

    // --- 3. Add the Main Strut Simulation Plugin ---
    app.add_plugins(StrutSimulationPlugin);

    // --- 4. Run the App ---
    info!("Starting Strut simulation...");
    app.run();
}
