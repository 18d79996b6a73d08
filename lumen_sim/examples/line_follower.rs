// lumen_sim/examples/line_follower.rs

//! The interactive line tracer.
//!
//! This example demonstrates how to:
//! 1. Load a scenario (defaults, TOML file, `LUMEN_` env vars) and apply CLI flags.
//! 2. Set up the core Bevy application with a window sized to the canvas.
//! 3. Add the `LumenSimulationPlugin`, which owns everything else.
//!
//! To run this example (the default scenario path is relative to `lumen_sim/`):
//! `cd lumen_sim && cargo run --example line_follower -- --speed 30 --gain 10`

use bevy::{log::LogPlugin, prelude::*, window::WindowResolution};
use clap::Parser;

use lumen_sim::cli::Cli;
use lumen_sim::simulation::config::{load_config, validate};
use lumen_sim::LumenSimulationPlugin;

fn main() -> AppExit {
    let cli = Cli::parse();

    // --- 1. Load Simulation Configuration ---
    println!("Loading scenario from: {}", cli.scenario.display());
    let config = match load_config(&cli.scenario) {
        Ok(config) => cli.apply(config),
        Err(e) => {
            eprintln!("Invalid scenario '{}': {}", cli.scenario.display(), e);
            return AppExit::error();
        }
    };
    // The flags can push slider positions out of range.
    if let Err(e) = validate(&config) {
        eprintln!("Invalid command-line overrides: {}", e);
        return AppExit::error();
    }

    let canvas = config.simulation.canvas;
    let mut app = App::new();

    // --- 2. Add Core Bevy Plugins ---
    app.insert_resource(ClearColor(Color::WHITE)).add_plugins(
        DefaultPlugins
            .set(LogPlugin {
                level: bevy::log::Level::INFO,
                // A good filter for focusing on our crate's logs during development.
                filter: "info,wgpu_core=error,wgpu_hal=error,lumen_sim=debug,lumen_core=debug"
                    .to_string(),
                ..default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: config.window.title.clone(),
                    resolution: WindowResolution::new(canvas.width as f32, canvas.height as f32),
                    resizable: false,
                    ..default()
                }),
                ..default()
            }),
    );

    // --- 3. Add the Main Lumen Simulation Plugin ---
    app.add_plugins(LumenSimulationPlugin { config });

    // --- 4. Run the App ---
    println!("Starting Lumen line tracer...");
    app.run()
}
