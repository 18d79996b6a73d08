// lumen_sim/tests/tick_schedule.rs

//! The tick system inside a headless Bevy app: it only advances the shared
//! `Simulation` once the app reaches the `Running` state.

use approx::assert_abs_diff_eq;
use bevy::state::app::StatesPlugin;
use lumen_sim::prelude::*;
use lumen_sim::simulation::plugins::agent::tick_simulation;

fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .init_state::<AppState>();

    let mut simulation = Simulation::new(SimulationConfig::default());
    simulation.load_raster(RasterBuffer::filled(1280, 720, [0, 0, 0, 255]));
    // Speed 0, gain slider 1: the black floor turns the agent 1 degree per tick.
    simulation.apply_sliders(&SliderPositions::new(0, 1));
    app.insert_resource(simulation);

    app.add_systems(
        FixedUpdate,
        tick_simulation
            .in_set(SimulationSet::Tick)
            .run_if(in_state(AppState::Running)),
    );
    app
}

fn heading(app: &App) -> f64 {
    app.world().resource::<Simulation>().pose().heading_deg
}

#[test]
fn no_ticks_while_loading() {
    let mut app = headless_app();
    for _ in 0..5 {
        app.world_mut().run_schedule(FixedUpdate);
    }
    assert_eq!(heading(&app), -90.0);
}

#[test]
fn ticks_steer_once_running() {
    let mut app = headless_app();
    app.world_mut()
        .insert_resource(State::new(AppState::Running));
    for _ in 0..10 {
        app.world_mut().run_schedule(FixedUpdate);
    }
    assert_abs_diff_eq!(heading(&app), -80.0, epsilon = 1e-9);
    let position = app.world().resource::<Simulation>().pose().position;
    assert_eq!((position.x, position.y), (640.0, 360.0));
}
