// lumen_sim/src/simulation/core/simulation_setup.rs

use bevy::asset::LoadState;

use crate::prelude::*;
use crate::simulation::config::LumenConfig;
use crate::simulation::core::raster_import::raster_from_image;
use crate::simulation::core::transforms::RasterFrame;

/// The handle of the background image while (and after) it loads.
#[derive(Resource, Debug, Clone)]
pub struct BackgroundImage(pub Handle<Image>);

/// Marker for the background sprite.
#[derive(Component)]
pub struct Background;

pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        // This plugin's job is to read the config and add resources and startup systems.
        let config = app
            .world()
            .get_resource::<LumenConfig>()
            .cloned()
            .unwrap_or_default();

        // --- INITIALIZE RESOURCES & STATE ---
        // The simulation context starts without a raster; it cannot tick until
        // the background finishes loading.
        let simulation = Simulation::new(config.simulation.clone());
        app.insert_resource(simulation)
            .insert_resource(config.simulation.controls.initial)
            .init_state::<AppState>();

        app.insert_resource(
            // The resource is of type Time<Fixed>.
            Time::<Fixed>::from_hz(config.simulation.tick_hz),
        );

        app.configure_sets(
            Update,
            (SimulationSet::Input, SimulationSet::Render).chain(),
        );

        app.add_systems(Startup, (spawn_camera, start_background_load))
            .add_systems(
                Update,
                await_background.run_if(in_state(AppState::AssetLoading)),
            )
            .add_systems(OnEnter(AppState::Running), spawn_background);
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn start_background_load(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<LumenConfig>,
) {
    info!("Loading background raster from: {}", config.assets.background);
    let handle = asset_server.load::<Image>(config.assets.background.clone());
    commands.insert_resource(BackgroundImage(handle));
}

/// Polls the background image. Once it is decoded the pixels are handed to the
/// `Simulation` and the app moves to `Running`; a failed load ends the app,
/// since sensing without a raster is meaningless.
fn await_background(
    mut commands: Commands,
    background: Option<Res<BackgroundImage>>,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    config: Res<LumenConfig>,
    mut simulation: ResMut<Simulation>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(background) = background else {
        return;
    };

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(background.0.id()) {
        error!(
            "Failed to load background raster '{}': {}",
            config.assets.background, err
        );
        exit.write(AppExit::error());
        return;
    }

    let Some(image) = images.get(&background.0) else {
        return;
    };

    let raster = match raster_from_image(image) {
        Ok(raster) => raster,
        Err(e) => {
            error!(
                "Background raster '{}' cannot be sampled: {}",
                config.assets.background, e
            );
            exit.write(AppExit::error());
            return;
        }
    };

    let canvas = config.simulation.canvas;
    if raster.width() != canvas.width || raster.height() != canvas.height {
        warn!(
            "Background is {}x{} but the canvas is configured as {}x{}; sensing uses the image size.",
            raster.width(),
            raster.height(),
            canvas.width,
            canvas.height
        );
    }

    commands.insert_resource(RasterFrame::new(raster.width(), raster.height()));
    simulation.load_raster(raster);
    info!("Background raster loaded. Transitioning to Running state.");
    next_state.set(AppState::Running);
}

fn spawn_background(mut commands: Commands, background: Res<BackgroundImage>) {
    commands.spawn((
        Name::new("Background"),
        Background,
        Sprite::from_image(background.0.clone()),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
}
