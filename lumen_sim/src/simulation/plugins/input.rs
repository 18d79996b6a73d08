// lumen_sim/src/simulation/plugins/input.rs

use bevy::window::PrimaryWindow;

use crate::prelude::*;
use crate::simulation::core::transforms::RasterFrame;

/// Keyboard and mouse hooks into the simulation.
///
/// | Input            | Effect                                   |
/// |------------------|------------------------------------------|
/// | `←` / `→`        | turn by the configured heading step      |
/// | `P`              | toggle pause                             |
/// | `↑` / `↓`        | speed slider up / down one step          |
/// | `=` / `-`        | gain slider up / down one step           |
/// | left click       | move the agent to the cursor             |
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_keyboard, handle_click)
                .in_set(SimulationSet::Input)
                .run_if(in_state(AppState::Running)),
        );
    }
}

pub fn handle_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut simulation: ResMut<Simulation>,
    mut sliders: ResMut<SliderPositions>,
) {
    let step = simulation.config().agent.heading_step_deg;
    let mut turn = 0.0;
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        turn -= step;
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        turn += step;
    }
    if turn != 0.0 {
        if let Err(e) = simulation.adjust_heading(turn) {
            warn!("[Input] Turn ignored: {}", e);
        }
    }
    if keyboard.just_pressed(KeyCode::KeyP) {
        let paused = simulation.toggle_pause();
        info!("[Input] Simulation {}", if paused { "PAUSED" } else { "RESUMED" });
    }

    let max = simulation.config().controls.slider_max;
    let before = *sliders;
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        sliders.nudge_speed(1, max);
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        sliders.nudge_speed(-1, max);
    }
    if keyboard.just_pressed(KeyCode::Equal) {
        sliders.nudge_gain(1, max);
    }
    if keyboard.just_pressed(KeyCode::Minus) {
        sliders.nudge_gain(-1, max);
    }
    if *sliders != before {
        simulation.apply_sliders(&sliders);
        debug!("[Input] Sliders now speed={} gain={}", sliders.speed, sliders.gain);
    }
}

/// Moves the agent to the clicked point, keeping its heading.
pub fn handle_click(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    frame: Res<RasterFrame>,
    mut simulation: ResMut<Simulation>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(world) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };

    let target = frame.to_raster(world);
    match simulation.set_pose(target.x, target.y) {
        Ok(()) => debug!("[Input] Agent moved to ({:.1}, {:.1})", target.x, target.y),
        Err(e) => warn!("[Input] Click ignored: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn app() -> App {
        let mut app = App::new();
        let config = SimulationConfig::default();
        let sliders = config.controls.initial;
        app.insert_resource(Simulation::new(config))
            .insert_resource(sliders)
            .insert_resource(ButtonInput::<KeyCode>::default());
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.reset_all();
            keyboard.press(key);
        }
        app.world_mut().run_system_once(handle_keyboard).unwrap();
    }

    #[test]
    fn arrows_turn_by_the_heading_step() {
        let mut app = app();
        press(&mut app, KeyCode::ArrowLeft);
        assert_eq!(app.world().resource::<Simulation>().pose().heading_deg, -100.0);
        press(&mut app, KeyCode::ArrowRight);
        press(&mut app, KeyCode::ArrowRight);
        assert_eq!(app.world().resource::<Simulation>().pose().heading_deg, -80.0);
    }

    #[test]
    fn p_toggles_pause() {
        let mut app = app();
        press(&mut app, KeyCode::KeyP);
        assert!(app.world().resource::<Simulation>().control().paused);
        press(&mut app, KeyCode::KeyP);
        assert!(!app.world().resource::<Simulation>().control().paused);
    }

    #[test]
    fn slider_keys_update_control_params() {
        let mut app = app();
        for _ in 0..5 {
            press(&mut app, KeyCode::ArrowUp);
        }
        press(&mut app, KeyCode::Equal);
        press(&mut app, KeyCode::Equal);
        press(&mut app, KeyCode::Minus);

        assert_eq!(
            *app.world().resource::<SliderPositions>(),
            SliderPositions::new(5, 1)
        );
        let control = *app.world().resource::<Simulation>().control();
        assert!((control.speed - 0.3).abs() < 1e-12);
        assert!((control.gain - 0.02).abs() < 1e-12);
    }

    #[test]
    fn sliders_stop_at_zero() {
        let mut app = app();
        press(&mut app, KeyCode::ArrowDown);
        press(&mut app, KeyCode::Minus);
        assert_eq!(
            *app.world().resource::<SliderPositions>(),
            SliderPositions::new(0, 0)
        );
    }
}
