// lumen_sim/src/simulation/plugins/debugging/systems.rs

use std::fmt::Write as _;

use bevy::math::Isometry2d;
use bevy::prelude::*;

use nalgebra::Point2;

use super::components::{PredictionArrowhead, ReadoutPanel, ShowDebugGizmos};
use crate::prelude::*;
use crate::simulation::config::LumenConfig;
use crate::simulation::core::transforms::RasterFrame;
use crate::simulation::plugins::agent::AgentSprite;

const SENSOR_COLOR: Color = Color::BLACK;
const PATH_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
/// The arrowhead sits above the agent sprite.
const ARROWHEAD_Z: f32 = 2.0;

// =========================================================================
// == Toggle Systems (Hotkeys) ==
// =========================================================================

/// Toggles `ShowDebugGizmos` on the agent sprites with the F1 key.
pub fn toggle_overlays(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Query<(Entity, Option<&ShowDebugGizmos>), With<AgentSprite>>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        let are_any_on = query.iter().any(|(_, gizmo_opt)| gizmo_opt.is_some());
        for (entity, _) in &query {
            if are_any_on {
                commands.entity(entity).remove::<ShowDebugGizmos>();
            } else {
                commands.entity(entity).insert(ShowDebugGizmos);
            }
        }
        info!(
            "[Debug] Toggled sensor/path overlays {}",
            if are_any_on { "OFF" } else { "ON" }
        );
    }
}

// =========================================================================
// == Drawing Systems ==
// =========================================================================

/// Outlines the circular sensing mask in front of the agent.
pub fn draw_sensor_window(
    mut gizmos: Gizmos,
    simulation: Res<Simulation>,
    frame: Res<RasterFrame>,
    agents: Query<(), (With<AgentSprite>, With<ShowDebugGizmos>)>,
) {
    if agents.is_empty() {
        return;
    }
    let window = simulation.sensor_window();
    gizmos.circle_2d(
        Isometry2d::from_translation(frame.to_world(window.center)),
        window.radius() as f32,
        SENSOR_COLOR,
    );
}

/// Draws the look-ahead polyline.
pub fn draw_predicted_path(
    mut gizmos: Gizmos,
    simulation: Res<Simulation>,
    frame: Res<RasterFrame>,
    agents: Query<(), (With<AgentSprite>, With<ShowDebugGizmos>)>,
) {
    if agents.is_empty() {
        return;
    }
    // No preview while the sensor is off the background.
    let Ok(path) = simulation.predict() else {
        return;
    };
    if path.len() < 2 {
        return;
    }
    gizmos.linestrip_2d(path.points.iter().map(|p| frame.to_world(*p)), PATH_COLOR);
}

/// Builds the filled arrowhead mesh once, in its local frame: the anchor at
/// the origin and the tip along +x.
pub fn spawn_prediction_arrowhead(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    simulation: Res<Simulation>,
) {
    let prediction = simulation.config().prediction;
    // Raster y points down, world y up; the flip also reverses the winding.
    let [tip, first, second] = arrowhead_vertices(
        Point2::origin(),
        0.0,
        prediction.arrow_size,
        prediction.arrow_spread_rad,
    )
    .map(|v| Vec2::new(v.x as f32, -v.y as f32));

    commands.spawn((
        Name::new("PredictionArrowhead"),
        PredictionArrowhead,
        Mesh2d(meshes.add(Triangle2d::new(tip, second, first))),
        MeshMaterial2d(materials.add(PATH_COLOR)),
        Transform::from_xyz(0.0, 0.0, ARROWHEAD_Z),
        Visibility::Hidden,
    ));
}

/// Moves the arrowhead to the end of the predicted path and turns it along the
/// final heading. It is hidden whenever the path itself is not drawn.
pub fn place_prediction_arrowhead(
    simulation: Res<Simulation>,
    frame: Res<RasterFrame>,
    agents: Query<(), (With<AgentSprite>, With<ShowDebugGizmos>)>,
    mut arrowheads: Query<(&mut Transform, &mut Visibility), With<PredictionArrowhead>>,
) {
    let path = if agents.is_empty() {
        None
    } else {
        simulation.predict().ok().filter(|path| path.len() > 1)
    };

    for (mut transform, mut visibility) in &mut arrowheads {
        let Some(path) = &path else {
            *visibility = Visibility::Hidden;
            continue;
        };
        let Some(anchor) = path.points.last() else {
            continue;
        };
        let xy = frame.to_world(*anchor);
        transform.translation = xy.extend(ARROWHEAD_Z);
        transform.rotation = RasterFrame::heading_to_rotation(path.final_heading_deg);
        *visibility = Visibility::Visible;
    }
}

// =========================================================================
// == Readout Panel ==
// =========================================================================

pub fn spawn_readout_panel(mut commands: Commands, config: Res<LumenConfig>) {
    commands.spawn((
        Name::new("Readout"),
        ReadoutPanel,
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::BLACK),
        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(config.window.panel_left),
            top: Val::Px(12.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
    ));
}

pub fn update_readout_panel(
    simulation: Res<Simulation>,
    sliders: Res<SliderPositions>,
    mut query: Query<&mut Text, With<ReadoutPanel>>,
) {
    let text = readout_text(
        &sliders,
        simulation.sense().ok(),
        simulation.control().paused,
    );
    for mut panel in &mut query {
        if panel.0 != text {
            panel.0.clone_from(&text);
        }
    }
}

/// The panel contents: slider positions and, when the sensor sees the
/// background, the live brightness, error and turn.
pub fn readout_text(
    sliders: &SliderPositions,
    reading: Option<SensorReading>,
    paused: bool,
) -> String {
    let mut text = format!("Speed: {}\nGain: {}\n", sliders.speed, sliders.gain);
    match reading {
        Some(r) => {
            let _ = write!(
                text,
                "Brightness: {}\nMidpoint - brightness: {}\nPID angle: {:.1}",
                r.brightness, r.error, r.panel_angle
            );
        }
        None => text.push_str("Brightness: --\nMidpoint - brightness: --\nPID angle: --"),
    }
    if paused {
        text.push_str("\n[PAUSED]");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_shows_live_values() {
        let reading = SensorReading {
            brightness: 30,
            error: 20.0,
            correction: 0.4,
            panel_angle: 20.0,
        };
        let text = readout_text(&SliderPositions::new(12, 1), Some(reading), false);
        assert_eq!(
            text,
            "Speed: 12\nGain: 1\nBrightness: 30\nMidpoint - brightness: 20\nPID angle: 20.0"
        );
    }

    #[test]
    fn readout_without_a_reading_shows_placeholders_and_pause() {
        let text = readout_text(&SliderPositions::new(0, 0), None, true);
        assert!(text.contains("Brightness: --"));
        assert!(text.ends_with("[PAUSED]"));
    }

    #[test]
    fn arrowhead_follows_the_path_end_and_the_overlay_toggle() {
        use approx::assert_abs_diff_eq;
        use bevy::ecs::system::RunSystemOnce;

        let mut app = App::new();
        let mut simulation = Simulation::new(SimulationConfig::default());
        // Mid-gray reads at the setpoint, so the preview is straight.
        simulation.load_raster(RasterBuffer::filled(1280, 720, [128, 128, 128, 255]));
        simulation.apply_sliders(&SliderPositions::new(30, 10));
        app.insert_resource(simulation)
            .insert_resource(RasterFrame::new(1280, 720));
        let agent = app.world_mut().spawn((AgentSprite, ShowDebugGizmos)).id();
        let arrow = app
            .world_mut()
            .spawn((PredictionArrowhead, Transform::default(), Visibility::Hidden))
            .id();

        app.world_mut()
            .run_system_once(place_prediction_arrowhead)
            .unwrap();

        // 150 steps of 1.8 / 3 pixels straight up from the screen centre.
        let transform = *app.world().get::<Transform>(arrow).unwrap();
        assert_abs_diff_eq!(transform.translation.x, 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(transform.translation.y, 90.0, epsilon = 1e-3);
        assert_abs_diff_eq!(transform.translation.z, ARROWHEAD_Z, epsilon = 1e-6);
        let forward = transform.rotation * Vec3::X;
        assert_abs_diff_eq!(forward.y, 1.0, epsilon = 1e-4);
        assert_eq!(
            *app.world().get::<Visibility>(arrow).unwrap(),
            Visibility::Visible
        );

        app.world_mut().entity_mut(agent).remove::<ShowDebugGizmos>();
        app.world_mut()
            .run_system_once(place_prediction_arrowhead)
            .unwrap();
        assert_eq!(
            *app.world().get::<Visibility>(arrow).unwrap(),
            Visibility::Hidden
        );
    }

    #[test]
    fn f1_toggles_overlays_on_agents() {
        use bevy::ecs::system::RunSystemOnce;

        let mut app = App::new();
        app.insert_resource(ButtonInput::<KeyCode>::default());
        let agent = app.world_mut().spawn((AgentSprite, ShowDebugGizmos)).id();

        let press_f1 = |app: &mut App| {
            {
                let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
                keyboard.reset_all();
                keyboard.press(KeyCode::F1);
            }
            app.world_mut().run_system_once(toggle_overlays).unwrap();
        };

        press_f1(&mut app);
        assert!(app.world().get::<ShowDebugGizmos>(agent).is_none());
        press_f1(&mut app);
        assert!(app.world().get::<ShowDebugGizmos>(agent).is_some());
    }
}
