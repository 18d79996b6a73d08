// lumen_sim/src/simulation/plugins/agent.rs

use crate::prelude::*;
use crate::simulation::config::LumenConfig;
use crate::simulation::core::transforms::RasterFrame;
use crate::simulation::plugins::debugging::ShowDebugGizmos;

/// Marker for the sprite that mirrors the simulated agent.
#[derive(Component)]
pub struct AgentSprite;

/// Draw order of the agent above the background.
const AGENT_Z: f32 = 1.0;

pub struct AgentPlugin;

impl Plugin for AgentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Running), spawn_agent_sprite)
            .add_systems(
                FixedUpdate,
                tick_simulation
                    .in_set(SimulationSet::Tick)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(
                Update,
                sync_agent_sprite
                    .in_set(SimulationSet::Render)
                    .run_if(in_state(AppState::Running)),
            );
    }
}

fn spawn_agent_sprite(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<LumenConfig>,
    simulation: Res<Simulation>,
    frame: Res<RasterFrame>,
) {
    info!("Spawning agent sprite from: {}", config.assets.sprite);
    commands.spawn((
        Name::new("Agent"),
        AgentSprite,
        ShowDebugGizmos,
        Sprite::from_image(asset_server.load(config.assets.sprite.clone())),
        frame.pose_to_transform(simulation.pose(), AGENT_Z),
    ));
}

/// Advances the simulation by one control period.
///
/// The brightness of every steered tick goes to the debug log. Leaving and
/// re-entering the raster is reported once per transition rather than once
/// per tick.
pub fn tick_simulation(mut simulation: ResMut<Simulation>, mut holding: Local<bool>) {
    let report = match simulation.tick() {
        Ok(report) => report,
        Err(e) => {
            error!("[Tick] Simulation step failed: {}", e);
            return;
        }
    };

    let Some(steering) = report.steering else {
        return;
    };
    debug!(
        "[Tick] brightness={} error={:.1} correction={:.3}",
        steering.brightness, steering.error, steering.correction
    );

    if report.held_brightness != *holding {
        *holding = report.held_brightness;
        if report.held_brightness {
            warn!(
                "[Tick] Sensor window at ({:.1}, {:.1}) is off the background; holding last brightness.",
                report.pose.position.x, report.pose.position.y
            );
        } else {
            info!("[Tick] Sensor window is back on the background.");
        }
    }
}

/// Copies the simulated pose onto the agent sprite.
pub fn sync_agent_sprite(
    simulation: Res<Simulation>,
    frame: Res<RasterFrame>,
    mut query: Query<&mut Transform, With<AgentSprite>>,
) {
    for mut transform in &mut query {
        *transform = frame.pose_to_transform(simulation.pose(), AGENT_Z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bevy::ecs::system::RunSystemOnce;

    fn app_with(raster: RasterBuffer, sliders: SliderPositions) -> App {
        let mut app = App::new();
        let mut simulation = Simulation::new(SimulationConfig::default());
        simulation.load_raster(raster);
        simulation.apply_sliders(&sliders);
        app.insert_resource(simulation)
            .insert_resource(RasterFrame::new(1280, 720));
        app
    }

    #[test]
    fn tick_system_steers_the_shared_simulation() {
        // Speed 0, gain 1 slider step: a black floor turns 1 degree per tick.
        let mut app = app_with(
            RasterBuffer::filled(1280, 720, [0, 0, 0, 255]),
            SliderPositions::new(0, 1),
        );
        for _ in 0..3 {
            app.world_mut().run_system_once(tick_simulation).unwrap();
        }
        let pose = *app.world().resource::<Simulation>().pose();
        assert_abs_diff_eq!(pose.heading_deg, -87.0, epsilon = 1e-9);
    }

    #[test]
    fn sprite_follows_the_simulated_pose() {
        let mut app = app_with(
            RasterBuffer::filled(1280, 720, [255, 255, 255, 255]),
            SliderPositions::default(),
        );
        let sprite = app
            .world_mut()
            .spawn((AgentSprite, Transform::default()))
            .id();
        app.world_mut()
            .resource_mut::<Simulation>()
            .set_pose(740.0, 260.0)
            .unwrap();

        app.world_mut().run_system_once(sync_agent_sprite).unwrap();

        let transform = app.world().get::<Transform>(sprite).unwrap();
        assert_abs_diff_eq!(transform.translation.x, 100.0, epsilon = 1e-4);
        assert_abs_diff_eq!(transform.translation.y, 100.0, epsilon = 1e-4);
        assert_abs_diff_eq!(transform.translation.z, AGENT_Z, epsilon = 1e-6);
        // The default heading of -90 faces up the screen.
        let forward = transform.rotation * Vec3::X;
        assert_abs_diff_eq!(forward.y, 1.0, epsilon = 1e-4);
    }
}
