// lumen_sim/src/simulation/config/mod.rs

//! This module handles loading and validating the scenario configuration:
//! built-in defaults, then the scenario TOML file, then `LUMEN_` environment
//! variables.

use bevy::prelude::Resource;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use lumen_core::config::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # LumenConfig
/// The Bevy resource holding all configuration for a simulation run.
/// This struct is the root of the data parsed from a `scenario.toml` file.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct LumenConfig {
    /// Everything the control loop itself needs.
    pub simulation: SimulationConfig,
    pub assets: AssetsConfig,
    pub window: WindowConfig,
}

/// Asset paths, relative to Bevy's `assets` directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    pub background: String,
    pub sprite: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            background: "res/background.png".to_string(),
            sprite: "res/sprite.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    /// Horizontal position of the readout panel, in logical pixels from the left.
    pub panel_left: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lumen line tracer".to_string(),
            panel_left: 940.0,
        }
    }
}

/// Loads the scenario at `path` on top of the defaults and validates it.
///
/// A missing file is not an error: the defaults (and any environment
/// overrides) are used as they are.
pub fn load_config(path: &Path) -> Result<LumenConfig, figment::Error> {
    let config: LumenConfig = Figment::from(Serialized::defaults(LumenConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LUMEN_").split("__"))
        .extract()?;
    validate(&config)?;
    Ok(config)
}

/// Rejects configurations the simulation cannot run with.
pub fn validate(config: &LumenConfig) -> Result<(), figment::Error> {
    config
        .simulation
        .validate()
        .map_err(|e| figment::Error::from(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn missing_file_gives_defaults() {
        Jail::expect_with(|_jail| {
            let config = load_config(Path::new("does_not_exist.toml"))?;
            assert_eq!(config, LumenConfig::default());
            Ok(())
        });
    }

    #[test]
    fn scenario_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "scenario.toml",
                r#"
                [simulation]
                tick_hz = 60.0

                [simulation.sensor]
                area_size = 40

                [simulation.controls.initial]
                speed = 20
                gain = 15

                [assets]
                background = "maps/oval.png"
                "#,
            )?;
            let config = load_config(Path::new("scenario.toml"))?;
            assert_eq!(config.simulation.tick_hz, 60.0);
            assert_eq!(config.simulation.sensor.area_size, 40);
            // Untouched keys in a partially specified section keep their defaults.
            assert_eq!(config.simulation.sensor.offset, 30.0);
            assert_eq!(config.simulation.controls.initial.gain, 15);
            assert_eq!(config.assets.background, "maps/oval.png");
            assert_eq!(config.assets.sprite, "res/sprite.png");
            Ok(())
        });
    }

    #[test]
    fn bundled_scenario_is_valid() {
        Jail::expect_with(|_jail| {
            let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/scenarios/default.toml");
            let config = load_config(&path)?;
            assert_eq!(config.simulation.agent.initial_pose.heading_deg, 0.0);
            assert_eq!(config.simulation.controls.initial.speed, 30);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_the_file() {
        Jail::expect_with(|jail| {
            jail.create_file("scenario.toml", "[simulation]\ntick_hz = 60.0\n")?;
            jail.set_env("LUMEN_SIMULATION__TICK_HZ", "45.0");
            let config = load_config(Path::new("scenario.toml"))?;
            assert_eq!(config.simulation.tick_hz, 45.0);
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_and_invalid_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("typo.toml", "[simulation]\ntick_rate = 60.0\n")?;
            assert!(load_config(Path::new("typo.toml")).is_err());

            jail.create_file("bad.toml", "[simulation.prediction]\nspeed_divisor = 0.0\n")?;
            let err = load_config(Path::new("bad.toml")).unwrap_err();
            assert!(err.to_string().contains("prediction.speed_divisor"));
            Ok(())
        });
    }
}
