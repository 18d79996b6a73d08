use clap::Parser;
use std::path::PathBuf;

use crate::simulation::config::LumenConfig;

/// Lumen: a brightness-following line tracer on a 2D canvas.
///
/// This struct defines the command-line arguments that can be passed to any
/// binary application that uses the Lumen simulation library.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/default.toml")]
    pub scenario: PathBuf,

    /// Background image, relative to the `assets` directory. Overrides the scenario.
    #[arg(short, long)]
    pub background: Option<String>,

    /// Initial position of the speed slider.
    #[arg(long)]
    pub speed: Option<u32>,

    /// Initial position of the gain slider.
    #[arg(long)]
    pub gain: Option<u32>,

    /// Start with the agent paused.
    #[arg(long, default_value_t = false)]
    pub paused: bool,
}

impl Cli {
    /// Applies the command-line overrides on top of a loaded configuration.
    pub fn apply(&self, mut config: LumenConfig) -> LumenConfig {
        if let Some(background) = &self.background {
            config.assets.background = background.clone();
        }
        let controls = &mut config.simulation.controls;
        if let Some(speed) = self.speed {
            controls.initial.speed = speed;
        }
        if let Some(gain) = self.gain {
            controls.initial.gain = gain;
        }
        controls.start_paused |= self.paused;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_scenario_values() {
        let cli = Cli::parse_from([
            "lumen",
            "--background",
            "maps/oval.png",
            "--speed",
            "40",
            "--paused",
        ]);
        let config = cli.apply(LumenConfig::default());
        assert_eq!(config.assets.background, "maps/oval.png");
        assert_eq!(config.simulation.controls.initial.speed, 40);
        assert_eq!(config.simulation.controls.initial.gain, 0);
        assert!(config.simulation.controls.start_paused);
    }

    #[test]
    fn no_flags_keep_the_scenario() {
        let cli = Cli::parse_from(["lumen"]);
        let config = cli.apply(LumenConfig::default());
        assert_eq!(config, LumenConfig::default());
    }
}
