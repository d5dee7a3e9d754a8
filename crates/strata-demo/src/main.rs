//! Demo binary that meshes a noise terrain around a wandering viewer and logs
//! what the chunk cache does.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p strata-demo -- --terrain-resolution 1024 --log-level debug`.

mod fbm;
mod terrain_demos;

use clap::Parser;
use strata_config::{CliArgs, Config};
use strata_terrain::{TerrainGenerator, TerrainSettings};
use tracing::error;

use crate::fbm::{FbmHeightField, FbmParams};

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .expect("Failed to resolve config directory")
            .join("strata")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let settings = TerrainSettings::from(&config);
    let field = FbmHeightField::new(FbmParams::default());
    let mut terrain = match TerrainGenerator::new(field, settings) {
        Ok(terrain) => terrain,
        Err(e) => {
            error!("Invalid terrain configuration: {e}");
            std::process::exit(1);
        }
    };

    terrain_demos::demonstrate_viewer_walk(&mut terrain);
    terrain_demos::demonstrate_buffer_export(&terrain);
}
