//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "LOD terrain mesh generator")]
pub struct CliArgs {
    /// Heightfield samples along one terrain edge (power of two).
    #[arg(long)]
    pub terrain_resolution: Option<u32>,

    /// Quads along one chunk edge (power of two).
    #[arg(long)]
    pub chunk_resolution: Option<u32>,

    /// Width of the finest LOD ring in mesh units.
    #[arg(long)]
    pub cascade_factor: Option<f64>,

    /// Mesh units between adjacent samples.
    #[arg(long)]
    pub horizontal_scale: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(res) = args.terrain_resolution {
            self.terrain.terrain_resolution = res;
        }
        if let Some(res) = args.chunk_resolution {
            self.terrain.chunk_resolution = res;
        }
        if let Some(factor) = args.cascade_factor {
            self.terrain.cascade_factor = factor;
        }
        if let Some(scale) = args.horizontal_scale {
            self.terrain.horizontal_scale = scale;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
