//! Configuration for the terrain generator.
//!
//! Settings persist to disk as `config.ron`, fill in missing fields from
//! defaults, and accept command-line overrides via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CacheConfig, Config, DebugConfig, TerrainConfig};
pub use error::ConfigError;
