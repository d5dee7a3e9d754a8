//! Configuration structs with defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain sizing, scale, and LOD settings.
    pub terrain: TerrainConfig,
    /// Chunk cache settings.
    pub cache: CacheConfig,
    /// Logging and development settings.
    pub debug: DebugConfig,
}

/// Terrain sizing and LOD configuration.
///
/// Values are checked when a terrain generator is built from them, not when
/// they are loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Heightfield samples along one terrain edge. Power of two.
    pub terrain_resolution: u32,
    /// Quads along one chunk edge. Power of two, greater than 1, less than
    /// `terrain_resolution`.
    pub chunk_resolution: u32,
    /// Width of the finest LOD ring in mesh units.
    pub cascade_factor: f64,
    /// Mesh units between adjacent samples.
    pub horizontal_scale: f32,
    /// Texture units between adjacent samples.
    pub texcoord_scale: f64,
    /// Subtracted from every vertex position.
    pub terrain_offset: [f32; 3],
}

/// Chunk cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Chunks cached before eviction starts. Grows automatically when a frame
    /// needs more.
    pub initial_capacity: usize,
}

/// Logging and development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to a file in debug builds.
    pub log_to_file: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            terrain_resolution: 2048,
            chunk_resolution: 64,
            cascade_factor: 256.0,
            horizontal_scale: 1.0,
            texcoord_scale: 1.0 / 2048.0,
            terrain_offset: [0.0; 3],
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 256,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(ConfigError::read(&config_path))?;
            let config: Config = ron::from_str(&contents)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::write(config_dir))?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;

        let config_path = config_dir.join(CONFIG_FILE);
        std::fs::write(&config_path, serialized).map_err(ConfigError::write(&config_path))?;
        Ok(())
    }

    /// Re-read `config.ron`: `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents =
            std::fs::read_to_string(&config_path).map_err(ConfigError::read(&config_path))?;
        let new_config: Config = ron::from_str(&contents)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
