//! Construction parameters for [`crate::TerrainGenerator`].

use glam::Vec3;
use strata_config::Config;

use crate::error::TerrainError;

/// Everything needed to build a terrain generator apart from its heightfield.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainSettings {
    /// Mesh units between adjacent samples.
    pub horizontal_scale: f32,
    /// Texture units between adjacent samples.
    pub texcoord_scale: f64,
    /// Subtracted from every emitted vertex position.
    pub terrain_offset: Vec3,
    /// Heightfield samples along one terrain edge.
    pub terrain_resolution: u32,
    /// Quads along one chunk edge.
    pub chunk_resolution: u32,
    /// Width of the finest LOD ring in mesh units.
    pub cascade_factor: f64,
    /// Starting chunk cache capacity.
    pub cache_capacity: usize,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for TerrainSettings {
    fn from(config: &Config) -> Self {
        let terrain = &config.terrain;
        Self {
            horizontal_scale: terrain.horizontal_scale,
            texcoord_scale: terrain.texcoord_scale,
            terrain_offset: Vec3::from(terrain.terrain_offset),
            terrain_resolution: terrain.terrain_resolution,
            chunk_resolution: terrain.chunk_resolution,
            cascade_factor: terrain.cascade_factor,
            cache_capacity: config.cache.initial_capacity,
        }
    }
}

impl TerrainSettings {
    /// Offset that centers the terrain on the mesh-space origin.
    pub fn centered_offset(terrain_resolution: u32, horizontal_scale: f32) -> Vec3 {
        let half = terrain_resolution as f32 * horizontal_scale / 2.0;
        Vec3::new(half, 0.0, half)
    }

    /// Check the scalar settings. Resolutions are checked separately when the
    /// grid is built.
    pub(crate) fn validate(&self) -> Result<(), TerrainError> {
        if !(self.horizontal_scale.is_finite() && self.horizontal_scale > 0.0) {
            return Err(TerrainError::InvalidHorizontalScale(self.horizontal_scale));
        }
        if !(self.cascade_factor.is_finite() && self.cascade_factor > 0.0) {
            return Err(TerrainError::InvalidCascadeFactor(self.cascade_factor));
        }
        if self.cache_capacity == 0 {
            return Err(TerrainError::InvalidCacheCapacity);
        }
        Ok(())
    }
}
