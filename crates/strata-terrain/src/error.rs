//! Terrain construction errors.

use strata_lod::GridError;

/// Reasons a [`crate::TerrainGenerator`] cannot be built from its settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// Terrain or chunk resolution violates a sizing constraint.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Horizontal scale must be finite and positive.
    #[error("horizontal scale must be finite and positive, got {0}")]
    InvalidHorizontalScale(f32),

    /// Cascade factor must be finite and positive.
    #[error("cascade factor must be finite and positive, got {0}")]
    InvalidCascadeFactor(f64),

    #[error("chunk cache capacity must be at least 1")]
    InvalidCacheCapacity,
}
