//! Validated terrain and chunk resolutions.

/// Errors raised when a terrain/chunk resolution pair is not usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A resolution that must be a power of two is not.
    #[error("{name} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Which resolution failed.
        name: &'static str,
        /// The offending value.
        value: u32,
    },

    /// Chunks need at least two quads per edge.
    #[error("chunk resolution must be greater than 1, got {0}")]
    ChunkResolutionTooSmall(u32),

    /// The terrain must split into more than one chunk.
    #[error("terrain resolution {terrain} must exceed chunk resolution {chunk}")]
    TerrainNotLargerThanChunk {
        /// Terrain edge length in samples.
        terrain: u32,
        /// Chunk edge length in quads.
        chunk: u32,
    },
}

/// A terrain edge length and chunk resolution that satisfy every sizing
/// constraint: both powers of two, `chunk_resolution > 1`, and
/// `terrain_resolution > chunk_resolution`.
///
/// Everything downstream relies on these holding, so they are checked once
/// here and never again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainGrid {
    terrain_resolution: u32,
    chunk_resolution: u32,
}

impl TerrainGrid {
    /// Validate and wrap a resolution pair.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] naming the first violated constraint.
    pub fn new(terrain_resolution: u32, chunk_resolution: u32) -> Result<Self, GridError> {
        if !terrain_resolution.is_power_of_two() {
            return Err(GridError::NotPowerOfTwo {
                name: "terrain resolution",
                value: terrain_resolution,
            });
        }
        if !chunk_resolution.is_power_of_two() {
            return Err(GridError::NotPowerOfTwo {
                name: "chunk resolution",
                value: chunk_resolution,
            });
        }
        if chunk_resolution <= 1 {
            return Err(GridError::ChunkResolutionTooSmall(chunk_resolution));
        }
        if terrain_resolution <= chunk_resolution {
            return Err(GridError::TerrainNotLargerThanChunk {
                terrain: terrain_resolution,
                chunk: chunk_resolution,
            });
        }
        Ok(Self {
            terrain_resolution,
            chunk_resolution,
        })
    }

    /// Terrain edge length in height samples (the quadtree root's size).
    pub fn terrain_resolution(&self) -> u32 {
        self.terrain_resolution
    }

    /// Quads along one chunk edge.
    pub fn chunk_resolution(&self) -> u32 {
        self.chunk_resolution
    }

    /// Vertices along one chunk edge.
    pub fn chunk_vertices_per_edge(&self) -> u32 {
        self.chunk_resolution + 1
    }

    /// Vertices in one chunk, `(chunk_resolution + 1)^2`.
    pub fn vertices_per_chunk(&self) -> usize {
        let edge = self.chunk_vertices_per_edge() as usize;
        edge * edge
    }

    /// Indices in one chunk, two triangles per quad.
    pub fn indices_per_chunk(&self) -> usize {
        let res = self.chunk_resolution as usize;
        res * res * 6
    }

    /// Number of subdivision levels between the root and the finest chunk.
    pub fn max_depth(&self) -> u32 {
        self.terrain_resolution.trailing_zeros() - self.chunk_resolution.trailing_zeros()
    }
}
