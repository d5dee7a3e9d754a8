//! Incremental LOD terrain meshing.
//!
//! [`TerrainGenerator`] ties the pieces together: each
//! [`update`](TerrainGenerator::update) rebuilds the LOD quadtree around the
//! viewer, refreshes the cached chunk set, and leaves a vertex/index buffer
//! pair ready to be copied out with the `write_*` methods.

mod error;
mod settings;
mod terrain;

pub use error::TerrainError;
pub use settings::TerrainSettings;
pub use terrain::TerrainGenerator;

pub use strata_lod::GridError;
pub use strata_mesh::{HeightField, HeightFn, UpdateStats, Vertex};
