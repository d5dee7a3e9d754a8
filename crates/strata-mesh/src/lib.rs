//! Terrain chunk meshing: vertex layout, seam-stitched vertex generation, and
//! the cached chunk generator that assembles per-frame vertex/index buffers.

pub mod chunk;
pub mod generator;
pub mod height;
pub mod stitching;
pub mod vertex;

pub use chunk::{Chunk, ChunkKey, chunk_indices};
pub use generator::{ChunkGenerator, UpdateStats};
pub use height::{HeightField, HeightFn};
pub use stitching::VertexGenerator;
pub use vertex::Vertex;
