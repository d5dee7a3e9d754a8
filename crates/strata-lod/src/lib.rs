//! Level-of-detail quadtree: grid validation, arena-backed tree, and distance-driven subdivision.

mod builder;
mod grid;
mod tree;

pub use builder::{LodTreeBuilder, planar_distance};
pub use grid::{GridError, TerrainGrid};
pub use tree::{Footprint, Leaves, LodNode, LodTree, NodeId};
