//! Distance-driven quadtree subdivision.
//!
//! Starting from a single root covering the whole terrain, any node whose
//! footprint lies within its level's threshold of the viewer is split into
//! four. Thresholds halve with each level, so detail forms concentric rings
//! around the viewer: the finest ring is `cascade_factor` wide and every
//! coarser ring is twice as wide as the one inside it.

use glam::Vec3;

use crate::grid::TerrainGrid;
use crate::tree::{Footprint, LodTree, NodeId};

/// Shortest planar distance from `(x, z)` to the footprint `square`.
///
/// Zero when the point lies inside or on the square.
pub fn planar_distance(x: f64, z: f64, square: Footprint) -> f64 {
    let min_x = f64::from(square.x);
    let min_z = f64::from(square.y);
    let max_x = min_x + f64::from(square.size);
    let max_z = min_z + f64::from(square.size);
    let dx = x.clamp(min_x, max_x) - x;
    let dz = z.clamp(min_z, max_z) - z;
    (dx * dx + dz * dz).sqrt()
}

/// Builds an [`LodTree`] for a viewer position.
#[derive(Clone, Copy, Debug)]
pub struct LodTreeBuilder {
    grid: TerrainGrid,
    cascade_factor: f64,
}

impl LodTreeBuilder {
    /// `cascade_factor` is the width, in samples, of the finest detail ring.
    pub fn new(grid: TerrainGrid, cascade_factor: f64) -> Self {
        Self {
            grid,
            cascade_factor,
        }
    }

    pub fn grid(&self) -> TerrainGrid {
        self.grid
    }

    pub fn cascade_factor(&self) -> f64 {
        self.cascade_factor
    }

    /// Split threshold for a node of edge `size`. Equals `cascade_factor` for
    /// nodes twice the chunk resolution and doubles with every level above.
    pub fn threshold(&self, size: u32) -> f64 {
        self.cascade_factor * f64::from(size) / (2.0 * f64::from(self.grid.chunk_resolution()))
    }

    /// Subdivide the terrain around `viewer`.
    ///
    /// `viewer` is in sample space: `x` and `z` address the heightfield, `y`
    /// (height) is ignored.
    pub fn build(&self, viewer: Vec3) -> LodTree {
        let mut tree = LodTree::new(self.grid.terrain_resolution());
        let root = Footprint {
            x: 0,
            y: 0,
            size: self.grid.terrain_resolution(),
        };
        let threshold = self.threshold(root.size);
        let root_id = tree.root();
        self.split(
            &mut tree,
            root_id,
            root,
            threshold,
            f64::from(viewer.x),
            f64::from(viewer.z),
        );
        tracing::trace!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "built LOD tree"
        );
        tree
    }

    fn split(
        &self,
        tree: &mut LodTree,
        id: NodeId,
        footprint: Footprint,
        threshold: f64,
        x: f64,
        z: f64,
    ) {
        if footprint.size <= self.grid.chunk_resolution() {
            return;
        }
        if planar_distance(x, z, footprint) > threshold {
            return;
        }
        let children = tree.subdivide(id);
        for (child, quadrant) in children.into_iter().zip(footprint.quadrants()) {
            self.split(tree, child, quadrant, threshold / 2.0, x, z);
        }
    }
}
