//! Chunk identity, vertex storage, and the shared index topology.

use strata_lod::{Footprint, LodTree};

use crate::height::HeightField;
use crate::stitching::VertexGenerator;
use crate::vertex::Vertex;

/// Identifies a chunk by its origin and edge length in samples.
///
/// Two chunks with equal keys are geometrically identical as long as the
/// neighborhood they were stitched against is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl From<Footprint> for ChunkKey {
    fn from(footprint: Footprint) -> Self {
        Self {
            x: footprint.x,
            y: footprint.y,
            size: footprint.size,
        }
    }
}

/// One quadtree leaf's worth of vertices, `(chunk_resolution + 1)^2` of them,
/// row-major from the chunk's bottom-left corner.
#[derive(Clone, Debug)]
pub struct Chunk {
    key: ChunkKey,
    vertices: Vec<Vertex>,
}

impl Chunk {
    /// Generate the vertices for `key` on a grid of `chunk_resolution` quads.
    pub fn generate<H: HeightField>(
        key: ChunkKey,
        chunk_resolution: u32,
        generator: &VertexGenerator<H>,
        tree: &LodTree,
    ) -> Self {
        let step = i64::from(key.size / chunk_resolution);
        let edge = chunk_resolution as usize + 1;
        let (origin_x, origin_y) = (i64::from(key.x), i64::from(key.y));

        let mut vertices = Vec::with_capacity(edge * edge);
        for row in 0..edge as i64 {
            for col in 0..edge as i64 {
                vertices.push(generator.create_vertex(
                    origin_x + col * step,
                    origin_y + row * step,
                    step,
                    tree,
                ));
            }
        }
        Self { key, vertices }
    }

    pub fn key(&self) -> ChunkKey {
        self.key
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Triangle-list indices for one chunk of `chunk_resolution` quads per edge.
///
/// Each quad emits `bl, br, tr` then `tr, tl, bl`, addressing vertices
/// row-major with `chunk_resolution + 1` vertices per row. Offset by
/// `chunk * (chunk_resolution + 1)^2` to address a chunk inside a combined
/// buffer.
pub fn chunk_indices(chunk_resolution: u32) -> Vec<u32> {
    let row = chunk_resolution + 1;
    let mut indices = Vec::with_capacity((chunk_resolution * chunk_resolution * 6) as usize);
    for y in 0..chunk_resolution {
        for x in 0..chunk_resolution {
            let bl = y * row + x;
            let br = bl + 1;
            let tl = bl + row;
            let tr = tl + 1;
            indices.extend_from_slice(&[bl, br, tr, tr, tl, bl]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::height::HeightFn;
    use glam::Vec3;
    use strata_lod::TerrainGrid;

    #[test]
    fn test_single_quad_topology() {
        assert_eq!(chunk_indices(1), vec![0, 1, 3, 3, 2, 0]);
    }

    #[test]
    fn test_topology_size_and_range() {
        let indices = chunk_indices(8);
        assert_eq!(indices.len(), 8 * 8 * 6);
        assert!(indices.iter().all(|&i| i < 9 * 9));
        // Second quad of the second row.
        assert_eq!(&indices[9 * 6..10 * 6], &[10, 11, 20, 20, 19, 10]);
    }

    #[test]
    fn test_triangles_wind_counter_clockwise_in_xy() {
        let res = 4;
        let indices = chunk_indices(res);
        let coord = |i: u32| ((i % (res + 1)) as i32, (i / (res + 1)) as i32);
        for tri in indices.chunks_exact(3) {
            let (a, b, c) = (coord(tri[0]), coord(tri[1]), coord(tri[2]));
            let cross = (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0);
            assert!(cross > 0, "triangle {tri:?} is not counter-clockwise");
        }
    }

    #[test]
    fn test_generate_lays_out_rows() {
        let grid = TerrainGrid::new(64, 4).unwrap();
        let generator = VertexGenerator::new(
            HeightFn(|x: f64, y: f64| x + 100.0 * y),
            grid,
            1.0,
            1.0 / 64.0,
            Vec3::ZERO,
        );
        let mut tree = LodTree::new(64);
        tree.subdivide(tree.root());
        let key = ChunkKey { x: 32, y: 0, size: 32 };
        let chunk = Chunk::generate(key, 4, &generator, &tree);

        assert_eq!(chunk.key(), key);
        assert_eq!(chunk.vertex_count(), 25);
        // Row 1, column 2 sits at sample (32 + 2 * 8, 0 + 1 * 8).
        let v = chunk.vertices()[5 + 2];
        assert_eq!(v.position[0], 48.0);
        assert_eq!(v.position[2], 8.0);
        assert!((v.position[1] - 848.0).abs() < 1e-3);
        let last = chunk.vertices()[24];
        assert_eq!((last.position[0], last.position[2]), (64.0, 32.0));
    }

    #[test]
    fn test_key_from_footprint() {
        let key = ChunkKey::from(Footprint { x: 16, y: 48, size: 16 });
        assert_eq!(key, ChunkKey { x: 16, y: 48, size: 16 });
    }
}
