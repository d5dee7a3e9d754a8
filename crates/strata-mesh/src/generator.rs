//! Per-frame chunk set maintenance and buffer assembly.
//!
//! Each update walks the LOD tree's leaves, reusing cached chunks whose key is
//! unchanged and generating the rest. The current chunks are always the
//! `chunk_count` most-recently-used cache entries, so buffer writers read them
//! back through the cache's bounded recency iterator while stale chunks from
//! earlier frames stay cached for reuse.

use std::sync::Arc;

use strata_cache::{LruCache, PutResult};
use strata_lod::{LodTree, TerrainGrid};

use crate::chunk::{Chunk, ChunkKey, chunk_indices};
use crate::height::HeightField;
use crate::stitching::VertexGenerator;
use crate::vertex::Vertex;

const INDEX_SIZE: usize = std::mem::size_of::<u32>();

/// What one [`ChunkGenerator::update_chunks`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Chunks in the new chunk set.
    pub chunks: usize,
    /// Chunks served from the cache.
    pub reused: usize,
    /// Chunks generated from scratch.
    pub generated: usize,
    /// Stale chunks evicted to make room.
    pub evicted: usize,
}

/// Maps LOD tree leaves onto cached chunks and writes them out as flat
/// vertex and index buffers.
pub struct ChunkGenerator<H> {
    vertices: VertexGenerator<H>,
    cache: LruCache<ChunkKey, Arc<Chunk>>,
    topology: Vec<u32>,
    chunk_count: usize,
}

impl<H: HeightField> ChunkGenerator<H> {
    /// # Panics
    ///
    /// Panics if `cache_capacity` is zero.
    pub fn new(vertices: VertexGenerator<H>, cache_capacity: usize) -> Self {
        let topology = chunk_indices(vertices.grid().chunk_resolution());
        Self {
            vertices,
            cache: LruCache::new(cache_capacity),
            topology,
            chunk_count: 0,
        }
    }

    pub fn grid(&self) -> TerrainGrid {
        self.vertices.grid()
    }

    pub fn vertex_generator(&self) -> &VertexGenerator<H> {
        &self.vertices
    }

    /// Chunks currently held, current frame's and stale alike.
    pub fn cached_chunks(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Replace the current chunk set with the leaves of `tree`.
    ///
    /// The cache grows to at least the leaf count first, so chunks of the
    /// current frame never evict each other.
    ///
    /// Chunks are reused by key alone. A cached chunk keeps the seams it was
    /// stitched against, so if a neighbor has since changed size its boundary
    /// vertices can disagree with that neighbor. Call
    /// [`clear_cache`](Self::clear_cache) first when every seam must be exact.
    ///
    /// # Panics
    ///
    /// Panics if `tree` was not built for this generator's terrain resolution.
    pub fn update_chunks(&mut self, tree: &LodTree) -> UpdateStats {
        let grid = self.grid();
        assert_eq!(
            tree.resolution(),
            grid.terrain_resolution(),
            "LOD tree resolution does not match the terrain"
        );

        self.cache.reserve(tree.leaf_count());
        let mut stats = UpdateStats::default();

        for footprint in tree.leaves() {
            let key = ChunkKey::from(footprint);
            stats.chunks += 1;
            if self.cache.fetch(&key).is_some() {
                stats.reused += 1;
                continue;
            }

            let chunk = Chunk::generate(key, grid.chunk_resolution(), &self.vertices, tree);
            stats.generated += 1;
            if let PutResult::EvictedLast { key: evicted, .. } = self.cache.put(key, Arc::new(chunk)) {
                stats.evicted += 1;
                tracing::trace!(x = evicted.x, y = evicted.y, size = evicted.size, "evicted chunk");
            }
        }

        self.chunk_count = stats.chunks;
        debug_assert!(
            self.chunk_count * grid.vertices_per_chunk() <= u32::MAX as usize,
            "vertex count exceeds the u32 index range"
        );
        tracing::debug!(
            chunks = stats.chunks,
            reused = stats.reused,
            generated = stats.generated,
            evicted = stats.evicted,
            "updated chunks"
        );
        stats
    }

    /// Drop every cached chunk, current ones included. The next update
    /// regenerates its whole chunk set.
    pub fn clear_cache(&mut self) {
        let dropped = self.cache.len();
        self.cache.clear();
        self.chunk_count = 0;
        tracing::debug!(dropped, "cleared chunk cache");
    }

    /// Chunks in the current set.
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// The current chunk set, in buffer order. The `Arc`s stay valid even if a
    /// later update evicts the chunks from the cache.
    pub fn current_chunks(&self) -> impl Iterator<Item = &Arc<Chunk>> + '_ {
        self.cache.iterate(self.chunk_count).map(|(_, chunk)| chunk)
    }

    /// Vertices in the current set.
    pub fn vertex_count(&self) -> usize {
        self.chunk_count * self.grid().vertices_per_chunk()
    }

    /// Indices in the current set.
    pub fn index_count(&self) -> usize {
        self.chunk_count * self.topology.len()
    }

    /// Bytes needed by [`Self::write_vertex_buffer`] for the full set.
    pub fn vertex_buffer_size(&self) -> usize {
        self.vertex_count() * Vertex::SIZE
    }

    /// Bytes needed by [`Self::write_index_buffer`] for the full set.
    pub fn index_buffer_size(&self) -> usize {
        self.index_count() * INDEX_SIZE
    }

    /// Every index of the current set, each chunk's topology offset by the
    /// vertices of the chunks before it.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        let per_chunk = self.grid().vertices_per_chunk() as u32;
        (0..self.chunk_count as u32).flat_map(move |chunk| {
            let base = chunk * per_chunk;
            self.topology.iter().map(move |&index| base + index)
        })
    }

    /// Copy the current chunks' vertices into `dst` as packed [`Vertex`]
    /// records. Only whole chunks are written; copying stops at the first
    /// chunk that does not fit. Returns the number of bytes written.
    pub fn write_vertex_buffer(&self, dst: &mut [u8]) -> usize {
        let mut written = 0;
        for chunk in self.current_chunks() {
            let bytes: &[u8] = bytemuck::cast_slice(chunk.vertices());
            let Some(slot) = dst.get_mut(written..written + bytes.len()) else {
                break;
            };
            slot.copy_from_slice(bytes);
            written += bytes.len();
        }
        written
    }

    /// Copy the current set's indices into `dst` as native-endian `u32`s,
    /// stopping once fewer than four bytes remain. Returns the number of bytes
    /// written.
    pub fn write_index_buffer(&self, dst: &mut [u8]) -> usize {
        let mut written = 0;
        for (slot, index) in dst.chunks_exact_mut(INDEX_SIZE).zip(self.indices()) {
            slot.copy_from_slice(&index.to_ne_bytes());
            written += INDEX_SIZE;
        }
        written
    }

    /// Copy the current chunks' vertices into separate attribute streams.
    ///
    /// Capacity is the shortest of the four slices; only whole chunks are
    /// written. Returns the number of vertices written to each stream.
    pub fn write_vertex_streams(
        &self,
        positions: &mut [[f32; 3]],
        normals: &mut [[f32; 3]],
        texcoords: &mut [[f32; 2]],
        tangents: &mut [[f32; 4]],
    ) -> usize {
        let capacity = positions
            .len()
            .min(normals.len())
            .min(texcoords.len())
            .min(tangents.len());
        let mut written = 0;
        for chunk in self.current_chunks() {
            let count = chunk.vertex_count();
            if written + count > capacity {
                break;
            }
            for (i, v) in chunk.vertices().iter().enumerate() {
                positions[written + i] = v.position;
                normals[written + i] = v.normal;
                texcoords[written + i] = v.texcoord;
                tangents[written + i] = v.tangent;
            }
            written += count;
        }
        written
    }
}
