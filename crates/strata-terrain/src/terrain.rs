//! The terrain generator façade.

use glam::{Vec3, Vec3Swizzles};
use strata_lod::{LodTreeBuilder, TerrainGrid};
use strata_mesh::{ChunkGenerator, HeightField, UpdateStats, VertexGenerator};

use crate::error::TerrainError;
use crate::settings::TerrainSettings;

/// Builds and maintains a crack-free LOD mesh of a heightfield.
///
/// Call [`update`](Self::update) whenever the viewer moves, then size and fill
/// GPU buffers with the query and `write_*` methods. Chunks that did not change
/// since earlier updates are reused from an LRU cache.
pub struct TerrainGenerator<H> {
    settings: TerrainSettings,
    builder: LodTreeBuilder,
    chunks: ChunkGenerator<H>,
}

impl<H: HeightField> TerrainGenerator<H> {
    /// Validate `settings` and build a generator sampling `height`.
    ///
    /// No chunks exist until the first [`update`](Self::update).
    pub fn new(height: H, settings: TerrainSettings) -> Result<Self, TerrainError> {
        let grid = TerrainGrid::new(settings.terrain_resolution, settings.chunk_resolution)?;
        settings.validate()?;

        // Cascade distances are configured in mesh units; the builder works in
        // samples.
        let builder = LodTreeBuilder::new(
            grid,
            settings.cascade_factor / f64::from(settings.horizontal_scale),
        );
        let vertices = VertexGenerator::new(
            height,
            grid,
            settings.horizontal_scale,
            settings.texcoord_scale,
            settings.terrain_offset,
        );
        let chunks = ChunkGenerator::new(vertices, settings.cache_capacity);

        tracing::info!(
            terrain_resolution = grid.terrain_resolution(),
            chunk_resolution = grid.chunk_resolution(),
            cascade_factor = settings.cascade_factor,
            horizontal_scale = settings.horizontal_scale,
            "created terrain generator"
        );

        Ok(Self {
            settings,
            builder,
            chunks,
        })
    }

    pub fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    pub fn grid(&self) -> TerrainGrid {
        self.builder.grid()
    }

    /// Map a mesh-space position into heightfield sample space. Height is
    /// passed through untouched.
    pub fn to_sample_space(&self, position: Vec3) -> Vec3 {
        let scale = self.settings.horizontal_scale;
        let planar = (position.xz() + self.settings.terrain_offset.xz()) / scale;
        Vec3::new(planar.x, position.y, planar.y)
    }

    /// Recompute the chunk set for a viewer at `position` (mesh space, the
    /// same space as emitted vertex positions).
    pub fn update(&mut self, position: Vec3) -> UpdateStats {
        let tree = self.builder.build(self.to_sample_space(position));
        self.chunks.update_chunks(&tree)
    }

    /// Forget every cached chunk. Chunks are reused by footprint alone, so a
    /// chunk cached before a neighbor changed size keeps its old seams; clear
    /// before an update that must be crack-free everywhere.
    pub fn clear_cache(&mut self) {
        self.chunks.clear_cache();
    }

    /// Chunks in the current set.
    pub fn chunk_count(&self) -> usize {
        self.chunks.chunk_count()
    }

    /// Chunks held by the cache, including stale ones kept for reuse.
    pub fn cached_chunk_count(&self) -> usize {
        self.chunks.cached_chunks()
    }

    pub fn vertex_count(&self) -> usize {
        self.chunks.vertex_count()
    }

    pub fn index_count(&self) -> usize {
        self.chunks.index_count()
    }

    /// Bytes needed to hold the full vertex buffer.
    pub fn vertex_buffer_size(&self) -> usize {
        self.chunks.vertex_buffer_size()
    }

    /// Bytes needed to hold the full index buffer.
    pub fn index_buffer_size(&self) -> usize {
        self.chunks.index_buffer_size()
    }

    /// Copy packed vertices into `dst`, whole chunks only. Returns bytes
    /// written.
    pub fn write_vertex_buffer(&self, dst: &mut [u8]) -> usize {
        self.chunks.write_vertex_buffer(dst)
    }

    /// Copy native-endian `u32` indices into `dst`. Returns bytes written.
    pub fn write_index_buffer(&self, dst: &mut [u8]) -> usize {
        self.chunks.write_index_buffer(dst)
    }

    /// Copy vertices into four attribute streams, whole chunks only. Returns
    /// vertices written.
    pub fn write_vertex_streams(
        &self,
        positions: &mut [[f32; 3]],
        normals: &mut [[f32; 3]],
        texcoords: &mut [[f32; 2]],
        tangents: &mut [[f32; 4]],
    ) -> usize {
        self.chunks
            .write_vertex_streams(positions, normals, texcoords, tangents)
    }
}
