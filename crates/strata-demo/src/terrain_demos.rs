//! Terrain meshing demonstrations.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use strata_terrain::{HeightField, TerrainGenerator};
use tracing::{info, warn};

/// Walks a viewer across the terrain in small random steps, updating the mesh
/// each step and reporting how much work the chunk cache saved.
pub(crate) fn demonstrate_viewer_walk<H: HeightField>(terrain: &mut TerrainGenerator<H>) {
    info!("Starting viewer walk demonstration");

    let settings = terrain.settings().clone();
    let extent = settings.terrain_resolution as f32 * settings.horizontal_scale;
    let min = -settings.terrain_offset;
    let max = min + Vec3::new(extent, 0.0, extent);
    let stride = settings.cascade_factor as f32 / 4.0;

    let mut rng = Xoshiro256StarStar::seed_from_u64(42); // Fixed seed for reproducible demo
    let mut viewer = (min + max) / 2.0;
    let steps = 48;
    let (mut generated, mut reused, mut evicted) = (0, 0, 0);

    for step in 0..steps {
        let stats = terrain.update(viewer);
        generated += stats.generated;
        reused += stats.reused;
        evicted += stats.evicted;
        if step % 8 == 0 {
            info!(
                "Step {step}: viewer ({:.1}, {:.1}) -> {} chunks ({} new, {} reused)",
                viewer.x, viewer.z, stats.chunks, stats.generated, stats.reused
            );
        }

        let heading: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
        viewer += Vec3::new(heading.cos(), 0.0, heading.sin()) * stride;
        viewer = viewer.clamp(min, max);
    }

    let total = generated + reused;
    let hit_rate = if total > 0 {
        reused as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    info!(
        "Walked {steps} steps: {generated} chunks generated, {reused} reused ({hit_rate:.1}% cache hits), {evicted} evicted"
    );
    info!(
        "Cache holds {} chunks, {} current",
        terrain.cached_chunk_count(),
        terrain.chunk_count()
    );
    info!("Viewer walk demonstration completed successfully");
}

/// Copies the current mesh into CPU-side buffers, the way a renderer would
/// before uploading, and sanity-checks the result.
pub(crate) fn demonstrate_buffer_export<H: HeightField>(terrain: &TerrainGenerator<H>) {
    info!("Starting buffer export demonstration");

    let mut vertices = vec![0u8; terrain.vertex_buffer_size()];
    let mut indices = vec![0u8; terrain.index_buffer_size()];
    let vertex_bytes = terrain.write_vertex_buffer(&mut vertices);
    let index_bytes = terrain.write_index_buffer(&mut indices);

    let vertex_count = terrain.vertex_count() as u32;
    let out_of_range = indices
        .chunks_exact(4)
        .map(|b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .filter(|&i| i >= vertex_count)
        .count();
    if out_of_range > 0 {
        warn!("{out_of_range} indices address missing vertices");
    }

    info!(
        "Exported {} chunks: {:.2} MiB of vertices, {:.2} MiB of indices ({} triangles)",
        terrain.chunk_count(),
        vertex_bytes as f64 / (1024.0 * 1024.0),
        index_bytes as f64 / (1024.0 * 1024.0),
        terrain.index_count() / 3
    );

    // A half-size buffer shows the partial-write contract.
    let mut half = vec![0u8; terrain.vertex_buffer_size() / 2];
    let written = terrain.write_vertex_buffer(&mut half);
    info!(
        "Half-size vertex buffer took {written} of {} bytes",
        half.len()
    );
    info!("Buffer export demonstration completed successfully");
}
