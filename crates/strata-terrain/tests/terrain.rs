use std::collections::HashMap;

use glam::Vec3;
use strata_terrain::{HeightFn, TerrainGenerator, TerrainSettings, Vertex};

type Field = HeightFn<fn(f64, f64) -> f64>;

fn rolling(x: f64, y: f64) -> f64 {
    (x * 0.05).sin() * 12.0 + (y * 0.08).cos() * 7.0 + (x * 0.31 + y * 0.17).sin()
}

fn settings() -> TerrainSettings {
    TerrainSettings {
        horizontal_scale: 1.0,
        texcoord_scale: 1.0 / 256.0,
        terrain_offset: Vec3::ZERO,
        terrain_resolution: 256,
        chunk_resolution: 16,
        cascade_factor: 32.0,
        cache_capacity: 32,
    }
}

fn terrain(settings: TerrainSettings) -> TerrainGenerator<Field> {
    TerrainGenerator::new(HeightFn(rolling as fn(f64, f64) -> f64), settings).unwrap()
}

fn centered() -> TerrainGenerator<Field> {
    terrain(TerrainSettings {
        terrain_offset: TerrainSettings::centered_offset(256, 1.0),
        ..settings()
    })
}

fn read_vertices(terrain: &TerrainGenerator<Field>) -> Vec<Vertex> {
    let mut bytes = vec![0u8; terrain.vertex_buffer_size()];
    assert_eq!(terrain.write_vertex_buffer(&mut bytes), bytes.len());
    bytes
        .chunks_exact(Vertex::SIZE)
        .map(bytemuck::pod_read_unaligned)
        .collect()
}

fn read_indices(terrain: &TerrainGenerator<Field>) -> Vec<u32> {
    let mut bytes = vec![0u8; terrain.index_buffer_size()];
    assert_eq!(terrain.write_index_buffer(&mut bytes), bytes.len());
    bytes
        .chunks_exact(4)
        .map(|b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

const VIEWERS: [Vec3; 5] = [
    Vec3::new(10.0, 0.0, 10.0),
    Vec3::new(128.0, 40.0, 128.0),
    Vec3::new(250.0, 0.0, 3.0),
    Vec3::new(60.0, -10.0, 200.0),
    Vec3::new(-400.0, 0.0, 900.0),
];

#[test]
fn buffer_sizes_track_chunk_count() {
    let mut terrain = terrain(settings());
    for viewer in VIEWERS {
        terrain.update(viewer);
        let chunks = terrain.chunk_count();
        assert!(chunks >= 1);
        assert_eq!(terrain.vertex_buffer_size(), chunks * 17 * 17 * 48);
        assert_eq!(terrain.index_buffer_size(), chunks * 16 * 16 * 6 * 4);
    }
}

#[test]
fn indices_address_written_vertices() {
    let mut terrain = terrain(settings());
    for viewer in VIEWERS {
        terrain.update(viewer);
        let vertex_count = (17 * 17 * terrain.chunk_count()) as u32;
        let indices = read_indices(&terrain);
        assert_eq!(indices.len(), terrain.index_count());
        assert!(indices.iter().all(|&i| i < vertex_count));
        assert_eq!(indices.iter().copied().max(), Some(vertex_count - 1));
    }
}

#[test]
fn interior_vertices_sample_the_heightfield() {
    let mut terrain = terrain(settings());
    terrain.update(Vec3::new(70.0, 0.0, 90.0));

    let mut checked = 0;
    for v in read_vertices(&terrain) {
        let (x, y) = (v.position[0], v.position[2]);
        // Chunk boundaries only fall on multiples of the chunk resolution.
        if x % 16.0 == 0.0 || y % 16.0 == 0.0 {
            continue;
        }
        let expected = rolling(f64::from(x), f64::from(y)) as f32;
        assert!(
            (v.position[1] - expected).abs() < 1e-4,
            "height at ({x}, {y}) is {} not {expected}",
            v.position[1]
        );
        assert!((v.texcoord[0] - x / 256.0).abs() < 1e-6);
        assert!((v.texcoord[1] - y / 256.0).abs() < 1e-6);
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn shared_boundary_vertices_agree() {
    for viewer in [Vec3::new(100.0, 0.0, 40.0), Vec3::new(10.0, 0.0, 10.0)] {
        let mut terrain = terrain(settings());
        terrain.update(viewer);

        let mut seen: HashMap<(i64, i64), Vertex> = HashMap::new();
        let mut shared = 0;
        for v in read_vertices(&terrain) {
            let key = (v.position[0] as i64, v.position[2] as i64);
            match seen.get(&key) {
                // Every attribute must match, including at T-junctions where
                // fine chunks meet mid-edge of a coarse one.
                Some(previous) => {
                    assert_eq!(*previous, v, "chunks disagree at {key:?}");
                    shared += 1;
                }
                None => {
                    seen.insert(key, v);
                }
            }
        }
        assert!(shared > 0);
    }
}

#[test]
fn normals_and_tangents_are_unit_length() {
    let mut terrain = terrain(settings());
    terrain.update(Vec3::new(30.0, 0.0, 220.0));
    for v in read_vertices(&terrain) {
        let n = Vec3::from(v.normal);
        let t = Vec3::new(v.tangent[0], v.tangent[1], v.tangent[2]);
        assert!((n.length() - 1.0).abs() < 1e-3);
        assert!((t.length() - 1.0).abs() < 1e-3);
        assert!(n.y > 0.0);
        assert_eq!(v.tangent[3], 1.0);
    }
}

#[test]
fn mirrored_viewers_get_equal_chunk_counts() {
    let mut terrain = centered();
    for (x, z) in [(100.0, 100.0), (37.0, -81.0), (5.0, 120.0), (128.0, 128.0)] {
        let a = terrain.update(Vec3::new(x, 0.0, z)).chunks;
        let b = terrain.update(Vec3::new(-x, 0.0, -z)).chunks;
        let c = terrain.update(Vec3::new(-x, 0.0, z)).chunks;
        assert_eq!(a, b, "viewer ({x}, {z})");
        assert_eq!(a, c, "viewer ({x}, {z})");
    }
}

#[test]
fn center_is_more_detailed_than_corner() {
    let mut terrain = centered();
    let center = terrain.update(Vec3::ZERO).chunks;
    let corner = terrain.update(Vec3::new(-128.0, 0.0, -128.0)).chunks;
    assert_eq!(center, 88);
    assert_eq!(corner, 31);
}

#[test]
fn scale_does_not_change_lod_layout() {
    let mut unit = centered();
    let mut doubled = terrain(TerrainSettings {
        horizontal_scale: 2.0,
        cascade_factor: 64.0,
        terrain_offset: TerrainSettings::centered_offset(256, 2.0),
        ..settings()
    });
    assert_eq!(
        unit.update(Vec3::new(20.0, 0.0, -50.0)).chunks,
        doubled.update(Vec3::new(40.0, 0.0, -100.0)).chunks
    );
}

#[test]
fn repeated_update_reuses_cached_chunks() {
    let mut terrain = centered();
    let first = terrain.update(Vec3::new(3.0, 0.0, 3.0));
    assert_eq!(first.reused, 0);
    let second = terrain.update(Vec3::new(3.0, 0.0, 3.0));
    assert_eq!(second.reused, second.chunks);
    assert_eq!(second.generated, 0);

    let before = read_vertices(&terrain);
    terrain.update(Vec3::new(3.0, 0.0, 3.0));
    assert_eq!(read_vertices(&terrain), before);
}

#[test]
fn moving_back_reuses_stale_chunks() {
    let mut terrain = terrain(TerrainSettings {
        terrain_offset: TerrainSettings::centered_offset(256, 1.0),
        cache_capacity: 256,
        ..settings()
    });
    terrain.update(Vec3::new(-100.0, 0.0, -100.0));
    terrain.update(Vec3::new(100.0, 0.0, 100.0));
    assert!(terrain.cached_chunk_count() > terrain.chunk_count());
    let back = terrain.update(Vec3::new(-100.0, 0.0, -100.0));
    assert_eq!(back.generated, 0);
}

#[test]
fn partial_writes_report_bytes_written() {
    let mut terrain = centered();
    terrain.update(Vec3::ZERO);
    let chunk_bytes = 17 * 17 * 48;

    let mut vertices = vec![0u8; chunk_bytes * 3 - 1];
    assert_eq!(terrain.write_vertex_buffer(&mut vertices), chunk_bytes * 2);

    let mut indices = vec![0u8; 1001];
    assert_eq!(terrain.write_index_buffer(&mut indices), 1000);

    let n = 17 * 17 + 5;
    let mut positions = vec![[0.0; 3]; n];
    let mut normals = vec![[0.0; 3]; n];
    let mut texcoords = vec![[0.0; 2]; n];
    let mut tangents = vec![[0.0; 4]; n];
    assert_eq!(
        terrain.write_vertex_streams(&mut positions, &mut normals, &mut texcoords, &mut tangents),
        17 * 17
    );
}
