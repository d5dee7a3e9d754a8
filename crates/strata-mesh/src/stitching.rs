//! Seam-stitched vertex generation.
//!
//! Chunks of different sizes meet along shared edges. A fine chunk has more
//! vertices on that edge than its coarse neighbor, and if it sampled the
//! heightfield directly at the extra vertices the two meshes would disagree
//! and leave a crack. Every boundary vertex is therefore generated against
//! the coarser of the two grids meeting there:
//!
//! - **interior** vertices sample the heightfield directly;
//! - **boundary** vertices off the coarse grid lerp between the two coarse
//!   samples bracketing them and renormalize the normal and tangent;
//! - **boundary** vertices on the coarse grid take their position directly
//!   and blend normal and tangent from the four neighboring edge samples,
//!   weighted by the area of each adjoining chunk cell.
//!
//! Once a vertex is known to sit on a chunk boundary, everything else about
//! it depends on the tree alone, never on the step of the chunk asking. Both
//! chunks sharing a boundary vertex therefore build it identically, normals
//! and tangents included.
//!
//! Neighbor resolution comes from [`LodTree::chunk_size_at`], queried half a
//! sample off the boundary so the point falls inside exactly one leaf.

use glam::{DVec2, Vec3};
use strata_lod::{LodTree, TerrainGrid};

use crate::height::HeightField;
use crate::vertex::Vertex;

/// Turns sample coordinates into [`Vertex`]es.
pub struct VertexGenerator<H> {
    height: H,
    grid: TerrainGrid,
    horizontal_scale: f32,
    texcoord_scale: f64,
    terrain_offset: Vec3,
}

impl<H: HeightField> VertexGenerator<H> {
    /// - `horizontal_scale`: mesh units between adjacent samples.
    /// - `texcoord_scale`: texture units between adjacent samples.
    /// - `terrain_offset`: subtracted from every emitted position.
    pub fn new(
        height: H,
        grid: TerrainGrid,
        horizontal_scale: f32,
        texcoord_scale: f64,
        terrain_offset: Vec3,
    ) -> Self {
        debug_assert!(horizontal_scale > 0.0);
        Self {
            height,
            grid,
            horizontal_scale,
            texcoord_scale,
            terrain_offset,
        }
    }

    pub fn height_field(&self) -> &H {
        &self.height
    }

    pub fn grid(&self) -> TerrainGrid {
        self.grid
    }

    /// Build the vertex at sample `(x, y)` for a chunk whose sample spacing
    /// is `step`, stitching against the neighbors described by `tree`.
    pub fn create_vertex(&self, x: i64, y: i64, step: i64, tree: &LodTree) -> Vertex {
        debug_assert!(step > 0);
        let span = i64::from(self.grid.chunk_resolution()) * step;
        if x.rem_euclid(span) == 0 || y.rem_euclid(span) == 0 {
            self.boundary_vertex(x, y, tree)
        } else {
            self.sample_vertex(x, y, step)
        }
    }

    /// Sample step of the leaf containing `(x, y)`.
    fn step_at(&self, tree: &LodTree, x: f64, y: f64) -> i64 {
        i64::from(tree.chunk_size_at(DVec2::new(x, y)) / self.grid.chunk_resolution())
    }

    fn boundary_vertex(&self, x: i64, y: i64, tree: &LodTree) -> Vertex {
        let (fx, fy) = (x as f64, y as f64);
        let step = self
            .step_at(tree, fx - 0.5, fy - 0.5)
            .max(self.step_at(tree, fx + 0.5, fy + 0.5));

        match (x.rem_euclid(step) == 0, y.rem_euclid(step) == 0) {
            (true, true) => self.corner_vertex(x, y, tree),
            (true, false) => self.edge_vertex(x, y, step, Axis::Y),
            (false, _) => self.edge_vertex(x, y, step, Axis::X),
        }
    }

    /// Lerp between the coarse samples bracketing `(x, y)` along `along`.
    fn edge_vertex(&self, x: i64, y: i64, step: i64, along: Axis) -> Vertex {
        let coord = along.pick(x, y);
        let rem = coord.rem_euclid(step);
        let floor = coord - rem;
        let (x0, y0) = along.place(x, y, floor);
        let (x1, y1) = along.place(x, y, floor + step);
        let lo = self.sample_vertex(x0, y0, step);
        let hi = self.sample_vertex(x1, y1, step);
        let mut vertex = lo.lerp(&hi, rem as f32 / step as f32);
        vertex.normal = Vec3::from(vertex.normal).normalize().to_array();
        let tangent = Vec3::new(vertex.tangent[0], vertex.tangent[1], vertex.tangent[2]);
        vertex.tangent = tangent.normalize().extend(vertex.tangent[3]).to_array();
        vertex
    }

    fn corner_vertex(&self, x: i64, y: i64, tree: &LodTree) -> Vertex {
        let (fx, fy) = (x as f64, y as f64);
        let bl = self.step_at(tree, fx - 0.5, fy - 0.5);
        let br = self.step_at(tree, fx + 0.5, fy - 0.5);
        let tl = self.step_at(tree, fx - 0.5, fy + 0.5);
        let tr = self.step_at(tree, fx + 0.5, fy + 0.5);

        let left = bl.max(tl);
        let right = br.max(tr);
        let top = tl.max(tr);
        let bottom = bl.max(br);

        let area_tl = (left * top) as f32;
        let area_tr = (right * top) as f32;
        let area_bl = (left * bottom) as f32;
        let area_br = (right * bottom) as f32;
        let total = 2.0 * (area_tl + area_tr + area_bl + area_br);

        let left_bias = (area_tl + area_bl) / total;
        let right_bias = (area_tr + area_br) / total;
        let top_bias = (area_tl + area_tr) / total;
        let bottom_bias = (area_bl + area_br) / total;

        let res = i64::from(self.grid.terrain_resolution());
        let left_vert = self.sample_vertex((x - left).max(0), y, left);
        let right_vert = self.sample_vertex((x + right).min(res), y, right);
        let top_vert = self.sample_vertex(x, (y + top).min(res), top);
        let bottom_vert = self.sample_vertex(x, (y - bottom).max(0), bottom);

        let blend = |pick: fn(&Vertex) -> Vec3| {
            (pick(&left_vert) * left_bias
                + pick(&right_vert) * right_bias
                + pick(&top_vert) * top_bias
                + pick(&bottom_vert) * bottom_bias)
                .normalize()
        };
        let normal = blend(|v| Vec3::from(v.normal));
        let tangent = blend(|v| Vec3::new(v.tangent[0], v.tangent[1], v.tangent[2]));

        Vertex {
            position: self.position(x, y).to_array(),
            normal: normal.to_array(),
            texcoord: self.texcoord(x, y),
            tangent: tangent.extend(1.0).to_array(),
        }
    }

    /// Sample `(x, y)` directly, deriving the tangent frame from neighbors
    /// `step` samples away. Neighbors past the terrain border are clamped,
    /// giving a one-sided difference there.
    fn sample_vertex(&self, x: i64, y: i64, step: i64) -> Vertex {
        let res = i64::from(self.grid.terrain_resolution());
        let position = self.position(x, y);
        let left = self.position((x - step).max(0), y);
        let right = self.position((x + step).min(res), y);
        let down = self.position(x, (y - step).max(0));
        let up = self.position(x, (y + step).min(res));

        let tangent = (right - left).normalize();
        let bitangent = (up - down).normalize();
        let normal = bitangent.cross(tangent).normalize();

        Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
            texcoord: self.texcoord(x, y),
            tangent: tangent.extend(1.0).to_array(),
        }
    }

    fn position(&self, x: i64, y: i64) -> Vec3 {
        let height = self.height.sample(x as f64, y as f64);
        Vec3::new(
            x as f32 * self.horizontal_scale,
            height as f32,
            y as f32 * self.horizontal_scale,
        ) - self.terrain_offset
    }

    fn texcoord(&self, x: i64, y: i64) -> [f32; 2] {
        [
            (x as f64 * self.texcoord_scale) as f32,
            (y as f64 * self.texcoord_scale) as f32,
        ]
    }
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn pick(self, x: i64, y: i64) -> i64 {
        match self {
            Axis::X => x,
            Axis::Y => y,
        }
    }

    /// `(x, y)` with this axis replaced by `value`.
    fn place(self, x: i64, y: i64, value: i64) -> (i64, i64) {
        match self {
            Axis::X => (value, y),
            Axis::Y => (x, value),
        }
    }
}
