//! GPU vertex layout.

/// One terrain vertex, 12 tightly packed `f32`s (48 bytes).
///
/// Field order is fixed and matches the byte layout written by
/// [`crate::ChunkGenerator::write_vertex_buffer`]:
/// `position.xyz, normal.xyz, texcoord.xy, tangent.xyzw`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Mesh-space position.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub texcoord: [f32; 2],
    /// Unit tangent along +x in `xyz`, handedness in `w`.
    pub tangent: [f32; 4],
}

static_assertions::assert_eq_size!(Vertex, [u8; 48]);

impl Vertex {
    /// Size of one vertex in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Component-wise linear blend of every attribute, `t = 0` giving `self`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        fn mix<const N: usize>(a: [f32; N], b: [f32; N], t: f32) -> [f32; N] {
            std::array::from_fn(|i| a[i] * (1.0 - t) + b[i] * t)
        }
        Self {
            position: mix(self.position, other.position, t),
            normal: mix(self.normal, other.normal, t),
            texcoord: mix(self.texcoord, other.texcoord, t),
            tangent: mix(self.tangent, other.tangent, t),
        }
    }
}
