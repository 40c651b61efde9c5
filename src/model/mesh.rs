//! Renderable mesh descriptors

/// An RGB color with 8-bit channels
pub type Rgb = (u8, u8, u8);

/// Convert an 8-bit color to normalized floats for a renderer
pub fn rgb_to_f32(color: Rgb) -> (f32, f32, f32) {
    (
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
    )
}

/// Triangle mesh derived from one surface
///
/// Buffers are flat and ready to upload: `positions` and `normals` hold
/// `(x, y, z)` triplets per vertex, `indices` holds vertex triplets per triangle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshDescriptor {
    /// Vertex positions (x, y, z), narrowed from the surface's `f64` vertices
    ///
    /// `f32` keeps about seven significant digits: georeferenced coordinates
    /// around 1e6 m are only resolved to roughly 0.1 m. Hosts rendering such
    /// models should translate the [`Surface`](crate::Surface) vertices toward
    /// the framing center before meshing.
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
    /// Outline edges of the closed ring, as vertex index pairs
    pub edges: Vec<[u32; 2]>,
    /// Fill color chosen from the surface type
    pub surface_color: Rgb,
    /// Render both faces regardless of winding
    pub double_sided: bool,
}

impl MeshDescriptor {
    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate the triangles as index triplets
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}
