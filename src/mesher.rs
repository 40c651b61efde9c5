//! Surface meshing
//!
//! Converts a [`Surface`] into a [`MeshDescriptor`]: fan-triangulated indices,
//! per-vertex normals derived from the source winding, the outline edges, and
//! a fill color looked up from the surface type. The winding is kept exactly
//! as written in the document; meshes are marked double-sided so surfaces
//! with inconsistent winding still light correctly.

use crate::error::{Error, Result};
use crate::mesh_ops::calculate_vertex_normals;
use crate::model::{MeshDescriptor, Rgb, Surface, SurfaceType};
use crate::polygon_triangulation::{TriangulationError, outline_edges, triangulate_fan};

/// Color for surface types without an entry in the table
pub const DEFAULT_SURFACE_COLOR: Rgb = (0x88, 0x88, 0x88);

/// Fill color for a surface type
///
/// Total over all surface types: anything not in the table, including every
/// [`SurfaceType::Other`], maps to [`DEFAULT_SURFACE_COLOR`].
pub fn surface_color(surface_type: &SurfaceType) -> Rgb {
    match surface_type {
        SurfaceType::ExteriorWall => (0xff, 0xb4, 0x00),
        SurfaceType::InteriorWall => (0x00, 0x80, 0x00),
        SurfaceType::Roof => (0x80, 0x00, 0x00),
        SurfaceType::InteriorFloor => (0x80, 0xff, 0xff),
        SurfaceType::ExposedFloor => (0x40, 0xb4, 0xff),
        SurfaceType::Shade => (0xff, 0xce, 0x9d),
        SurfaceType::UndergroundWall => (0xa5, 0x52, 0x00),
        SurfaceType::UndergroundSlab => (0x80, 0x40, 0x00),
        SurfaceType::Ceiling => (0xff, 0x80, 0x80),
        SurfaceType::Air => (0xff, 0xff, 0x00),
        SurfaceType::UndergroundCeiling => (0x40, 0x80, 0x80),
        SurfaceType::RaisedFloor => (0x4b, 0x41, 0x7d),
        SurfaceType::SlabOnGrade => (0x80, 0x40, 0x00),
        SurfaceType::FreestandingColumn => (0x80, 0x80, 0x80),
        SurfaceType::EmbeddedColumn => (0x80, 0x80, 0x6e),
        SurfaceType::Other(_) => DEFAULT_SURFACE_COLOR,
    }
}

/// Build a double-sided mesh for a surface
///
/// # Errors
///
/// Returns [`Error::InsufficientVertices`] for a surface with fewer than three
/// vertices; no partial mesh is ever produced.
///
/// # Example
///
/// ```
/// use gbxml_scene::{Surface, SurfaceType, Vertex, mesher::build_mesh};
///
/// let quad = Surface::new(
///     "floor-1",
///     SurfaceType::SlabOnGrade,
///     vec![
///         Vertex::new(0.0, 0.0, 0.0),
///         Vertex::new(1.0, 0.0, 0.0),
///         Vertex::new(1.0, 1.0, 0.0),
///         Vertex::new(0.0, 1.0, 0.0),
///     ],
/// );
///
/// let mesh = build_mesh(&quad)?;
/// assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
/// # Ok::<(), gbxml_scene::Error>(())
/// ```
pub fn build_mesh(surface: &Surface) -> Result<MeshDescriptor> {
    build_mesh_with_sides(surface, true)
}

/// Build a mesh for a surface, choosing whether both faces render
pub fn build_mesh_with_sides(surface: &Surface, double_sided: bool) -> Result<MeshDescriptor> {
    let indices = triangulate_fan(surface.vertices.len()).map_err(
        |TriangulationError::TooFewVertices(count)| {
            Error::insufficient_vertices(&surface.id, count)
        },
    )?;

    let positions = surface
        .vertices
        .iter()
        .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
        .collect();

    let normals = calculate_vertex_normals(&surface.vertices, &indices)
        .into_iter()
        .flat_map(|(x, y, z)| [x as f32, y as f32, z as f32])
        .collect();

    Ok(MeshDescriptor {
        positions,
        normals,
        edges: outline_edges(surface.vertices.len()),
        indices,
        surface_color: surface_color(&surface.surface_type),
        double_sided,
    })
}
