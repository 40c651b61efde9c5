//! Geometric operations on surface polygons
//!
//! This module provides the vector math used by meshing and framing:
//! - Face normals from the winding of a triangle
//! - Area-weighted vertex normals for an indexed triangle list
//! - Axis-aligned bounding boxes over any number of vertices

use crate::model::{Surface, Vertex};
use nalgebra::Point3;

/// A 3D vector represented as (x, y, z)
pub type Vector3 = (f64, f64, f64);

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Point3<f64>,
    /// Maximum corner
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// A box containing a single point
    pub fn from_point(point: Point3<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Grow the box to contain `point`
    pub fn extend(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Midpoint per axis
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Size along each axis
    pub fn extents(&self) -> nalgebra::Vector3<f64> {
        self.max - self.min
    }

    /// Size along the longest axis
    pub fn max_extent(&self) -> f64 {
        self.extents().max()
    }
}

/// Helper function to calculate the cross product of two 3D vectors
///
/// Returns the cross product v1 × v2
#[inline]
fn cross_product(v1: Vector3, v2: Vector3) -> Vector3 {
    (
        v1.1 * v2.2 - v1.2 * v2.1,
        v1.2 * v2.0 - v1.0 * v2.2,
        v1.0 * v2.1 - v1.1 * v2.0,
    )
}

#[inline]
fn normalize(v: Vector3) -> Vector3 {
    let magnitude = (v.0 * v.0 + v.1 * v.1 + v.2 * v.2).sqrt();
    if magnitude > 0.0 {
        (v.0 / magnitude, v.1 / magnitude, v.2 / magnitude)
    } else {
        (0.0, 0.0, 0.0)
    }
}

/// Unnormalized normal of a triangle; its length is twice the triangle area
#[inline]
fn area_weighted_normal(v0: &Vertex, v1: &Vertex, v2: &Vertex) -> Vector3 {
    let edge1 = (v1.x - v0.x, v1.y - v0.y, v1.z - v0.z);
    let edge2 = (v2.x - v0.x, v2.y - v0.y, v2.z - v0.z);
    cross_product(edge1, edge2)
}

/// Calculate the normal vector for a single triangle face
///
/// The normal follows the right-hand rule over the winding `v0 → v1 → v2`
/// and is normalized to unit length. A degenerate (zero-area) triangle
/// returns a zero vector.
///
/// # Example
/// ```
/// use gbxml_scene::{Vertex, mesh_ops::calculate_face_normal};
///
/// let v0 = Vertex::new(0.0, 0.0, 0.0);
/// let v1 = Vertex::new(1.0, 0.0, 0.0);
/// let v2 = Vertex::new(0.0, 1.0, 0.0);
///
/// assert_eq!(calculate_face_normal(&v0, &v1, &v2), (0.0, 0.0, 1.0));
/// ```
pub fn calculate_face_normal(v0: &Vertex, v1: &Vertex, v2: &Vertex) -> Vector3 {
    normalize(area_weighted_normal(v0, v1, v2))
}

/// Calculate area-weighted vertex normals for an indexed triangle list
///
/// For each vertex, sums the unnormalized normals of every triangle that uses
/// it and normalizes the result. Degenerate triangles contribute nothing and
/// triangles with out-of-range indices are skipped. A vertex touched by no
/// valid triangle gets `(0, 0, 0)`.
///
/// # Arguments
/// * `vertices` - Vertex positions
/// * `indices` - Flat triangle index list (three per triangle)
///
/// # Returns
/// One unit normal per vertex, in vertex order.
pub fn calculate_vertex_normals(vertices: &[Vertex], indices: &[u32]) -> Vec<Vector3> {
    let mut normals: Vec<Vector3> = vec![(0.0, 0.0, 0.0); vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            continue;
        }

        let n = area_weighted_normal(&vertices[a], &vertices[b], &vertices[c]);
        for index in [a, b, c] {
            normals[index].0 += n.0;
            normals[index].1 += n.1;
            normals[index].2 += n.2;
        }
    }

    normals.into_iter().map(normalize).collect()
}

/// Compute the axis-aligned bounding box of a set of vertices
///
/// Returns `None` when the iterator is empty.
pub fn compute_aabb<'a>(vertices: impl IntoIterator<Item = &'a Vertex>) -> Option<BoundingBox> {
    let mut vertices = vertices.into_iter().map(|v| Point3::new(v.x, v.y, v.z));
    let first = vertices.next()?;

    let mut bounds = BoundingBox::from_point(first);
    for point in vertices {
        bounds.extend(&point);
    }
    Some(bounds)
}

/// Compute the bounding box of every vertex of every surface
///
/// Returns `None` when there are no vertices at all.
pub fn compute_surfaces_aabb<'a>(
    surfaces: impl IntoIterator<Item = &'a Surface>,
) -> Option<BoundingBox> {
    compute_aabb(surfaces.into_iter().flat_map(|s| s.vertices.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SurfaceType;

    #[test]
    fn test_face_normal_follows_winding() {
        let v0 = Vertex::new(0.0, 0.0, 0.0);
        let v1 = Vertex::new(1.0, 0.0, 0.0);
        let v2 = Vertex::new(0.0, 1.0, 0.0);

        assert_eq!(calculate_face_normal(&v0, &v1, &v2), (0.0, 0.0, 1.0));
        assert_eq!(calculate_face_normal(&v0, &v2, &v1), (0.0, 0.0, -1.0));
    }

    #[test]
    fn test_face_normal_degenerate() {
        let v0 = Vertex::new(0.0, 0.0, 0.0);
        let v1 = Vertex::new(1.0, 0.0, 0.0);
        let v2 = Vertex::new(2.0, 0.0, 0.0);
        assert_eq!(calculate_face_normal(&v0, &v1, &v2), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_vertex_normals_of_vertical_wall() {
        // Wall in the XZ plane, wound so the normal points to -Y
        let vertices = vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(4.0, 0.0, 0.0),
            Vertex::new(4.0, 0.0, 3.0),
            Vertex::new(0.0, 0.0, 3.0),
        ];
        let normals = calculate_vertex_normals(&vertices, &[0, 1, 2, 0, 2, 3]);

        assert_eq!(normals.len(), 4);
        for n in normals {
            assert!((n.1 + 1.0).abs() < 1e-12, "expected -Y normal, got {:?}", n);
            assert!(n.0.abs() < 1e-12 && n.2.abs() < 1e-12);
        }
    }

    #[test]
    fn test_vertex_normals_skip_invalid_indices() {
        let vertices = vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
        ];
        let normals = calculate_vertex_normals(&vertices, &[0, 1, 9]);
        assert!(normals.iter().all(|n| *n == (0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_compute_aabb() {
        let vertices = [
            Vertex::new(-5.0, -10.0, 0.0),
            Vertex::new(15.0, 5.0, 20.0),
            Vertex::new(3.0, 25.0, 8.0),
        ];
        let bounds = compute_aabb(&vertices).unwrap();

        assert_eq!(bounds.min, Point3::new(-5.0, -10.0, 0.0));
        assert_eq!(bounds.max, Point3::new(15.0, 25.0, 20.0));
        assert_eq!(bounds.center(), Point3::new(5.0, 7.5, 10.0));
        assert_eq!(bounds.max_extent(), 35.0);
    }

    #[test]
    fn test_compute_aabb_empty() {
        assert!(compute_aabb(std::iter::empty::<&Vertex>()).is_none());
    }

    #[test]
    fn test_compute_surfaces_aabb_spans_all_surfaces() {
        let a = Surface::new(
            "a",
            SurfaceType::Roof,
            vec![
                Vertex::new(0.0, 0.0, 0.0),
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(1.0, 1.0, 0.0),
            ],
        );
        let b = Surface::new(
            "b",
            SurfaceType::Roof,
            vec![
                Vertex::new(5.0, 5.0, 5.0),
                Vertex::new(6.0, 5.0, 5.0),
                Vertex::new(6.0, 6.0, 7.0),
            ],
        );
        let bounds = compute_surfaces_aabb([&a, &b]).unwrap();
        assert_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point3::new(6.0, 6.0, 7.0));
    }
}
