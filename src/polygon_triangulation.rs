//! Polygon triangulation for surface rendering
//!
//! Surfaces are planar, convex rings, so they are triangulated as a fan
//! anchored at the first vertex. This is exact for convex polygons and for
//! axis-aligned quads. Concave rings produce overlapping triangles; that is a
//! known limitation of the approach, not something this module corrects.

/// Error type for polygon triangulation operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TriangulationError {
    /// Polygon has too few vertices to triangulate
    #[error("Polygon has too few vertices: {0} (minimum 3 required)")]
    TooFewVertices(usize),
}

/// Triangulate a convex polygon ring as a fan from vertex 0
///
/// # Arguments
///
/// * `vertex_count` - Number of vertices in the implicitly closed ring
///
/// # Returns
///
/// A vector of triangle indices, where each consecutive triplet of indices
/// represents one triangle `(0, i, i + 1)` for `i = 1 .. n - 2`.
///
/// # Errors
///
/// Returns [`TriangulationError::TooFewVertices`] when the ring has fewer than 3 vertices.
///
/// # Example
///
/// ```
/// use gbxml_scene::polygon_triangulation::triangulate_fan;
///
/// let indices = triangulate_fan(4).expect("Failed to triangulate");
/// assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);
/// ```
pub fn triangulate_fan(vertex_count: usize) -> Result<Vec<u32>, TriangulationError> {
    if vertex_count < 3 {
        return Err(TriangulationError::TooFewVertices(vertex_count));
    }

    let mut indices = Vec::with_capacity((vertex_count - 2) * 3);
    for i in 1..(vertex_count - 1) as u32 {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    Ok(indices)
}

/// Outline edges of a closed ring
///
/// Returns `(i, i + 1)` for every vertex, with the last edge wrapping back to 0.
/// Rings with fewer than 2 vertices have no edges.
pub fn outline_edges(vertex_count: usize) -> Vec<[u32; 2]> {
    if vertex_count < 2 {
        return Vec::new();
    }

    let n = vertex_count as u32;
    (0..n).map(|i| [i, (i + 1) % n]).collect()
}
