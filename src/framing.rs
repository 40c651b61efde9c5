//! Camera framing
//!
//! The camera is framed over the axis-aligned bounds of the visible surfaces.
//! It sits on the +Z axis through the bounds center, at a distance proportional
//! to the largest extent, and looks back at the center. Framing is always a
//! full recompute over the surfaces it is given.

use crate::error::{Error, Result};
use crate::mesh_ops::{BoundingBox, compute_surfaces_aabb};
use crate::model::{DEFAULT_DISTANCE_FACTOR, Surface};
use nalgebra::{Point3, Vector3};

/// Where the camera sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    /// Midpoint of the bounds on each axis
    pub center: Point3<f64>,
    /// Distance from the center to the eye
    pub distance: f64,
    /// Bounds the framing was computed from
    pub bounds: BoundingBox,
}

/// A look-at camera pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Camera position
    pub eye: Point3<f64>,
    /// Point the camera looks at
    pub target: Point3<f64>,
    /// Up direction
    pub up: Vector3<f64>,
}

impl CameraFraming {
    /// Front elevation pose: eye at `center + (0, 0, distance)`, +Y up
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.center + Vector3::new(0.0, 0.0, self.distance),
            target: self.center,
            up: Vector3::y(),
        }
    }
}

/// Frame a set of surfaces with the default distance factor
///
/// # Errors
///
/// Returns [`Error::EmptyScene`] when there is no vertex to frame.
///
/// # Example
///
/// ```
/// use gbxml_scene::{Surface, SurfaceType, Vertex, framing::compute_framing};
///
/// let square = Surface::new(
///     "s",
///     SurfaceType::Roof,
///     vec![
///         Vertex::new(0.0, 0.0, 0.0),
///         Vertex::new(10.0, 0.0, 0.0),
///         Vertex::new(10.0, 10.0, 0.0),
///         Vertex::new(0.0, 10.0, 0.0),
///     ],
/// );
///
/// let framing = compute_framing(&[square])?;
/// assert_eq!(framing.center, nalgebra::Point3::new(5.0, 5.0, 0.0));
/// assert_eq!(framing.distance, 25.0);
/// # Ok::<(), gbxml_scene::Error>(())
/// ```
pub fn compute_framing(surfaces: &[Surface]) -> Result<CameraFraming> {
    compute_framing_with_factor(surfaces, DEFAULT_DISTANCE_FACTOR)
}

/// Frame a set of surfaces with a custom distance factor
pub fn compute_framing_with_factor<'a>(
    surfaces: impl IntoIterator<Item = &'a Surface>,
    distance_factor: f64,
) -> Result<CameraFraming> {
    let bounds = compute_surfaces_aabb(surfaces)
        .ok_or_else(|| Error::EmptyScene("no surface vertices to frame".to_string()))?;

    Ok(CameraFraming {
        center: bounds.center(),
        distance: distance_factor * bounds.max_extent(),
        bounds,
    })
}
