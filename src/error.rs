//! Error types for building parsing, meshing and framing
//!
//! All errors include an error code for categorization. The code is part of
//! the rendered message so it survives being shown to a user or written to a log.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O errors (the document could not be fetched)
//! - **E2xxx**: Document errors (fatal to the whole load)
//! - **E3xxx**: Surface errors (recoverable, the surface is dropped)
//! - **E4xxx**: Scene errors
//!
//! ## Error Codes
//!
//! - `E1001`: I/O error loading the document
//! - `E2001`: Malformed document
//! - `E3001`: Surface has no geometry
//! - `E3002`: Surface polygon is degenerate
//! - `E3003`: Surface point has an invalid coordinate
//! - `E3004`: Too few vertices to build a mesh
//! - `E3005`: Surface is missing a required attribute
//! - `E4001`: Nothing to frame

use std::io;
use thiserror::Error;

/// Result type for building scene operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading and preparing a building scene
#[derive(Error, Debug)]
pub enum Error {
    /// The text loader failed to provide the document
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - File not found
    /// - Network failure or a non-success response status
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document is not well-formed XML or has no building element
    ///
    /// **Error Code**: E2001
    ///
    /// Fatal: no `Building` is produced.
    #[error("[E2001] Malformed document: {0}")]
    MalformedDocument(String),

    /// A surface has no `PlanarGeometry` container
    ///
    /// **Error Code**: E3001
    #[error("[E3001] Surface '{0}' has no planar geometry")]
    MissingGeometry(String),

    /// A surface's point loop is missing or has fewer than three points
    ///
    /// **Error Code**: E3002
    #[error("[E3002] Degenerate polygon: {0}")]
    DegeneratePolygon(String),

    /// A surface point does not resolve to exactly three finite numbers
    ///
    /// **Error Code**: E3003
    ///
    /// **Suggestions**:
    /// - Verify numeric values use proper format (e.g., "1.5" not "1,5")
    /// - Check every `CartesianPoint` has three `Coordinate` children
    #[error("[E3003] Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Meshing was asked to triangulate fewer than three vertices
    ///
    /// **Error Code**: E3004
    #[error("[E3004] Insufficient vertices: {0}")]
    InsufficientVertices(String),

    /// A surface element is missing a required attribute
    ///
    /// **Error Code**: E3005
    #[error("[E3005] Missing attribute: {0}")]
    MissingAttribute(String),

    /// There is no geometry to frame
    ///
    /// **Error Code**: E4001
    ///
    /// **Common Causes**:
    /// - The document contained no valid surfaces
    /// - A space filter matched no surfaces
    #[error("[E4001] Empty scene: {0}")]
    EmptyScene(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedDocument(format!("XML parsing failed: {}", err))
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::MalformedDocument(format!("Attribute parsing failed: {}", err))
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::MalformedDocument(format!("Invalid UTF-8: {}", err))
    }
}

impl Error {
    /// Whether the error only affects a single surface
    ///
    /// Recoverable errors drop the offending surface and let the load continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::MissingGeometry(_)
                | Error::DegeneratePolygon(_)
                | Error::InvalidCoordinate(_)
                | Error::InsufficientVertices(_)
                | Error::MissingAttribute(_)
        )
    }

    /// Create a DegeneratePolygon error for a surface with too few points
    pub fn degenerate_polygon(surface_id: &str, points: usize) -> Self {
        Error::DegeneratePolygon(format!(
            "Surface '{}' has {} point(s) in its loop (minimum 3 required)",
            surface_id, points
        ))
    }

    /// Create an InvalidCoordinate error with the point and reason
    ///
    /// # Arguments
    /// * `surface_id` - The surface that owns the point
    /// * `point` - Zero-based index of the point within the loop
    /// * `reason` - What is wrong with the coordinates
    pub fn invalid_coordinate(surface_id: &str, point: usize, reason: &str) -> Self {
        Error::InvalidCoordinate(format!(
            "Surface '{}' point {}: {}",
            surface_id, point, reason
        ))
    }

    /// Create an InsufficientVertices error
    pub fn insufficient_vertices(surface_id: &str, count: usize) -> Self {
        Error::InsufficientVertices(format!(
            "Surface '{}' has {} vertices (minimum 3 required)",
            surface_id, count
        ))
    }

    /// Create a MissingAttribute error
    ///
    /// # Example
    /// ```ignore
    /// Error::missing_attribute("Surface", "id")
    /// ```
    pub fn missing_attribute(element: &str, attribute: &str) -> Self {
        Error::MissingAttribute(format!(
            "Element '<{}>' is missing required attribute '{}'",
            element, attribute
        ))
    }
}
