//! Building, surface and vertex types

use std::collections::BTreeSet;
use std::fmt;

/// A 3D vertex with x, y, z coordinates in world space (meters)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// The `surfaceType` tag of a surface
///
/// Known gbXML tags get their own variant. Anything else is kept verbatim in
/// [`SurfaceType::Other`] so no information is lost and no tag is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurfaceType {
    /// Exterior wall
    ExteriorWall,
    /// Interior wall
    InteriorWall,
    /// Roof
    Roof,
    /// Interior floor
    InteriorFloor,
    /// Floor exposed to outside air
    ExposedFloor,
    /// Shading surface
    Shade,
    /// Wall below grade
    UndergroundWall,
    /// Slab below grade
    UndergroundSlab,
    /// Ceiling
    Ceiling,
    /// Virtual air boundary
    Air,
    /// Ceiling below grade
    UndergroundCeiling,
    /// Raised floor
    RaisedFloor,
    /// Slab on grade
    SlabOnGrade,
    /// Freestanding column
    FreestandingColumn,
    /// Column embedded in a wall
    EmbeddedColumn,
    /// Any tag not listed above, kept as written
    Other(String),
}

impl SurfaceType {
    /// Map a `surfaceType` attribute value to a surface type
    ///
    /// Matching is case-sensitive. Unknown tags become [`SurfaceType::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ExteriorWall" => SurfaceType::ExteriorWall,
            "InteriorWall" => SurfaceType::InteriorWall,
            "Roof" => SurfaceType::Roof,
            "InteriorFloor" => SurfaceType::InteriorFloor,
            "ExposedFloor" => SurfaceType::ExposedFloor,
            "Shade" => SurfaceType::Shade,
            "UndergroundWall" => SurfaceType::UndergroundWall,
            "UndergroundSlab" => SurfaceType::UndergroundSlab,
            "Ceiling" => SurfaceType::Ceiling,
            "Air" => SurfaceType::Air,
            "UndergroundCeiling" => SurfaceType::UndergroundCeiling,
            "RaisedFloor" => SurfaceType::RaisedFloor,
            "SlabOnGrade" => SurfaceType::SlabOnGrade,
            "FreestandingColumn" => SurfaceType::FreestandingColumn,
            "EmbeddedColumn" => SurfaceType::EmbeddedColumn,
            other => SurfaceType::Other(other.to_string()),
        }
    }

    /// The tag as it appears in the document
    pub fn as_str(&self) -> &str {
        match self {
            SurfaceType::ExteriorWall => "ExteriorWall",
            SurfaceType::InteriorWall => "InteriorWall",
            SurfaceType::Roof => "Roof",
            SurfaceType::InteriorFloor => "InteriorFloor",
            SurfaceType::ExposedFloor => "ExposedFloor",
            SurfaceType::Shade => "Shade",
            SurfaceType::UndergroundWall => "UndergroundWall",
            SurfaceType::UndergroundSlab => "UndergroundSlab",
            SurfaceType::Ceiling => "Ceiling",
            SurfaceType::Air => "Air",
            SurfaceType::UndergroundCeiling => "UndergroundCeiling",
            SurfaceType::RaisedFloor => "RaisedFloor",
            SurfaceType::SlabOnGrade => "SlabOnGrade",
            SurfaceType::FreestandingColumn => "FreestandingColumn",
            SurfaceType::EmbeddedColumn => "EmbeddedColumn",
            SurfaceType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single planar polygon of the building envelope
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Surface {
    /// Surface identifier, assumed unique within a building
    pub id: String,
    /// Surface type tag
    pub surface_type: SurfaceType,
    /// True only when the document says exactly `exposedToSun="true"`
    pub exposed_to_sun: bool,
    /// Optional `<Name>` text
    pub name: Option<String>,
    /// Optional `spaceIdRef` of the `<AdjacentSpaceId>` element
    pub adjacent_space_id: Option<String>,
    /// Implicitly closed polygon ring
    pub vertices: Vec<Vertex>,
}

impl Surface {
    /// Create a surface with no optional metadata
    pub fn new(id: impl Into<String>, surface_type: SurfaceType, vertices: Vec<Vertex>) -> Self {
        Self {
            id: id.into(),
            surface_type,
            exposed_to_sun: false,
            name: None,
            adjacent_space_id: None,
            vertices,
        }
    }

    /// Set the adjacent space reference
    pub fn with_space(mut self, space_id: impl Into<String>) -> Self {
        self.adjacent_space_id = Some(space_id.into());
        self
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the surface bounds the given space
    pub fn is_in_space(&self, space_id: &str) -> bool {
        self.adjacent_space_id.as_deref() == Some(space_id)
    }
}

/// A parsed building: a name and its surfaces in document order
///
/// A building is never edited after parsing. Reloading produces a new one.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    /// Building name
    pub name: String,
    /// Valid surfaces in document order
    pub surfaces: Vec<Surface>,
}

impl Building {
    /// Create a building from its parts
    pub fn new(name: impl Into<String>, surfaces: Vec<Surface>) -> Self {
        Self {
            name: name.into(),
            surfaces,
        }
    }

    /// Find a surface by id
    ///
    /// With duplicate ids the last surface in document order is returned.
    pub fn surface(&self, id: &str) -> Option<&Surface> {
        self.surfaces.iter().rev().find(|s| s.id == id)
    }

    /// Distinct space ids referenced by any surface, ascending
    pub fn space_ids(&self) -> Vec<String> {
        self.surfaces
            .iter()
            .filter_map(|s| s.adjacent_space_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Surfaces bounding the given space, in document order
    pub fn surfaces_in_space<'a>(&'a self, space_id: &'a str) -> impl Iterator<Item = &'a Surface> {
        self.surfaces.iter().filter(move |s| s.is_in_space(space_id))
    }
}
