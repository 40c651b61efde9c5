//! # gbxml-scene
//!
//! Turns gbXML building geometry into renderable scene data.
//!
//! A document is parsed into a [`Building`] of planar [`Surface`]s. Each surface
//! is meshed into a [`MeshDescriptor`] with a color picked from its surface type,
//! the visible set is framed by a camera, and a [`SceneIndex`] ties the meshes a
//! renderer hands back to surface and space ids so picks and space filters can
//! be answered.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Tolerant parsing: an invalid surface is skipped with a warning, never fatal
//! - Fan triangulation with per-vertex normals and wireframe edges
//! - Last-request-wins loading with atomic scene replacement
//! - Optional `serde` support for the model types
//!
//! ## Example
//!
//! ```
//! use gbxml_scene::{Building, framing::compute_framing, mesher::build_mesh};
//!
//! # fn main() -> Result<(), gbxml_scene::Error> {
//! let xml = r#"<gbXML><Campus>
//!   <Building id="b1" name="Pavilion"/>
//!   <Surface id="roof-1" surfaceType="Roof">
//!     <AdjacentSpaceId spaceIdRef="hall"/>
//!     <PlanarGeometry><PolyLoop>
//!       <CartesianPoint><Coordinate>0</Coordinate><Coordinate>0</Coordinate><Coordinate>4</Coordinate></CartesianPoint>
//!       <CartesianPoint><Coordinate>8</Coordinate><Coordinate>0</Coordinate><Coordinate>4</Coordinate></CartesianPoint>
//!       <CartesianPoint><Coordinate>8</Coordinate><Coordinate>6</Coordinate><Coordinate>4</Coordinate></CartesianPoint>
//!       <CartesianPoint><Coordinate>0</Coordinate><Coordinate>6</Coordinate><Coordinate>4</Coordinate></CartesianPoint>
//!     </PolyLoop></PlanarGeometry>
//!   </Surface>
//! </Campus></gbXML>"#;
//!
//! let building = Building::from_xml(xml)?;
//! let mesh = build_mesh(&building.surfaces[0])?;
//! let framing = compute_framing(&building.surfaces)?;
//!
//! assert_eq!(building.space_ids(), vec!["hall"]);
//! assert_eq!(mesh.triangle_count(), 2);
//! assert_eq!(framing.distance, 20.0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod framing;
pub mod mesh_ops;
pub mod mesher;
pub mod model;
pub mod parser;
pub mod polygon_triangulation;
pub mod scene;

pub use error::{Error, Result};
pub use framing::{CameraFraming, CameraPose};
pub use model::{
    Building, DEFAULT_DISTANCE_FACTOR, MeshDescriptor, ParserConfig, Rgb, SceneConfig, Surface,
    SurfaceType, Vertex,
};
pub use parser::{ParseReport, SurfaceWarning};
pub use scene::{
    FsLoader, LoadOutcome, RenderHandle, Renderer, SceneIndex, SceneSession, SurfaceMetadata,
    TextLoader,
};

impl Building {
    /// Parse a building document, skipping invalid surfaces
    ///
    /// Use [`parser::parse_building_with_config`] to see the skipped surfaces
    /// or to make them fatal.
    pub fn from_xml(xml: &str) -> Result<Self> {
        parser::parse_building(xml)
    }
}
