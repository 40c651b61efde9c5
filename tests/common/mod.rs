//! Shared fixtures for integration tests
//!
//! Builds gbXML documents from compact descriptions and provides a renderer
//! and a loader that record what the scene asks of them.

#![allow(dead_code)]

use gbxml_scene::framing::CameraPose;
use gbxml_scene::{Error, MeshDescriptor, RenderHandle, Renderer, SurfaceMetadata, TextLoader};
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub type Point = (f64, f64, f64);

pub const WALL: [Point; 4] = [(0.0, 0.0, 0.0), (10.0, 0.0, 0.0), (10.0, 0.0, 3.0), (0.0, 0.0, 3.0)];
pub const ROOF: [Point; 4] = [(0.0, 0.0, 3.0), (10.0, 0.0, 3.0), (10.0, 8.0, 3.0), (0.0, 8.0, 3.0)];
pub const FLOOR: [Point; 4] = [(0.0, 0.0, 0.0), (0.0, 8.0, 0.0), (10.0, 8.0, 0.0), (10.0, 0.0, 0.0)];
pub const SHADE: [Point; 3] = [(0.0, -2.0, 3.0), (10.0, -2.0, 3.0), (10.0, 0.0, 3.0)];

/// One `<CartesianPoint>`
pub fn point_xml(&(x, y, z): &Point) -> String {
    format!(
        "<CartesianPoint><Coordinate>{x}</Coordinate><Coordinate>{y}</Coordinate><Coordinate>{z}</Coordinate></CartesianPoint>"
    )
}

/// One `<Surface>` with its planar geometry
pub fn surface_xml(id: &str, surface_type: &str, space: Option<&str>, points: &[Point]) -> String {
    let adjacency = space
        .map(|s| format!(r#"<AdjacentSpaceId spaceIdRef="{s}"/>"#))
        .unwrap_or_default();
    let ring: String = points.iter().map(point_xml).collect();

    format!(
        r#"<Surface id="{id}" surfaceType="{surface_type}" exposedToSun="true">
      <Name>{id} name</Name>
      {adjacency}
      <PlanarGeometry><PolyLoop>{ring}</PolyLoop></PlanarGeometry>
    </Surface>"#
    )
}

/// A complete gbXML document with the surfaces beside the building
pub fn building_xml(name: &str, surfaces: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gbXML xmlns="http://www.gbxml.org/schema" version="6.01">
  <Campus id="campus-1">
    <Building id="building-1" buildingType="Office" name="{name}">
      <Space id="space-a"/>
      <Space id="space-b"/>
    </Building>
    {}
  </Campus>
</gbXML>"#,
        surfaces.join("\n    ")
    )
}

/// Four valid surfaces in two spaces plus one unparsable surface
///
/// - `wall-1`, `roof-1` bound `space-a`
/// - `floor-1` bounds `space-b`
/// - `shade-1` bounds no space
/// - `bad-1` has two points and is skipped
pub fn sample_building() -> String {
    building_xml(
        "Sample Office",
        &[
            surface_xml("wall-1", "ExteriorWall", Some("space-a"), &WALL),
            surface_xml("roof-1", "Roof", Some("space-a"), &ROOF),
            surface_xml("bad-1", "ExteriorWall", Some("space-a"), &WALL[..2]),
            surface_xml("floor-1", "SlabOnGrade", Some("space-b"), &FLOOR),
            surface_xml("shade-1", "Shade", None, &SHADE),
        ],
    )
}

/// Renderer that records every call
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_handle: u64,
    pub meshes: BTreeMap<RenderHandle, (MeshDescriptor, SurfaceMetadata)>,
    pub removed: Vec<RenderHandle>,
    pub highlighted: BTreeSet<RenderHandle>,
    pub camera: Option<CameraPose>,
    pub frames: Vec<CameraPose>,
    pub next_pick: Option<RenderHandle>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the live mesh for a surface id
    pub fn handle_for(&self, surface_id: &str) -> Option<RenderHandle> {
        self.meshes
            .iter()
            .find(|(_, (_, metadata))| metadata.surface_id == surface_id)
            .map(|(&handle, _)| handle)
    }

    /// Surface ids of the live meshes, sorted
    pub fn live_surfaces(&self) -> Vec<String> {
        let mut ids: Vec<_> = self
            .meshes
            .values()
            .map(|(_, metadata)| metadata.surface_id.clone())
            .collect();
        ids.sort();
        ids
    }
}

impl Renderer for RecordingRenderer {
    fn add_mesh(&mut self, mesh: &MeshDescriptor, metadata: &SurfaceMetadata) -> RenderHandle {
        self.next_handle += 1;
        let handle = RenderHandle(self.next_handle);
        self.meshes.insert(handle, (mesh.clone(), metadata.clone()));
        handle
    }

    fn remove_mesh(&mut self, handle: RenderHandle) {
        self.meshes.remove(&handle);
        self.highlighted.remove(&handle);
        self.removed.push(handle);
    }

    fn set_highlight(&mut self, handle: RenderHandle, highlighted: bool) {
        if highlighted {
            self.highlighted.insert(handle);
        } else {
            self.highlighted.remove(&handle);
        }
    }

    fn set_camera(&mut self, pose: &CameraPose) {
        self.camera = Some(*pose);
    }

    fn pick(&self, _x: f64, _y: f64) -> Option<RenderHandle> {
        self.next_pick
    }

    fn render_frame(&mut self, pose: &CameraPose) {
        self.frames.push(*pose);
    }
}

/// Loader serving documents from memory
#[derive(Debug, Default)]
pub struct MemoryLoader {
    pub documents: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn with(path: &str, text: String) -> Self {
        let mut loader = Self::default();
        loader.documents.insert(path.to_string(), text);
        loader
    }
}

impl TextLoader for MemoryLoader {
    fn load(&self, path: &str) -> gbxml_scene::Result<String> {
        self.documents.get(path).cloned().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no document at '{}'", path),
            ))
        })
    }
}
