//! Surface element parsing
//!
//! A `<Surface>` is collected element by element into a [`SurfaceBuilder`] and
//! validated once its end tag is reached. Only children that belong to the
//! surface itself are read: `<Name>`, `<AdjacentSpaceId>` and
//! `<PlanarGeometry>` must be direct children, so the geometry and names of
//! nested `<Opening>` elements are ignored.

use crate::error::{Error, Result};
use crate::model::{Surface, SurfaceType, Vertex};
use quick_xml::events::BytesStart;

use super::parse_attributes;

/// Text content currently being captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Name,
    Coordinate,
}

/// Raw data of one `<Surface>` element, validated by [`SurfaceBuilder::finish`]
#[derive(Debug)]
pub(crate) struct SurfaceBuilder {
    depth: usize,
    id: Option<String>,
    surface_type: Option<String>,
    exposed_to_sun: bool,
    name: Option<String>,
    adjacent_space_id: Option<String>,
    space_seen: bool,
    has_geometry: bool,
    geometry_depth: Option<usize>,
    loop_depth: Option<usize>,
    loop_seen: bool,
    point_depth: Option<usize>,
    points: Vec<Vec<String>>,
    capture: Option<(Capture, usize)>,
    text: String,
}

impl SurfaceBuilder {
    /// Start a surface from its opening tag at `depth`
    pub(crate) fn start(e: &BytesStart, depth: usize) -> Result<Self> {
        let attrs = parse_attributes(e)?;

        Ok(Self {
            depth,
            id: attrs.get("id").cloned(),
            surface_type: attrs.get("surfaceType").cloned(),
            exposed_to_sun: attrs.get("exposedToSun").map(String::as_str) == Some("true"),
            name: None,
            adjacent_space_id: None,
            space_seen: false,
            has_geometry: false,
            geometry_depth: None,
            loop_depth: None,
            loop_seen: false,
            point_depth: None,
            points: Vec::new(),
            capture: None,
            text: String::new(),
        })
    }

    /// Depth of the `<Surface>` element itself
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Surface id, if the element declared one
    pub(crate) fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Handle a child element opening at `depth`
    pub(crate) fn open(&mut self, local_name: &str, e: &BytesStart, depth: usize) -> Result<()> {
        let direct_child = depth == self.depth + 1;

        match local_name {
            "Name" if direct_child => self.begin_capture(Capture::Name, depth),
            "AdjacentSpaceId" if direct_child && !self.space_seen => {
                self.space_seen = true;
                let attrs = parse_attributes(e)?;
                self.adjacent_space_id = attrs.get("spaceIdRef").cloned();
            }
            "PlanarGeometry" if direct_child && !self.has_geometry => {
                self.has_geometry = true;
                self.geometry_depth = Some(depth);
            }
            "PolyLoop" if self.geometry_depth == Some(depth - 1) && !self.loop_seen => {
                self.loop_seen = true;
                self.loop_depth = Some(depth);
            }
            "CartesianPoint" if self.loop_depth == Some(depth - 1) => {
                self.point_depth = Some(depth);
                self.points.push(Vec::new());
            }
            "Coordinate" if self.point_depth == Some(depth - 1) => {
                self.begin_capture(Capture::Coordinate, depth);
            }
            _ => {}
        }

        Ok(())
    }

    /// Append character data to the active capture, if any
    pub(crate) fn text(&mut self, text: &str) {
        if self.capture.is_some() {
            self.text.push_str(text);
        }
    }

    /// Handle a child element closing at `depth`
    pub(crate) fn close(&mut self, local_name: &str, depth: usize) {
        if let Some((capture, capture_depth)) = self.capture {
            if capture_depth == depth {
                let text = std::mem::take(&mut self.text);
                match capture {
                    Capture::Name => self.name = Some(text.trim().to_string()),
                    Capture::Coordinate => {
                        if let Some(point) = self.points.last_mut() {
                            point.push(text.trim().to_string());
                        }
                    }
                }
                self.capture = None;
            }
        }

        match local_name {
            "CartesianPoint" if self.point_depth == Some(depth) => self.point_depth = None,
            "PolyLoop" if self.loop_depth == Some(depth) => self.loop_depth = None,
            "PlanarGeometry" if self.geometry_depth == Some(depth) => self.geometry_depth = None,
            _ => {}
        }
    }

    fn begin_capture(&mut self, capture: Capture, depth: usize) {
        self.capture = Some((capture, depth));
        self.text.clear();
    }

    /// Validate the collected data and build the surface
    ///
    /// Checks run in a fixed order: id, geometry container, point count, coordinates.
    pub(crate) fn finish(self) -> Result<Surface> {
        let id = self
            .id
            .ok_or_else(|| Error::missing_attribute("Surface", "id"))?;

        if !self.has_geometry {
            return Err(Error::MissingGeometry(id));
        }

        if self.points.len() < 3 {
            return Err(Error::degenerate_polygon(&id, self.points.len()));
        }

        let mut vertices = Vec::with_capacity(self.points.len());
        for (index, coords) in self.points.iter().enumerate() {
            vertices.push(parse_point(&id, index, coords)?);
        }

        Ok(Surface {
            surface_type: SurfaceType::from_tag(self.surface_type.as_deref().unwrap_or("")),
            exposed_to_sun: self.exposed_to_sun,
            name: self.name,
            adjacent_space_id: self.adjacent_space_id,
            vertices,
            id,
        })
    }
}

/// Resolve one `<CartesianPoint>` into a vertex
fn parse_point(surface_id: &str, index: usize, coords: &[String]) -> Result<Vertex> {
    if coords.len() != 3 {
        return Err(Error::invalid_coordinate(
            surface_id,
            index,
            &format!("expected 3 coordinates, got {}", coords.len()),
        ));
    }

    let mut values = [0.0_f64; 3];
    for (value, text) in values.iter_mut().zip(coords) {
        let parsed = text.parse::<f64>().map_err(|_| {
            Error::invalid_coordinate(surface_id, index, &format!("'{}' is not a number", text))
        })?;
        if !parsed.is_finite() {
            return Err(Error::invalid_coordinate(
                surface_id,
                index,
                &format!("coordinate must be finite (got {})", parsed),
            ));
        }
        *value = parsed;
    }

    Ok(Vertex::new(values[0], values[1], values[2]))
}
