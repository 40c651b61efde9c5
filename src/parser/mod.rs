//! XML parsing for building geometry documents
//!
//! The parser reads the whole document in a single pass with `quick-xml`.
//! Document-level problems (malformed XML, no `<Building>` element) are fatal.
//! Surface-level problems are recorded as [`SurfaceWarning`]s and the surface
//! is left out of the resulting [`Building`], unless the configuration is strict.

mod surface;

use crate::error::{Error, Result};
use crate::model::{Building, ParserConfig};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use surface::SurfaceBuilder;

/// Default buffer capacity for XML parsing (4KB)
const XML_BUFFER_CAPACITY: usize = 4096;

/// A surface that was dropped during parsing
#[derive(Debug)]
pub struct SurfaceWarning {
    /// Zero-based position of the `<Surface>` element in the document
    pub index: usize,
    /// Surface id, when the element declared one
    pub surface_id: Option<String>,
    /// Why the surface was dropped
    pub error: Error,
}

/// Result of parsing a document: the building plus the surfaces left out of it
#[derive(Debug)]
pub struct ParseReport {
    /// The parsed building
    pub building: Building,
    /// One entry per skipped `<Surface>` element, in document order
    pub warnings: Vec<SurfaceWarning>,
}

impl ParseReport {
    /// Total number of `<Surface>` elements seen
    pub fn surfaces_seen(&self) -> usize {
        self.building.surfaces.len() + self.warnings.len()
    }
}

/// Parse a building document, skipping invalid surfaces
///
/// # Example
///
/// ```
/// use gbxml_scene::parser::parse_building;
///
/// let xml = r#"<Building name="Shed">
///   <Surface id="s1" surfaceType="Roof" exposedToSun="true">
///     <PlanarGeometry><PolyLoop>
///       <CartesianPoint><Coordinate>0</Coordinate><Coordinate>0</Coordinate><Coordinate>3</Coordinate></CartesianPoint>
///       <CartesianPoint><Coordinate>4</Coordinate><Coordinate>0</Coordinate><Coordinate>3</Coordinate></CartesianPoint>
///       <CartesianPoint><Coordinate>4</Coordinate><Coordinate>4</Coordinate><Coordinate>3</Coordinate></CartesianPoint>
///     </PolyLoop></PlanarGeometry>
///   </Surface>
/// </Building>"#;
///
/// let building = parse_building(xml)?;
/// assert_eq!(building.name, "Shed");
/// assert_eq!(building.surfaces.len(), 1);
/// # Ok::<(), gbxml_scene::Error>(())
/// ```
pub fn parse_building(xml: &str) -> Result<Building> {
    parse_building_with_config(xml, &ParserConfig::new()).map(|report| report.building)
}

/// Parse a building document with a custom configuration
pub fn parse_building_with_config(xml: &str, config: &ParserConfig) -> Result<ParseReport> {
    // Captured text is trimmed per element; trimming every event would also
    // drop the spaces around entity references
    let mut reader = Reader::from_str(xml);

    let mut buf = Vec::with_capacity(XML_BUFFER_CAPACITY);
    let mut depth: usize = 0;

    let mut building_depth: Option<usize> = None;
    let mut building_open = false;
    let mut building_name: Option<String> = None;
    let mut name_capture: Option<usize> = None;
    let mut name_text = String::new();

    let mut current: Option<SurfaceBuilder> = None;
    let mut surface_index: usize = 0;
    let mut surfaces = Vec::new();
    let mut warnings = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf)?;
        let is_empty_element = matches!(event, Event::Empty(_));

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                depth += 1;
                let name = e.name();
                let name_str = std::str::from_utf8(name.as_ref())?;
                let local_name = get_local_name(name_str);

                match local_name {
                    "Building" if building_depth.is_none() => {
                        building_depth = Some(depth);
                        building_open = !is_empty_element;
                        let attrs = parse_attributes(e)?;
                        building_name = attrs.get("name").cloned();
                    }
                    "Surface" if current.is_none() => {
                        current = Some(SurfaceBuilder::start(e, depth)?);
                    }
                    _ => {
                        if let Some(builder) = current.as_mut() {
                            builder.open(local_name, e, depth)?;
                        } else if local_name == "Name"
                            && building_open
                            && building_name.is_none()
                            && building_depth.is_some_and(|d| d + 1 == depth)
                        {
                            name_capture = Some(depth);
                            name_text.clear();
                        }
                    }
                }

                if is_empty_element {
                    if let Some(finished) = close_element(
                        local_name,
                        depth,
                        &mut current,
                        &mut name_capture,
                        &mut name_text,
                        &mut building_name,
                    ) {
                        collect_surface(
                            finished,
                            config,
                            &mut surface_index,
                            &mut surfaces,
                            &mut warnings,
                        )?;
                    }
                    depth -= 1;
                }
            }
            Event::End(ref e) => {
                let name = e.name();
                let name_str = std::str::from_utf8(name.as_ref())?;
                let local_name = get_local_name(name_str);

                if building_open && building_depth == Some(depth) {
                    building_open = false;
                }

                if let Some(finished) = close_element(
                    local_name,
                    depth,
                    &mut current,
                    &mut name_capture,
                    &mut name_text,
                    &mut building_name,
                ) {
                    collect_surface(
                        finished,
                        config,
                        &mut surface_index,
                        &mut surfaces,
                        &mut warnings,
                    )?;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(ref t) => {
                // Entity references arrive as separate GeneralRef events
                let text = t
                    .decode()
                    .map_err(|e| Error::MalformedDocument(e.to_string()))?;
                push_text(&text, &mut current, name_capture, &mut name_text);
            }
            Event::CData(ref t) => {
                let text = std::str::from_utf8(t)?;
                push_text(text, &mut current, name_capture, &mut name_text);
            }
            Event::GeneralRef(ref r) => {
                let resolved = match r
                    .resolve_char_ref()
                    .map_err(|e| Error::MalformedDocument(e.to_string()))?
                {
                    Some(ch) => ch.to_string(),
                    None => {
                        let entity = r
                            .decode()
                            .map_err(|e| Error::MalformedDocument(e.to_string()))?;
                        quick_xml::escape::resolve_predefined_entity(&entity)
                            .ok_or_else(|| {
                                Error::MalformedDocument(format!(
                                    "Unknown entity reference '&{};'",
                                    entity
                                ))
                            })?
                            .to_string()
                    }
                };
                push_text(&resolved, &mut current, name_capture, &mut name_text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if depth != 0 {
        return Err(Error::MalformedDocument(format!(
            "Unexpected end of document with {} element(s) still open",
            depth
        )));
    }

    if building_depth.is_none() {
        return Err(Error::MalformedDocument(
            "No <Building> element found".to_string(),
        ));
    }

    let building = Building::new(building_name.unwrap_or_default(), surfaces);

    tracing::debug!(
        building = %building.name,
        surfaces = building.surfaces.len(),
        skipped = warnings.len(),
        "parsed building document"
    );

    Ok(ParseReport { building, warnings })
}

/// Route character data to whichever element is capturing text
fn push_text(
    text: &str,
    current: &mut Option<SurfaceBuilder>,
    name_capture: Option<usize>,
    name_text: &mut String,
) {
    if let Some(builder) = current.as_mut() {
        builder.text(text);
    } else if name_capture.is_some() {
        name_text.push_str(text);
    }
}

/// Close the element at `depth`
///
/// Returns the finished surface builder when the closing element is the
/// current `<Surface>` itself.
fn close_element(
    local_name: &str,
    depth: usize,
    current: &mut Option<SurfaceBuilder>,
    name_capture: &mut Option<usize>,
    name_text: &mut String,
    building_name: &mut Option<String>,
) -> Option<SurfaceBuilder> {
    if current.as_ref().is_some_and(|b| b.depth() == depth) {
        return current.take();
    }

    if let Some(builder) = current.as_mut() {
        builder.close(local_name, depth);
    } else if *name_capture == Some(depth) {
        *building_name = Some(name_text.trim().to_string());
        *name_capture = None;
    }

    None
}

/// Validate a finished surface and file it as a surface or a warning
fn collect_surface(
    builder: SurfaceBuilder,
    config: &ParserConfig,
    surface_index: &mut usize,
    surfaces: &mut Vec<crate::model::Surface>,
    warnings: &mut Vec<SurfaceWarning>,
) -> Result<()> {
    let index = *surface_index;
    *surface_index += 1;

    let surface_id = builder.id().map(str::to_string);
    match builder.finish() {
        Ok(surface) => surfaces.push(surface),
        Err(error) if config.is_strict() => return Err(error),
        Err(error) => {
            tracing::warn!(
                index,
                surface_id = surface_id.as_deref().unwrap_or("<none>"),
                %error,
                "skipping invalid surface"
            );
            warnings.push(SurfaceWarning {
                index,
                surface_id,
                error,
            });
        }
    }

    Ok(())
}

/// Extract local name from potentially namespaced XML element name
///
/// - `"gb:Surface"` returns `"Surface"`
/// - `"Surface"` returns `"Surface"`
pub(crate) fn get_local_name(name_str: &str) -> &str {
    if let Some(pos) = name_str.rfind(':') {
        &name_str[pos + 1..]
    } else {
        name_str
    }
}

/// Parse attributes from an XML element, keyed by local name
fn parse_attributes(e: &BytesStart) -> Result<HashMap<String, String>> {
    let mut attrs = HashMap::new();

    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        let value = quick_xml::escape::unescape(value)
            .map_err(|e| Error::MalformedDocument(e.to_string()))?;

        attrs.insert(get_local_name(key).to_string(), value.into_owned());
    }

    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS: &str = r#"
        <CartesianPoint><Coordinate>0</Coordinate><Coordinate>0</Coordinate><Coordinate>0</Coordinate></CartesianPoint>
        <CartesianPoint><Coordinate>1</Coordinate><Coordinate>0</Coordinate><Coordinate>0</Coordinate></CartesianPoint>
        <CartesianPoint><Coordinate>1</Coordinate><Coordinate>1</Coordinate><Coordinate>0</Coordinate></CartesianPoint>"#;

    fn surface_xml(id: &str, extra: &str) -> String {
        format!(
            r#"<Surface id="{id}" surfaceType="ExteriorWall">{extra}<PlanarGeometry><PolyLoop>{POINTS}</PolyLoop></PlanarGeometry></Surface>"#
        )
    }

    #[test]
    fn test_get_local_name() {
        assert_eq!(get_local_name("gb:Surface"), "Surface");
        assert_eq!(get_local_name("Surface"), "Surface");
    }

    #[test]
    fn test_parse_minimal_building() {
        let report =
            parse_building_with_config(r#"<Building name="Empty"/>"#, &ParserConfig::new())
                .unwrap();
        assert_eq!(report.building.name, "Empty");
        assert!(report.building.surfaces.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_building_name_from_child_element() {
        let xml = r#"<Building id="b1"><Name>Annex &amp; Hall</Name></Building>"#;
        let building = parse_building(xml).unwrap();
        assert_eq!(building.name, "Annex & Hall");
    }

    #[test]
    fn test_name_after_building_closes_is_ignored() {
        let xml = format!(
            "<Campus><Building id=\"b1\"/>{}<Location><Name>Boston</Name></Location></Campus>",
            surface_xml("s1", "")
        );
        let building = parse_building(&xml).unwrap();
        assert_eq!(building.name, "");
        assert_eq!(building.surfaces.len(), 1);
    }

    #[test]
    fn test_second_building_name_is_ignored() {
        let xml = r#"<Campus>
            <Building id="b1"><Space id="sp"/></Building>
            <Building id="b2"><Name>Second</Name></Building>
        </Campus>"#;
        let building = parse_building(xml).unwrap();
        assert_eq!(building.name, "");

        let xml = r#"<Campus><Building id="b1"><Name>First</Name></Building><Building><Name>Second</Name></Building></Campus>"#;
        assert_eq!(parse_building(xml).unwrap().name, "First");
    }

    #[test]
    fn test_surface_name_not_taken_as_building_name() {
        let xml = format!(
            "<Building>{}</Building>",
            surface_xml("s1", "<Name>Wall</Name>")
        );
        let building = parse_building(&xml).unwrap();
        assert_eq!(building.name, "");
        assert_eq!(building.surfaces[0].name.as_deref(), Some("Wall"));
    }

    #[test]
    fn test_only_first_adjacent_space_counts() {
        let xml = format!(
            "<Building>{}</Building>",
            surface_xml(
                "s1",
                r#"<AdjacentSpaceId/><AdjacentSpaceId spaceIdRef="second"/>"#
            )
        );
        let building = parse_building(&xml).unwrap();
        assert_eq!(building.surfaces[0].adjacent_space_id, None);

        let xml = format!(
            "<Building>{}</Building>",
            surface_xml(
                "s1",
                r#"<AdjacentSpaceId spaceIdRef="first"/><AdjacentSpaceId spaceIdRef="second"/>"#
            )
        );
        let building = parse_building(&xml).unwrap();
        assert_eq!(building.surfaces[0].adjacent_space_id.as_deref(), Some("first"));
    }

    #[test]
    fn test_opening_geometry_is_ignored() {
        let xml = format!(
            r#"<Building name="B"><Surface id="s1" surfaceType="Roof">
                 <Opening id="o1"><Name>Window</Name><PlanarGeometry><PolyLoop>{POINTS}{POINTS}</PolyLoop></PlanarGeometry></Opening>
                 <PlanarGeometry><PolyLoop>{POINTS}</PolyLoop></PlanarGeometry>
               </Surface></Building>"#
        );
        let building = parse_building(&xml).unwrap();
        let surface = &building.surfaces[0];
        assert_eq!(surface.vertices.len(), 3);
        assert_eq!(surface.name, None);
    }

    #[test]
    fn test_unclosed_document_is_malformed() {
        let err = parse_building(r#"<Building name="B"><Surface id="x">"#).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_strict_mode_returns_first_surface_error() {
        let xml = r#"<Building><Surface id="bad"/></Building>"#;
        let err = parse_building_with_config(xml, &ParserConfig::new().strict(true)).unwrap_err();
        assert!(matches!(err, Error::MissingGeometry(ref id) if id == "bad"));
    }
}
