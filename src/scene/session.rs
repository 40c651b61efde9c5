//! Scene session: load, filter, pick and frame a building
//!
//! A [`SceneSession`] owns the renderer and the index of the current
//! generation. Every change to the visible surface set (a load or a space
//! filter) is built completely off to the side and only then swapped in:
//! the old meshes are released, the new ones registered and the camera
//! reframed in one step, so a frame never sees a half-updated scene.
//!
//! Loads follow last-request-wins. [`SceneSession::begin_load`] hands out a
//! [`LoadTicket`]; completing any ticket but the newest is a no-op.

use crate::error::{Error, Result};
use crate::framing::{CameraFraming, CameraPose, compute_framing_with_factor};
use crate::mesher::build_mesh_with_sides;
use crate::model::{Building, MeshDescriptor, SceneConfig, Surface};
use crate::parser::{SurfaceWarning, parse_building_with_config};
use std::collections::HashMap;

use super::index::SceneIndex;
use super::loader::TextLoader;
use super::render::{Renderer, SurfaceMetadata};

/// A pending load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    path: String,
}

impl LoadTicket {
    /// Request sequence number; newer requests have larger numbers
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Path the document is loaded from
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// What a completed load did
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The document replaced the scene
    Applied(LoadSummary),
    /// A newer load was started first; the document was discarded
    Superseded,
}

/// Counts describing an applied load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Building name
    pub building_name: String,
    /// Surfaces now in the scene
    pub surfaces: usize,
    /// Surfaces left out by the parser or the mesher
    pub skipped: usize,
    /// Distinct spaces in the building
    pub spaces: usize,
}

/// A fully built surface set, ready to swap in
struct Generation {
    meshes: Vec<(MeshDescriptor, SurfaceMetadata)>,
    framing: CameraFraming,
    warnings: Vec<SurfaceWarning>,
}

/// Interactive view over one building
pub struct SceneSession<R: Renderer> {
    renderer: R,
    config: SceneConfig,
    index: SceneIndex,
    building: Option<Building>,
    spaces: Vec<String>,
    active_space: Option<String>,
    selected: Option<String>,
    framing: Option<CameraFraming>,
    camera: Option<CameraPose>,
    latest_generation: u64,
    parse_warnings: Vec<SurfaceWarning>,
    mesh_warnings: Vec<SurfaceWarning>,
}

impl<R: Renderer> SceneSession<R> {
    /// Create an empty session with the default configuration
    pub fn new(renderer: R) -> Self {
        Self::with_config(renderer, SceneConfig::default())
    }

    /// Create an empty session
    pub fn with_config(renderer: R, config: SceneConfig) -> Self {
        Self {
            renderer,
            config,
            index: SceneIndex::new(),
            building: None,
            spaces: Vec::new(),
            active_space: None,
            selected: None,
            framing: None,
            camera: None,
            latest_generation: 0,
            parse_warnings: Vec::new(),
            mesh_warnings: Vec::new(),
        }
    }

    /// Start a load request, superseding every earlier one
    pub fn begin_load(&mut self, path: impl Into<String>) -> LoadTicket {
        self.latest_generation += 1;
        LoadTicket {
            generation: self.latest_generation,
            path: path.into(),
        }
    }

    /// Finish a load request with the fetched document text
    ///
    /// A ticket older than the newest returns [`LoadOutcome::Superseded`]
    /// without parsing. Otherwise the document is parsed, meshed and framed;
    /// only if all of that succeeds does it replace the current scene.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedDocument`] for an unreadable document, a per-surface
    /// error in strict mode, or [`Error::EmptyScene`] when no surface survives.
    /// The current scene is kept in every error case.
    pub fn complete_load(&mut self, ticket: LoadTicket, text: &str) -> Result<LoadOutcome> {
        if ticket.generation != self.latest_generation {
            tracing::debug!(
                path = %ticket.path,
                generation = ticket.generation,
                latest = self.latest_generation,
                "discarding superseded load"
            );
            return Ok(LoadOutcome::Superseded);
        }

        let report = parse_building_with_config(text, self.config.parser_config())?;
        let building = report.building;
        let generation = build_generation(&self.config, &building, None)?;

        self.selected = None;
        self.active_space = None;
        self.commit(generation);

        self.parse_warnings = report.warnings;
        self.spaces = building.space_ids();

        let summary = LoadSummary {
            building_name: building.name.clone(),
            surfaces: self.index.len(),
            skipped: self.parse_warnings.len() + self.mesh_warnings.len(),
            spaces: self.spaces.len(),
        };
        tracing::info!(
            path = %ticket.path,
            building = %summary.building_name,
            surfaces = summary.surfaces,
            skipped = summary.skipped,
            spaces = summary.spaces,
            "scene loaded"
        );

        self.building = Some(building);
        Ok(LoadOutcome::Applied(summary))
    }

    /// Fetch a document through `loader` and load it
    pub fn load(&mut self, loader: &impl TextLoader, path: &str) -> Result<LoadOutcome> {
        let ticket = self.begin_load(path);
        let text = loader.load(ticket.path())?;
        self.complete_load(ticket, &text)
    }

    /// Show only the surfaces bounding `space_id`, or every surface for `None`
    ///
    /// Returns the number of visible surfaces. The current selection is kept
    /// when the selected surface is still visible.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyScene`] when nothing is loaded or no surface matches the
    /// space; the current scene is kept.
    pub fn filter_by_space(&mut self, space_id: Option<&str>) -> Result<usize> {
        let building = self
            .building
            .as_ref()
            .ok_or_else(|| Error::EmptyScene("no building loaded".to_string()))?;
        let generation = build_generation(&self.config, building, space_id)?;

        self.commit(generation);
        self.active_space = space_id.map(str::to_string);

        if let Some(selected) = self.selected.clone() {
            match self.index.handle_of(&selected) {
                Some(handle) => self.renderer.set_highlight(handle, true),
                None => self.selected = None,
            }
        }

        Ok(self.index.len())
    }

    /// Swap in a built generation
    fn commit(&mut self, generation: Generation) {
        for handle in self.index.clear() {
            self.renderer.remove_mesh(handle);
        }

        for (mesh, metadata) in &generation.meshes {
            let handle = self.renderer.add_mesh(mesh, metadata);
            if let Some(retired) = self.index.register(
                &metadata.surface_id,
                metadata.adjacent_space_id.as_deref(),
                handle,
            ) {
                self.renderer.remove_mesh(retired);
            }
        }

        let pose = generation.framing.pose();
        self.renderer.set_camera(&pose);
        self.camera = Some(pose);
        self.framing = Some(generation.framing);
        self.mesh_warnings = generation.warnings;
    }

    /// Select whatever surface is under a screen position
    ///
    /// Picking empty space clears the selection.
    pub fn pick(&mut self, x: f64, y: f64) -> Option<String> {
        let surface_id = self
            .renderer
            .pick(x, y)
            .and_then(|handle| self.index.resolve_pick(handle))
            .map(str::to_string);

        self.select_surface(surface_id.as_deref());
        surface_id
    }

    /// Highlight a surface, or clear the selection with `None`
    ///
    /// Returns whether a surface is selected afterwards. An id that is not in
    /// the scene clears the selection.
    pub fn select_surface(&mut self, surface_id: Option<&str>) -> bool {
        if let Some(previous) = self.selected.take() {
            if let Some(handle) = self.index.handle_of(&previous) {
                self.renderer.set_highlight(handle, false);
            }
        }

        let Some((id, handle)) =
            surface_id.and_then(|id| self.index.handle_of(id).map(|handle| (id, handle)))
        else {
            return false;
        };

        self.renderer.set_highlight(handle, true);
        self.selected = Some(id.to_string());
        true
    }

    /// Render one frame with the current camera
    ///
    /// Returns false, drawing nothing, until a load has succeeded.
    pub fn tick(&mut self) -> bool {
        match self.camera {
            Some(pose) => {
                self.renderer.render_frame(&pose);
                true
            }
            None => false,
        }
    }

    /// The loaded building
    pub fn building(&self) -> Option<&Building> {
        self.building.as_ref()
    }

    /// The selected surface
    pub fn selected_surface(&self) -> Option<&Surface> {
        let id = self.selected.as_deref()?;
        self.building.as_ref()?.surface(id)
    }

    /// Id of the selected surface
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Space filter in effect
    pub fn active_space(&self) -> Option<&str> {
        self.active_space.as_deref()
    }

    /// Every space of the loaded building, ascending
    pub fn spaces(&self) -> &[String] {
        &self.spaces
    }

    /// Index of the visible generation
    pub fn index(&self) -> &SceneIndex {
        &self.index
    }

    /// Framing of the visible generation
    pub fn framing(&self) -> Option<&CameraFraming> {
        self.framing.as_ref()
    }

    /// Current camera pose
    pub fn camera(&self) -> Option<&CameraPose> {
        self.camera.as_ref()
    }

    /// Surfaces left out of the current scene, parser warnings first
    pub fn warnings(&self) -> impl Iterator<Item = &SurfaceWarning> {
        self.parse_warnings.iter().chain(&self.mesh_warnings)
    }

    /// Session configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Take the renderer back, dropping the scene state
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

/// Mesh and frame the surfaces of `building` visible under `space_id`
fn build_generation(
    config: &SceneConfig,
    building: &Building,
    space_id: Option<&str>,
) -> Result<Generation> {
    let mut built = Vec::new();
    let mut warnings = Vec::new();

    for (index, surface) in building.surfaces.iter().enumerate() {
        if space_id.is_some_and(|space| !surface.is_in_space(space)) {
            continue;
        }

        match build_mesh_with_sides(surface, config.double_sided()) {
            Ok(mesh) => built.push((surface, mesh)),
            Err(error) if error.is_recoverable() => {
                tracing::warn!(
                    surface_id = %surface.id,
                    %error,
                    "skipping surface that cannot be meshed"
                );
                warnings.push(SurfaceWarning {
                    index,
                    surface_id: Some(surface.id.clone()),
                    error,
                });
            }
            Err(error) => return Err(error),
        }
    }

    // A later surface with the same id replaces the earlier one in the index,
    // so only the last occurrence is visible
    let last_position: HashMap<&str, usize> = built
        .iter()
        .enumerate()
        .map(|(position, &(surface, _))| (surface.id.as_str(), position))
        .collect();
    let built: Vec<(&Surface, MeshDescriptor)> = built
        .into_iter()
        .enumerate()
        .filter(|(position, (surface, _))| {
            last_position.get(surface.id.as_str()) == Some(position)
        })
        .map(|(_, entry)| entry)
        .collect();

    let visible = built.iter().map(|(surface, _)| *surface);
    let framing = compute_framing_with_factor(visible, config.distance_factor()).map_err(|_| {
        Error::EmptyScene(match space_id {
            Some(space) => format!("no surface bounds space '{}'", space),
            None => format!("building '{}' has no renderable surface", building.name),
        })
    })?;

    let meshes = built
        .into_iter()
        .map(|(surface, mesh)| (mesh, SurfaceMetadata::from_surface(surface)))
        .collect();

    Ok(Generation {
        meshes,
        framing,
        warnings,
    })
}
