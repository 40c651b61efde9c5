//! Renderer collaborator interface

use crate::framing::CameraPose;
use crate::model::{MeshDescriptor, Surface, SurfaceType};

/// Opaque handle for a mesh owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderHandle(pub u64);

/// Surface metadata attached to a mesh when it is handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMetadata {
    /// Surface identifier
    pub surface_id: String,
    /// Surface type tag
    pub surface_type: SurfaceType,
    /// Optional display name
    pub name: Option<String>,
    /// Optional adjacent space reference
    pub adjacent_space_id: Option<String>,
}

impl SurfaceMetadata {
    /// Copy the descriptive fields of a surface
    pub fn from_surface(surface: &Surface) -> Self {
        Self {
            surface_id: surface.id.clone(),
            surface_type: surface.surface_type.clone(),
            name: surface.name.clone(),
            adjacent_space_id: surface.adjacent_space_id.clone(),
        }
    }
}

/// The rendering side of a scene
///
/// The renderer owns every mesh it hands out a [`RenderHandle`] for, until
/// [`Renderer::remove_mesh`] is called with that handle. It is driven
/// entirely by the caller: nothing is drawn except from
/// [`Renderer::render_frame`], and the scene is never modified while a
/// frame is being drawn.
///
/// # Example
///
/// ```
/// use gbxml_scene::framing::CameraPose;
/// use gbxml_scene::scene::{RenderHandle, Renderer, SurfaceMetadata};
/// use gbxml_scene::MeshDescriptor;
///
/// #[derive(Default)]
/// struct Headless {
///     next: u64,
///     frames: usize,
/// }
///
/// impl Renderer for Headless {
///     fn add_mesh(&mut self, _mesh: &MeshDescriptor, _meta: &SurfaceMetadata) -> RenderHandle {
///         self.next += 1;
///         RenderHandle(self.next)
///     }
///     fn remove_mesh(&mut self, _handle: RenderHandle) {}
///     fn set_highlight(&mut self, _handle: RenderHandle, _highlighted: bool) {}
///     fn set_camera(&mut self, _pose: &CameraPose) {}
///     fn pick(&self, _x: f64, _y: f64) -> Option<RenderHandle> {
///         None
///     }
///     fn render_frame(&mut self, _pose: &CameraPose) {
///         self.frames += 1;
///     }
/// }
/// ```
pub trait Renderer {
    /// Upload a mesh and return its handle
    fn add_mesh(&mut self, mesh: &MeshDescriptor, metadata: &SurfaceMetadata) -> RenderHandle;

    /// Release a mesh and its graphics resources
    fn remove_mesh(&mut self, handle: RenderHandle);

    /// Turn the selection highlight of a mesh on or off
    fn set_highlight(&mut self, handle: RenderHandle, highlighted: bool);

    /// Move the camera
    fn set_camera(&mut self, pose: &CameraPose);

    /// Mesh under a screen position, if any
    fn pick(&self, x: f64, y: f64) -> Option<RenderHandle>;

    /// Draw one frame
    fn render_frame(&mut self, pose: &CameraPose);
}
