//! Surface / render handle index
//!
//! [`SceneIndex`] maps surface ids to the handles of their meshes and back,
//! and groups surface ids by the space they bound. It holds one generation
//! at a time: [`SceneIndex::clear`] retires the whole generation and hands
//! back every handle so the caller can release it on the renderer.

use super::render::RenderHandle;
use std::collections::{BTreeMap, BTreeSet, HashMap};

static NO_SURFACES: BTreeSet<String> = BTreeSet::new();

#[derive(Debug, Clone)]
struct Entry {
    handle: RenderHandle,
    space_id: Option<String>,
}

/// Bidirectional surface id / render handle index
#[derive(Debug, Clone, Default)]
pub struct SceneIndex {
    surfaces: HashMap<String, Entry>,
    handles: HashMap<RenderHandle, String>,
    spaces: BTreeMap<String, BTreeSet<String>>,
}

impl SceneIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the handle of a surface's mesh
    ///
    /// Registering an id again replaces the earlier entry, including its space
    /// membership. Returns the handle that was retired by the replacement, if
    /// any, so the caller can release it.
    ///
    /// # Example
    ///
    /// ```
    /// use gbxml_scene::scene::{RenderHandle, SceneIndex};
    ///
    /// let mut index = SceneIndex::new();
    /// index.register("wall-1", Some("space-a"), RenderHandle(1));
    /// let retired = index.register("wall-1", Some("space-b"), RenderHandle(2));
    ///
    /// assert_eq!(retired, Some(RenderHandle(1)));
    /// assert_eq!(index.resolve_pick(RenderHandle(1)), None);
    /// assert_eq!(index.resolve_pick(RenderHandle(2)), Some("wall-1"));
    /// assert!(index.surfaces_in_space("space-a").is_empty());
    /// ```
    pub fn register(
        &mut self,
        surface_id: &str,
        space_id: Option<&str>,
        handle: RenderHandle,
    ) -> Option<RenderHandle> {
        // A handle belongs to one surface only
        if let Some(previous_owner) = self.handles.get(&handle).cloned() {
            if previous_owner != surface_id {
                self.remove(&previous_owner);
            }
        }

        let retired = self
            .remove(surface_id)
            .filter(|&old| old != handle);

        self.surfaces.insert(
            surface_id.to_string(),
            Entry {
                handle,
                space_id: space_id.map(str::to_string),
            },
        );
        self.handles.insert(handle, surface_id.to_string());
        if let Some(space_id) = space_id {
            self.spaces
                .entry(space_id.to_string())
                .or_default()
                .insert(surface_id.to_string());
        }

        retired
    }

    fn remove(&mut self, surface_id: &str) -> Option<RenderHandle> {
        let entry = self.surfaces.remove(surface_id)?;
        self.handles.remove(&entry.handle);

        if let Some(space_id) = entry.space_id {
            if let Some(members) = self.spaces.get_mut(&space_id) {
                members.remove(surface_id);
                if members.is_empty() {
                    self.spaces.remove(&space_id);
                }
            }
        }

        Some(entry.handle)
    }

    /// Surface id behind a render handle, or `None` for an untracked handle
    pub fn resolve_pick(&self, handle: RenderHandle) -> Option<&str> {
        self.handles.get(&handle).map(String::as_str)
    }

    /// Handle of a surface's mesh
    pub fn handle_of(&self, surface_id: &str) -> Option<RenderHandle> {
        self.surfaces.get(surface_id).map(|entry| entry.handle)
    }

    /// Surface ids bounding a space; empty for an unknown space
    pub fn surfaces_in_space(&self, space_id: &str) -> &BTreeSet<String> {
        self.spaces.get(space_id).unwrap_or(&NO_SURFACES)
    }

    /// Space ids of the registered surfaces, ascending
    pub fn list_spaces(&self) -> Vec<String> {
        self.spaces.keys().cloned().collect()
    }

    /// Drop every entry and return the retired handles
    ///
    /// The index keeps no reference to the handles afterwards; releasing them
    /// on the renderer is up to the caller.
    #[must_use = "retired handles must be released on the renderer"]
    pub fn clear(&mut self) -> Vec<RenderHandle> {
        let mut retired: Vec<RenderHandle> = self.handles.drain().map(|(handle, _)| handle).collect();
        retired.sort_unstable();

        self.surfaces.clear();
        self.spaces.clear();

        tracing::debug!(retired = retired.len(), "scene index cleared");
        retired
    }

    /// Number of registered surfaces
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether no surface is registered
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let mut index = SceneIndex::new();
        assert_eq!(index.register("a", Some("s1"), RenderHandle(10)), None);
        assert_eq!(index.register("b", None, RenderHandle(11)), None);

        assert_eq!(index.resolve_pick(RenderHandle(10)), Some("a"));
        assert_eq!(index.resolve_pick(RenderHandle(11)), Some("b"));
        assert_eq!(index.resolve_pick(RenderHandle(99)), None);
        assert_eq!(index.handle_of("a"), Some(RenderHandle(10)));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_register_same_entry_twice_is_idempotent() {
        let mut index = SceneIndex::new();
        index.register("a", Some("s1"), RenderHandle(1));
        assert_eq!(index.register("a", Some("s1"), RenderHandle(1)), None);

        assert_eq!(index.len(), 1);
        assert_eq!(index.surfaces_in_space("s1").len(), 1);
    }

    #[test]
    fn test_reused_handle_moves_to_new_surface() {
        let mut index = SceneIndex::new();
        index.register("a", Some("s1"), RenderHandle(1));
        index.register("b", Some("s2"), RenderHandle(1));

        assert_eq!(index.resolve_pick(RenderHandle(1)), Some("b"));
        assert_eq!(index.handle_of("a"), None);
        assert_eq!(index.list_spaces(), vec!["s2"]);
    }

    #[test]
    fn test_spaces_sorted_regardless_of_order() {
        let mut index = SceneIndex::new();
        index.register("x", Some("zeta"), RenderHandle(1));
        index.register("y", Some("alpha"), RenderHandle(2));
        index.register("z", Some("mu"), RenderHandle(3));
        index.register("w", Some("alpha"), RenderHandle(4));

        assert_eq!(index.list_spaces(), vec!["alpha", "mu", "zeta"]);
        let alpha: Vec<_> = index.surfaces_in_space("alpha").iter().cloned().collect();
        assert_eq!(alpha, vec!["w", "y"]);
        assert!(index.surfaces_in_space("unknown").is_empty());
    }

    #[test]
    fn test_clear_returns_all_handles() {
        let mut index = SceneIndex::new();
        index.register("a", Some("s1"), RenderHandle(2));
        index.register("b", None, RenderHandle(1));

        assert_eq!(index.clear(), vec![RenderHandle(1), RenderHandle(2)]);
        assert!(index.is_empty());
        assert!(index.list_spaces().is_empty());
        assert_eq!(index.resolve_pick(RenderHandle(1)), None);
        assert!(index.clear().is_empty());
    }
}
