//! Display state over the scene tree
//!
//! Tracks selection, the hidden set, and isolation with a descendant-leaf
//! cache for fast multi-select expansion. Operations that need to traverse
//! the hierarchy take the `SceneTree` as an explicit context argument; the
//! store itself owns only identifiers, never nodes.

mod selection_ops;
mod visibility_ops;

use std::collections::{HashMap, HashSet};

use shared::ObjectId;

use crate::scene::SceneTree;

/// Which isolation display state is active
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IsolationMode {
    #[default]
    None,
    /// Keyed off the current selection
    Global,
    /// Keyed by an explicit node id
    Individual(ObjectId),
}

/// Selection, visibility, and isolation state
#[derive(Default)]
pub struct DisplayState {
    /// Node id → ordered mesh-leaf ids of its subtree (a leaf maps to itself).
    /// Rebuilt once per scene load, never patched incrementally.
    pub(crate) descendant_leaves: HashMap<ObjectId, Vec<ObjectId>>,
    /// Ids suppressed from view; always closed under "hide descendants"
    pub(crate) hidden: HashSet<ObjectId>,
    pub(crate) selected_id: Option<ObjectId>,
    /// Mesh-leaf expansion of the selection, always consistent with
    /// `selected_id` via the descendant-leaf cache
    pub(crate) selected_ids: Vec<ObjectId>,
    pub(crate) isolation: IsolationMode,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the descendant-leaf cache from a (re)loaded tree and reset all
    /// per-session state. One pass over all nodes; done once per load.
    pub fn rebuild(&mut self, tree: &SceneTree) {
        self.descendant_leaves.clear();
        for index in 0..tree.len() {
            let leaves = tree
                .mesh_leaves(index)
                .into_iter()
                .map(|leaf| tree.node(leaf).id.clone())
                .collect();
            self.descendant_leaves
                .insert(tree.node(index).id.clone(), leaves);
        }
        self.hidden = HashSet::new();
        self.selected_id = None;
        self.selected_ids.clear();
        self.isolation = IsolationMode::None;
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn hidden(&self) -> &HashSet<ObjectId> {
        &self.hidden
    }

    pub fn isolation(&self) -> &IsolationMode {
        &self.isolation
    }

    pub fn selected_id(&self) -> Option<&ObjectId> {
        self.selected_id.as_ref()
    }

    pub fn selected_ids(&self) -> &[ObjectId] {
        &self.selected_ids
    }

    pub fn is_object_visible(&self, id: &str) -> bool {
        !self.hidden.contains(id)
    }

    pub fn is_individually_isolated(&self, id: &str) -> bool {
        matches!(&self.isolation, IsolationMode::Individual(current) if current == id)
    }

    /// Cached mesh-leaf ids of a subtree; empty for an unknown id
    pub fn descendant_mesh_ids(&self, id: &str) -> &[ObjectId] {
        self.descendant_leaves
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn loaded() -> (SceneTree, DisplayState) {
        let tree = SceneTree::from_description(&fixtures::assembly_scene());
        let mut state = DisplayState::new();
        state.rebuild(&tree);
        (tree, state)
    }

    #[test]
    fn test_cache_covers_every_node() {
        let (tree, state) = loaded();
        assert_eq!(state.descendant_leaves.len(), tree.len());
    }

    #[test]
    fn test_cache_group_entry() {
        let (_, state) = loaded();
        assert_eq!(
            state.descendant_mesh_ids("drive"),
            ["gear".to_string(), "shaft".to_string()]
        );
        assert_eq!(state.descendant_mesh_ids("chassis").len(), 4);
    }

    #[test]
    fn test_cache_leaf_maps_to_itself() {
        let (_, state) = loaded();
        assert_eq!(state.descendant_mesh_ids("gear"), ["gear".to_string()]);
    }

    #[test]
    fn test_unknown_id_has_no_leaves() {
        let (_, state) = loaded();
        assert!(state.descendant_mesh_ids("missing").is_empty());
    }

    #[test]
    fn test_rebuild_resets_session_state() {
        let (tree, mut state) = loaded();
        state.set_selected_by_id(Some("drive"));
        state.toggle_visibility(&tree, "frame");
        state.rebuild(&tree);
        assert!(state.selected_id().is_none());
        assert!(state.hidden().is_empty());
        assert_eq!(*state.isolation(), IsolationMode::None);
    }
}
