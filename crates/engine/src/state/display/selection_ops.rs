//! Selection operations
//!
//! `selected_ids` is always the descendant-leaf cache entry of the primary
//! id, so consumers (outline rendering, camera framing) never expand the
//! hierarchy themselves.

use crate::scene::SceneNode;

use super::DisplayState;

impl DisplayState {
    /// Select a resolved node (picking boundary); `None` clears.
    pub fn set_selected_object(&mut self, node: Option<&SceneNode>) {
        match node {
            Some(node) => self.set_selected_by_id(Some(&node.id)),
            None => self.clear_selection(),
        }
    }

    /// Select by id (hierarchy boundary). An unknown id clears the selection
    /// rather than erroring.
    pub fn set_selected_by_id(&mut self, id: Option<&str>) {
        let Some(id) = id else {
            self.clear_selection();
            return;
        };
        match self.descendant_leaves.get(id) {
            Some(leaves) => {
                self.selected_id = Some(id.to_string());
                self.selected_ids = leaves.clone();
            }
            None => self.clear_selection(),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
        self.selected_ids.clear();
    }
}
