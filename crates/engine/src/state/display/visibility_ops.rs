//! Visibility and isolation operations
//!
//! Every transition builds the next hidden set in full and swaps it in, so
//! no caller ever observes a partially applied state. Isolation transitions
//! recompute the set from scratch rather than patching it; transitions are
//! user-paced, not per-frame.

use std::collections::HashSet;

use shared::ObjectId;

use crate::scene::SceneTree;

use super::{DisplayState, IsolationMode};

impl DisplayState {
    /// Hide or show `id` together with its whole subtree. Unknown ids are a
    /// no-op.
    pub fn toggle_visibility(&mut self, tree: &SceneTree, id: &str) {
        let Some(index) = tree.index_of(id) else {
            return;
        };

        let mut next = self.hidden.clone();
        let hiding = !self.hidden.contains(id);
        let mut affected = vec![index];
        affected.extend(tree.descendants(index));
        for &node in &affected {
            let node_id = &tree.node(node).id;
            if hiding {
                next.insert(node_id.clone());
            } else {
                next.remove(node_id);
            }
        }
        self.hidden = next;
    }

    /// Toggle selection-keyed isolation. Active isolation of either kind is
    /// exited; otherwise the current selection becomes the focus. With no
    /// selection this is a no-op, leaving any manual hides untouched.
    pub fn toggle_isolation_mode(&mut self, tree: &SceneTree) {
        if self.isolation != IsolationMode::None {
            self.hidden = HashSet::new();
            self.isolation = IsolationMode::None;
            return;
        }

        let Some(selected) = self.selected_id.clone() else {
            return;
        };
        let Some(index) = tree.index_of(&selected) else {
            return;
        };

        self.hidden = hidden_outside_focus(tree, index);
        self.isolation = IsolationMode::Global;
    }

    /// Toggle isolation keyed by an explicit id. The same id again exits;
    /// a different id (or active global isolation) is replaced.
    pub fn toggle_individual_isolation(&mut self, tree: &SceneTree, id: &str) {
        if self.is_individually_isolated(id) {
            self.hidden = HashSet::new();
            self.isolation = IsolationMode::None;
            return;
        }

        let Some(index) = tree.index_of(id) else {
            return;
        };

        self.hidden = hidden_outside_focus(tree, index);
        self.isolation = IsolationMode::Individual(id.to_string());
    }

    /// Clear the hidden set and both isolation flags unconditionally.
    pub fn show_all(&mut self) {
        self.hidden = HashSet::new();
        self.isolation = IsolationMode::None;
    }
}

/// Hidden set isolating `index`: everything except the focus subtree and the
/// ancestor chain that keeps it reachable.
fn hidden_outside_focus(tree: &SceneTree, index: usize) -> HashSet<ObjectId> {
    let mut keep: HashSet<usize> = HashSet::new();
    keep.insert(index);
    keep.extend(tree.descendants(index));
    keep.extend(tree.ancestors(index));

    let mut hidden = HashSet::new();
    for node in 0..tree.len() {
        if !keep.contains(&node) {
            hidden.insert(tree.node(node).id.clone());
        }
    }
    hidden
}
