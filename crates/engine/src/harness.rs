//! Headless harness for programmatic scene manipulation and layout checks.
//!
//! Drives the tree, the display state, and the layout pipeline without any
//! renderer, for integration tests and scripted inspection.

use glam::Vec3;
use shared::{SceneDescription, Transform};

use crate::explode::{ExplodeConfig, ExplosionLayout};
use crate::scene::bounds::Aabb;
use crate::scene::{SceneNode, SceneTree};
use crate::state::DisplayState;

/// Headless harness — manages tree, display state, and the cached layout
#[derive(Default)]
pub struct TestHarness {
    pub tree: SceneTree,
    pub display: DisplayState,
    pub layout: Option<ExplosionLayout>,
    config: ExplodeConfig,
}

impl TestHarness {
    /// Create a new empty harness.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExplodeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // ── Scene loading ─────────────────────────────────────────

    /// Load a scene (replaces current); clears state and cached layout
    pub fn load_scene(&mut self, description: &SceneDescription) {
        self.tree = SceneTree::from_description(description);
        self.display.rebuild(&self.tree);
        self.layout = None;
    }

    /// Load a scene from a JSON string
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        let description: SceneDescription =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.load_scene(&description);
        Ok(())
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(&self.tree.to_description()).unwrap_or_default()
    }

    // ── Scene building ────────────────────────────────────────

    /// Add a group under `parent` (root when `None`) and return its id.
    /// A topology change counts as a reload: the display cache is rebuilt
    /// and any cached layout is dropped.
    pub fn add_group(&mut self, name: &str, parent: Option<&str>) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let parent = self.resolve_parent(parent);
        self.tree.insert(
            parent,
            SceneNode {
                id: id.clone(),
                name: name.to_string(),
                parent: None,
                children: Vec::new(),
                mesh: false,
                transform: Transform::new(),
                bounds: None,
                visible: true,
            },
        );
        self.committed();
        id
    }

    /// Add a cube part under `parent` and return its id.
    pub fn add_part(
        &mut self,
        name: &str,
        parent: Option<&str>,
        position: [f64; 3],
        half_extent: f64,
    ) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let parent = self.resolve_parent(parent);
        let h = half_extent as f32;
        self.tree.insert(
            parent,
            SceneNode {
                id: id.clone(),
                name: name.to_string(),
                parent: None,
                children: Vec::new(),
                mesh: true,
                transform: Transform::at(position),
                bounds: Some(Aabb {
                    min: Vec3::splat(-h),
                    max: Vec3::splat(h),
                }),
                visible: true,
            },
        );
        self.committed();
        id
    }

    fn resolve_parent(&mut self, parent: Option<&str>) -> Option<usize> {
        match parent {
            Some(id) => self.tree.index_of(id),
            None => match self.tree.root() {
                Some(root) => Some(root),
                None => {
                    self.tree.insert(
                        None,
                        SceneNode {
                            id: "root".to_string(),
                            name: "Assembly".to_string(),
                            parent: None,
                            children: Vec::new(),
                            mesh: false,
                            transform: Transform::new(),
                            bounds: None,
                            visible: true,
                        },
                    );
                    self.tree.root()
                }
            },
        }
    }

    fn committed(&mut self) {
        self.display.rebuild(&self.tree);
        self.layout = None;
    }

    // ── Layout ────────────────────────────────────────────────

    /// Run the layout pipeline over the current tree.
    pub fn build_layout(&mut self) {
        self.layout = Some(ExplosionLayout::build(&self.tree, &self.config));
    }

    /// Apply an explosion factor; no-op until a layout was built.
    pub fn explode(&mut self, factor: f32) {
        if let Some(layout) = &self.layout {
            layout.apply(&mut self.tree, factor);
        }
    }

    /// Restore all animated nodes to their captured positions.
    pub fn reset_positions(&mut self) {
        if let Some(layout) = &self.layout {
            layout.reset(&mut self.tree);
        }
    }

    // ── Display state wrappers ────────────────────────────────

    pub fn select(&mut self, id: Option<&str>) {
        self.display.set_selected_by_id(id);
    }

    pub fn toggle_visibility(&mut self, id: &str) {
        self.display.toggle_visibility(&self.tree, id);
    }

    pub fn toggle_isolation(&mut self) {
        self.display.toggle_isolation_mode(&self.tree);
    }

    pub fn isolate(&mut self, id: &str) {
        self.display.toggle_individual_isolation(&self.tree, id);
    }

    pub fn show_all(&mut self) {
        self.display.show_all();
    }

    /// Push the hidden set into the per-node visibility flags, the way a
    /// renderer would before drawing.
    pub fn sync_visibility(&mut self) {
        self.tree.apply_hidden(self.display.hidden());
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    pub fn visible_count(&self) -> usize {
        (0..self.tree.len())
            .filter(|&i| self.display.is_object_visible(&self.tree.node(i).id))
            .count()
    }

    /// Local position of a node by id
    pub fn node_position(&self, id: &str) -> Option<[f64; 3]> {
        self.tree.get(id).map(|node| node.transform.position)
    }

    /// World position of a node by id
    pub fn world_position(&self, id: &str) -> Option<Vec3> {
        self.tree.index_of(id).map(|i| self.tree.world_position(i))
    }
}
