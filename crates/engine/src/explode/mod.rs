//! Exploded-view layout
//!
//! One-shot batch computation per scene load: pick explosion nodes, assign
//! outward directions with crowding and sibling spread, resolve trajectory
//! overlaps, and compile parent-local targets. After that, a single scalar
//! explosion factor drives every frame; nothing here recomputes per frame.

mod compile;
mod groups;
mod resolve;
mod targets;

pub use compile::ExplosionTarget;
pub use groups::select_explosion_nodes;

use serde::{Deserialize, Serialize};

use crate::scene::SceneTree;

/// Tuning parameters of the layout pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplodeConfig {
    /// Crowding neighbor radius as a fraction of the model radius
    pub neighbor_radius_factor: f32,
    /// Lower bound of the neighbor radius in world units
    pub neighbor_radius_min: f32,
    /// Blend weight of accumulated repulsion into the base direction
    pub repulsion_blend: f32,
    /// Perpendicular nudge per unit of sibling fan offset
    pub sibling_nudge: f32,
    /// Crowding score added per unit of absolute sibling offset
    pub sibling_crowding: f32,
    /// Cap on the accumulated crowding score
    pub crowding_cap: f32,
    /// Travel multiplier gained per unit of capped crowding score
    pub crowding_gain: f32,
    /// Maximum travel distance as a fraction of the model radius
    pub travel_factor: f32,
    /// Overlap resolver iteration budget (no convergence check)
    pub resolver_iterations: u32,
    /// Fraction of summed radii kept clear between trajectories
    pub gap_factor: f32,
    /// Minimum trajectory gap as a fraction of the model radius
    pub gap_radius_factor: f32,
    /// Absolute minimum trajectory gap in world units
    pub gap_min: f32,
    /// Direction push per unit of overlap ratio
    pub separation_push: f32,
    /// Spread gain growth per unit of overlap ratio
    pub spread_growth: f32,
}

impl Default for ExplodeConfig {
    fn default() -> Self {
        Self {
            neighbor_radius_factor: 0.36,
            neighbor_radius_min: 0.02,
            repulsion_blend: 1.2,
            sibling_nudge: 0.62,
            sibling_crowding: 0.95,
            crowding_cap: 3.5,
            crowding_gain: 0.5,
            travel_factor: 1.25,
            resolver_iterations: 3,
            gap_factor: 0.72,
            gap_radius_factor: 0.04,
            gap_min: 0.45,
            separation_push: 0.36,
            spread_growth: 0.24,
        }
    }
}

/// Clamp an arbitrary explosion factor into [0, 1]; non-finite input is 0
pub fn sanitize_factor(raw: f32) -> f32 {
    if raw.is_finite() {
        raw.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Compiled layout: one target per explosion node plus the shared maximum
/// world travel distance. Rebuilt once per scene load; read every frame.
pub struct ExplosionLayout {
    pub targets: Vec<ExplosionTarget>,
    pub max_distance: f32,
}

impl ExplosionLayout {
    /// Run the full pipeline over a loaded tree.
    pub fn build(tree: &SceneTree, config: &ExplodeConfig) -> Self {
        let Some(root) = tree.root() else {
            return Self {
                targets: Vec::new(),
                max_distance: 0.0,
            };
        };

        let model_bounds = tree.world_bounds(root);
        let (model_center, model_radius) = if model_bounds.is_empty() {
            (tree.world_position(root), 0.0)
        } else {
            (model_bounds.center(), model_bounds.half_longest_edge())
        };
        let max_distance = model_radius * config.travel_factor;

        let groups = select_explosion_nodes(tree);
        let mut world =
            targets::build_world_targets(tree, &groups, model_center, model_radius, config);
        resolve::resolve_overlaps(&mut world, max_distance, model_radius, config);
        let targets = compile::compile_targets(tree, &world);

        tracing::info!(
            "explosion layout: {} nodes in {} groups, max travel {:.3}",
            tree.len(),
            targets.len(),
            max_distance
        );

        Self {
            targets,
            max_distance,
        }
    }

    /// Local position of one target at the given factor; pure, no tree access.
    pub fn local_position(&self, target: &ExplosionTarget, factor: f32) -> glam::Vec3 {
        let factor = sanitize_factor(factor);
        target.initial_position
            + target.direction * (self.max_distance * factor * target.multiplier)
    }

    /// Write the positions for `factor` into the tree (the per-frame pass).
    pub fn apply(&self, tree: &mut SceneTree, factor: f32) {
        for target in &self.targets {
            let position = self.local_position(target, factor);
            tree.node_mut(target.node).transform.position = [
                position.x as f64,
                position.y as f64,
                position.z as f64,
            ];
        }
    }

    /// Restore every animated node to its captured initial position.
    pub fn reset(&self, tree: &mut SceneTree) {
        for target in &self.targets {
            let initial = target.initial_position;
            tree.node_mut(target.node).transform.position =
                [initial.x as f64, initial.y as f64, initial.z as f64];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_sanitize_factor() {
        assert_eq!(sanitize_factor(f32::NAN), 0.0);
        assert_eq!(sanitize_factor(f32::INFINITY), 0.0);
        assert_eq!(sanitize_factor(f32::NEG_INFINITY), 0.0);
        assert_eq!(sanitize_factor(1.5), 1.0);
        assert_eq!(sanitize_factor(-0.2), 0.0);
        assert_eq!(sanitize_factor(0.4), 0.4);
    }

    #[test]
    fn test_empty_tree_builds_empty_layout() {
        let tree = SceneTree::from_description(&fixtures::empty_scene());
        let layout = ExplosionLayout::build(&tree, &ExplodeConfig::default());
        assert!(layout.targets.is_empty());
        assert_eq!(layout.max_distance, 0.0);
    }

    #[test]
    fn test_apply_at_zero_keeps_initial_positions() {
        let mut tree = SceneTree::from_description(&fixtures::assembly_scene());
        let layout = ExplosionLayout::build(&tree, &ExplodeConfig::default());
        let before: Vec<[f64; 3]> = layout
            .targets
            .iter()
            .map(|t| tree.node(t.node).transform.position)
            .collect();

        layout.apply(&mut tree, 0.0);

        for (target, original) in layout.targets.iter().zip(&before) {
            let after = tree.node(target.node).transform.position;
            for axis in 0..3 {
                assert!((after[axis] - original[axis]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_reset_restores_after_apply() {
        let mut tree = SceneTree::from_description(&fixtures::assembly_scene());
        let layout = ExplosionLayout::build(&tree, &ExplodeConfig::default());
        let gear = tree.index_of("gear").unwrap();
        let original = tree.node(gear).transform.position;

        layout.apply(&mut tree, 1.0);
        assert_ne!(tree.node(gear).transform.position, original);

        layout.reset(&mut tree);
        let restored = tree.node(gear).transform.position;
        for axis in 0..3 {
            assert!((restored[axis] - original[axis]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_non_finite_factor_means_no_travel() {
        let mut tree = SceneTree::from_description(&fixtures::assembly_scene());
        let layout = ExplosionLayout::build(&tree, &ExplodeConfig::default());
        let gear = tree.index_of("gear").unwrap();
        let original = tree.node(gear).transform.position;

        layout.apply(&mut tree, f32::NAN);
        assert_eq!(tree.node(gear).transform.position, original);
    }

    #[test]
    fn test_compiled_invariants() {
        let tree = SceneTree::from_description(&fixtures::assembly_scene());
        let layout = ExplosionLayout::build(&tree, &ExplodeConfig::default());
        assert!(!layout.targets.is_empty());
        for target in &layout.targets {
            assert!(target.multiplier >= 0.0, "{}", target.id);
            assert!(
                (target.direction.length() - 1.0).abs() < 1e-5,
                "{} direction not unit",
                target.id
            );
        }
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = ExplodeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ExplodeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.resolver_iterations, config.resolver_iterations);
        assert_eq!(parsed.gap_min, config.gap_min);
    }
}
