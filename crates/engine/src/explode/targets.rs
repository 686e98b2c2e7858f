//! World-space target construction
//!
//! Assigns every explosion node an outward direction and a crowding
//! multiplier: base direction away from the model center, bent by repulsion
//! from crowded neighbors, then fanned laterally between same-parent
//! siblings so they do not explode along collinear paths.

use std::collections::HashMap;

use glam::Vec3;
use shared::ObjectId;

use crate::geometry::{deterministic_direction, perpendicular, EPSILON};
use crate::scene::SceneTree;

use super::ExplodeConfig;

/// Per-node working state of the layout computation. Mutated in place by
/// crowding, sibling spread, and overlap resolution, then compiled into the
/// final target list and discarded.
#[derive(Debug, Clone)]
pub struct WorldTarget {
    pub node: usize,
    pub id: ObjectId,
    /// World-space center of the node's bounds
    pub center: Vec3,
    /// Half the longest edge of the node's world bounds
    pub radius: f32,
    /// Outward unit direction, world space
    pub direction: Vec3,
    /// Travel multiplier from local crowding, >= 1
    pub crowding_multiplier: f32,
    /// Travel multiplier from overlap resolution, >= 1
    pub spread_gain: f32,
}

/// Build one descriptor per explosion node.
pub fn build_world_targets(
    tree: &SceneTree,
    groups: &[usize],
    model_center: Vec3,
    model_radius: f32,
    config: &ExplodeConfig,
) -> Vec<WorldTarget> {
    let mut targets: Vec<WorldTarget> = groups
        .iter()
        .map(|&node| {
            let bounds = tree.world_bounds(node);
            let (center, radius) = if bounds.is_empty() {
                (tree.world_position(node), 0.0)
            } else {
                (bounds.center(), bounds.half_longest_edge())
            };

            let offset = center - model_center;
            let direction = if offset.length() > EPSILON {
                offset.normalize()
            } else {
                deterministic_direction(&tree.node(node).id)
            };

            WorldTarget {
                node,
                id: tree.node(node).id.clone(),
                center,
                radius,
                direction,
                crowding_multiplier: 1.0,
                spread_gain: 1.0,
            }
        })
        .collect();

    let mut scores = vec![0.0f32; targets.len()];
    apply_crowding(&mut targets, &mut scores, model_radius, config);
    apply_sibling_spread(tree, &mut targets, &mut scores, config);

    for (target, score) in targets.iter_mut().zip(&scores) {
        target.crowding_multiplier = 1.0 + score.min(config.crowding_cap) * config.crowding_gain;
    }

    targets
}

/// Accumulate crowding scores and bend directions away from near neighbors.
fn apply_crowding(
    targets: &mut [WorldTarget],
    scores: &mut [f32],
    model_radius: f32,
    config: &ExplodeConfig,
) {
    let neighbor_radius =
        (model_radius * config.neighbor_radius_factor).max(config.neighbor_radius_min);

    for i in 0..targets.len() {
        let mut repulsion = Vec3::ZERO;
        for j in 0..targets.len() {
            if i == j {
                continue;
            }
            let between = targets[i].center - targets[j].center;
            let distance = between.length();
            if distance >= neighbor_radius {
                continue;
            }

            let weight = (1.0 - distance / neighbor_radius).powi(2);
            scores[i] += weight;

            let away = if distance > EPSILON {
                between / distance
            } else {
                deterministic_direction(&format!("{}/{}", targets[i].id, targets[j].id))
            };
            repulsion += away * weight;
        }

        if repulsion.length() > 1e-4 {
            targets[i].direction = (targets[i].direction
                + repulsion.normalize() * config.repulsion_blend)
                .normalize();
        }
    }
}

/// Fan same-parent siblings across [-1, 1] perpendicular offsets.
fn apply_sibling_spread(
    tree: &SceneTree,
    targets: &mut [WorldTarget],
    scores: &mut [f32],
    config: &ExplodeConfig,
) {
    let mut by_parent: HashMap<Option<usize>, Vec<usize>> = HashMap::new();
    for (index, target) in targets.iter().enumerate() {
        by_parent
            .entry(tree.node(target.node).parent)
            .or_default()
            .push(index);
    }

    for siblings in by_parent.values_mut() {
        if siblings.len() < 2 {
            continue;
        }
        // Stable fan order regardless of arena layout.
        siblings.sort_by(|&a, &b| {
            let na = tree.node(targets[a].node);
            let nb = tree.node(targets[b].node);
            (&na.name, &na.id).cmp(&(&nb.name, &nb.id))
        });

        let count = siblings.len();
        for (slot, &index) in siblings.iter().enumerate() {
            let offset = -1.0 + 2.0 * slot as f32 / (count - 1) as f32;
            if offset.abs() > EPSILON {
                let side = perpendicular(targets[index].direction, &targets[index].id);
                targets[index].direction = (targets[index].direction
                    + side * offset * config.sibling_nudge)
                    .normalize();
            }
            scores[index] += offset.abs() * config.sibling_crowding;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explode::select_explosion_nodes;
    use crate::fixtures;
    use crate::scene::SceneTree;

    fn build(description: &shared::SceneDescription) -> (SceneTree, Vec<WorldTarget>) {
        let tree = SceneTree::from_description(description);
        let config = ExplodeConfig::default();
        let root = tree.root().unwrap();
        let bounds = tree.world_bounds(root);
        let groups = select_explosion_nodes(&tree);
        let targets = build_world_targets(
            &tree,
            &groups,
            bounds.center(),
            bounds.half_longest_edge(),
            &config,
        );
        (tree, targets)
    }

    #[test]
    fn test_directions_are_unit() {
        let (_, targets) = build(&fixtures::assembly_scene());
        for target in &targets {
            assert!((target.direction.length() - 1.0).abs() < 1e-5, "{}", target.id);
        }
    }

    #[test]
    fn test_centered_node_gets_seeded_direction() {
        let (_, targets) = build(&fixtures::single_part_scene());
        assert_eq!(targets.len(), 1);
        let target = &targets[0];
        assert!((target.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(target.direction, deterministic_direction("solo_part"));
    }

    #[test]
    fn test_distant_parts_point_outward() {
        let (_, targets) = build(&fixtures::assembly_scene());
        // gear sits at +x of the model; its direction keeps a +x component
        let gear = targets.iter().find(|t| t.id == "gear").unwrap();
        assert!(gear.direction.x > 0.0);
        let plate = targets.iter().find(|t| t.id == "plate").unwrap();
        assert!(plate.direction.x < 0.0);
    }

    #[test]
    fn test_coincident_pair_diverges() {
        let (_, targets) = build(&fixtures::coincident_pair_scene());
        assert_eq!(targets.len(), 2);
        let dot = targets[0].direction.dot(targets[1].direction);
        assert!(dot < 0.999, "coincident parts kept parallel directions");
        // Coincident centers crowd each other.
        assert!(targets[0].crowding_multiplier > 1.0);
        assert!(targets[1].crowding_multiplier > 1.0);
    }

    #[test]
    fn test_crowding_multiplier_bounded() {
        let (_, targets) = build(&fixtures::coincident_pair_scene());
        let config = ExplodeConfig::default();
        let cap = 1.0 + config.crowding_cap * config.crowding_gain;
        for target in &targets {
            assert!(target.crowding_multiplier >= 1.0);
            assert!(target.crowding_multiplier <= cap + 1e-5);
        }
    }

    #[test]
    fn test_spread_gain_starts_at_one() {
        let (_, targets) = build(&fixtures::assembly_scene());
        for target in &targets {
            assert_eq!(target.spread_gain, 1.0);
        }
    }
}
