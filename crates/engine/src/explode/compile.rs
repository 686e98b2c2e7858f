//! Parent-local compilation of resolved world targets
//!
//! Converts world-space directions into the frame the per-frame interpolator
//! actually animates: each node's local position relative to its parent.

use glam::{Mat4, Vec3};
use shared::ObjectId;

use crate::geometry::{max_abs_scale_component, world_direction_to_local, SCALE_FLOOR};
use crate::scene::SceneTree;

use super::targets::WorldTarget;

/// Final per-node explosion target, valid for the lifetime of the loaded scene
#[derive(Debug, Clone)]
pub struct ExplosionTarget {
    pub node: usize,
    pub id: ObjectId,
    /// Local position captured at build time; restored on reset
    pub initial_position: Vec3,
    /// Unit travel direction in the parent's local space
    pub direction: Vec3,
    /// Local distance multiplier, >= 0
    pub multiplier: f32,
}

/// Compile world descriptors into parent-local explosion targets.
pub fn compile_targets(tree: &SceneTree, world: &[WorldTarget]) -> Vec<ExplosionTarget> {
    world
        .iter()
        .map(|target| {
            let node = tree.node(target.node);
            let parent_world = match node.parent {
                Some(parent) => tree.world_matrix(parent),
                None => Mat4::IDENTITY,
            };

            let direction = world_direction_to_local(
                &parent_world,
                tree.world_position(target.node),
                target.direction,
            );

            let parent_scale = tree.parent_world_scale(target.node);
            let multiplier = (1.0 / max_abs_scale_component(parent_scale, SCALE_FLOOR))
                * target.crowding_multiplier
                * target.spread_gain;

            ExplosionTarget {
                node: target.node,
                id: target.id.clone(),
                initial_position: Vec3::new(
                    node.transform.position[0] as f32,
                    node.transform.position[1] as f32,
                    node.transform.position[2] as f32,
                ),
                direction,
                multiplier,
            }
        })
        .collect()
}
