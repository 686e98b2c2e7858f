//! Trajectory overlap resolution
//!
//! Iteratively perturbs directions and spread gains until exploded nodes no
//! longer collide along their travel paths. The iteration count is a fixed
//! budget, not a convergence guarantee; residual overlap may remain for
//! extreme inputs.

use glam::Vec3;

use crate::geometry::{deterministic_direction, EPSILON};

use super::targets::WorldTarget;
use super::ExplodeConfig;

/// Progress checkpoints along each node's own travel distance
const CHECKPOINTS: [f32; 3] = [0.35, 0.65, 1.0];

/// Resolve pairwise trajectory collisions in place.
pub fn resolve_overlaps(
    targets: &mut [WorldTarget],
    max_distance: f32,
    model_radius: f32,
    config: &ExplodeConfig,
) {
    let floor_gap = (model_radius * config.gap_radius_factor).max(config.gap_min);

    for _ in 0..config.resolver_iterations {
        for i in 0..targets.len() {
            for j in (i + 1)..targets.len() {
                resolve_pair(targets, i, j, max_distance, floor_gap, config);
            }
        }
    }
}

fn resolve_pair(
    targets: &mut [WorldTarget],
    i: usize,
    j: usize,
    max_distance: f32,
    floor_gap: f32,
    config: &ExplodeConfig,
) {
    let travel_i =
        max_distance * targets[i].crowding_multiplier * targets[i].spread_gain;
    let travel_j =
        max_distance * targets[j].crowding_multiplier * targets[j].spread_gain;

    // Closest approach of the projected centers over the checkpoints.
    let mut min_distance = f32::MAX;
    let mut axis = Vec3::ZERO;
    for &progress in &CHECKPOINTS {
        let at_i = targets[i].center + targets[i].direction * (travel_i * progress);
        let at_j = targets[j].center + targets[j].direction * (travel_j * progress);
        let between = at_i - at_j;
        let distance = between.length();
        if distance < min_distance {
            min_distance = distance;
            axis = between;
        }
    }

    let gap = ((targets[i].radius + targets[j].radius) * config.gap_factor).max(floor_gap);
    if min_distance >= gap {
        return;
    }

    let overlap_ratio = (gap - min_distance) / gap;
    let axis = if min_distance > EPSILON {
        axis / min_distance
    } else {
        deterministic_direction(&format!("{}|{}", targets[i].id, targets[j].id))
    };

    let push = axis * (config.separation_push * overlap_ratio);
    targets[i].direction = (targets[i].direction + push).normalize();
    targets[j].direction = (targets[j].direction - push).normalize();

    let growth = 1.0 + overlap_ratio * config.spread_growth;
    targets[i].spread_gain *= growth;
    targets[j].spread_gain *= growth;
}
