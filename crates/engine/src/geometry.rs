//! Deterministic direction helpers for the exploded-view layout.
//!
//! Every function here is pure and tolerates zero or near-zero input without
//! producing NaN or infinite components. Degenerate cases resolve to seeded
//! fallback directions so repeated runs produce identical layouts.

use glam::{Mat4, Vec3};

/// Below this length a vector is treated as zero
pub const EPSILON: f32 = 1e-6;

/// Floor applied to scale components before division
pub const SCALE_FLOOR: f32 = 1e-5;

/// FNV-1a over the seed bytes. Hand-rolled so the hash (and every direction
/// derived from it) is identical across platforms and Rust versions.
fn fnv1a(seed: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in seed.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Next value in [-1, 1] from a splitmix64 step over `state`
fn mix_unit(state: &mut u64) -> f32 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    ((z >> 40) as f32 / (1u64 << 23) as f32) - 1.0
}

/// Repeatable pseudo-random unit direction derived from `seed`.
///
/// Used wherever a canonical direction would be zero-length: an object
/// sitting exactly at the model center, or two objects coinciding.
pub fn deterministic_direction(seed: &str) -> Vec3 {
    let mut state = fnv1a(seed);
    let candidate = Vec3::new(
        mix_unit(&mut state),
        mix_unit(&mut state),
        mix_unit(&mut state),
    );
    if candidate.length() > EPSILON {
        candidate.normalize()
    } else {
        Vec3::X
    }
}

/// Unit vector orthogonal to `direction`, chosen repeatably from `seed`.
///
/// Gram-Schmidt projection of a seeded direction, falling back to cross
/// products against the world Y then X axes, then to the X axis itself, so
/// the result is non-degenerate even for parallel inputs.
pub fn perpendicular(direction: Vec3, seed: &str) -> Vec3 {
    let candidate = deterministic_direction(seed);
    let projected = candidate - direction * direction.dot(candidate);
    if projected.length() > EPSILON {
        return projected.normalize();
    }

    let cross_y = direction.cross(Vec3::Y);
    if cross_y.length() > EPSILON {
        return cross_y.normalize();
    }

    let cross_x = direction.cross(Vec3::X);
    if cross_x.length() > EPSILON {
        return cross_x.normalize();
    }

    Vec3::X
}

/// Project a world-space direction into a parent's local frame.
///
/// Transforms `world_origin` and `world_origin + world_direction` by the
/// inverse parent matrix and differences the results. Falls back to the
/// untransformed world direction when the parent matrix is singular or the
/// difference degenerates under non-uniform scale.
pub fn world_direction_to_local(
    parent_world: &Mat4,
    world_origin: Vec3,
    world_direction: Vec3,
) -> Vec3 {
    let inverse = parent_world.inverse();
    let origin = inverse.transform_point3(world_origin);
    let tip = inverse.transform_point3(world_origin + world_direction);
    let local = tip - origin;

    if local.is_finite() && local.length() > EPSILON {
        return local.normalize();
    }

    if world_direction.length() > EPSILON {
        world_direction.normalize()
    } else {
        Vec3::X
    }
}

/// Largest-magnitude axis of `scale`, floored to avoid division blow-up
pub fn max_abs_scale_component(scale: Vec3, floor: f32) -> f32 {
    scale.abs().max_element().max(floor)
}
