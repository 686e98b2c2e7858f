//! Integration tests for the exploded-view layout pipeline.
//!
//! Drives the full pipeline through the headless harness and checks the
//! geometric contracts the frame driver relies on.

use partscope_lib::explode::{sanitize_factor, ExplodeConfig, ExplosionLayout};
use partscope_lib::fixtures;
use partscope_lib::harness::TestHarness;
use partscope_lib::scene::SceneTree;

#[test]
fn test_assembly_layout_invariants() {
    let mut h = TestHarness::new();
    h.load_scene(&fixtures::assembly_scene());
    h.build_layout();

    let layout = h.layout.as_ref().unwrap();
    assert_eq!(layout.targets.len(), 4);
    assert!(layout.max_distance > 0.0);
    for target in &layout.targets {
        assert!(target.multiplier >= 0.0, "{}", target.id);
        assert!(
            (target.direction.length() - 1.0).abs() < 1e-5,
            "{} direction not unit length",
            target.id
        );
    }
}

#[test]
fn test_coincident_pair_separates_at_full_explosion() {
    // Two sibling groups, one part each, both exactly at the model center:
    // base directions degenerate and must come from seeded fallbacks.
    let mut h = TestHarness::new();
    h.load_scene(&fixtures::coincident_pair_scene());
    h.build_layout();

    let layout = h.layout.as_ref().unwrap();
    assert_eq!(layout.targets.len(), 2);
    let a = &layout.targets[0];
    let b = &layout.targets[1];
    assert!(a.direction.length() > 0.0 && b.direction.length() > 0.0);
    assert!(
        a.direction.dot(b.direction) < 0.999,
        "fallback directions stayed parallel"
    );

    h.explode(1.0);
    let pa = h.world_position("pair_a_part").unwrap();
    let pb = h.world_position("pair_b_part").unwrap();

    // Model radius is 1.0, so the configured minimum gap floor applies.
    let config = ExplodeConfig::default();
    let min_gap = (1.0 * config.gap_radius_factor).max(config.gap_min);
    assert!(
        (pa - pb).length() >= min_gap,
        "parts still overlap at full explosion: {} < {}",
        (pa - pb).length(),
        min_gap
    );
}

#[test]
fn test_explode_and_reset_round_trip() {
    let mut h = TestHarness::new();
    h.load_scene(&fixtures::assembly_scene());
    h.build_layout();

    let before = h.node_position("gear").unwrap();
    h.explode(1.0);
    assert_ne!(h.node_position("gear").unwrap(), before);

    h.reset_positions();
    let after = h.node_position("gear").unwrap();
    for axis in 0..3 {
        assert!((after[axis] - before[axis]).abs() < 1e-6);
    }
}

#[test]
fn test_factor_zero_and_non_finite_do_not_move_parts() {
    let mut h = TestHarness::new();
    h.load_scene(&fixtures::assembly_scene());
    h.build_layout();
    let before = h.node_position("plate").unwrap();

    h.explode(0.0);
    assert_eq!(h.node_position("plate").unwrap(), before);

    h.explode(f32::NAN);
    assert_eq!(h.node_position("plate").unwrap(), before);
}

#[test]
fn test_overshooting_factor_clamps_to_one() {
    let mut h = TestHarness::new();
    h.load_scene(&fixtures::assembly_scene());
    h.build_layout();

    h.explode(1.0);
    let at_one = h.node_position("gear").unwrap();
    h.reset_positions();
    h.explode(1.5);
    assert_eq!(h.node_position("gear").unwrap(), at_one);

    assert_eq!(sanitize_factor(1.5), 1.0);
    assert_eq!(sanitize_factor(f32::NAN), 0.0);
}

#[test]
fn test_larger_travel_with_more_resolver_iterations_is_stable() {
    // The iteration budget is configurable; a larger budget may only grow
    // spread gains, never break direction normalization.
    let config = ExplodeConfig {
        resolver_iterations: 8,
        ..ExplodeConfig::default()
    };
    let tree = SceneTree::from_description(&fixtures::coincident_pair_scene());
    let layout = ExplosionLayout::build(&tree, &config);
    for target in &layout.targets {
        assert!((target.direction.length() - 1.0).abs() < 1e-5);
        assert!(target.multiplier >= 0.0);
        assert!(target.direction.is_finite());
    }
}

#[test]
fn test_single_part_scene_still_explodes_deterministically() {
    let mut h1 = TestHarness::new();
    h1.load_scene(&fixtures::single_part_scene());
    h1.build_layout();
    let mut h2 = TestHarness::new();
    h2.load_scene(&fixtures::single_part_scene());
    h2.build_layout();

    h1.explode(1.0);
    h2.explode(1.0);
    assert_eq!(
        h1.node_position("solo_part").unwrap(),
        h2.node_position("solo_part").unwrap(),
        "layout must be reproducible across runs"
    );
}

#[test]
fn test_meshless_scene_produces_no_targets() {
    let mut h = TestHarness::new();
    h.load_scene(&fixtures::meshless_scene());
    h.build_layout();
    assert!(h.layout.as_ref().unwrap().targets.is_empty());
    // Applying a factor over an empty layout is harmless.
    h.explode(1.0);
}
