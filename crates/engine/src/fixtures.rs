//! Factory functions for creating test scenes.
//!
//! Provides convenient helpers to construct `NodeDescription` trees and the
//! canonical assemblies used across unit and integration tests.

use shared::{BoundingBox, NodeDescription, SceneDescription, Transform};

// ── Node factories ──────────────────────────────────────────────

/// Mesh leaf: a cube of the given half-extent at a local position.
pub fn part(id: &str, name: &str, position: [f64; 3], half_extent: f64) -> NodeDescription {
    NodeDescription {
        id: id.to_string(),
        name: name.to_string(),
        transform: Transform::at(position),
        bounds: Some(BoundingBox::cube(half_extent)),
        mesh: true,
        children: vec![],
    }
}

/// Group node at the local origin.
pub fn group(id: &str, name: &str, children: Vec<NodeDescription>) -> NodeDescription {
    group_at(id, name, [0.0, 0.0, 0.0], children)
}

/// Group node at a local position.
pub fn group_at(
    id: &str,
    name: &str,
    position: [f64; 3],
    children: Vec<NodeDescription>,
) -> NodeDescription {
    NodeDescription {
        id: id.to_string(),
        name: name.to_string(),
        transform: Transform::at(position),
        bounds: None,
        mesh: false,
        children,
    }
}

/// Wrap a root node into a scene description.
pub fn scene(root: NodeDescription) -> SceneDescription {
    SceneDescription::new(root)
}

// ── Canonical scenes ────────────────────────────────────────────

/// Two sub-assemblies of two parts each, spread around the origin.
pub fn assembly_scene() -> SceneDescription {
    scene(group(
        "chassis",
        "Chassis",
        vec![
            group_at(
                "drive",
                "Drive",
                [2.0, 0.0, 0.0],
                vec![
                    part("gear", "Gear", [0.5, 0.0, 0.0], 0.4),
                    part("shaft", "Shaft", [-0.5, 0.0, 0.0], 0.4),
                ],
            ),
            group_at(
                "frame",
                "Frame",
                [-2.0, 0.0, 0.0],
                vec![
                    part("plate", "Plate", [0.0, 0.5, 0.0], 0.4),
                    part("bracket", "Bracket", [0.0, -0.5, 0.0], 0.4),
                ],
            ),
        ],
    ))
}

/// A single wrapper group between the root and four parts
/// (exercises the one-level descent of the group ladder).
pub fn nested_chain_scene() -> SceneDescription {
    scene(group(
        "product",
        "Product",
        vec![group(
            "assembly",
            "Assembly",
            vec![
                part("bolt-1", "Bolt", [1.0, 0.0, 0.0], 0.2),
                part("bolt-2", "Bolt", [-1.0, 0.0, 0.0], 0.2),
                part("washer-1", "Washer", [0.0, 1.0, 0.0], 0.2),
                part("washer-2", "Washer", [0.0, -1.0, 0.0], 0.2),
            ],
        )],
    ))
}

/// Two sibling groups, each holding one part sitting exactly at the model
/// center. Both base directions degenerate to seeded fallbacks.
pub fn coincident_pair_scene() -> SceneDescription {
    scene(group(
        "pair_root",
        "Pair",
        vec![
            group(
                "pair_a",
                "Group A",
                vec![part("pair_a_part", "Part A", [0.0, 0.0, 0.0], 1.0)],
            ),
            group(
                "pair_b",
                "Group B",
                vec![part("pair_b_part", "Part B", [0.0, 0.0, 0.0], 1.0)],
            ),
        ],
    ))
}

/// Root holding a single part.
pub fn single_part_scene() -> SceneDescription {
    scene(group(
        "solo_root",
        "Solo",
        vec![part("solo_part", "Part", [0.0, 0.0, 0.0], 0.5)],
    ))
}

/// Groups all the way down, no renderable leaves anywhere.
pub fn meshless_scene() -> SceneDescription {
    scene(group(
        "hull",
        "Hull",
        vec![group("void", "Void", vec![])],
    ))
}

/// Scene with no root at all.
pub fn empty_scene() -> SceneDescription {
    SceneDescription::empty()
}
