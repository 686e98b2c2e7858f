//! Explosion-node selection
//!
//! Picks the sub-trees that travel as rigid units in the exploded view. An
//! adaptive ladder balances "explode meaningful sub-assemblies" against
//! "avoid a single blob exploding as one unit" without hardcoding any
//! model-specific depth.

use crate::scene::SceneTree;

/// Select the explosion nodes for a tree.
///
/// Ladder, each rung applied only when the previous yields too few usable
/// groups: root children with mesh descendants; one-level descent into a
/// lone group; unique immediate leaf parents; the flat leaf list.
pub fn select_explosion_nodes(tree: &SceneTree) -> Vec<usize> {
    let Some(root) = tree.root() else {
        return Vec::new();
    };

    let mut groups: Vec<usize> = tree
        .node(root)
        .children
        .iter()
        .copied()
        .filter(|&child| tree.contains_mesh(child))
        .collect();

    // A lone group would explode as one blob; use its children instead.
    if groups.len() <= 1 {
        if let Some(&only) = groups.first() {
            let inner: Vec<usize> = tree
                .node(only)
                .children
                .iter()
                .copied()
                .filter(|&child| tree.contains_mesh(child))
                .collect();
            if !inner.is_empty() {
                tracing::debug!(
                    "single usable group {:?}, descending to {} children",
                    tree.node(only).id,
                    inner.len()
                );
                groups = inner;
            }
        }
    }

    if groups.len() < 6 {
        let parents = leaf_parents(tree, root);
        if parents.len() > groups.len() {
            tracing::debug!(
                "few groups ({}), switching to {} leaf parents",
                groups.len(),
                parents.len()
            );
            groups = parents;
        }
    }

    if groups.len() < 3 {
        let leaves = tree.mesh_leaves(root);
        if leaves.len() > groups.len() {
            tracing::debug!(
                "still few groups ({}), falling back to {} leaves",
                groups.len(),
                leaves.len()
            );
            groups = leaves;
        }
    }

    if groups.is_empty() {
        groups = tree.mesh_leaves(root);
    }

    groups
}

/// Unique immediate parents of every mesh leaf, in first-seen order
fn leaf_parents(tree: &SceneTree, root: usize) -> Vec<usize> {
    let mut out = Vec::new();
    for leaf in tree.mesh_leaves(root) {
        let Some(parent) = tree.node(leaf).parent else {
            continue;
        };
        if !out.contains(&parent) {
            out.push(parent);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn ids(tree: &SceneTree, indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| tree.node(i).id.clone()).collect()
    }

    #[test]
    fn test_descends_into_lone_group() {
        let tree = SceneTree::from_description(&fixtures::nested_chain_scene());
        let groups = select_explosion_nodes(&tree);
        // One wrapper group under the root; its four parts become the units.
        assert_eq!(groups.len(), 4);
        assert!(ids(&tree, &groups).contains(&"bolt-1".to_string()));
    }

    #[test]
    fn test_few_groups_fall_back_to_leaves() {
        let tree = SceneTree::from_description(&fixtures::assembly_scene());
        let groups = select_explosion_nodes(&tree);
        // Two sub-assemblies with two parts each: the leaf list (4) wins
        // over both the root children (2) and the leaf parents (2).
        assert_eq!(groups.len(), 4);
        let got = ids(&tree, &groups);
        for id in ["gear", "shaft", "plate", "bracket"] {
            assert!(got.contains(&id.to_string()), "missing {id} in {got:?}");
        }
    }

    #[test]
    fn test_single_part_scene() {
        let tree = SceneTree::from_description(&fixtures::single_part_scene());
        let groups = select_explosion_nodes(&tree);
        assert_eq!(ids(&tree, &groups), vec!["solo_part".to_string()]);
    }

    #[test]
    fn test_meshless_scene_yields_nothing() {
        let tree = SceneTree::from_description(&fixtures::meshless_scene());
        assert!(select_explosion_nodes(&tree).is_empty());
    }

    #[test]
    fn test_empty_scene_yields_nothing() {
        let tree = SceneTree::from_description(&fixtures::empty_scene());
        assert!(select_explosion_nodes(&tree).is_empty());
    }
}
