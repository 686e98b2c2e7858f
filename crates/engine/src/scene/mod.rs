//! Arena scene tree
//!
//! Nodes live in a flat arena indexed by `usize`, each holding a parent index
//! and ordered child indices, so parent lookup is O(1) and there are no
//! ownership cycles. Topology is fixed once a scene is loaded; only the
//! visibility flag and the local position mutate afterwards.

pub mod bounds;

use std::collections::{HashMap, HashSet};

use glam::{EulerRot, Mat4, Quat, Vec3};
use shared::{NodeDescription, ObjectId, SceneDescription, Transform};

use bounds::Aabb;

/// One node of the loaded scene
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: ObjectId,
    pub name: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Renderable mesh leaf marker
    pub mesh: bool,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Local-space extents, present on mesh leaves
    pub bounds: Option<Aabb>,
    pub visible: bool,
}

/// Local matrix of a transform (scale, then XYZ Euler rotation, then translation)
pub fn transform_matrix(t: &Transform) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::new(t.scale[0] as f32, t.scale[1] as f32, t.scale[2] as f32),
        Quat::from_euler(
            EulerRot::XYZ,
            t.rotation[0] as f32,
            t.rotation[1] as f32,
            t.rotation[2] as f32,
        ),
        Vec3::new(
            t.position[0] as f32,
            t.position[1] as f32,
            t.position[2] as f32,
        ),
    )
}

/// Flat arena of scene nodes with an id index
#[derive(Default)]
pub struct SceneTree {
    nodes: Vec<SceneNode>,
    index: HashMap<ObjectId, usize>,
    root: Option<usize>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the arena from a nested scene description
    pub fn from_description(description: &SceneDescription) -> Self {
        let mut tree = Self::new();
        if let Some(root) = &description.root {
            tree.insert_description(root, None);
        }
        tree
    }

    fn insert_description(&mut self, description: &NodeDescription, parent: Option<usize>) {
        let node = SceneNode {
            id: description.id.clone(),
            name: description.name.clone(),
            parent: None,
            children: Vec::new(),
            mesh: description.mesh,
            transform: description.transform.clone(),
            bounds: description.bounds.as_ref().map(Aabb::from_shared),
            visible: true,
        };
        let index = self.insert(parent, node);
        for child in &description.children {
            self.insert_description(child, Some(index));
        }
    }

    /// Insert a node under `parent`. With no parent the node becomes the root
    /// of an empty tree, or a child of the existing root, so every node but
    /// the root always has exactly one parent. Returns the new node's index.
    pub fn insert(&mut self, parent: Option<usize>, mut node: SceneNode) -> usize {
        let index = self.nodes.len();
        let attach_to = parent.or(self.root);
        node.parent = attach_to;
        node.children.clear();

        if self.index.contains_key(&node.id) {
            tracing::warn!("duplicate node id {:?}, keeping first occurrence", node.id);
        } else {
            self.index.insert(node.id.clone(), index);
        }

        self.nodes.push(node);
        match attach_to {
            Some(p) => self.nodes[p].children.push(index),
            None => self.root = Some(index),
        }
        index
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    pub fn node(&self, index: usize) -> &SceneNode {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: usize) -> &mut SceneNode {
        &mut self.nodes[index]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Node by id
    pub fn get(&self, id: &str) -> Option<&SceneNode> {
        self.index_of(id).map(|i| self.node(i))
    }

    /// Nodes for the given ids; unresolved ids are filtered silently
    pub fn get_many<'a, I>(&self, ids: I) -> Vec<&SceneNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter().filter_map(|id| self.get(id)).collect()
    }

    /// World matrix of a node (parent chain composed root-down)
    pub fn world_matrix(&self, index: usize) -> Mat4 {
        let local = transform_matrix(&self.nodes[index].transform);
        match self.nodes[index].parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    /// World-space origin of a node
    pub fn world_position(&self, index: usize) -> Vec3 {
        self.world_matrix(index).w_axis.truncate()
    }

    /// World-space scale of a node's parent frame
    pub fn parent_world_scale(&self, index: usize) -> Vec3 {
        match self.nodes[index].parent {
            Some(parent) => self.world_matrix(parent).to_scale_rotation_translation().0,
            None => Vec3::ONE,
        }
    }

    /// World bounds of a node's subtree: the transformed local box for mesh
    /// leaves, the union of descendant leaf boxes for groups. A leaf with no
    /// recorded extents degenerates to a point at its world origin.
    pub fn world_bounds(&self, index: usize) -> Aabb {
        let node = &self.nodes[index];
        if node.mesh {
            return match &node.bounds {
                Some(local) => local.transformed(&self.world_matrix(index)),
                None => Aabb::point(self.world_position(index)),
            };
        }

        let mut out = Aabb::empty();
        for &child in &node.children {
            out = out.union(&self.world_bounds(child));
        }
        out
    }

    /// All descendants of a node in depth-first order, excluding the node
    pub fn descendants(&self, index: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.nodes[index].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current].children.iter().rev().copied());
        }
        out
    }

    /// Ancestor chain from the node's parent up to the root
    pub fn ancestors(&self, index: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut current = self.nodes[index].parent;
        while let Some(parent) = current {
            out.push(parent);
            current = self.nodes[parent].parent;
        }
        out
    }

    /// Mesh leaves of a subtree in depth-first order; a mesh node maps to itself
    pub fn mesh_leaves(&self, index: usize) -> Vec<usize> {
        if self.nodes[index].mesh {
            return vec![index];
        }
        let mut out = Vec::new();
        for &child in &self.nodes[index].children {
            out.extend(self.mesh_leaves(child));
        }
        out
    }

    /// Whether the subtree contains at least one mesh leaf
    pub fn contains_mesh(&self, index: usize) -> bool {
        self.nodes[index].mesh || self.nodes[index].children.iter().any(|&c| self.contains_mesh(c))
    }

    /// Sync per-node visibility flags from a hidden set (renderer boundary)
    pub fn apply_hidden(&mut self, hidden: &HashSet<ObjectId>) {
        for node in &mut self.nodes {
            node.visible = !hidden.contains(&node.id);
        }
    }

    /// Rebuild a nested description from the arena (inverse of `from_description`)
    pub fn to_description(&self) -> SceneDescription {
        match self.root {
            Some(root) => SceneDescription::new(self.describe(root)),
            None => SceneDescription::empty(),
        }
    }

    fn describe(&self, index: usize) -> NodeDescription {
        let node = &self.nodes[index];
        NodeDescription {
            id: node.id.clone(),
            name: node.name.clone(),
            transform: node.transform.clone(),
            bounds: node.bounds.map(|b| shared::BoundingBox {
                min: [b.min.x as f64, b.min.y as f64, b.min.z as f64],
                max: [b.max.x as f64, b.max.y as f64, b.max.z as f64],
            }),
            mesh: node.mesh,
            children: node
                .children
                .iter()
                .map(|&child| self.describe(child))
                .collect(),
        }
    }
}
