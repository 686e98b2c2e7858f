use serde::{Deserialize, Serialize};

/// Unique identifier of an object in the scene
pub type ObjectId = String;

/// Object transform relative to its parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    /// XYZ Euler angles in radians
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    /// Identity transform translated to `position`
    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Local-space extents of a mesh leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Box centered at the origin with the given half-extent on every axis
    pub fn cube(half_extent: f64) -> Self {
        Self {
            min: [-half_extent; 3],
            max: [half_extent; 3],
        }
    }
}

/// One node of the scene hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    /// Present on renderable mesh leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
    /// Whether this node is a renderable mesh leaf
    #[serde(default)]
    pub mesh: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDescription>,
}

/// A complete scene: one root node and everything under it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<NodeDescription>,
}

impl SceneDescription {
    pub fn new(root: NodeDescription) -> Self {
        Self {
            version: 1,
            root: Some(root),
        }
    }

    /// Scene with no content at all
    pub fn empty() -> Self {
        Self {
            version: 1,
            root: None,
        }
    }
}
