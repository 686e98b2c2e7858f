//! Axis-aligned bounding boxes for nodes and whole models

use glam::{Mat4, Vec3};

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Inverted box ready for accumulation; empty until expanded
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::MAX),
            max: Vec3::splat(f32::MIN),
        }
    }

    pub fn from_shared(bounds: &shared::BoundingBox) -> Self {
        Self {
            min: Vec3::new(
                bounds.min[0] as f32,
                bounds.min[1] as f32,
                bounds.min[2] as f32,
            ),
            max: Vec3::new(
                bounds.max[0] as f32,
                bounds.max[1] as f32,
                bounds.max[2] as f32,
            ),
        }
    }

    /// Box degenerated to a single point
    pub fn point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half the longest edge of the box; zero for an empty box
    pub fn half_longest_edge(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        (self.max - self.min).max_element() * 0.5
    }

    /// Grow to contain `point`
    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// World-space box of this local box under `matrix` (all eight corners)
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        let mut out = Aabb::empty();
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.expand(matrix.transform_point3(corner));
        }
        out
    }
}
