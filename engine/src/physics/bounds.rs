//! Axis-Aligned Bounding Boxes
//!
//! Every collidable thing in the arena (players, structures, ghosts) is
//! described by an [`Aabb`]. Boxes are never rotated: a structure's stored yaw
//! only affects how it is drawn, not how it collides.
//!
//! # Overlap Semantics
//!
//! Overlap is strict on all three axes. Two boxes that share a face are
//! *touching*, not colliding. Build placement relies on this so that a piece
//! snapped flush against a neighbour is still a valid placement.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// Invariant: `min.x <= max.x`, `min.y <= max.y`, `min.z <= max.z`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from two corners, reordering components so the
    /// `min <= max` invariant always holds.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box of the given full size whose bottom face is centred on `base`.
    ///
    /// Players and structures are both anchored at their feet/base point, so
    /// this is the constructor almost everything goes through.
    ///
    /// # Arguments
    /// * `base` - Centre of the bottom face in world space
    /// * `size` - Full extents (width on X, height on Y, depth on Z)
    pub fn from_base(base: Vec3, size: Vec3) -> Self {
        let half = Vec3::new(size.x.abs() * 0.5, 0.0, size.z.abs() * 0.5);
        Self {
            min: Vec3::new(base.x - half.x, base.y, base.z - half.z),
            max: Vec3::new(base.x + half.x, base.y + size.y.abs(), base.z + half.z),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Strict overlap test on all three axes.
    ///
    /// Symmetric: `a.overlaps(&b) == b.overlaps(&a)`.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Returns true if `point` lies inside or on the surface of the box.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Returns the box moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Free-function form of [`Aabb::overlaps`].
pub fn overlap(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}
