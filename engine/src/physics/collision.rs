//! Spatial queries
//!
//! Ray-AABB intersection and nearest-hit scene queries used by hit-scan
//! weapons, build placement and bot obstacle probing.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//! Direction components of zero are not special-cased: the division yields
//! `±inf` and the slab comparisons handle it.
//!
//! # Scene Queries
//!
//! [`raycast_nearest`] walks a flat list of `(target, bounds)` pairs and keeps
//! the closest hit. This is a brute-force O(N) scan with no spatial
//! partitioning. For large arenas, consider a BVH or uniform grid.
//!
//! # Example
//!
//! ```ignore
//! use build_arena_engine::physics::{Aabb, raycast_nearest};
//! use glam::Vec3;
//!
//! let crate_box = Aabb::new(Vec3::ZERO, Vec3::ONE);
//! let hit = raycast_nearest(
//!     Vec3::new(0.5, 0.5, 5.0),
//!     Vec3::NEG_Z,
//!     100.0,
//!     [("crate", crate_box)],
//! );
//! assert_eq!(hit.unwrap().target, "crate");
//! ```

use glam::Vec3;

use super::bounds::Aabb;

/// Tolerance used when deciding which face a hit point lies on.
pub const FACE_EPSILON: f32 = 1e-3;

/// A ray with a finite reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point in world space
    pub origin: Vec3,
    /// Direction of travel (callers keep this unit length)
    pub direction: Vec3,
    /// Hits at or beyond this distance are ignored
    pub max_distance: f32,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3, max_distance: f32) -> Self {
        Self {
            origin,
            direction,
            max_distance,
        }
    }

    /// Point at parametric distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Point at the far end of the ray.
    pub fn end(&self) -> Vec3 {
        self.at(self.max_distance)
    }
}

/// Result of a ray query against a single box or a whole scene.
///
/// `T` identifies what was hit; the arena uses an enum distinguishing
/// players from structures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<T> {
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// World-space position of the hit
    pub point: Vec3,
    /// Outward face normal, always one of the six axis unit vectors
    pub normal: Vec3,
    /// What was hit
    pub target: T,
}

/// Performs ray-AABB intersection using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (expected unit length)
/// * `aabb` - Box to test against
///
/// # Returns
///
/// * `Some(t)` - Distance to the entry point, or to the exit point when the
///   origin is inside the box
/// * `None` - The ray misses, or the box is entirely behind the origin
pub fn ray_aabb_intersect(ray_origin: Vec3, ray_dir: Vec3, aabb: &Aabb) -> Option<f32> {
    let mut t_min = (aabb.min.x - ray_origin.x) / ray_dir.x;
    let mut t_max = (aabb.max.x - ray_origin.x) / ray_dir.x;
    if t_min > t_max {
        std::mem::swap(&mut t_min, &mut t_max);
    }

    let mut ty_min = (aabb.min.y - ray_origin.y) / ray_dir.y;
    let mut ty_max = (aabb.max.y - ray_origin.y) / ray_dir.y;
    if ty_min > ty_max {
        std::mem::swap(&mut ty_min, &mut ty_max);
    }

    if t_min > ty_max || ty_min > t_max {
        return None;
    }
    if ty_min > t_min {
        t_min = ty_min;
    }
    if ty_max < t_max {
        t_max = ty_max;
    }

    let mut tz_min = (aabb.min.z - ray_origin.z) / ray_dir.z;
    let mut tz_max = (aabb.max.z - ray_origin.z) / ray_dir.z;
    if tz_min > tz_max {
        std::mem::swap(&mut tz_min, &mut tz_max);
    }

    if t_min > tz_max || tz_min > t_max {
        return None;
    }
    if tz_min > t_min {
        t_min = tz_min;
    }
    if tz_max < t_max {
        t_max = tz_max;
    }

    if t_max < 0.0 {
        return None;
    }

    let distance = if t_min >= 0.0 { t_min } else { t_max };
    // NaN slabs (origin exactly on a plane with a zero direction component)
    // fall through every comparison above.
    if distance.is_nan() {
        return None;
    }
    Some(distance)
}

/// Computes the outward normal of the face `point` lies on.
///
/// Faces are tested in a fixed order (x-min, x-max, y-min, y-max, z-min,
/// z-max) and the first within [`FACE_EPSILON`] wins, so a hit on an edge or
/// corner reports the earliest face in that order.
///
/// If the point is not on any face (it was computed for a ray starting
/// inside a degenerate box, for example) the face closest in normalised
/// box space is returned instead.
pub fn aabb_surface_normal(point: Vec3, aabb: &Aabb) -> Vec3 {
    if (point.x - aabb.min.x).abs() < FACE_EPSILON {
        Vec3::NEG_X
    } else if (point.x - aabb.max.x).abs() < FACE_EPSILON {
        Vec3::X
    } else if (point.y - aabb.min.y).abs() < FACE_EPSILON {
        Vec3::NEG_Y
    } else if (point.y - aabb.max.y).abs() < FACE_EPSILON {
        Vec3::Y
    } else if (point.z - aabb.min.z).abs() < FACE_EPSILON {
        Vec3::NEG_Z
    } else if (point.z - aabb.max.z).abs() < FACE_EPSILON {
        Vec3::Z
    } else {
        closest_face_normal(point, aabb)
    }
}

fn closest_face_normal(point: Vec3, aabb: &Aabb) -> Vec3 {
    let half_extents = (aabb.size() * 0.5).max(Vec3::splat(f32::EPSILON));
    let normalized = (point - aabb.center()) / half_extents;
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(sign(normalized.x), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, sign(normalized.y), 0.0)
    } else {
        Vec3::new(0.0, 0.0, sign(normalized.z))
    }
}

fn sign(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Intersects a ray with a single box and fills in point and normal.
pub fn ray_aabb_hit<T>(ray_origin: Vec3, ray_dir: Vec3, aabb: &Aabb, target: T) -> Option<RayHit<T>> {
    let distance = ray_aabb_intersect(ray_origin, ray_dir, aabb)?;
    let point = ray_origin + ray_dir * distance;
    Some(RayHit {
        distance,
        point,
        normal: aabb_surface_normal(point, aabb),
        target,
    })
}

/// Casts a ray against every `(target, bounds)` pair and returns the closest hit.
///
/// A candidate replaces the current best only when it is strictly closer;
/// the best starts at `max_dist`, so hits at exactly the maximum distance are
/// ignored and ties keep the earlier target.
///
/// # Arguments
///
/// * `origin` - Ray starting position
/// * `direction` - Ray direction (should be normalized)
/// * `max_dist` - Maximum distance to check for intersections
/// * `targets` - Everything the ray may hit
pub fn raycast_nearest<T, I>(origin: Vec3, direction: Vec3, max_dist: f32, targets: I) -> Option<RayHit<T>>
where
    I: IntoIterator<Item = (T, Aabb)>,
{
    let mut closest: Option<RayHit<T>> = None;
    let mut closest_dist = max_dist;

    for (target, bounds) in targets {
        let Some(t) = ray_aabb_intersect(origin, direction, &bounds) else {
            continue;
        };
        if t < closest_dist {
            let point = origin + direction * t;
            closest = Some(RayHit {
                distance: t,
                point,
                normal: aabb_surface_normal(point, &bounds),
                target,
            });
            closest_dist = t;
        }
    }

    if let Some(hit) = &closest {
        log::trace!("raycast hit at {:.3} ({:?})", hit.distance, hit.normal);
    }
    closest
}

/// Checks whether a ray hits anything within `max_dist`.
///
/// Faster than [`raycast_nearest`] when only a yes/no answer is needed.
pub fn ray_test<I>(origin: Vec3, direction: Vec3, max_dist: f32, bounds: I) -> bool
where
    I: IntoIterator<Item = Aabb>,
{
    bounds.into_iter().any(|b| {
        ray_aabb_intersect(origin, direction, &b).is_some_and(|t| t < max_dist)
    })
}
