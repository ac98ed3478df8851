//! Physics module for the build arena
//!
//! Custom kinematic physics: no rigid-body library, no rotation, no mass.
//! Everything collides as an axis-aligned box.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//! - Angles in radians
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types re-exported from glam
//! - [`bounds`] - Axis-aligned bounding boxes and strict overlap
//! - [`collision`] - Ray-AABB slab test and nearest-hit scene raycast
//! - [`resolver`] - Gravity, minimum-penetration push-out, world clamping
//! - [`ballistics`] - Hit-scan weapons, recoil and spread

pub mod ballistics;
pub mod bounds;
pub mod collision;
pub mod resolver;
pub mod types;

// Re-export commonly used types at the physics module level
pub use ballistics::{Aim, ShotRecord, Weapon, WeaponConfig, WeaponKind, WeaponState};
pub use bounds::{Aabb, overlap};
pub use collision::{Ray, RayHit, aabb_surface_normal, ray_aabb_intersect, raycast_nearest};
pub use resolver::{CollisionResolver, KinematicBody, ResolveOutcome, WorldBounds};
pub use types::{Vec2, Vec3};
