//! Collision Resolver
//!
//! Per-frame gravity integration and position correction for a moving body.
//!
//! # Algorithm
//!
//! 1. Apply gravity to vertical velocity unless the body is grounded.
//! 2. Integrate position by `velocity * dt` on all three axes.
//! 3. For every obstacle the body overlaps, push it out along the axis of
//!    minimum penetration that keeps it inside the world volume, and cancel
//!    velocity into that surface.
//! 4. Clamp against the world boundary (the boundary floor counts as ground).
//! 5. The body is grounded only if this frame produced an upward correction,
//!    or it is resting within [`GROUND_PROBE`] of a floor while not rising.
//!
//! The resolver assumes `dt` was clamped by the frame driver. Large steps can
//! still tunnel through thin geometry (a floor is 0.1m thick).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;

/// Extra separation added to every push-out so the corrected box is
/// strictly clear of the obstacle despite float rounding.
pub const CONTACT_SKIN: f32 = 1e-4;

/// Maximum gap below the feet that still counts as standing on a surface.
pub const GROUND_PROBE: f32 = 0.05;

/// Resolution passes per frame; each pass re-tests every obstacle.
const MAX_PASSES: usize = 4;

/// The moving part of an entity as far as collision is concerned.
///
/// `position` is the centre of the feet. The box spans `2 * radius` on X and
/// Z and `height` upward from the feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub height: f32,
    pub grounded: bool,
}

impl KinematicBody {
    pub fn new(position: Vec3, radius: f32, height: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            radius,
            height,
            grounded: false,
        }
    }

    /// Current collision box, derived from position, radius and height.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_base(
            self.position,
            Vec3::new(self.radius * 2.0, self.height, self.radius * 2.0),
        )
    }

    /// Horizontal (XZ) speed.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

/// Hard limits of the playable volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min: Vec3::new(-1000.0, 0.0, -1000.0),
            max: Vec3::new(1000.0, 1000.0, 1000.0),
        }
    }
}

/// What happened during one resolution step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolveOutcome {
    /// Body ended the step supported from below
    pub grounded: bool,
    /// Number of obstacle push-outs performed
    pub contacts: u32,
    /// Body was clamped by the world boundary
    pub hit_world_bounds: bool,
}

/// Minimum-penetration correction for one overlapping pair.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Penetration {
    axis: usize,
    /// Signed displacement that separates the boxes
    amount: f32,
}

/// Candidate displacements that separate `body` from `obstacle`, one per
/// axis and direction. Y comes first so ties favour standing on top.
fn push_candidates(body: &Aabb, obstacle: &Aabb) -> [Penetration; 6] {
    let mut candidates = [Penetration { axis: 1, amount: 0.0 }; 6];
    for (i, axis) in [1, 0, 2].into_iter().enumerate() {
        candidates[i * 2] = Penetration {
            axis,
            amount: obstacle.max[axis] - body.min[axis],
        };
        candidates[i * 2 + 1] = Penetration {
            axis,
            amount: obstacle.min[axis] - body.max[axis],
        };
    }
    candidates
}

fn smallest(candidates: impl Iterator<Item = Penetration>) -> Option<Penetration> {
    candidates.fold(None, |best: Option<Penetration>, pen| match best {
        Some(b) if b.amount.abs() <= pen.amount.abs() => Some(b),
        _ => Some(pen),
    })
}

fn is_resting_on(feet: &Aabb, surface: &Aabb) -> bool {
    let gap = feet.min.y - surface.max.y;
    (-CONTACT_SKIN..=GROUND_PROBE).contains(&gap)
        && feet.min.x < surface.max.x
        && feet.max.x > surface.min.x
        && feet.min.z < surface.max.z
        && feet.max.z > surface.min.z
}

/// Gravity integration and push-out against static boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    /// Downward acceleration in m/s^2
    pub gravity: f32,
    pub world: WorldBounds,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self {
            gravity: 9.8 * 5.0,
            world: WorldBounds::default(),
        }
    }
}

impl CollisionResolver {
    pub fn new(gravity: f32, world: WorldBounds) -> Self {
        Self { gravity, world }
    }

    /// Advances `body` by `dt` seconds and resolves it against `obstacles`.
    ///
    /// Updates `body.grounded` and returns a summary of the contacts made.
    pub fn resolve(&self, body: &mut KinematicBody, dt: f32, obstacles: &[Aabb]) -> ResolveOutcome {
        let mut outcome = ResolveOutcome::default();

        if !body.grounded {
            body.velocity.y -= self.gravity * dt;
        }
        body.position += body.velocity * dt;

        let mut landed = false;
        for _ in 0..MAX_PASSES {
            let mut pushed = false;
            for obstacle in obstacles {
                if !body.bounds().overlaps(obstacle) {
                    continue;
                }

                let pen = self.min_penetration(body, obstacle);
                let direction = pen.amount.signum();
                body.position[pen.axis] += pen.amount + direction * CONTACT_SKIN;
                if body.velocity[pen.axis] * direction < 0.0 {
                    body.velocity[pen.axis] = 0.0;
                }
                if pen.axis == 1 && direction > 0.0 {
                    landed = true;
                }
                pushed = true;
                outcome.contacts += 1;
            }
            if !pushed {
                break;
            }
        }

        if self.clamp_to_world(body) {
            outcome.hit_world_bounds = true;
        }
        if body.position.y <= self.world.min.y {
            landed = true;
        }

        if !landed && body.velocity.y <= 0.0 {
            let feet = body.bounds();
            landed = feet.min.y - self.world.min.y <= GROUND_PROBE
                || obstacles.iter().any(|o| is_resting_on(&feet, o));
        }

        body.grounded = landed;
        outcome.grounded = landed;
        outcome
    }

    /// Smallest push-out of `body` from `obstacle` that leaves the body inside
    /// the world volume. Falls back to the unconstrained minimum when every
    /// direction is blocked by the boundary.
    fn min_penetration(&self, body: &KinematicBody, obstacle: &Aabb) -> Penetration {
        let bounds = body.bounds();
        let in_world = |pen: &Penetration| {
            let moved = body.position[pen.axis] + pen.amount + pen.amount.signum() * CONTACT_SKIN;
            if pen.axis == 1 {
                moved >= self.world.min.y && moved + body.height <= self.world.max.y
            } else {
                moved >= self.world.min[pen.axis] + body.radius
                    && moved <= self.world.max[pen.axis] - body.radius
            }
        };
        let candidates = push_candidates(&bounds, obstacle);
        smallest(candidates.into_iter().filter(in_world))
            .or_else(|| smallest(candidates.into_iter()))
            .unwrap_or(Penetration { axis: 1, amount: 0.0 })
    }

    /// Keeps the body inside the world volume. Returns true if it was clamped.
    fn clamp_to_world(&self, body: &mut KinematicBody) -> bool {
        let min = self.world.min;
        let max = self.world.max;
        let mut clamped = false;

        if body.position.y < min.y {
            body.position.y = min.y;
            body.velocity.y = body.velocity.y.max(0.0);
            clamped = true;
        }
        if body.position.y + body.height > max.y {
            body.position.y = max.y - body.height;
            body.velocity.y = body.velocity.y.min(0.0);
            clamped = true;
        }
        for axis in [0, 2] {
            let lo = min[axis] + body.radius;
            let hi = max[axis] - body.radius;
            if body.position[axis] < lo {
                body.position[axis] = lo;
                body.velocity[axis] = body.velocity[axis].max(0.0);
                clamped = true;
            } else if body.position[axis] > hi {
                body.position[axis] = hi;
                body.velocity[axis] = body.velocity[axis].min(0.0);
                clamped = true;
            }
        }
        clamped
    }
}
