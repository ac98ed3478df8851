//! Player Movement Controller
//!
//! Turns a per-frame [`MovementIntent`] into horizontal velocity on a
//! [`KinematicBody`]. Gravity, integration and collision belong to the
//! [`CollisionResolver`](crate::physics::CollisionResolver), which runs after
//! this controller each frame.
//!
//! # Physics Model
//!
//! - Walk speed: 5.0 m/s
//! - Sprint speed: 8.0 m/s (grounded only)
//! - Acceleration: 50.0 m/s² on the ground, 20% of that in the air
//! - Deceleration: 40.0 m/s² when grounded with no input
//! - Jump impulse: 12.0 m/s
//!
//! # Usage
//!
//! ```rust,ignore
//! use build_arena_engine::player::{MovementIntent, PlayerMovementController};
//! use glam::Vec2;
//!
//! let controller = PlayerMovementController::new();
//! let intent = MovementIntent { axis: Vec2::Y, ..Default::default() };
//!
//! // Each frame, before the resolver:
//! controller.update(&mut body, &intent, aim.yaw, dt);
//! resolver.resolve(&mut body, dt, &obstacles);
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::physics::{Aabb, KinematicBody};

/// Walk speed in meters per second
pub const WALK_SPEED: f32 = 5.0;

/// Sprint speed in meters per second
pub const SPRINT_SPEED: f32 = 8.0;

/// Acceleration in meters per second squared
pub const ACCELERATION: f32 = 50.0;

/// Deceleration in meters per second squared
pub const DECELERATION: f32 = 40.0;

/// Fraction of ground acceleration available while airborne
pub const AIR_CONTROL: f32 = 0.2;

/// Jump velocity in meters per second
pub const JUMP_VELOCITY: f32 = 12.0;

/// Standing height in meters
pub const STANDING_HEIGHT: f32 = 1.8;

/// Crouching height in meters
pub const CROUCH_HEIGHT: f32 = 1.2;

/// Tunable movement parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub air_control: f32,
    pub jump_velocity: f32,
    pub standing_height: f32,
    pub crouch_height: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            sprint_speed: SPRINT_SPEED,
            acceleration: ACCELERATION,
            deceleration: DECELERATION,
            air_control: AIR_CONTROL,
            jump_velocity: JUMP_VELOCITY,
            standing_height: STANDING_HEIGHT,
            crouch_height: CROUCH_HEIGHT,
        }
    }
}

/// Movement half of a frame's input.
///
/// `axis.x` strafes right, `axis.y` moves forward. Each component is
/// expected in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MovementIntent {
    pub axis: Vec2,
    pub jump: bool,
    pub sprint: bool,
    /// Held, not toggled
    pub crouch: bool,
}

impl MovementIntent {
    /// Movement axis scaled to unit length, or zero when there is no input.
    pub fn normalized_axis(&self) -> Vec2 {
        self.axis.normalize_or_zero()
    }

    pub fn has_movement(&self) -> bool {
        self.axis != Vec2::ZERO
    }
}

/// Player stance states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

/// Camera-relative movement with smooth acceleration and deceleration.
///
/// The controller is stateless between frames: everything it mutates lives
/// on the body it is handed.
#[derive(Debug, Clone, Default)]
pub struct PlayerMovementController {
    settings: MovementSettings,
}

impl PlayerMovementController {
    /// Create a new movement controller with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: MovementSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    /// Horizontal velocity the player is steering toward.
    ///
    /// # Arguments
    /// * `intent` - Movement input for this frame
    /// * `yaw` - Camera yaw in radians (0 faces -Z)
    /// * `grounded` - Sprint only applies on the ground
    pub fn target_velocity(&self, intent: &MovementIntent, yaw: f32, grounded: bool) -> Vec3 {
        let axis = intent.normalized_axis();
        let speed = if intent.sprint && grounded {
            self.settings.sprint_speed
        } else {
            self.settings.walk_speed
        };
        let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
        let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
        (forward * axis.y + right * axis.x) * speed
    }

    /// Apply one frame of movement input to `body`'s velocity.
    ///
    /// Handles jumping, horizontal acceleration toward the target velocity,
    /// and grounded deceleration when there is no input. Does not move the
    /// body; the resolver integrates position afterwards.
    ///
    /// # Returns
    /// True if the player jumped this frame.
    pub fn update(&self, body: &mut KinematicBody, intent: &MovementIntent, yaw: f32, dt: f32) -> bool {
        let mut jumped = false;
        if intent.jump && body.grounded {
            body.velocity.y = self.settings.jump_velocity;
            body.grounded = false;
            jumped = true;
        }

        let target = self.target_velocity(intent, yaw, body.grounded);
        let rate = if body.grounded {
            self.settings.acceleration
        } else {
            self.settings.acceleration * self.settings.air_control
        };
        let t = (rate * dt).clamp(0.0, 1.0);
        body.velocity.x += (target.x - body.velocity.x) * t;
        body.velocity.z += (target.z - body.velocity.z) * t;

        if !intent.has_movement() && body.grounded {
            let speed = body.horizontal_speed();
            if speed > 0.0 {
                let scale = (speed - self.settings.deceleration * dt).max(0.0) / speed;
                body.velocity.x *= scale;
                body.velocity.z *= scale;
            }
        }

        jumped
    }

    /// Set the body's height for the requested stance.
    ///
    /// The base point never moves. Standing back up is refused while an
    /// obstacle would overlap the taller box, leaving the player crouched.
    pub fn apply_stance(&self, body: &mut KinematicBody, crouch: bool, obstacles: &[Aabb]) -> Stance {
        if crouch {
            body.height = self.settings.crouch_height;
            return Stance::Crouching;
        }

        if body.height < self.settings.standing_height {
            let standing = Aabb::from_base(
                body.position,
                Vec3::new(body.radius * 2.0, self.settings.standing_height, body.radius * 2.0),
            );
            if obstacles.iter().any(|o| o.overlaps(&standing)) {
                return Stance::Crouching;
            }
        }
        body.height = self.settings.standing_height;
        Stance::Standing
    }
}
