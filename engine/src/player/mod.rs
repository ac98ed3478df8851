//! Player Module
//!
//! Provides player character movement and stance control.
//!
//! # Components
//!
//! - [`PlayerMovementController`] - Camera-relative movement with smooth acceleration
//!   - Grounded deceleration, reduced air control, jump impulse
//!   - Hold-to-crouch stance that shrinks the collision box from the top
//! - [`MovementIntent`] - Per-frame movement input
//! - [`MovementSettings`] - Tunable speeds and heights

pub mod movement_controller;

pub use movement_controller::{
    MovementIntent, MovementSettings, PlayerMovementController, Stance,
    ACCELERATION, AIR_CONTROL, CROUCH_HEIGHT, DECELERATION, JUMP_VELOCITY, SPRINT_SPEED,
    STANDING_HEIGHT, WALK_SPEED,
};
