//! Input Module
//!
//! Input action definitions and the per-frame intent they fold into.

pub mod actions;

pub use actions::{InputAction, IntentAccumulator, MovementKey, MovementState, PlayerIntent};
