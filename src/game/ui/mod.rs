//! UI Module
//!
//! HUD data for the game. Text layout and drawing live in the host.

pub mod hud;

pub use hud::{HudState, WeaponHud};
