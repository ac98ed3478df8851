//! Game Render Module
//!
//! Renderer-facing snapshot of the arena. Drawing itself happens outside
//! the simulation; this module only packages what there is to draw.

pub mod snapshot;

pub use snapshot::{
    ArenaSnapshot, GHOST_INVALID_COLOR, GHOST_VALID_COLOR, GhostView, PlayerInstance,
    StructureInstance, Tracer,
};
