//! World Module
//!
//! World-space configuration and utilities.
//!
//! ## Default World
//! A flat arena with a 1m placement grid. Hard world limits live on
//! [`WorldBounds`](crate::physics::WorldBounds).

pub mod grid;

pub use grid::{GridConfig, snap_to_grid};
