//! Builder Module
//!
//! Build mode, ghost preview and placement rules for arena structures.

pub mod mode;
pub mod placement;

pub use mode::{BuildSettings, BuildSystem};
pub use placement::{PlaceError, candidate_position, is_valid_position};
