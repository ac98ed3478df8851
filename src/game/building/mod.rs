//! Building System - player-placed arena structures
//!
//! Features:
//! - Closed set of structure shapes with a fixed size table
//! - Material-based health (wood, brick, metal)
//! - Per-player material inventory
//! - Arena-wide structure collection with damage and removal

pub mod materials;
pub mod structure;

pub use materials::{BuildMaterial, MaterialInventory, STARTING_MATERIALS};
pub use structure::{Structure, StructureDamage, StructureKind, StructureSet};
