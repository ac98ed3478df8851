//! Shared Types Module
//!
//! Identifiers and hit-target references shared across game modules.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Stable player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Stable structure identifier. Never reused within one arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructureId(pub u32);

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "structure#{}", self.0)
    }
}

// ============================================================================
// HIT TARGETS
// ============================================================================

/// What a scene raycast hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitTarget {
    Player(PlayerId),
    Structure(StructureId),
}

/// Coarse kind of a [`HitTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitKind {
    Player,
    Building,
}

impl HitTarget {
    pub fn kind(&self) -> HitKind {
        match self {
            HitTarget::Player(_) => HitKind::Player,
            HitTarget::Structure(_) => HitKind::Building,
        }
    }
}
