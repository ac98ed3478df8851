//! Building Materials
//!
//! Materials decide how much punishment a structure can take:
//! - Wood: 150 health
//! - Brick: 300 health
//! - Metal: 500 health
//!
//! Each player carries a [`MaterialInventory`]; every placed piece costs one
//! unit of its material.

use serde::{Deserialize, Serialize};

/// Units of each material a player starts with
pub const STARTING_MATERIALS: u32 = 999;

/// Construction material of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildMaterial {
    #[default]
    Wood,
    Brick,
    Metal,
}

impl BuildMaterial {
    pub const ALL: [BuildMaterial; 3] = [BuildMaterial::Wood, BuildMaterial::Brick, BuildMaterial::Metal];

    /// Parses a material name. Unknown names fall back to wood.
    pub fn from_name(name: &str) -> Self {
        match name {
            "brick" => BuildMaterial::Brick,
            "metal" => BuildMaterial::Metal,
            _ => BuildMaterial::Wood,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuildMaterial::Wood => "wood",
            BuildMaterial::Brick => "brick",
            BuildMaterial::Metal => "metal",
        }
    }

    /// Health of a fresh structure made of this material.
    pub fn max_health(&self) -> f32 {
        match self {
            BuildMaterial::Wood => 150.0,
            BuildMaterial::Brick => 300.0,
            BuildMaterial::Metal => 500.0,
        }
    }

    /// RGBA tint for renderers.
    pub fn color(&self) -> [f32; 4] {
        match self {
            BuildMaterial::Wood => [0.55, 0.38, 0.2, 1.0],
            BuildMaterial::Brick => [0.7, 0.25, 0.2, 1.0],
            BuildMaterial::Metal => [0.6, 0.62, 0.66, 1.0],
        }
    }
}

/// Per-player stock of building materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialInventory {
    pub wood: u32,
    pub brick: u32,
    pub metal: u32,
}

impl Default for MaterialInventory {
    fn default() -> Self {
        Self::filled(STARTING_MATERIALS)
    }
}

impl MaterialInventory {
    /// Inventory holding `amount` of every material.
    pub fn filled(amount: u32) -> Self {
        Self {
            wood: amount,
            brick: amount,
            metal: amount,
        }
    }

    pub fn empty() -> Self {
        Self::filled(0)
    }

    pub fn count(&self, material: BuildMaterial) -> u32 {
        match material {
            BuildMaterial::Wood => self.wood,
            BuildMaterial::Brick => self.brick,
            BuildMaterial::Metal => self.metal,
        }
    }

    fn slot_mut(&mut self, material: BuildMaterial) -> &mut u32 {
        match material {
            BuildMaterial::Wood => &mut self.wood,
            BuildMaterial::Brick => &mut self.brick,
            BuildMaterial::Metal => &mut self.metal,
        }
    }

    /// Takes one unit of `material`. Returns false if none is left.
    pub fn consume(&mut self, material: BuildMaterial) -> bool {
        let slot = self.slot_mut(material);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    pub fn add(&mut self, material: BuildMaterial, amount: u32) {
        let slot = self.slot_mut(material);
        *slot = slot.saturating_add(amount);
    }
}
