//! Arena Configuration
//!
//! Every gameplay constant in one serde-friendly tree. `Default` reproduces
//! the stock arena; a JSON file may override any subset of fields.
//!
//! ```json
//! { "physics": { "gravity": 30.0 }, "building": { "build_range": 12.0 } }
//! ```

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::bot::BotSettings;
use crate::game::builder::BuildSettings;
use crate::game::building::{BuildMaterial, STARTING_MATERIALS, StructureKind};
use crate::physics::{WeaponKind, WorldBounds};
use crate::player::MovementSettings;

/// Failure to load an [`ArenaConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// World-level physics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Downward acceleration in m/s²
    pub gravity: f32,
    pub world_bounds: WorldBounds,
    /// Frame deltas are clamped to this many seconds
    pub max_frame_delta: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: 9.8 * 5.0,
            world_bounds: WorldBounds::default(),
            max_frame_delta: 0.1,
        }
    }
}

/// One pre-built structure in the starting layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructureSpec {
    pub kind: StructureKind,
    pub material: BuildMaterial,
    pub position: Vec3,
    #[serde(default)]
    pub rotation: f32,
}

/// Match rules and the starting layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Player `i` spawns at `spawn_points[i % len]`
    pub spawn_points: Vec<Vec3>,
    /// Seconds between death and respawn
    pub respawn_delay: f32,
    pub starting_materials: u32,
    /// Weapons for the first player
    pub primary_loadout: Vec<WeaponKind>,
    /// Weapons for everyone else
    pub secondary_loadout: Vec<WeaponKind>,
    pub structures: Vec<StructureSpec>,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            spawn_points: vec![
                Vec3::new(-30.0, 2.0, -30.0),
                Vec3::new(30.0, 2.0, 30.0),
                Vec3::new(-30.0, 2.0, 30.0),
                Vec3::new(30.0, 2.0, -30.0),
            ],
            respawn_delay: 3.0,
            starting_materials: STARTING_MATERIALS,
            primary_loadout: WeaponKind::ALL.to_vec(),
            secondary_loadout: vec![WeaponKind::AssaultRifle, WeaponKind::Shotgun],
            structures: default_layout(),
        }
    }
}

impl MatchSettings {
    /// Spawn point for the player in slot `index`.
    pub fn spawn_point(&self, index: usize) -> Vec3 {
        if self.spawn_points.is_empty() {
            return Vec3::new(0.0, 2.0, 0.0);
        }
        self.spawn_points[index % self.spawn_points.len()]
    }
}

/// 11x11 wood floor grid at 4m spacing, two cover walls and two ramps.
fn default_layout() -> Vec<StructureSpec> {
    let mut layout = Vec::with_capacity(125);
    for x in -5..=5 {
        for z in -5..=5 {
            layout.push(StructureSpec {
                kind: StructureKind::Floor,
                material: BuildMaterial::Wood,
                position: Vec3::new(x as f32 * 4.0, 0.0, z as f32 * 4.0),
                rotation: 0.0,
            });
        }
    }
    let cover = [
        (StructureKind::Wall, Vec3::new(-10.0, 0.0, 0.0), 0.0),
        (StructureKind::Wall, Vec3::new(10.0, 0.0, 0.0), 0.0),
        (StructureKind::Ramp, Vec3::new(0.0, 0.0, -10.0), std::f32::consts::PI),
        (StructureKind::Ramp, Vec3::new(0.0, 0.0, 10.0), 0.0),
    ];
    layout.extend(cover.into_iter().map(|(kind, position, rotation)| StructureSpec {
        kind,
        material: BuildMaterial::Wood,
        position,
        rotation,
    }));
    layout
}

/// Central configuration for the entire arena.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub physics: PhysicsSettings,
    pub movement: MovementSettings,
    pub building: BuildSettings,
    #[serde(rename = "match")]
    pub match_settings: MatchSettings,
    pub bot: BotSettings,
}

impl ArenaConfig {
    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded arena config from {}", path.display());
        Ok(config)
    }

    /// Parses a JSON config. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
