//! Render Snapshot
//!
//! Read-only view of one frame for a renderer. Structure and player
//! instances are `#[repr(C)]` + `Pod` so they can be uploaded to a GPU
//! instance buffer with `bytemuck::cast_slice`.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::game::arena_player::{MAX_HEALTH, Player};
use crate::game::building::{BuildMaterial, Structure, StructureKind};
use crate::game::types::{HitKind, PlayerId};

/// Tint for a ghost that can be placed
pub const GHOST_VALID_COLOR: [f32; 4] = [0.2, 0.9, 0.3, 0.5];
/// Tint for a ghost that would be refused
pub const GHOST_INVALID_COLOR: [f32; 4] = [0.9, 0.2, 0.2, 0.5];

const PLAYER_COLOR: [f32; 4] = [0.25, 0.45, 0.9, 1.0];
const BOT_COLOR: [f32; 4] = [0.9, 0.4, 0.2, 1.0];

/// One box to draw for a structure.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct StructureInstance {
    /// Base centre
    pub position: [f32; 3],
    /// Yaw in radians
    pub rotation: f32,
    pub size: [f32; 3],
    /// Current / max health, 0..=1
    pub health_fraction: f32,
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(StructureInstance, [u8; 48]);

impl StructureInstance {
    pub fn from_structure(structure: &Structure) -> Self {
        Self {
            position: structure.position().to_array(),
            rotation: structure.rotation(),
            size: structure.kind.size().to_array(),
            health_fraction: (structure.health / structure.max_health()).clamp(0.0, 1.0),
            color: structure.material.color(),
        }
    }
}

/// One capsule-ish box to draw for a player.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PlayerInstance {
    /// Feet position
    pub position: [f32; 3],
    pub yaw: f32,
    pub radius: f32,
    pub height: f32,
    pub health_fraction: f32,
    pub pitch: f32,
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(PlayerInstance, [u8; 48]);

impl PlayerInstance {
    pub fn from_player(player: &Player) -> Self {
        Self {
            position: player.position().to_array(),
            yaw: player.aim.yaw,
            radius: player.body.radius,
            height: player.body.height,
            health_fraction: (player.health / MAX_HEALTH).clamp(0.0, 1.0),
            pitch: player.aim.pitch,
            color: if player.is_bot { BOT_COLOR } else { PLAYER_COLOR },
        }
    }
}

/// A bullet trail, visible for exactly the frame it was fired in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tracer {
    pub shooter: PlayerId,
    pub start: Vec3,
    pub end: Vec3,
    /// What the ray stopped on, if anything
    pub hit: Option<HitKind>,
}

/// The build preview of one player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostView {
    pub owner: PlayerId,
    pub kind: StructureKind,
    pub material: BuildMaterial,
    pub position: Vec3,
    pub rotation: f32,
    pub valid: bool,
}

impl GhostView {
    /// The ghost as a drawable instance, tinted by validity.
    pub fn instance(&self) -> StructureInstance {
        StructureInstance {
            position: self.position.to_array(),
            rotation: self.rotation,
            size: self.kind.size().to_array(),
            health_fraction: 1.0,
            color: if self.valid { GHOST_VALID_COLOR } else { GHOST_INVALID_COLOR },
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArenaSnapshot {
    pub time: f32,
    pub frame: u64,
    pub structures: Vec<StructureInstance>,
    /// Live players only
    pub players: Vec<PlayerInstance>,
    pub ghosts: Vec<GhostView>,
    pub tracers: Vec<Tracer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::StructureId;

    #[test]
    fn test_structure_instance_fields() {
        let mut wall = Structure::new(StructureId(1), StructureKind::Wall, BuildMaterial::Brick, Vec3::new(1.0, 0.0, 2.0), 0.5);
        wall.health = 150.0;
        let instance = StructureInstance::from_structure(&wall);
        assert_eq!(instance.position, [1.0, 0.0, 2.0]);
        assert_eq!(instance.size, [1.0, 3.0, 0.1]);
        assert!((instance.health_fraction - 0.5).abs() < 1e-6);
        assert_eq!(instance.color, BuildMaterial::Brick.color());
    }

    #[test]
    fn test_instances_cast_to_bytes() {
        let instances = [StructureInstance::zeroed(); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 3 * 48);
    }

    #[test]
    fn test_ghost_tint() {
        let mut ghost = GhostView {
            owner: PlayerId(1),
            kind: StructureKind::Floor,
            material: BuildMaterial::Wood,
            position: Vec3::ZERO,
            rotation: 0.0,
            valid: true,
        };
        assert_eq!(ghost.instance().color, GHOST_VALID_COLOR);
        ghost.valid = false;
        assert_eq!(ghost.instance().color, GHOST_INVALID_COLOR);
    }
}
