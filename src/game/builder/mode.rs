//! Builder Mode
//!
//! Per-player build state machine:
//!
//! ```text
//!   Disabled --toggle--> Active (ghost follows the look ray)
//!      ^                   |  confirm -> place (stays Active)
//!      +------toggle-------+
//! ```

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::placement::{PlaceError, candidate_position, is_valid_position};
use crate::game::building::{BuildMaterial, MaterialInventory, Structure, StructureKind, StructureSet};
use crate::game::types::{HitTarget, StructureId};
use crate::physics::{Aabb, RayHit};

/// Tunable build parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Snap grid cell size in meters
    pub grid_size: f32,
    /// Look-ray reach in meters
    pub build_range: f32,
    /// Highest allowed base height
    pub max_build_height: f32,
    /// Distance a candidate is pushed off a hit surface
    pub clearance_offset: f32,
    /// Seconds between placements
    pub placement_cooldown: f32,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            build_range: 10.0,
            max_build_height: 10.0,
            clearance_offset: 1.1,
            placement_cooldown: 0.1,
        }
    }
}

/// Build state for one player.
#[derive(Debug, Clone)]
pub struct BuildSystem {
    /// Whether build mode is active
    pub enabled: bool,
    pub kind: StructureKind,
    pub material: BuildMaterial,
    /// Yaw applied to new pieces (display only)
    pub rotation: f32,
    /// Preview of the pending build, refreshed every active frame
    pub ghost: Option<Structure>,
    /// Whether the ghost's position is currently valid
    pub can_build: bool,
    /// Simulation time before which placement is refused
    pub cooldown_until: f32,
    pub settings: BuildSettings,
}

impl Default for BuildSystem {
    fn default() -> Self {
        Self::new(BuildSettings::default())
    }
}

impl BuildSystem {
    pub fn new(settings: BuildSettings) -> Self {
        Self {
            enabled: false,
            kind: StructureKind::Wall,
            material: BuildMaterial::Wood,
            rotation: 0.0,
            ghost: None,
            can_build: false,
            cooldown_until: 0.0,
            settings,
        }
    }

    /// Toggle build mode on/off. The ghost is always cleared.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        self.ghost = None;
        self.can_build = false;
        log::debug!("build mode {}", if self.enabled { "enabled" } else { "disabled" });
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.toggle();
        }
    }

    pub fn switch_kind(&mut self, kind: StructureKind) {
        self.kind = kind;
        self.ghost = None;
    }

    pub fn switch_material(&mut self, material: BuildMaterial) {
        self.material = material;
        self.ghost = None;
    }

    /// Advance the build rotation by a quarter turn, wrapping at a full turn.
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + FRAC_PI_2) % TAU;
    }

    /// Refresh the ghost from this frame's look ray.
    ///
    /// No-op while disabled.
    ///
    /// # Arguments
    /// * `eye` - Builder's eye position
    /// * `direction` - Unit look direction
    /// * `hit` - Scene raycast along the look ray, ignoring the builder
    /// * `builder_bounds` - Builder's collision box
    /// * `structures` - Existing structures
    ///
    /// # Returns
    /// The snapped candidate position, or `None` while disabled.
    pub fn update(
        &mut self,
        eye: Vec3,
        direction: Vec3,
        hit: Option<&RayHit<HitTarget>>,
        builder_bounds: &Aabb,
        structures: &StructureSet,
    ) -> Option<Vec3> {
        if !self.enabled {
            return None;
        }

        let position = candidate_position(eye, direction, hit, &self.settings);
        self.can_build = is_valid_position(self.kind, position, &self.settings, builder_bounds, structures);

        match &mut self.ghost {
            Some(ghost) if ghost.kind == self.kind && ghost.material == self.material => {
                ghost.set_position(position);
                ghost.set_rotation(self.rotation);
            }
            _ => {
                self.ghost = Some(Structure::new(
                    structures.next_id(),
                    self.kind,
                    self.material,
                    position,
                    self.rotation,
                ));
            }
        }

        Some(position)
    }

    /// Commit the ghost as a placed structure.
    ///
    /// Validity is re-checked against the current structures, so a ghost
    /// computed before another placement this frame cannot double-book a
    /// cell. On success exactly one unit of the selected material is spent
    /// and the cooldown is armed.
    pub fn try_place(
        &mut self,
        now: f32,
        inventory: &mut MaterialInventory,
        builder_bounds: &Aabb,
        structures: &mut StructureSet,
    ) -> Result<StructureId, PlaceError> {
        if !self.enabled {
            return Err(PlaceError::Inactive);
        }
        if now < self.cooldown_until {
            return Err(PlaceError::OnCooldown);
        }
        let Some(position) = self.ghost.as_ref().map(|g| g.position()) else {
            return Err(PlaceError::InvalidPosition);
        };
        if !self.can_build || !is_valid_position(self.kind, position, &self.settings, builder_bounds, structures) {
            return Err(PlaceError::InvalidPosition);
        }
        if !inventory.consume(self.material) {
            return Err(PlaceError::InsufficientMaterials);
        }

        let id = structures.insert(self.kind, self.material, position, self.rotation);
        self.cooldown_until = now + self.settings.placement_cooldown;
        self.can_build = false;
        log::debug!(
            "placed {} {} at {:?} ({} left)",
            self.material.name(),
            self.kind.name(),
            position,
            inventory.count(self.material)
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_bounds() -> Aabb {
        Aabb::from_base(Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 1.8, 1.0))
    }

    fn eye() -> Vec3 {
        Vec3::new(0.0, 1.44, 5.0)
    }

    #[test]
    fn test_toggle_clears_ghost() {
        let mut build = BuildSystem::default();
        build.toggle();
        assert!(build.enabled);
        build.update(eye(), Vec3::NEG_Z, None, &builder_bounds(), &StructureSet::new());
        assert!(build.ghost.is_some());

        build.toggle();
        assert!(!build.enabled);
        assert!(build.ghost.is_none());
    }

    #[test]
    fn test_update_disabled_is_noop() {
        let mut build = BuildSystem::default();
        assert!(build.update(eye(), Vec3::NEG_Z, None, &builder_bounds(), &StructureSet::new()).is_none());
        assert!(build.ghost.is_none());
    }

    #[test]
    fn test_rotate_wraps() {
        let mut build = BuildSystem::default();
        for _ in 0..4 {
            build.rotate();
        }
        assert!(build.rotation.abs() < 1e-5 || (build.rotation - TAU).abs() < 1e-5);
    }

    #[test]
    fn test_switch_kind_resets_ghost() {
        let mut build = BuildSystem::default();
        build.toggle();
        build.update(eye(), Vec3::NEG_Z, None, &builder_bounds(), &StructureSet::new());
        build.switch_kind(StructureKind::Floor);
        assert!(build.ghost.is_none());
        build.update(eye(), Vec3::NEG_Z, None, &builder_bounds(), &StructureSet::new());
        assert_eq!(build.ghost.as_ref().map(|g| g.kind), Some(StructureKind::Floor));
    }

    #[test]
    fn test_place_commits_and_spends_one() {
        let mut build = BuildSystem::default();
        let mut inventory = MaterialInventory::filled(3);
        let mut structures = StructureSet::new();
        build.toggle();
        build.update(eye(), Vec3::NEG_Z, None, &builder_bounds(), &structures);
        assert!(build.can_build);

        let id = build.try_place(1.0, &mut inventory, &builder_bounds(), &mut structures);
        assert!(id.is_ok());
        assert_eq!(inventory.wood, 2);
        assert_eq!(structures.len(), 1);
        assert!(build.enabled);
    }

    #[test]
    fn test_place_refusals() {
        let mut build = BuildSystem::default();
        let mut inventory = MaterialInventory::filled(1);
        let mut structures = StructureSet::new();
        let bounds = builder_bounds();

        assert_eq!(build.try_place(0.0, &mut inventory, &bounds, &mut structures), Err(PlaceError::Inactive));

        build.toggle();
        assert_eq!(
            build.try_place(0.0, &mut inventory, &bounds, &mut structures),
            Err(PlaceError::InvalidPosition)
        );

        build.update(eye(), Vec3::NEG_Z, None, &bounds, &structures);
        assert!(build.try_place(0.0, &mut inventory, &bounds, &mut structures).is_ok());

        // Same spot is now occupied; also still cooling down
        build.update(eye(), Vec3::NEG_Z, None, &bounds, &structures);
        assert_eq!(build.try_place(0.05, &mut inventory, &bounds, &mut structures), Err(PlaceError::OnCooldown));
        assert_eq!(
            build.try_place(0.5, &mut inventory, &bounds, &mut structures),
            Err(PlaceError::InvalidPosition)
        );

        // Aim somewhere free with an empty inventory
        build.update(eye(), Vec3::new(0.6, 0.0, -0.8), None, &bounds, &structures);
        assert!(build.can_build);
        assert_eq!(
            build.try_place(0.5, &mut inventory, &bounds, &mut structures),
            Err(PlaceError::InsufficientMaterials)
        );
        assert_eq!(structures.len(), 1);
    }
}
