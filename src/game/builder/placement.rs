//! Structure Placement
//!
//! Where a build would land and whether it may land there.

use glam::Vec3;

use crate::game::building::{StructureKind, StructureSet};
use crate::game::types::HitTarget;
use crate::physics::{Aabb, RayHit};
use crate::world::GridConfig;

use super::mode::BuildSettings;

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    /// Build mode is off
    Inactive,
    /// Candidate is too high or overlaps the builder or a structure
    InvalidPosition,
    /// Placed too recently
    OnCooldown,
    /// No units of the selected material left
    InsufficientMaterials,
}

/// Grid-snapped position a build would occupy.
///
/// If the look ray hit a structure, the candidate is pushed off the hit
/// surface along its normal by `clearance_offset`; otherwise it is the point
/// at full build range. Hits on players count as misses.
///
/// # Arguments
/// * `eye` - Builder's eye position
/// * `direction` - Unit look direction
/// * `hit` - Result of the scene raycast along the look ray
/// * `settings` - Range, clearance and grid size
pub fn candidate_position(
    eye: Vec3,
    direction: Vec3,
    hit: Option<&RayHit<HitTarget>>,
    settings: &BuildSettings,
) -> Vec3 {
    let raw = match hit {
        Some(hit) if matches!(hit.target, HitTarget::Structure(_)) => {
            hit.point + hit.normal * settings.clearance_offset
        }
        _ => eye + direction * settings.build_range,
    };
    GridConfig::new(settings.grid_size).snap(raw)
}

/// True if `kind` may be built at `position`.
///
/// Valid means: at or below the height limit, clear of the builder's own box
/// and clear of every existing structure. Touching faces are fine.
pub fn is_valid_position(
    kind: StructureKind,
    position: Vec3,
    settings: &BuildSettings,
    builder_bounds: &Aabb,
    structures: &StructureSet,
) -> bool {
    if position.y > settings.max_build_height {
        return false;
    }
    let bounds = kind.bounds_at(position);
    if bounds.overlaps(builder_bounds) {
        return false;
    }
    !structures.overlaps_any(&bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::building::BuildMaterial;
    use crate::game::types::{PlayerId, StructureId};

    fn far_builder() -> Aabb {
        Aabb::from_base(Vec3::new(50.0, 0.0, 50.0), Vec3::new(1.0, 1.8, 1.0))
    }

    #[test]
    fn test_miss_uses_full_range() {
        let settings = BuildSettings::default();
        let pos = candidate_position(Vec3::new(0.0, 1.44, 0.0), Vec3::NEG_Z, None, &settings);
        assert_eq!(pos, Vec3::new(0.0, 1.0, -10.0));
    }

    #[test]
    fn test_structure_hit_offsets_along_normal() {
        let settings = BuildSettings::default();
        let hit = RayHit {
            distance: 4.95,
            point: Vec3::new(0.0, 1.44, 0.05),
            normal: Vec3::Z,
            target: HitTarget::Structure(StructureId(0)),
        };
        let pos = candidate_position(Vec3::new(0.0, 1.44, 5.0), Vec3::NEG_Z, Some(&hit), &settings);
        assert_eq!(pos, Vec3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_player_hit_treated_as_miss() {
        let settings = BuildSettings::default();
        let hit = RayHit {
            distance: 2.0,
            point: Vec3::new(0.0, 1.0, -2.0),
            normal: Vec3::Z,
            target: HitTarget::Player(PlayerId(2)),
        };
        let pos = candidate_position(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, Some(&hit), &settings);
        assert_eq!(pos.z, -10.0);
    }

    #[test]
    fn test_candidate_below_ground_clamped() {
        let settings = BuildSettings::default();
        let pos = candidate_position(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, None, &settings);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn test_height_limit() {
        let settings = BuildSettings::default();
        let structures = StructureSet::new();
        let kind = StructureKind::Floor;
        assert!(is_valid_position(kind, Vec3::new(0.0, 10.0, 0.0), &settings, &far_builder(), &structures));
        assert!(!is_valid_position(kind, Vec3::new(0.0, 11.0, 0.0), &settings, &far_builder(), &structures));
    }

    #[test]
    fn test_cannot_build_inside_builder() {
        let settings = BuildSettings::default();
        let structures = StructureSet::new();
        let builder = Aabb::from_base(Vec3::ZERO, Vec3::new(1.0, 1.8, 1.0));
        assert!(!is_valid_position(StructureKind::Wall, Vec3::ZERO, &settings, &builder, &structures));
    }

    #[test]
    fn test_cannot_overlap_structure_but_may_touch() {
        let settings = BuildSettings::default();
        let mut structures = StructureSet::new();
        structures.insert(StructureKind::Floor, BuildMaterial::Wood, Vec3::ZERO, 0.0);

        let builder = far_builder();
        assert!(!is_valid_position(StructureKind::Floor, Vec3::ZERO, &settings, &builder, &structures));
        assert!(is_valid_position(StructureKind::Floor, Vec3::X, &settings, &builder, &structures));
    }
}
