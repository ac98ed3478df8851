//! Structures
//!
//! Player-built pieces (walls, ramps, floors) and the arena-wide collection
//! that owns them. A structure collides as an axis-aligned box anchored at
//! the centre of its base.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::materials::BuildMaterial;
use crate::game::types::StructureId;
use crate::physics::Aabb;

/// Structure shape. Each variant has a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    #[default]
    Wall,
    Ramp,
    Floor,
    /// Generic 1m cube, the fallback for unrecognised names
    Block,
}

impl StructureKind {
    /// Kinds a player can cycle through in build mode.
    pub const BUILDABLE: [StructureKind; 3] = [StructureKind::Wall, StructureKind::Ramp, StructureKind::Floor];

    /// Parses a structure name. Unknown names become a 1m [`StructureKind::Block`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "wall" => StructureKind::Wall,
            "ramp" => StructureKind::Ramp,
            "floor" => StructureKind::Floor,
            _ => StructureKind::Block,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StructureKind::Wall => "wall",
            StructureKind::Ramp => "ramp",
            StructureKind::Floor => "floor",
            StructureKind::Block => "block",
        }
    }

    /// Full extents: width (X), height (Y), depth (Z).
    pub fn size(&self) -> Vec3 {
        match self {
            StructureKind::Wall => Vec3::new(1.0, 3.0, 0.1),
            StructureKind::Ramp => Vec3::new(2.0, 2.0, 1.0),
            StructureKind::Floor => Vec3::new(1.0, 0.1, 1.0),
            StructureKind::Block => Vec3::ONE,
        }
    }

    /// Box this kind would occupy with its base centred on `position`.
    pub fn bounds_at(&self, position: Vec3) -> Aabb {
        Aabb::from_base(position, self.size())
    }
}

/// A placed piece or a build-mode ghost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub id: StructureId,
    pub kind: StructureKind,
    pub material: BuildMaterial,
    position: Vec3,
    /// Yaw in radians, for display only
    rotation: f32,
    pub health: f32,
    /// False for ghosts
    pub placed: bool,
    bounds: Aabb,
}

impl Structure {
    /// Creates an unplaced structure at full health.
    pub fn new(id: StructureId, kind: StructureKind, material: BuildMaterial, position: Vec3, rotation: f32) -> Self {
        Self {
            id,
            kind,
            material,
            position,
            rotation,
            health: material.max_health(),
            placed: false,
            bounds: kind.bounds_at(position),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn max_health(&self) -> f32 {
        self.material.max_health()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_bounds();
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.update_bounds();
    }

    // NOTE: rotation is ignored; bounds use the unrotated size.
    fn update_bounds(&mut self) {
        self.bounds = self.kind.bounds_at(self.position);
    }

    /// Subtracts `amount` from health. Returns true once health reaches zero.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health -= amount.max(0.0);
        self.health <= 0.0
    }
}

/// Outcome of damaging a structure in a [`StructureSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureDamage {
    pub id: StructureId,
    pub remaining_health: f32,
    pub destroyed: bool,
}

/// Every placed structure in the arena.
///
/// Iteration order is insertion order, which makes raycast ties
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct StructureSet {
    structures: Vec<Structure>,
    next_id: u32,
}

impl StructureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// Allocates an id for a ghost or a structure about to be inserted.
    pub fn next_id(&self) -> StructureId {
        StructureId(self.next_id)
    }

    /// Places a new structure and returns its id.
    pub fn insert(&mut self, kind: StructureKind, material: BuildMaterial, position: Vec3, rotation: f32) -> StructureId {
        let id = StructureId(self.next_id);
        self.next_id += 1;
        let mut structure = Structure::new(id, kind, material, position, rotation);
        structure.placed = true;
        self.structures.push(structure);
        id
    }

    pub fn get(&self, id: StructureId) -> Option<&Structure> {
        self.structures.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: StructureId) -> Option<&mut Structure> {
        self.structures.iter_mut().find(|s| s.id == id)
    }

    pub fn remove(&mut self, id: StructureId) -> Option<Structure> {
        let index = self.structures.iter().position(|s| s.id == id)?;
        Some(self.structures.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Structure> {
        self.structures.iter()
    }

    /// `(id, bounds)` pairs for raycasting.
    pub fn colliders(&self) -> impl Iterator<Item = (StructureId, Aabb)> + '_ {
        self.structures.iter().map(|s| (s.id, s.bounds))
    }

    /// Snapshot of every structure's box, for the collision resolver.
    pub fn bounds(&self) -> Vec<Aabb> {
        self.structures.iter().map(|s| s.bounds).collect()
    }

    /// True if `bounds` strictly overlaps any structure.
    pub fn overlaps_any(&self, bounds: &Aabb) -> bool {
        self.structures.iter().any(|s| s.bounds.overlaps(bounds))
    }

    /// Damages a structure, removing it when its health reaches zero.
    ///
    /// Returns `None` if no structure has that id.
    pub fn damage(&mut self, id: StructureId, amount: f32) -> Option<StructureDamage> {
        let structure = self.get_mut(id)?;
        let destroyed = structure.take_damage(amount);
        let remaining_health = structure.health.max(0.0);
        if destroyed {
            self.remove(id);
            log::info!("{} destroyed", id);
        }
        Some(StructureDamage {
            id,
            remaining_health,
            destroyed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_table() {
        assert_eq!(StructureKind::Wall.size(), Vec3::new(1.0, 3.0, 0.1));
        assert_eq!(StructureKind::Ramp.size(), Vec3::new(2.0, 2.0, 1.0));
        assert_eq!(StructureKind::Floor.size(), Vec3::new(1.0, 0.1, 1.0));
        assert_eq!(StructureKind::from_name("tower").size(), Vec3::ONE);
    }

    #[test]
    fn test_wall_bounds_anchor_at_base() {
        let wall = Structure::new(StructureId(0), StructureKind::Wall, BuildMaterial::Wood, Vec3::new(2.0, 1.0, 0.0), 0.0);
        let b = wall.bounds();
        assert_eq!(b.min, Vec3::new(1.5, 1.0, -0.05));
        assert_eq!(b.max, Vec3::new(2.5, 4.0, 0.05));
        assert!(!wall.placed);
        assert_eq!(wall.health, 150.0);
    }

    #[test]
    fn test_rotation_does_not_change_bounds() {
        let mut wall = Structure::new(StructureId(0), StructureKind::Wall, BuildMaterial::Brick, Vec3::ZERO, 0.0);
        let before = wall.bounds();
        wall.set_rotation(std::f32::consts::FRAC_PI_2);
        assert_eq!(wall.bounds(), before);
        assert_eq!(wall.rotation(), std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_set_position_moves_bounds() {
        let mut floor = Structure::new(StructureId(0), StructureKind::Floor, BuildMaterial::Wood, Vec3::ZERO, 0.0);
        floor.set_position(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(floor.bounds().min.y, 2.0);
    }

    #[test]
    fn test_insert_marks_placed_with_unique_ids() {
        let mut set = StructureSet::new();
        let a = set.insert(StructureKind::Wall, BuildMaterial::Wood, Vec3::ZERO, 0.0);
        let b = set.insert(StructureKind::Floor, BuildMaterial::Metal, Vec3::X * 4.0, 0.0);
        assert_ne!(a, b);
        assert!(set.iter().all(|s| s.placed));
        assert_eq!(set.get(b).map(|s| s.health), Some(500.0));
    }

    #[test]
    fn test_damage_removes_at_zero() {
        let mut set = StructureSet::new();
        let id = set.insert(StructureKind::Wall, BuildMaterial::Wood, Vec3::ZERO, 0.0);

        let first = set.damage(id, 100.0);
        assert_eq!(first.map(|d| d.destroyed), Some(false));
        assert_eq!(set.len(), 1);

        let second = set.damage(id, 50.0);
        assert_eq!(second.map(|d| d.destroyed), Some(true));
        assert!(set.is_empty());
        assert!(set.damage(id, 10.0).is_none());
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut set = StructureSet::new();
        let a = set.insert(StructureKind::Floor, BuildMaterial::Wood, Vec3::ZERO, 0.0);
        set.remove(a);
        let b = set.insert(StructureKind::Floor, BuildMaterial::Wood, Vec3::ZERO, 0.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_overlaps_any_is_strict() {
        let mut set = StructureSet::new();
        set.insert(StructureKind::Block, BuildMaterial::Wood, Vec3::ZERO, 0.0);
        let touching = StructureKind::Block.bounds_at(Vec3::X);
        let inside = StructureKind::Block.bounds_at(Vec3::new(0.5, 0.0, 0.0));
        assert!(!set.overlaps_any(&touching));
        assert!(set.overlaps_any(&inside));
    }
}
