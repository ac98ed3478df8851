//! Arena World
//!
//! The aggregate every system reads and mutates: all structures and all
//! players. It is passed around explicitly; there is no global world.

use glam::Vec3;

use super::arena_player::Player;
use super::building::StructureSet;
use super::types::{HitTarget, PlayerId};
use crate::physics::{Aabb, RayHit, raycast_nearest};

/// All mutable arena state.
#[derive(Debug, Clone, Default)]
pub struct ArenaWorld {
    pub structures: StructureSet,
    /// Kept in id order
    pub players: Vec<Player>,
}

impl ArenaWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player, keeping the list sorted by id.
    pub fn add_player(&mut self, player: Player) {
        let index = self.players.partition_point(|p| p.id < player.id);
        self.players.insert(index, player);
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Every collidable box a ray can hit: structures first, then live
    /// players other than `ignore`.
    pub fn colliders(&self, ignore: Option<PlayerId>) -> Vec<(HitTarget, Aabb)> {
        let structures = self
            .structures
            .colliders()
            .map(|(id, bounds)| (HitTarget::Structure(id), bounds));
        let players = self
            .players
            .iter()
            .filter(|p| p.alive && Some(p.id) != ignore)
            .map(|p| (HitTarget::Player(p.id), p.bounds()));
        structures.chain(players).collect()
    }

    /// Nearest hit along a ray against structures and live players.
    ///
    /// A shooter's eye sits inside its own box, so callers pass their own id
    /// as `ignore`.
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignore: Option<PlayerId>,
    ) -> Option<RayHit<HitTarget>> {
        raycast_nearest(origin, direction, max_distance, self.colliders(ignore))
    }

    /// Boxes that block player movement.
    pub fn obstacles(&self) -> Vec<Aabb> {
        self.structures.bounds()
    }

    /// Feet position of the closest live player other than `id`.
    pub fn nearest_enemy(&self, id: PlayerId) -> Option<Vec3> {
        let me = self.player(id)?.position();
        self.players
            .iter()
            .filter(|p| p.alive && p.id != id)
            .map(|p| p.position())
            .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::building::{BuildMaterial, StructureKind};

    fn world() -> ArenaWorld {
        let mut world = ArenaWorld::new();
        world.add_player(Player::new(PlayerId(2), Vec3::new(0.0, 0.0, -10.0)));
        world.add_player(Player::new(PlayerId(1), Vec3::new(0.0, 0.0, 0.0)));
        world
    }

    #[test]
    fn test_players_sorted_by_id() {
        let w = world();
        assert_eq!(w.players[0].id, PlayerId(1));
        assert_eq!(w.player_index(PlayerId(2)), Some(1));
    }

    #[test]
    fn test_raycast_ignores_shooter() {
        let w = world();
        let shooter = w.player(PlayerId(1)).map(|p| p.eye_position()).unwrap_or_default();

        let hit = w.raycast(shooter, Vec3::NEG_Z, 100.0, Some(PlayerId(1)));
        assert_eq!(hit.map(|h| h.target), Some(HitTarget::Player(PlayerId(2))));

        // Without the ignore the shooter's own box is hit from inside
        let own = w.raycast(shooter, Vec3::NEG_Z, 100.0, None);
        assert_eq!(own.map(|h| h.target), Some(HitTarget::Player(PlayerId(1))));
    }

    #[test]
    fn test_structure_blocks_player() {
        let mut w = world();
        w.structures.insert(StructureKind::Wall, BuildMaterial::Brick, Vec3::new(0.0, 0.0, -5.0), 0.0);
        let eye = Vec3::new(0.0, 1.44, 0.0);
        let hit = w.raycast(eye, Vec3::NEG_Z, 100.0, Some(PlayerId(1)));
        assert!(matches!(hit.map(|h| h.target), Some(HitTarget::Structure(_))));
        assert!((hit.map(|h| h.distance).unwrap_or(0.0) - 4.95).abs() < 1e-4);
    }

    #[test]
    fn test_dead_players_not_hit() {
        let mut w = world();
        if let Some(p) = w.player_mut(PlayerId(2)) {
            p.alive = false;
        }
        let hit = w.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 100.0, Some(PlayerId(1)));
        assert!(hit.is_none());
        assert!(w.nearest_enemy(PlayerId(1)).is_none());
    }

    #[test]
    fn test_colliders_match_raycast_inputs() {
        let mut w = world();
        w.structures.insert(StructureKind::Floor, BuildMaterial::Wood, Vec3::ZERO, 0.0);
        let colliders = w.colliders(Some(PlayerId(1)));
        assert_eq!(colliders.len(), 2);
        assert!(matches!(colliders[0].0, HitTarget::Structure(_)));

        let eye = Vec3::new(0.0, 1.0, 0.0);
        for direction in [Vec3::NEG_Z, Vec3::NEG_Y] {
            let hit = w.raycast(eye, direction, 100.0, Some(PlayerId(1))).expect("hit");
            assert!(colliders.iter().any(|(target, _)| *target == hit.target));
        }
    }
}
