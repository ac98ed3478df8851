//! Combat resolution system.
//!
//! Applies hit-scan shot records to the world: player damage, kill credit,
//! respawn scheduling and structure damage. Shots are resolved in order,
//! so a later pellet can hit something an earlier pellet already destroyed
//! only if the raycast saw it before the destruction.

use crate::game::types::{HitTarget, PlayerId, StructureId};
use crate::game::world::ArenaWorld;
use crate::physics::ShotRecord;

use super::event_queue::{EventQueue, ScheduledEvent};

/// A player was killed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillEvent {
    pub killer: PlayerId,
    pub victim: PlayerId,
}

/// What a batch of shots did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatOutcome {
    /// Total damage dealt to players
    pub player_damage: f32,
    /// Total damage dealt to structures
    pub structure_damage: f32,
    pub kills: Vec<KillEvent>,
    pub destroyed: Vec<StructureId>,
}

/// Stateless combat rules.
#[derive(Debug, Clone, Copy)]
pub struct CombatSystem {
    /// Seconds between death and respawn
    pub respawn_delay: f32,
}

impl CombatSystem {
    pub fn new(respawn_delay: f32) -> Self {
        Self { respawn_delay }
    }

    /// Applies every hit in `shots`.
    ///
    /// Hits on players already dead, or on structures already removed, are
    /// ignored.
    pub fn apply_shots(
        &self,
        world: &mut ArenaWorld,
        shots: &[ShotRecord<HitTarget, PlayerId>],
        now: f32,
        events: &mut EventQueue,
    ) -> CombatOutcome {
        let mut outcome = CombatOutcome::default();
        for shot in shots {
            let Some(hit) = &shot.hit else {
                continue;
            };
            match hit.target {
                HitTarget::Player(victim) => {
                    let Some(player) = world.player_mut(victim) else {
                        continue;
                    };
                    if !player.alive {
                        continue;
                    }
                    outcome.player_damage += shot.damage;
                    if player.take_damage(shot.damage) {
                        if let Some(killer) = world.player_mut(shot.shooter) {
                            if killer.id != victim {
                                killer.kills += 1;
                            }
                        }
                        events.schedule(now + self.respawn_delay, ScheduledEvent::Respawn { player: victim });
                        log::info!("{} killed {}", shot.shooter, victim);
                        outcome.kills.push(KillEvent {
                            killer: shot.shooter,
                            victim,
                        });
                    }
                }
                HitTarget::Structure(id) => {
                    if let Some(damage) = world.structures.damage(id, shot.damage) {
                        outcome.structure_damage += shot.damage;
                        if damage.destroyed {
                            outcome.destroyed.push(id);
                        }
                    }
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::arena_player::Player;
    use crate::game::building::{BuildMaterial, StructureKind};
    use crate::physics::RayHit;
    use glam::Vec3;

    fn shot(target: HitTarget, damage: f32) -> ShotRecord<HitTarget, PlayerId> {
        ShotRecord {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            hit: Some(RayHit {
                distance: 5.0,
                point: Vec3::new(0.0, 0.0, -5.0),
                normal: Vec3::Z,
                target,
            }),
            damage,
            shooter: PlayerId(1),
            range: 100.0,
        }
    }

    fn world() -> ArenaWorld {
        let mut world = ArenaWorld::new();
        world.add_player(Player::new(PlayerId(1), Vec3::ZERO));
        world.add_player(Player::new(PlayerId(2), Vec3::new(0.0, 0.0, -5.0)));
        world
    }

    #[test]
    fn test_kill_credits_and_schedules_respawn() {
        let mut w = world();
        let mut events = EventQueue::new();
        let combat = CombatSystem::new(3.0);
        if let Some(p) = w.player_mut(PlayerId(2)) {
            p.shield = 0.0;
        }

        let outcome = combat.apply_shots(&mut w, &[shot(HitTarget::Player(PlayerId(2)), 100.0)], 10.0, &mut events);
        assert_eq!(outcome.kills, vec![KillEvent { killer: PlayerId(1), victim: PlayerId(2) }]);
        assert_eq!(w.player(PlayerId(1)).map(|p| p.kills), Some(1));
        assert!(events.drain_due(12.9).is_empty());
        assert_eq!(events.drain_due(13.0), vec![ScheduledEvent::Respawn { player: PlayerId(2) }]);
    }

    #[test]
    fn test_dead_player_absorbs_nothing() {
        let mut w = world();
        let mut events = EventQueue::new();
        let combat = CombatSystem::new(3.0);
        if let Some(p) = w.player_mut(PlayerId(2)) {
            p.shield = 0.0;
        }
        let shots = [
            shot(HitTarget::Player(PlayerId(2)), 100.0),
            shot(HitTarget::Player(PlayerId(2)), 100.0),
        ];
        let outcome = combat.apply_shots(&mut w, &shots, 0.0, &mut events);
        assert_eq!(outcome.kills.len(), 1);
        assert_eq!(outcome.player_damage, 100.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_structure_destroyed_by_damage() {
        let mut w = world();
        let id = w.structures.insert(StructureKind::Wall, BuildMaterial::Wood, Vec3::new(0.0, 0.0, -3.0), 0.0);
        let mut events = EventQueue::new();
        let combat = CombatSystem::new(3.0);

        let shots: Vec<_> = (0..5).map(|_| shot(HitTarget::Structure(id), 30.0)).collect();
        let outcome = combat.apply_shots(&mut w, &shots, 0.0, &mut events);
        assert_eq!(outcome.destroyed, vec![id]);
        assert!(w.structures.get(id).is_none());

        // A sixth pellet aimed at the removed wall is dropped
        let late = combat.apply_shots(&mut w, &[shot(HitTarget::Structure(id), 30.0)], 0.0, &mut events);
        assert_eq!(late.structure_damage, 0.0);
    }

    #[test]
    fn test_misses_do_nothing() {
        let mut w = world();
        let mut events = EventQueue::new();
        let mut miss = shot(HitTarget::Player(PlayerId(2)), 50.0);
        miss.hit = None;
        let outcome = CombatSystem::new(3.0).apply_shots(&mut w, &[miss], 0.0, &mut events);
        assert_eq!(outcome, CombatOutcome::default());
    }
}
