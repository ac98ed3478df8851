//! Game State
//!
//! The frame driver. [`ArenaSimulation`] owns the world, the clock, the
//! random source and every per-frame system, and advances them together in
//! [`ArenaSimulation::step`]:
//!
//! 1. Clamp `dt`, advance time, clear last frame's tracers
//! 2. Release due respawns
//! 3. Ask bot controllers for their intents
//! 4. Per live player: look, loadout and build-mode input, stance,
//!    movement, collision resolution
//! 5. Per live player: reload, build placement or fire, damage
//! 6. Advance reload timers on every weapon

use std::collections::HashMap;

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::game::arena_player::Player;
use crate::game::bot::{BotController, BotState};
use crate::game::building::MaterialInventory;
use crate::game::config::ArenaConfig;
use crate::game::input::PlayerIntent;
use crate::game::render::{ArenaSnapshot, GhostView, PlayerInstance, StructureInstance, Tracer};
use crate::game::systems::{CombatSystem, EventQueue, KillEvent, ScheduledEvent};
use crate::game::types::{HitTarget, PlayerId, StructureId};
use crate::game::ui::HudState;
use crate::game::world::ArenaWorld;
use crate::physics::{CollisionResolver, raycast_nearest};
use crate::player::PlayerMovementController;

/// What happened during one [`ArenaSimulation::step`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// The delta actually simulated, after clamping
    pub dt: f32,
    /// Rays cast by weapons this frame
    pub shots_fired: usize,
    pub kills: Vec<KillEvent>,
    pub destroyed: Vec<StructureId>,
    pub placed: Vec<StructureId>,
    pub respawned: Vec<PlayerId>,
}

/// Single-threaded arena simulation.
pub struct ArenaSimulation {
    config: ArenaConfig,
    pub world: ArenaWorld,
    time: f64,
    frame: u64,
    rng: StdRng,
    events: EventQueue,
    bots: Vec<(PlayerId, BotController)>,
    movement: PlayerMovementController,
    resolver: CollisionResolver,
    combat: CombatSystem,
    tracers: Vec<Tracer>,
}

impl ArenaSimulation {
    /// Creates the stock match: the configured layout, a local player and
    /// one bot.
    pub fn new(config: ArenaConfig, seed: u64) -> Self {
        let mut sim = Self::empty(config, seed);
        sim.add_player(false);
        sim.add_player(true);
        sim
    }

    /// Creates the configured layout with no players.
    pub fn empty(config: ArenaConfig, seed: u64) -> Self {
        let mut world = ArenaWorld::new();
        for spec in &config.match_settings.structures {
            world.structures.insert(spec.kind, spec.material, spec.position, spec.rotation);
        }
        log::info!(
            "arena ready: {} structures, seed {}",
            world.structures.len(),
            seed
        );

        Self {
            movement: PlayerMovementController::with_settings(config.movement),
            resolver: CollisionResolver::new(config.physics.gravity, config.physics.world_bounds),
            combat: CombatSystem::new(config.match_settings.respawn_delay),
            config,
            world,
            time: 0.0,
            frame: 0,
            rng: StdRng::seed_from_u64(seed),
            events: EventQueue::new(),
            bots: Vec::new(),
            tracers: Vec::new(),
        }
    }

    /// Adds a player at the next spawn point.
    ///
    /// The first player gets the primary loadout, everyone else the
    /// secondary one.
    pub fn add_player(&mut self, is_bot: bool) -> PlayerId {
        let slot = self.world.players.len();
        let spawn = self.config.match_settings.spawn_point(slot);
        self.add_player_at(spawn, is_bot)
    }

    /// Adds a player at `spawn`.
    pub fn add_player_at(&mut self, spawn: Vec3, is_bot: bool) -> PlayerId {
        let slot = self.world.players.len();
        let id = PlayerId(
            self.world
                .players
                .iter()
                .map(|p| p.id.0)
                .max()
                .map_or(1, |max| max + 1),
        );
        let settings = &self.config.match_settings;
        let loadout = if slot == 0 {
            &settings.primary_loadout
        } else {
            &settings.secondary_loadout
        };

        let mut player = Player::new(id, spawn)
            .with_weapons(loadout)
            .with_build_settings(self.config.building);
        player.materials = MaterialInventory::filled(settings.starting_materials);
        if is_bot {
            player = player.as_bot();
            self.bots.push((id, BotController::new(self.config.bot.clone())));
        }
        log::info!("{} joined at {:?}{}", id, spawn, if is_bot { " (bot)" } else { "" });
        self.world.add_player(player);
        id
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Simulation time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Simulation time at the resolution the systems work in.
    fn now(&self) -> f32 {
        self.time as f32
    }

    /// Number of steps taken.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Tracers fired during the last step.
    pub fn tracers(&self) -> &[Tracer] {
        &self.tracers
    }

    /// Current decision state of a bot, or `None` for humans.
    pub fn bot_state(&self, id: PlayerId) -> Option<BotState> {
        self.bots.iter().find(|(bot, _)| *bot == id).map(|(_, c)| c.state())
    }

    /// Advance the arena by one frame.
    ///
    /// # Arguments
    /// * `dt` - Frame delta in seconds, clamped to `[0, max_frame_delta]`
    /// * `intents` - External input per player; players without an entry
    ///   (and bots) still fall and collide
    pub fn step(&mut self, dt: f32, intents: &[(PlayerId, PlayerIntent)]) -> StepReport {
        let dt = dt.clamp(0.0, self.config.physics.max_frame_delta);
        self.time += f64::from(dt);
        self.frame += 1;
        self.tracers.clear();
        let now = self.now();

        let mut report = StepReport {
            dt,
            ..Default::default()
        };

        for event in self.events.drain_due(now) {
            match event {
                ScheduledEvent::Respawn { player } => {
                    if self.respawn(player) {
                        report.respawned.push(player);
                    }
                }
            }
        }

        let mut frame_intents: HashMap<PlayerId, PlayerIntent> = intents.iter().copied().collect();
        frame_intents.extend(self.bot_intents(now, dt));

        let ids: Vec<PlayerId> = self.world.players.iter().map(|p| p.id).collect();
        for &id in &ids {
            let intent = frame_intents.get(&id).copied().unwrap_or_default();
            self.move_player(id, &intent, dt);
        }
        for &id in &ids {
            let intent = frame_intents.get(&id).copied().unwrap_or_default();
            self.act(id, &intent, now, &mut report);
        }

        for player in &mut self.world.players {
            for weapon in &mut player.weapons {
                weapon.update_reload(now);
            }
        }

        log::trace!("frame {} t={:.3} shots={}", self.frame, now, report.shots_fired);
        report
    }

    fn bot_intents(&mut self, now: f32, dt: f32) -> Vec<(PlayerId, PlayerIntent)> {
        let world = &self.world;
        let rng = &mut self.rng;
        let mut intents = Vec::with_capacity(self.bots.len());
        for (id, controller) in &mut self.bots {
            let Some(bot) = world.player(*id) else {
                continue;
            };
            let target = world.nearest_enemy(*id);
            let ignore = Some(*id);
            let blocked = |origin: Vec3, direction: Vec3, max: f32| {
                world
                    .raycast(origin, direction, max, ignore)
                    .is_some_and(|hit| matches!(hit.target, HitTarget::Structure(_)))
            };
            intents.push((*id, controller.update(bot, target, now, dt, &mut *rng, blocked)));
        }
        intents
    }

    /// Look, loadout, build-mode toggles, stance, movement and resolution.
    fn move_player(&mut self, id: PlayerId, intent: &PlayerIntent, dt: f32) {
        let Some(index) = self.world.player_index(id) else {
            return;
        };
        let obstacles = self.world.obstacles();
        let player = &mut self.world.players[index];
        if !player.alive {
            return;
        }

        player.aim.rotate(intent.look_delta.x, intent.look_delta.y);
        if let Some(slot) = intent.select_weapon {
            player.select_weapon(slot);
        }
        if intent.toggle_build {
            player.build.toggle();
        }
        if let Some(kind) = intent.select_structure {
            player.build.switch_kind(kind);
        }
        if let Some(material) = intent.select_material {
            player.build.switch_material(material);
        }
        if intent.rotate_build {
            player.build.rotate();
        }

        player.stance = self
            .movement
            .apply_stance(&mut player.body, intent.movement.crouch, &obstacles);
        self.movement
            .update(&mut player.body, &intent.movement, player.aim.yaw, dt);
        self.resolver.resolve(&mut player.body, dt, &obstacles);
    }

    /// Reload, build or fire.
    fn act(&mut self, id: PlayerId, intent: &PlayerIntent, now: f32, report: &mut StepReport) {
        let Some(index) = self.world.player_index(id) else {
            return;
        };
        let player = &self.world.players[index];
        if !player.alive {
            self.world.players[index].trigger_held = intent.fire;
            return;
        }

        if intent.reload {
            if let Some(weapon) = self.world.players[index].equipped_weapon_mut() {
                weapon.start_reload(now);
            }
        }

        if self.world.players[index].build.enabled {
            self.build(index, intent, now, report);
        } else if intent.fire {
            self.fire(index, now, report);
        }
        self.world.players[index].trigger_held = intent.fire;
    }

    fn build(&mut self, index: usize, intent: &PlayerIntent, now: f32, report: &mut StepReport) {
        let player = &self.world.players[index];
        let id = player.id;
        let eye = player.eye_position();
        let direction = player.look_direction();
        let bounds = player.bounds();
        let range = player.build.settings.build_range;
        let hit = self.world.raycast(eye, direction, range, Some(id));

        let ArenaWorld { structures, players } = &mut self.world;
        let player = &mut players[index];
        player.build.update(eye, direction, hit.as_ref(), &bounds, structures);
        if !intent.build_confirm {
            return;
        }
        match player.build.try_place(now, &mut player.materials, &bounds, structures) {
            Ok(structure) => report.placed.push(structure),
            Err(reason) => log::debug!("{} placement refused: {:?}", id, reason),
        }
    }

    fn fire(&mut self, index: usize, now: f32, report: &mut StepReport) {
        let id = self.world.players[index].id;
        let colliders = self.world.colliders(Some(id));

        let player = &mut self.world.players[index];
        let eye = player.eye_position();
        let slot = player.current_weapon;
        let was_held = player.trigger_held;
        let Some(weapon) = player.weapons.get_mut(slot) else {
            return;
        };
        if !weapon.config().automatic && was_held {
            return;
        }

        let shots = weapon.shoot(&mut player.aim, eye, id, now, &mut self.rng, |origin, direction, max| {
            raycast_nearest(origin, direction, max, colliders.iter().copied())
        });
        if shots.is_empty() {
            return;
        }

        report.shots_fired += shots.len();
        self.tracers.extend(shots.iter().map(|shot| Tracer {
            shooter: id,
            start: shot.origin,
            end: shot.end_point(),
            hit: shot.hit.as_ref().map(|h| h.target.kind()),
        }));

        let outcome = self.combat.apply_shots(&mut self.world, &shots, now, &mut self.events);
        report.kills.extend(outcome.kills);
        report.destroyed.extend(outcome.destroyed);
    }

    fn respawn(&mut self, id: PlayerId) -> bool {
        let Some(index) = self.world.player_index(id) else {
            return false;
        };
        let spawn = self.config.match_settings.spawn_point(index);
        let player = &mut self.world.players[index];
        player.respawn(spawn);
        player.build.set_enabled(false);
        player.trigger_held = false;
        log::info!("{} respawned at {:?}", id, spawn);
        true
    }

    /// Read-only view of the current frame for a renderer.
    pub fn snapshot(&self) -> ArenaSnapshot {
        let ghosts = self
            .world
            .players
            .iter()
            .filter(|p| p.alive && p.build.enabled)
            .filter_map(|p| {
                p.build.ghost.as_ref().map(|ghost| GhostView {
                    owner: p.id,
                    kind: ghost.kind,
                    material: ghost.material,
                    position: ghost.position(),
                    rotation: ghost.rotation(),
                    valid: p.build.can_build,
                })
            })
            .collect();

        ArenaSnapshot {
            time: self.now(),
            frame: self.frame,
            structures: self.world.structures.iter().map(StructureInstance::from_structure).collect(),
            players: self
                .world
                .players
                .iter()
                .filter(|p| p.alive)
                .map(PlayerInstance::from_player)
                .collect(),
            ghosts,
            tracers: self.tracers.clone(),
        }
    }

    /// HUD data for one player.
    pub fn hud(&self, id: PlayerId) -> Option<HudState> {
        self.world.player(id).map(|p| HudState::from_player(p, self.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn open_config() -> ArenaConfig {
        let mut config = ArenaConfig::default();
        config.match_settings.structures.clear();
        config.match_settings.spawn_points = vec![Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0)];
        config
    }

    #[test]
    fn test_stock_match_setup() {
        let sim = ArenaSimulation::new(ArenaConfig::default(), 1);
        assert_eq!(sim.world.structures.len(), 125);
        assert_eq!(sim.world.players.len(), 2);
        assert!(!sim.world.players[0].is_bot);
        assert!(sim.world.players[1].is_bot);
        assert_eq!(sim.world.players[0].weapons.len(), 4);
        assert_eq!(sim.world.players[1].weapons.len(), 2);
        assert_eq!(sim.bot_state(PlayerId(2)), Some(BotState::Idle));
        assert_eq!(sim.bot_state(PlayerId(1)), None);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut sim = ArenaSimulation::empty(open_config(), 1);
        let report = sim.step(5.0, &[]);
        assert_eq!(report.dt, 0.1);
        assert!((sim.time() - 0.1).abs() < 1e-6);
        let report = sim.step(-1.0, &[]);
        assert_eq!(report.dt, 0.0);
        assert_eq!(sim.frame(), 2);
    }

    #[test]
    fn test_clock_keeps_precision_over_an_hour() {
        let mut sim = ArenaSimulation::empty(open_config(), 1);
        let dt: f32 = 1.0 / 60.0;
        let steps = 60 * 60 * 60;
        for _ in 0..steps {
            sim.step(dt, &[]);
        }
        let expected = f64::from(dt) * f64::from(steps);
        assert!((sim.time() - expected).abs() < 1e-6);
        assert!((sim.time() - 3600.0).abs() < 1e-3);
    }

    #[test]
    fn test_players_without_input_fall() {
        let mut sim = ArenaSimulation::empty(open_config(), 1);
        let id = sim.add_player_at(Vec3::new(0.0, 5.0, 0.0), false);
        for _ in 0..120 {
            sim.step(DT, &[]);
        }
        let (grounded, position) = sim.world.player(id).map(|p| (p.body.grounded, p.body.position)).unwrap();
        assert!(grounded);
        assert!(position.y.abs() < 1e-3);
    }

    #[test]
    fn test_tracers_last_one_frame() {
        let mut sim = ArenaSimulation::empty(open_config(), 3);
        let shooter = sim.add_player(false);
        sim.add_player(false);
        let fire = PlayerIntent {
            fire: true,
            ..Default::default()
        };
        let report = sim.step(DT, &[(shooter, fire)]);
        assert_eq!(report.shots_fired, 1);
        assert_eq!(sim.tracers().len(), 1);
        assert_eq!(sim.snapshot().tracers.len(), 1);

        sim.step(DT, &[]);
        assert!(sim.tracers().is_empty());
    }

    #[test]
    fn test_semi_automatic_needs_fresh_press() {
        let mut sim = ArenaSimulation::empty(open_config(), 4);
        sim.add_player(false);
        let id = sim.add_player(false);
        // Second player carries the secondary loadout; slot 1 is the shotgun
        let select = PlayerIntent {
            select_weapon: Some(1),
            ..Default::default()
        };
        sim.step(DT, &[(id, select)]);

        let hold = PlayerIntent {
            fire: true,
            ..Default::default()
        };
        let mut fired = 0;
        for _ in 0..120 {
            fired += sim.step(DT, &[(id, hold)]).shots_fired;
        }
        assert_eq!(fired, 8);
    }

    #[test]
    fn test_hud_and_snapshot() {
        let mut sim = ArenaSimulation::new(ArenaConfig::default(), 5);
        sim.step(DT, &[]);
        let hud = sim.hud(PlayerId(1)).unwrap();
        assert_eq!(hud.current_ammo(), "30/200");
        assert!(sim.hud(PlayerId(9)).is_none());

        let snapshot = sim.snapshot();
        assert_eq!(snapshot.frame, 1);
        assert_eq!(snapshot.structures.len(), 125);
        assert_eq!(snapshot.players.len(), 2);
    }
}
