//! Arena Player Module
//!
//! First-person combatant for the build arena: a kinematic body, look
//! angles, health and shield, a weapon loadout, building materials and a
//! personal build state.

use glam::Vec3;

use super::builder::{BuildSettings, BuildSystem};
use super::building::MaterialInventory;
use super::types::PlayerId;
use crate::physics::{Aabb, Aim, KinematicBody, Weapon, WeaponKind};
use crate::player::{STANDING_HEIGHT, Stance};

/// Full health
pub const MAX_HEALTH: f32 = 100.0;
/// Full shield
pub const MAX_SHIELD: f32 = 100.0;
/// Fraction of incoming damage the shield soaks
pub const SHIELD_ABSORPTION: f32 = 0.7;
/// Collision radius in meters
pub const PLAYER_RADIUS: f32 = 0.5;
/// Eye height as a fraction of current body height
pub const EYE_HEIGHT_FRACTION: f32 = 0.8;

/// A combatant in the arena.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    /// Feet-centred collision body
    pub body: KinematicBody,
    pub aim: Aim,
    pub stance: Stance,
    pub health: f32,
    pub shield: f32,
    pub alive: bool,
    pub weapons: Vec<Weapon>,
    /// Index into `weapons`; out of range means unarmed
    pub current_weapon: usize,
    pub kills: u32,
    pub deaths: u32,
    pub materials: MaterialInventory,
    pub build: BuildSystem,
    /// Driven by a bot controller rather than external input
    pub is_bot: bool,
    /// Trigger state last frame; semi-automatic weapons fire on the press edge
    pub trigger_held: bool,
}

impl Player {
    /// Creates a standing player at `spawn` with full health and shield and
    /// no weapons.
    pub fn new(id: PlayerId, spawn: Vec3) -> Self {
        Self {
            id,
            body: KinematicBody::new(spawn, PLAYER_RADIUS, STANDING_HEIGHT),
            aim: Aim::default(),
            stance: Stance::Standing,
            health: MAX_HEALTH,
            shield: MAX_SHIELD,
            alive: true,
            weapons: Vec::new(),
            current_weapon: 0,
            kills: 0,
            deaths: 0,
            materials: MaterialInventory::default(),
            build: BuildSystem::default(),
            is_bot: false,
            trigger_held: false,
        }
    }

    /// Replaces the loadout with fresh weapons of the given kinds.
    pub fn with_weapons(mut self, kinds: &[WeaponKind]) -> Self {
        self.weapons = kinds.iter().map(|&k| Weapon::new(k)).collect();
        self.current_weapon = 0;
        self
    }

    pub fn with_build_settings(mut self, settings: BuildSettings) -> Self {
        self.build = BuildSystem::new(settings);
        self
    }

    pub fn as_bot(mut self) -> Self {
        self.is_bot = true;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }

    /// Camera position: feet plus 80% of current height.
    pub fn eye_position(&self) -> Vec3 {
        self.body.position + Vec3::Y * (self.body.height * EYE_HEIGHT_FRACTION)
    }

    /// Unit forward on the XZ plane.
    pub fn forward(&self) -> Vec3 {
        self.aim.forward()
    }

    /// Unit right on the XZ plane.
    pub fn right(&self) -> Vec3 {
        self.aim.right()
    }

    /// Unit look direction including pitch.
    pub fn look_direction(&self) -> Vec3 {
        self.aim.direction()
    }

    /// The equipped weapon, or `None` when the slot index is empty.
    pub fn equipped_weapon(&self) -> Option<&Weapon> {
        self.weapons.get(self.current_weapon)
    }

    pub fn equipped_weapon_mut(&mut self) -> Option<&mut Weapon> {
        self.weapons.get_mut(self.current_weapon)
    }

    /// Switch weapon slot, cancelling any reload on the weapon being holstered.
    pub fn select_weapon(&mut self, slot: usize) {
        if slot == self.current_weapon {
            return;
        }
        if let Some(weapon) = self.equipped_weapon_mut() {
            weapon.cancel_reload();
        }
        self.current_weapon = slot;
    }

    /// Applies damage, shield first.
    ///
    /// The shield soaks 70% of the hit up to its remaining value; the part
    /// of the hit it covered is removed from what reaches health.
    ///
    /// # Returns
    /// True if this hit killed the player.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.alive {
            return false;
        }

        let mut amount = amount.max(0.0);
        if self.shield > 0.0 {
            let shield_damage = self.shield.min(amount * SHIELD_ABSORPTION);
            self.shield -= shield_damage;
            amount = (amount - shield_damage / SHIELD_ABSORPTION).max(0.0);
        }

        self.health -= amount;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
            self.deaths += 1;
            return true;
        }
        false
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(MAX_HEALTH);
    }

    pub fn add_shield(&mut self, amount: f32) {
        self.shield = (self.shield + amount).min(MAX_SHIELD);
    }

    /// Brings the player back at `spawn` with full health and shield.
    pub fn respawn(&mut self, spawn: Vec3) {
        self.body.position = spawn;
        self.body.velocity = Vec3::ZERO;
        self.body.grounded = false;
        self.health = MAX_HEALTH;
        self.shield = MAX_SHIELD;
        self.alive = true;
    }

    /// HUD strings `"{mag}/{reserve}"` for every weapon in the loadout.
    pub fn ammo_strings(&self) -> Vec<String> {
        self.weapons.iter().map(Weapon::ammo_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(PlayerId(1), Vec3::new(0.0, 2.0, 0.0))
    }

    #[test]
    fn test_shield_absorbs_first() {
        let mut p = player();
        let died = p.take_damage(50.0);
        assert!(!died);
        assert!((p.shield - 65.0).abs() < 1e-4);
        assert!((p.health - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_damage_overflows_depleted_shield() {
        let mut p = player();
        p.shield = 7.0;
        // Shield takes 7, covering 10 of the 40; 30 reaches health
        p.take_damage(40.0);
        assert_eq!(p.shield, 0.0);
        assert!((p.health - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_shield_full_damage() {
        let mut p = player();
        p.shield = 0.0;
        p.take_damage(30.0);
        assert!((p.health - 70.0).abs() < 1e-5);
    }

    #[test]
    fn test_lethal_damage() {
        let mut p = player();
        p.shield = 0.0;
        assert!(p.take_damage(150.0));
        assert!(!p.alive);
        assert_eq!(p.health, 0.0);
        assert_eq!(p.deaths, 1);

        // Dead players cannot die again
        assert!(!p.take_damage(10.0));
        assert_eq!(p.deaths, 1);
    }

    #[test]
    fn test_heal_and_shield_clamp() {
        let mut p = player();
        p.health = 90.0;
        p.heal(50.0);
        assert_eq!(p.health, MAX_HEALTH);
        p.shield = 10.0;
        p.add_shield(500.0);
        assert_eq!(p.shield, MAX_SHIELD);
    }

    #[test]
    fn test_respawn_restores_state() {
        let mut p = player();
        p.shield = 0.0;
        p.take_damage(500.0);
        p.body.velocity = Vec3::new(1.0, -3.0, 2.0);

        p.respawn(Vec3::new(30.0, 2.0, 30.0));
        assert!(p.alive);
        assert_eq!(p.health, MAX_HEALTH);
        assert_eq!(p.shield, MAX_SHIELD);
        assert_eq!(p.position(), Vec3::new(30.0, 2.0, 30.0));
        assert_eq!(p.body.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_eye_position_tracks_height() {
        let mut p = player();
        assert!((p.eye_position().y - (2.0 + 1.8 * 0.8)).abs() < 1e-5);
        p.body.height = 1.2;
        assert!((p.eye_position().y - (2.0 + 1.2 * 0.8)).abs() < 1e-5);
    }

    #[test]
    fn test_unknown_slot_is_unarmed() {
        let mut p = player().with_weapons(&[WeaponKind::AssaultRifle, WeaponKind::Shotgun]);
        assert_eq!(p.equipped_weapon().map(|w| w.kind()), Some(WeaponKind::AssaultRifle));
        p.select_weapon(3);
        assert!(p.equipped_weapon().is_none());
    }

    #[test]
    fn test_switching_cancels_reload() {
        let mut p = player().with_weapons(&[WeaponKind::AssaultRifle, WeaponKind::Shotgun]);
        if let Some(w) = p.equipped_weapon_mut() {
            w.set_ammo(0, 50);
            w.start_reload(0.0);
        }
        p.select_weapon(1);
        assert!(!p.weapons[0].is_reloading());
        assert_eq!(p.ammo_strings(), vec!["0/50".to_string(), "8/32".to_string()]);
    }
}
