//! HUD State
//!
//! Plain data the host draws as the heads-up display: vitals, score,
//! per-weapon ammo and build status.

use crate::game::arena_player::Player;
use crate::game::building::{BuildMaterial, MaterialInventory, StructureKind};
use crate::physics::WeaponKind;

/// One loadout slot.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponHud {
    pub kind: WeaponKind,
    pub name: &'static str,
    /// `"{mag}/{reserve}"`
    pub ammo: String,
    pub reloading: bool,
    /// Reload completion 0..=1 while reloading
    pub reload_progress: Option<f32>,
}

/// Everything the HUD shows for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct HudState {
    pub health: f32,
    pub shield: f32,
    pub alive: bool,
    pub kills: u32,
    pub deaths: u32,
    pub weapons: Vec<WeaponHud>,
    /// Equipped slot, or `None` when unarmed
    pub current_weapon: Option<usize>,
    pub build_mode: bool,
    pub build_kind: StructureKind,
    pub build_material: BuildMaterial,
    pub can_build: bool,
    pub materials: MaterialInventory,
}

impl HudState {
    /// Reads the HUD view of `player` at simulation time `now`.
    pub fn from_player(player: &Player, now: f32) -> Self {
        let weapons = player
            .weapons
            .iter()
            .map(|w| WeaponHud {
                kind: w.kind(),
                name: w.kind().display_name(),
                ammo: w.ammo_string(),
                reloading: w.is_reloading(),
                reload_progress: w.reload_progress(now),
            })
            .collect();

        Self {
            health: player.health,
            shield: player.shield,
            alive: player.alive,
            kills: player.kills,
            deaths: player.deaths,
            weapons,
            current_weapon: player.equipped_weapon().map(|_| player.current_weapon),
            build_mode: player.build.enabled,
            build_kind: player.build.kind,
            build_material: player.build.material,
            can_build: player.build.enabled && player.build.can_build,
            materials: player.materials,
        }
    }

    /// Ammo string of the equipped weapon, or `"-"` when unarmed.
    pub fn current_ammo(&self) -> &str {
        self.current_weapon
            .and_then(|slot| self.weapons.get(slot))
            .map_or("-", |w| w.ammo.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::PlayerId;
    use glam::Vec3;

    #[test]
    fn test_hud_reflects_player() {
        let mut player = Player::new(PlayerId(1), Vec3::ZERO).with_weapons(&[WeaponKind::AssaultRifle, WeaponKind::Sniper]);
        player.take_damage(50.0);
        player.kills = 2;

        let hud = HudState::from_player(&player, 0.0);
        assert!((hud.shield - 65.0).abs() < 1e-4);
        assert_eq!(hud.health, 100.0);
        assert_eq!(hud.kills, 2);
        assert_eq!(hud.weapons.len(), 2);
        assert_eq!(hud.weapons[1].ammo, "1/10");
        assert_eq!(hud.current_ammo(), "30/200");
        assert!(!hud.build_mode);
    }

    #[test]
    fn test_unarmed_hud() {
        let mut player = Player::new(PlayerId(1), Vec3::ZERO).with_weapons(&[WeaponKind::Smg]);
        player.select_weapon(4);
        let hud = HudState::from_player(&player, 0.0);
        assert_eq!(hud.current_weapon, None);
        assert_eq!(hud.current_ammo(), "-");
    }

    #[test]
    fn test_reload_progress_shown() {
        let mut player = Player::new(PlayerId(1), Vec3::ZERO).with_weapons(&[WeaponKind::AssaultRifle]);
        if let Some(w) = player.equipped_weapon_mut() {
            w.set_ammo(0, 100);
            w.start_reload(1.0);
        }
        let hud = HudState::from_player(&player, 2.25);
        assert!(hud.weapons[0].reloading);
        assert!((hud.weapons[0].reload_progress.unwrap_or(0.0) - 0.5).abs() < 1e-4);
    }
}
