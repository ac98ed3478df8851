//! Hit-scan weapon ballistics
//!
//! Weapons fire instantaneous rays rather than simulated projectiles. Each
//! trigger pull produces one [`ShotRecord`] per pellet, resolved against the
//! scene by a caller-supplied raycast.
//!
//! # State Machine
//!
//! ```text
//!            magazine empty + reserve > 0, or manual reload
//!   Ready ----------------------------------------------> Reloading
//!     ^                                                      |
//!     +---- reload_time elapsed (rounds transferred) --------+
//!     +---- cancel_reload (nothing transferred) -------------+
//! ```
//!
//! # Example
//!
//! ```ignore
//! use build_arena_engine::physics::ballistics::{Aim, Weapon, WeaponKind};
//! use rand::SeedableRng;
//!
//! let mut rifle = Weapon::new(WeaponKind::AssaultRifle);
//! let mut aim = Aim::default();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let shots = rifle.shoot(&mut aim, eye, 1u32, now, &mut rng, |o, d, max| world.raycast(o, d, max));
//! ```

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::RayHit;

/// Pitch is clamped to straight up / straight down.
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2;

/// Shooter look angles in radians.
///
/// Yaw 0 faces -Z; positive pitch looks up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aim {
    pub pitch: f32,
    pub yaw: f32,
}

impl Aim {
    pub fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    /// Unit look direction including pitch.
    pub fn direction(&self) -> Vec3 {
        look_direction(self.pitch, self.yaw)
    }

    /// Unit forward vector on the XZ plane.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Unit right vector on the XZ plane.
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Applies a look delta and clamps pitch to ±90°.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }
}

/// Unit direction for the given pitch/yaw pair.
pub fn look_direction(pitch: f32, yaw: f32) -> Vec3 {
    Vec3::new(
        -yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
}

/// Random aim kick applied on every shot (radians, peak-to-peak).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RecoilImpulse {
    pub yaw: f32,
    pub pitch: f32,
}

/// Static weapon tuning. Shared by every instance of the same [`WeaponKind`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Damage per pellet
    pub damage: f32,
    /// Rounds per minute
    pub fire_rate_rpm: f32,
    pub magazine_size: u32,
    pub max_reserve_ammo: u32,
    /// Seconds to complete a reload
    pub reload_time: f32,
    /// Full spread cone angle in radians
    pub spread: f32,
    pub recoil: RecoilImpulse,
    /// Maximum hit distance in meters
    pub range: f32,
    /// Rays per trigger pull
    pub pellet_count: u32,
    /// Fires while the trigger is held
    pub automatic: bool,
    pub scoped: bool,
}

impl WeaponConfig {
    /// Minimum seconds between two shots.
    pub fn time_between_shots(&self) -> f32 {
        if self.fire_rate_rpm > 0.0 {
            60.0 / self.fire_rate_rpm
        } else {
            f32::INFINITY
        }
    }
}

/// The weapon catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    #[default]
    AssaultRifle,
    Shotgun,
    Smg,
    Sniper,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::AssaultRifle,
        WeaponKind::Shotgun,
        WeaponKind::Smg,
        WeaponKind::Sniper,
    ];

    /// Parses a weapon name. Unknown names fall back to the assault rifle.
    pub fn from_name(name: &str) -> Self {
        match name {
            "shotgun" => WeaponKind::Shotgun,
            "smg" => WeaponKind::Smg,
            "sniper" => WeaponKind::Sniper,
            _ => WeaponKind::AssaultRifle,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WeaponKind::AssaultRifle => "Assault Rifle",
            WeaponKind::Shotgun => "Shotgun",
            WeaponKind::Smg => "SMG",
            WeaponKind::Sniper => "Sniper Rifle",
        }
    }

    pub fn config(&self) -> WeaponConfig {
        match self {
            WeaponKind::AssaultRifle => WeaponConfig {
                damage: 30.0,
                fire_rate_rpm: 600.0,
                magazine_size: 30,
                max_reserve_ammo: 200,
                reload_time: 2.5,
                spread: 0.01,
                recoil: RecoilImpulse { yaw: 0.1, pitch: 0.05 },
                range: 500.0,
                pellet_count: 1,
                automatic: true,
                scoped: false,
            },
            WeaponKind::Shotgun => WeaponConfig {
                damage: 20.0,
                fire_rate_rpm: 70.0,
                magazine_size: 8,
                max_reserve_ammo: 32,
                reload_time: 4.0,
                spread: 0.08,
                recoil: RecoilImpulse { yaw: 0.3, pitch: 0.15 },
                range: 100.0,
                pellet_count: 8,
                automatic: false,
                scoped: false,
            },
            WeaponKind::Smg => WeaponConfig {
                damage: 22.0,
                fire_rate_rpm: 900.0,
                magazine_size: 30,
                max_reserve_ammo: 150,
                reload_time: 2.0,
                spread: 0.03,
                recoil: RecoilImpulse { yaw: 0.08, pitch: 0.04 },
                range: 300.0,
                pellet_count: 1,
                automatic: true,
                scoped: false,
            },
            WeaponKind::Sniper => WeaponConfig {
                damage: 100.0,
                fire_rate_rpm: 40.0,
                magazine_size: 1,
                max_reserve_ammo: 10,
                reload_time: 3.5,
                spread: 0.001,
                recoil: RecoilImpulse { yaw: 0.5, pitch: 0.25 },
                range: 1000.0,
                pellet_count: 1,
                automatic: false,
                scoped: true,
            },
        }
    }
}

/// One ray fired by a trigger pull.
///
/// `T` identifies hit targets, `S` identifies the shooter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRecord<T, S> {
    pub origin: Vec3,
    pub direction: Vec3,
    pub hit: Option<RayHit<T>>,
    pub damage: f32,
    pub shooter: S,
    /// Range of the weapon that fired, used to draw misses
    pub range: f32,
}

impl<T, S> ShotRecord<T, S> {
    /// Where a tracer for this shot should end.
    pub fn end_point(&self) -> Vec3 {
        match &self.hit {
            Some(hit) => hit.point,
            None => self.origin + self.direction * self.range,
        }
    }
}

/// Coarse weapon state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponState {
    Ready,
    Reloading,
}

/// A weapon in a player's loadout: immutable config plus ammo/reload state.
#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    kind: WeaponKind,
    config: WeaponConfig,
    ammo: u32,
    reserve_ammo: u32,
    /// Time the current reload started, if reloading
    reload_started_at: Option<f32>,
    last_shot_time: Option<f32>,
}

impl Weapon {
    /// Creates a weapon with a full magazine and full reserve.
    pub fn new(kind: WeaponKind) -> Self {
        Self::with_config(kind, kind.config())
    }

    /// Creates a weapon with custom tuning.
    pub fn with_config(kind: WeaponKind, config: WeaponConfig) -> Self {
        Self {
            kind,
            config,
            ammo: config.magazine_size,
            reserve_ammo: config.max_reserve_ammo,
            reload_started_at: None,
            last_shot_time: None,
        }
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn reserve_ammo(&self) -> u32 {
        self.reserve_ammo
    }

    /// Overrides the ammo counts, clamped to magazine and reserve capacity.
    pub fn set_ammo(&mut self, ammo: u32, reserve_ammo: u32) {
        self.ammo = ammo.min(self.config.magazine_size);
        self.reserve_ammo = reserve_ammo.min(self.config.max_reserve_ammo);
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_started_at.is_some()
    }

    pub fn state(&self) -> WeaponState {
        if self.is_reloading() {
            WeaponState::Reloading
        } else {
            WeaponState::Ready
        }
    }

    /// Fraction of the current reload completed, or `None` when not reloading.
    pub fn reload_progress(&self, now: f32) -> Option<f32> {
        self.reload_started_at
            .map(|start| ((now - start) / self.config.reload_time).clamp(0.0, 1.0))
    }

    /// True if a shot fired at `now` would go off.
    pub fn can_shoot(&self, now: f32) -> bool {
        if self.is_reloading() || self.ammo == 0 {
            return false;
        }
        match self.last_shot_time {
            Some(last) => now - last >= self.config.time_between_shots(),
            None => true,
        }
    }

    /// Pulls the trigger.
    ///
    /// On success: consumes one round, stamps the shot time, kicks `aim` by a
    /// random recoil, and casts one spread-perturbed ray per pellet from
    /// `eye` out to the weapon range through `cast`. Starts a reload if this
    /// emptied the magazine and reserve remains.
    ///
    /// Returns no records (and changes nothing) if the weapon cannot fire.
    ///
    /// # Arguments
    /// * `aim` - Shooter look angles, perturbed by recoil
    /// * `eye` - Ray origin
    /// * `shooter` - Identity stamped on every record
    /// * `now` - Simulation time in seconds
    /// * `rng` - Source for recoil and spread
    /// * `cast` - Scene raycast `(origin, direction, max_distance)`
    pub fn shoot<T, S, R, F>(
        &mut self,
        aim: &mut Aim,
        eye: Vec3,
        shooter: S,
        now: f32,
        rng: &mut R,
        mut cast: F,
    ) -> Vec<ShotRecord<T, S>>
    where
        S: Copy,
        R: Rng + ?Sized,
        F: FnMut(Vec3, Vec3, f32) -> Option<RayHit<T>>,
    {
        if !self.can_shoot(now) {
            return Vec::new();
        }

        self.ammo -= 1;
        self.last_shot_time = Some(now);

        let recoil = self.config.recoil;
        aim.rotate(
            recoil.yaw * (rng.r#gen::<f32>() - 0.5),
            recoil.pitch * (rng.r#gen::<f32>() - 0.5),
        );

        let mut shots = Vec::with_capacity(self.config.pellet_count as usize);
        for _ in 0..self.config.pellet_count {
            let direction = spread_direction(*aim, self.config.spread, rng);
            let hit = cast(eye, direction, self.config.range);
            shots.push(ShotRecord {
                origin: eye,
                direction,
                hit,
                damage: self.config.damage,
                shooter,
                range: self.config.range,
            });
        }

        if self.ammo == 0 && self.reserve_ammo > 0 {
            self.start_reload(now);
        }

        shots
    }

    /// Begins a reload. No-op if already reloading, full, or out of reserve.
    ///
    /// Returns true if a reload was started.
    pub fn start_reload(&mut self, now: f32) -> bool {
        if self.is_reloading() || self.ammo == self.config.magazine_size || self.reserve_ammo == 0 {
            return false;
        }
        self.reload_started_at = Some(now);
        log::debug!("{} reload started", self.kind.display_name());
        true
    }

    /// Completes a reload once its duration has elapsed.
    ///
    /// Returns true on the frame the reload completes.
    pub fn update_reload(&mut self, now: f32) -> bool {
        let Some(start) = self.reload_started_at else {
            return false;
        };
        if now - start < self.config.reload_time {
            return false;
        }

        let needed = self.config.magazine_size - self.ammo;
        let transferred = needed.min(self.reserve_ammo);
        self.ammo += transferred;
        self.reserve_ammo -= transferred;
        self.reload_started_at = None;
        log::debug!(
            "{} reloaded {} rounds ({})",
            self.kind.display_name(),
            transferred,
            self.ammo_string()
        );
        true
    }

    /// Abandons an in-progress reload without transferring any rounds.
    pub fn cancel_reload(&mut self) {
        self.reload_started_at = None;
    }

    /// Adds reserve ammo, capped at the reserve maximum.
    pub fn add_ammo(&mut self, amount: u32) {
        self.reserve_ammo = self
            .reserve_ammo
            .saturating_add(amount)
            .min(self.config.max_reserve_ammo);
    }

    /// HUD string in the form `"{mag}/{reserve}"`.
    pub fn ammo_string(&self) -> String {
        format!("{}/{}", self.ammo, self.reserve_ammo)
    }
}

/// Direction of one pellet: `aim` with yaw and pitch each perturbed uniformly
/// within `±spread / 2`.
pub fn spread_direction<R: Rng + ?Sized>(aim: Aim, spread: f32, rng: &mut R) -> Vec3 {
    let yaw = aim.yaw + (rng.r#gen::<f32>() - 0.5) * spread;
    let pitch = aim.pitch + (rng.r#gen::<f32>() - 0.5) * spread;
    look_direction(pitch, yaw)
}
