//! Bot Controller
//!
//! Drives a player through the same [`PlayerIntent`] a human produces. The
//! controller reads the bot and its target but never mutates either.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};
use rand::Rng;

use super::state::{BotSettings, BotState, next_bot_state};
use crate::game::arena_player::Player;
use crate::game::input::PlayerIntent;

/// Height above the target's feet the bot aims at
const AIM_HEIGHT: f32 = 0.9;

/// Idle turn rate in radians per second
const IDLE_TURN_RATE: f32 = 0.5;

/// Per-bot decision state.
#[derive(Debug, Clone)]
pub struct BotController {
    pub settings: BotSettings,
    state: BotState,
    state_time: f32,
    next_think_at: f32,
    patrol_index: usize,
    reposition_yaw: f32,
}

impl Default for BotController {
    fn default() -> Self {
        Self::new(BotSettings::default())
    }
}

impl BotController {
    pub fn new(settings: BotSettings) -> Self {
        Self {
            settings,
            state: BotState::Idle,
            state_time: 0.0,
            next_think_at: 0.0,
            patrol_index: 0,
            reposition_yaw: 0.0,
        }
    }

    pub fn state(&self) -> BotState {
        self.state
    }

    /// Decide this frame's intent for `bot`.
    ///
    /// # Arguments
    /// * `bot` - The player being driven
    /// * `target` - Position of the enemy's feet, if one is alive
    /// * `now` - Simulation time in seconds
    /// * `dt` - Frame delta in seconds
    /// * `rng` - Source for re-rolls, jumps and reposition headings
    /// * `blocked` - Scene probe `(origin, direction, max_distance) -> hit?`
    pub fn update<R, F>(
        &mut self,
        bot: &Player,
        target: Option<Vec3>,
        now: f32,
        dt: f32,
        rng: &mut R,
        blocked: F,
    ) -> PlayerIntent
    where
        R: Rng + ?Sized,
        F: Fn(Vec3, Vec3, f32) -> bool,
    {
        let mut intent = PlayerIntent::default();
        if !bot.alive {
            return intent;
        }

        self.state_time += dt;
        let to_target = target.map(|t| t - bot.position());
        let distance = to_target
            .map(|d| Vec2::new(d.x, d.z).length())
            .unwrap_or(f32::INFINITY);

        let sample = if self.state_time > self.settings.max_state_time || now > self.next_think_at {
            self.next_think_at = now + self.settings.think_interval + rng.r#gen::<f32>() * self.settings.think_jitter;
            Some(rng.r#gen::<f32>())
        } else {
            None
        };
        let next = next_bot_state(self.state, distance, bot.health, sample, &self.settings);
        if next != self.state || sample.is_some() {
            self.enter(next, rng);
        }

        let mut desired_yaw = bot.aim.yaw;
        let mut desired_pitch = 0.0;
        match self.state {
            BotState::Idle => {
                desired_yaw += IDLE_TURN_RATE * dt;
            }
            BotState::Patrol => {
                if let Some(yaw) = self.patrol_heading(bot.position()) {
                    desired_yaw = yaw;
                    intent.movement.axis = Vec2::Y;
                }
            }
            BotState::Chase => {
                if let Some(d) = to_target {
                    desired_yaw = yaw_towards(d);
                    if distance > self.settings.chase_stop_distance {
                        intent.movement.axis = Vec2::Y;
                    }
                }
            }
            BotState::Attack => {
                if let (Some(d), Some(target)) = (to_target, target) {
                    desired_yaw = yaw_towards(d);
                    let aim_point = target + Vec3::Y * AIM_HEIGHT;
                    desired_pitch = pitch_towards(aim_point - bot.eye_position());
                }
                // Alternate strafing direction every second
                let strafe = if self.state_time % 2.0 < 1.0 { -0.5 } else { 0.5 };
                intent.movement.axis = Vec2::new(strafe, 0.0);
                intent.movement.jump = bot.body.grounded && rng.r#gen::<f32>() < self.settings.attack_jump_chance;
                intent.fire = true;
            }
            BotState::Build => {
                desired_yaw += self.state_time.sin() * 0.1;
                intent.build_confirm = true;
            }
            BotState::Reposition => {
                desired_yaw = self.reposition_yaw;
                intent.movement.axis = Vec2::Y;
            }
        }

        if intent.movement.has_movement() {
            let heading = yaw_forward(desired_yaw);
            if blocked(bot.eye_position(), heading, self.settings.obstacle_probe) {
                desired_yaw += FRAC_PI_2;
            }
        }

        let wants_build = self.state == BotState::Build;
        intent.toggle_build = bot.build.enabled != wants_build;
        intent.look_delta = Vec2::new(wrap_angle(desired_yaw - bot.aim.yaw), desired_pitch - bot.aim.pitch);
        intent
    }

    fn enter<R: Rng + ?Sized>(&mut self, state: BotState, rng: &mut R) {
        if state != self.state {
            log::trace!("bot {:?} -> {:?}", self.state, state);
        }
        self.state = state;
        self.state_time = 0.0;
        if state == BotState::Reposition {
            self.reposition_yaw = rng.r#gen::<f32>() * TAU;
        }
    }

    /// Heading to the current waypoint, advancing past reached ones.
    fn patrol_heading(&mut self, position: Vec3) -> Option<f32> {
        let count = self.settings.patrol_points.len();
        if count == 0 {
            return None;
        }
        let [x, z] = self.settings.patrol_points[self.patrol_index % count];
        let to_point = Vec3::new(x - position.x, 0.0, z - position.z);
        if to_point.length() < self.settings.waypoint_radius {
            self.patrol_index = (self.patrol_index + 1) % count;
            return None;
        }
        Some(yaw_towards(to_point))
    }
}

/// Yaw that makes the forward vector point along `d` on the XZ plane.
pub fn yaw_towards(d: Vec3) -> f32 {
    (-d.x).atan2(-d.z)
}

/// Pitch (positive up) that points along `d`.
pub fn pitch_towards(d: Vec3) -> f32 {
    let horizontal = Vec2::new(d.x, d.z).length();
    d.y.atan2(horizontal)
}

fn yaw_forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Wraps an angle into `[-π, π)`.
fn wrap_angle(a: f32) -> f32 {
    (a + PI).rem_euclid(TAU) - PI
}
