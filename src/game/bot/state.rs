//! Bot State Selection
//!
//! Weighted random choice between roaming behaviours, followed by forced
//! transitions that depend only on distance to the target. Randomness comes
//! in as a sample so the choice is a pure function.

use serde::{Deserialize, Serialize};

/// Bot behaviour states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotState {
    /// Slowly turning in place
    #[default]
    Idle,
    /// Walking a fixed loop of waypoints
    Patrol,
    /// Closing distance on the target
    Chase,
    /// Strafing and firing at the target
    Attack,
    /// Placing structures in front of itself
    Build,
    /// Running off in a random direction
    Reposition,
}

/// Bot tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    /// Target counts as seen inside this distance
    pub sight_range: f32,
    /// Attack is forced inside this distance
    pub attack_range: f32,
    /// Below this health building becomes more likely
    pub build_health_threshold: f32,
    /// Base weights for patrol, chase, build, reposition
    pub weights: [f32; 4],
    /// A state is re-rolled after this many seconds at the latest
    pub max_state_time: f32,
    /// Minimum seconds before the next re-roll
    pub think_interval: f32,
    /// Extra random seconds added to `think_interval`
    pub think_jitter: f32,
    /// Chase stops this close to the target
    pub chase_stop_distance: f32,
    /// Waypoints (x, z) walked while patrolling
    pub patrol_points: Vec<[f32; 2]>,
    /// Waypoint counts as reached inside this distance
    pub waypoint_radius: f32,
    /// Forward probe length for obstacle avoidance
    pub obstacle_probe: f32,
    /// Per-frame chance of jumping while attacking
    pub attack_jump_chance: f32,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            sight_range: 50.0,
            attack_range: 30.0,
            build_health_threshold: 100.0,
            weights: [0.6, 0.3, 0.1, 0.1],
            max_state_time: 5.0,
            think_interval: 2.0,
            think_jitter: 3.0,
            chase_stop_distance: 5.0,
            patrol_points: vec![[-20.0, -20.0], [20.0, -20.0], [20.0, 20.0], [-20.0, 20.0]],
            waypoint_radius: 2.0,
            obstacle_probe: 5.0,
            attack_jump_chance: 0.01,
        }
    }
}

const ROLLABLE: [BotState; 4] = [BotState::Patrol, BotState::Chase, BotState::Build, BotState::Reposition];

/// Picks the bot's next state.
///
/// With `Some(sample)` (uniform in `[0, 1)`) the state is re-rolled from the
/// weight table: patrol is halved and chase boosted 1.5x while the target is
/// within sight range, and build doubles when health is below the
/// threshold. With `None` the current state is kept. Either way the result
/// is then forced to `Attack` inside attack range, and out of `Attack` into
/// `Chase` beyond it.
///
/// # Arguments
/// * `state` - Current state
/// * `distance` - Horizontal distance to the target (`f32::INFINITY` if none)
/// * `health` - Bot's current health
/// * `sample` - Random sample for a re-roll, or `None` to skip it
/// * `settings` - Ranges, thresholds and weights
pub fn next_bot_state(
    state: BotState,
    distance: f32,
    health: f32,
    sample: Option<f32>,
    settings: &BotSettings,
) -> BotState {
    let mut next = match sample {
        Some(sample) => roll_state(distance, health, sample, settings),
        None => state,
    };

    if distance < settings.attack_range && next != BotState::Attack {
        next = BotState::Attack;
    } else if distance > settings.attack_range && next == BotState::Attack {
        next = BotState::Chase;
    }
    next
}

fn roll_state(distance: f32, health: f32, sample: f32, settings: &BotSettings) -> BotState {
    let mut weights = settings.weights;
    if distance < settings.sight_range {
        weights[0] *= 0.5;
        weights[1] *= 1.5;
    }
    if health < settings.build_health_threshold {
        weights[2] *= 2.0;
    }

    let total: f32 = weights.iter().sum();
    if total <= 0.0 {
        return BotState::Patrol;
    }

    let mut remaining = sample;
    for (state, weight) in ROLLABLE.iter().zip(weights) {
        let share = weight / total;
        if remaining < share {
            return *state;
        }
        remaining -= share;
    }
    BotState::Patrol
}
