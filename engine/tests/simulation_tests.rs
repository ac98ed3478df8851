//! Frame driver integration tests
//!
//! Input folding, movement through the full step, bots and determinism.

use approx::assert_relative_eq;
use build_arena_engine::game::{
    ArenaConfig, ArenaSimulation, InputAction, IntentAccumulator, PlayerId,
};
use build_arena_engine::game::input::MovementKey;
use build_arena_engine::physics::Vec3;
use build_arena_engine::player::{CROUCH_HEIGHT, STANDING_HEIGHT, Stance};

const DT: f32 = 1.0 / 60.0;

fn open_arena() -> (ArenaSimulation, PlayerId) {
    let mut config = ArenaConfig::default();
    config.match_settings.structures.clear();
    config.match_settings.spawn_points = vec![Vec3::ZERO];
    let mut sim = ArenaSimulation::empty(config, 3);
    let id = sim.add_player(false);
    (sim, id)
}

fn position(sim: &ArenaSimulation, id: PlayerId) -> Vec3 {
    sim.world.player(id).map(|p| p.position()).unwrap_or(Vec3::NAN)
}

#[test]
fn test_forward_key_walks_toward_negative_z() {
    let (mut sim, id) = open_arena();
    let mut input = IntentAccumulator::new();
    input.apply(InputAction::Movement(MovementKey::Forward, true));

    for _ in 0..60 {
        let intent = input.take_intent();
        sim.step(DT, &[(id, intent)]);
    }
    let p = position(&sim, id);
    assert!(p.z < -4.0, "{:?}", p);
    assert_relative_eq!(p.x, 0.0, epsilon = 1e-4);

    let speed = sim.world.player(id).map_or(0.0, |p| p.body.horizontal_speed());
    assert_relative_eq!(speed, 5.0, epsilon = 1e-2);
}

#[test]
fn test_sprint_is_faster_than_walk() {
    let (mut walk_sim, walker) = open_arena();
    let (mut sprint_sim, sprinter) = open_arena();
    let mut walk = IntentAccumulator::new();
    let mut sprint = IntentAccumulator::new();
    walk.apply(InputAction::Movement(MovementKey::Forward, true));
    sprint.apply(InputAction::Movement(MovementKey::Forward, true));
    sprint.apply(InputAction::Sprint(true));

    for _ in 0..60 {
        walk_sim.step(DT, &[(walker, walk.take_intent())]);
        sprint_sim.step(DT, &[(sprinter, sprint.take_intent())]);
    }
    assert!(position(&sprint_sim, sprinter).z < position(&walk_sim, walker).z - 2.0);
}

#[test]
fn test_jump_leaves_ground_and_lands() {
    let (mut sim, id) = open_arena();
    sim.step(DT, &[]);
    let mut input = IntentAccumulator::new();
    input.apply(InputAction::Jump);
    sim.step(DT, &[(id, input.take_intent())]);
    assert!(position(&sim, id).y > 0.0);
    assert!(sim.world.player(id).is_some_and(|p| !p.body.grounded));

    for _ in 0..120 {
        sim.step(DT, &[(id, input.take_intent())]);
    }
    assert!(sim.world.player(id).is_some_and(|p| p.body.grounded));
    assert_relative_eq!(position(&sim, id).y, 0.0, epsilon = 1e-3);
}

#[test]
fn test_crouch_shrinks_body_in_place() {
    let (mut sim, id) = open_arena();
    let mut input = IntentAccumulator::new();
    sim.step(DT, &[]);
    input.apply(InputAction::Crouch(true));
    sim.step(DT, &[(id, input.take_intent())]);

    let p = sim.world.player(id).expect("player");
    assert_eq!(p.stance, Stance::Crouching);
    assert_relative_eq!(p.body.height, CROUCH_HEIGHT);
    assert_relative_eq!(p.eye_position().y, p.position().y + CROUCH_HEIGHT * 0.8, epsilon = 1e-5);

    input.apply(InputAction::Crouch(false));
    sim.step(DT, &[(id, input.take_intent())]);
    let p = sim.world.player(id).expect("player");
    assert_eq!(p.stance, Stance::Standing);
    assert_relative_eq!(p.body.height, STANDING_HEIGHT);
}

#[test]
fn test_look_input_clamps_pitch() {
    let (mut sim, id) = open_arena();
    let mut input = IntentAccumulator::new();
    input.apply(InputAction::Look { yaw: 0.5, pitch: 3.0 });
    sim.step(DT, &[(id, input.take_intent())]);
    let aim = sim.world.player(id).map(|p| p.aim).expect("player");
    assert_relative_eq!(aim.yaw, 0.5);
    assert_relative_eq!(aim.pitch, std::f32::consts::FRAC_PI_2);
}

#[test]
fn test_bot_match_is_deterministic() {
    let run = |seed: u64| {
        let mut sim = ArenaSimulation::empty(ArenaConfig::default(), seed);
        sim.add_player(true);
        sim.add_player(true);
        let mut shots = 0;
        for _ in 0..900 {
            shots += sim.step(DT, &[]).shots_fired;
        }
        let players: Vec<(Vec3, f32, f32, u32)> = sim
            .world
            .players
            .iter()
            .map(|p| (p.position(), p.health, p.shield, p.kills))
            .collect();
        (shots, players, sim.world.structures.len())
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn test_bots_stay_inside_world() {
    let mut sim = ArenaSimulation::new(ArenaConfig::default(), 5);
    for _ in 0..1200 {
        sim.step(DT, &[]);
    }
    let bounds = sim.config().physics.world_bounds;
    for p in &sim.world.players {
        let pos = p.position();
        assert!(pos.is_finite());
        assert!(pos.y >= bounds.min.y);
        assert!(pos.x.abs() <= bounds.max.x);
        assert!(pos.z.abs() <= bounds.max.z);
    }
    assert!(sim.bot_state(PlayerId(2)).is_some());
}
