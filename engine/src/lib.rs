//! Build Arena Engine Library
//!
//! Simulation core for a first-person build-battle arena: kinematic player
//! movement, collision against placed structures, hit-scan weapons and grid
//! building. Everything is single-threaded and frame-driven; rendering and
//! input capture belong to the host.
//!
//! # Modules
//!
//! - [`physics`] - AABBs, ray queries, the collision resolver and weapon ballistics
//! - [`player`] - Camera-relative movement and stance control
//! - [`world`] - Grid snapping
//! - [`logging`] - `env_logger` setup for binaries and tests
//! - [`game`] - Arena rules: players, structures, bots, combat and the frame driver
//!
//! # Example
//!
//! ```ignore
//! use build_arena_engine::game::{ArenaConfig, ArenaSimulation, PlayerId, PlayerIntent};
//!
//! let mut sim = ArenaSimulation::new(ArenaConfig::default(), 42);
//! let mut intent = PlayerIntent::default();
//! intent.movement.axis.y = 1.0;
//! intent.fire = true;
//!
//! for _ in 0..60 {
//!     let report = sim.step(1.0 / 60.0, &[(PlayerId(1), intent)]);
//!     for kill in &report.kills {
//!         println!("{} killed {}", kill.killer, kill.victim);
//!     }
//! }
//! let hud = sim.hud(PlayerId(1));
//! ```

pub mod logging;
pub mod physics;
pub mod player;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export world types for convenience
pub use world::{GridConfig, snap_to_grid};
// Re-export player types
pub use player::PlayerMovementController;
// Re-export the frame driver
pub use game::{ArenaConfig, ArenaSimulation};
