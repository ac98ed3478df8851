//! Game Module
//!
//! Arena-specific systems that build on top of the engine: players,
//! structures, build mode, bots, combat and the frame driver.

pub mod arena_player;
pub mod bot;
pub mod builder;
pub mod building;
pub mod config;
pub mod input;
pub mod render;
pub mod state;
pub mod systems;
pub mod types;
pub mod ui;
pub mod world;

pub use arena_player::{MAX_HEALTH, MAX_SHIELD, Player, SHIELD_ABSORPTION};
pub use bot::{BotController, BotSettings, BotState, next_bot_state};
pub use builder::{BuildSettings, BuildSystem, PlaceError};
pub use building::{BuildMaterial, MaterialInventory, Structure, StructureKind, StructureSet};
pub use config::{ArenaConfig, ConfigError};
pub use input::{InputAction, IntentAccumulator, PlayerIntent};
pub use render::{ArenaSnapshot, GhostView, PlayerInstance, StructureInstance, Tracer};
pub use state::{ArenaSimulation, StepReport};
pub use systems::{CombatSystem, EventQueue, ScheduledEvent};
pub use types::{HitKind, HitTarget, PlayerId, StructureId};
pub use ui::HudState;
pub use world::ArenaWorld;
