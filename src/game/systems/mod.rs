//! Game systems — self-contained modules that own state and logic.

pub mod combat_system;
pub mod event_queue;

pub use combat_system::{CombatOutcome, CombatSystem, KillEvent};
pub use event_queue::{EventQueue, ScheduledEvent};
