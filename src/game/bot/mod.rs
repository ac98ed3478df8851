//! Bot Module
//!
//! Computer-controlled opponents. State selection is a pure function of the
//! situation plus a random sample; the controller turns the chosen state
//! into a [`PlayerIntent`](crate::game::input::PlayerIntent).

pub mod controller;
pub mod state;

pub use controller::{BotController, pitch_towards, yaw_towards};
pub use state::{BotSettings, BotState, next_bot_state};
