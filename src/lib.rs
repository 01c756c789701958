// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Kiwi Island: the rule engine for a turn-based conservation game.
//!
//! A ranger explores a grid island, spending stamina to cross terrain,
//! carrying tools and food in a limited backpack, counting kiwis and
//! trapping introduced predators while avoiding hazards.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (play / show / validate)      │
//! ├─────────────────────────────────────┤
//! │   Level loader  │  Renderer         │
//! ├─────────────────────────────────────┤
//! │   Game: rules and state machine     │
//! ├─────────────────────────────────────┤
//! │   Island · Player · Occupant arena  │
//! └─────────────────────────────────────┘
//! ```
//!
//! Every gameplay action returns `bool` and never panics on bad input;
//! only level loading returns errors.

pub mod config;
pub mod error;
pub mod game;
pub mod level;
pub mod render;

pub use config::GameConfig;
pub use error::{LevelError, LevelResult};

// Re-export key game types at crate root for convenience
pub use game::{
    Game, GameEventListener, GameState, Island, ListenerId, MoveDirection, Occupant, OccupantId,
    OccupantKind, Player, PlayerSnapshot, Position, Terrain,
};
pub use level::{Level, LevelRotation, load_game};
