//! Game layer for Kiwi Island.
//!
//! Implements the conservation game rules:
//! - Island grid with terrain, visibility, and per-tile capacity
//! - Occupants (tools, food, hazards, kiwis, predators, fauna) in an arena
//! - Player stamina and backpack
//! - Win/lose state machine and change notification

mod events;
mod invariants;
mod island;
mod occupant;
mod player;
mod position;
mod reward;
mod state;
mod terrain;

pub use events::{GameEventListener, ListenerId};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use island::{DEFAULT_MAX_OCCUPANTS, Island, MAX_OCCUPANTS_LIMIT, Tile};
pub use occupant::{
    BREAK_TRAP_HAZARD, FATAL_IMPACT, HazardEffect, Location, Occupant, OccupantArena, OccupantId,
    OccupantKind, ToolKind,
};
pub use player::{Player, PlayerSnapshot, PlayerSpec};
pub use position::{Bounds, MoveDirection, Position};
pub use reward::{
    REWARD_CODE_ALPHABET, REWARD_CODE_LENGTH, generate_reward_code, generate_reward_code_with,
    is_valid_reward_code,
};
pub use state::{Game, GameState};
pub use terrain::Terrain;
