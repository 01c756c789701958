//! Game invariants - consistency checks that detect bugs.
//!
//! These never trigger in a correctly implemented game. They are checked
//! after every settled action in debug builds.

use std::fmt;

use crate::game::{Game, Location, Occupant};

/// Slack allowed when comparing accumulated floating-point totals.
const TOLERANCE: f64 = 1e-9;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(game: &Game) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut report = |message: String| violations.push(InvariantViolation { message });

    let island = game.island();
    let player = game.player();
    let arena = island.occupants();

    // Backpack contents and occupant locations agree
    for id in player.inventory() {
        match arena.get(*id).map(Occupant::location) {
            Some(Location::Backpack) => {}
            other => report(format!("Held item {id} has location {other:?}")),
        }
    }
    for occupant in arena.at(Location::Backpack) {
        if !player.has_item(occupant.id()) {
            report(format!("Occupant {} is in the backpack but not held", occupant.id()));
        }
    }

    // Backpack totals match held items and stay within limits
    let (weight, size) = player
        .inventory()
        .iter()
        .filter_map(|id| arena.get(*id).and_then(Occupant::load))
        .fold((0.0, 0.0), |(total_weight, total_size), (weight, size)| {
            (total_weight + weight, total_size + size)
        });
    if (weight - player.backpack_weight()).abs() > TOLERANCE {
        report(format!(
            "Backpack weight {} does not match held items {weight}",
            player.backpack_weight()
        ));
    }
    if (size - player.backpack_size()).abs() > TOLERANCE {
        report(format!(
            "Backpack size {} does not match held items {size}",
            player.backpack_size()
        ));
    }
    if player.backpack_weight() > player.max_backpack_weight() + TOLERANCE {
        report(format!(
            "Backpack weight {} exceeds {}",
            player.backpack_weight(),
            player.max_backpack_weight()
        ));
    }
    if player.backpack_size() > player.max_backpack_size() + TOLERANCE {
        report(format!(
            "Backpack size {} exceeds {}",
            player.backpack_size(),
            player.max_backpack_size()
        ));
    }

    if player.stamina() > player.max_stamina() + TOLERANCE {
        report(format!(
            "Stamina {} exceeds maximum {}",
            player.stamina(),
            player.max_stamina()
        ));
    }

    if game.kiwi_count() > game.total_kiwis() {
        report(format!(
            "Counted {} kiwis of {}",
            game.kiwi_count(),
            game.total_kiwis()
        ));
    }
    if game.predators_trapped() > game.total_predators() {
        report(format!(
            "Trapped {} predators of {}",
            game.predators_trapped(),
            game.total_predators()
        ));
    }

    for (pos, _) in island.tiles() {
        let count = island.occupant_count(pos);
        if count > island.max_occupants() {
            report(format!(
                "Tile {pos} holds {count} occupants, max {}",
                island.max_occupants()
            ));
        }
    }

    if island.tile(player.position()).is_none() {
        report(format!("Player at {} is off the island", player.position()));
    }
    if island.player_position() != Some(player.position()) {
        report(format!(
            "Island tracks player at {:?}, player is at {}",
            island.player_position(),
            player.position()
        ));
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(game: &Game) {
    let violations = check_invariants(game);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_game: &Game) {}
