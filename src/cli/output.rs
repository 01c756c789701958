//! Output formatting utilities for CLI.

use kiwi_island::render::{RenderOptions, render_island};
use kiwi_island::{Game, GameState};
use serde::Serialize;

/// JSON-serializable game summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameSummary {
    /// Playing, won, or lost.
    pub(super) state: &'static str,
    /// Island rows.
    pub(super) rows: u16,
    /// Island columns.
    pub(super) columns: u16,
    /// Player details.
    pub(super) player: JsonPlayer,
    /// Kiwis counted so far.
    pub(super) kiwis_counted: u32,
    /// Kiwis on the island at the start.
    pub(super) total_kiwis: u32,
    /// Predators trapped so far.
    pub(super) predators_trapped: u32,
    /// Predators on the island at the start.
    pub(super) total_predators: u32,
    /// Win or lose message, if the game is over.
    pub(super) message: Option<String>,
    /// Rendered map, one string per line.
    pub(super) map: Vec<String>,
}

/// JSON-serializable player details.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayer {
    /// Player name.
    pub(super) name: String,
    /// Row of the player's tile.
    pub(super) row: i32,
    /// Column of the player's tile.
    pub(super) column: i32,
    /// Current stamina.
    pub(super) stamina: f64,
    /// Maximum stamina.
    pub(super) max_stamina: f64,
    /// Current backpack weight.
    pub(super) backpack_weight: f64,
    /// Maximum backpack weight.
    pub(super) max_backpack_weight: f64,
    /// Current backpack size.
    pub(super) backpack_size: f64,
    /// Maximum backpack size.
    pub(super) max_backpack_size: f64,
    /// Names of held items.
    pub(super) inventory: Vec<String>,
}

impl JsonGameSummary {
    /// Summarise a game.
    pub(super) fn from_game(game: &Game, options: RenderOptions) -> Self {
        let snapshot = game.player_snapshot();
        let position = game.player().position();
        let message = match game.state() {
            GameState::Playing => None,
            GameState::Won => Some(game.win_message().to_string()),
            GameState::Lost => Some(game.lose_message().to_string()),
        };
        Self {
            state: state_name(game.state()),
            rows: game.num_rows(),
            columns: game.num_columns(),
            player: JsonPlayer {
                name: game.player_name().to_string(),
                row: position.row(),
                column: position.column(),
                stamina: snapshot.stamina,
                max_stamina: snapshot.max_stamina,
                backpack_weight: snapshot.backpack_weight,
                max_backpack_weight: snapshot.max_backpack_weight,
                backpack_size: snapshot.backpack_size,
                max_backpack_size: snapshot.max_backpack_size,
                inventory: game
                    .player_inventory()
                    .iter()
                    .map(|item| item.name().to_string())
                    .collect(),
            },
            kiwis_counted: game.kiwi_count(),
            total_kiwis: game.total_kiwis(),
            predators_trapped: game.predators_trapped(),
            total_predators: game.total_predators(),
            message,
            map: render_island(game, options)
                .lines()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Lower-case name of a game state.
pub(super) const fn state_name(state: GameState) -> &'static str {
    match state {
        GameState::Playing => "playing",
        GameState::Won => "won",
        GameState::Lost => "lost",
    }
}

/// Describe what is on the player's tile, numbered from 1.
pub(super) fn format_look(game: &Game) -> String {
    let here = game.occupants_at_player();
    if here.is_empty() {
        return "Nothing here.\n".to_string();
    }
    let mut output = String::new();
    for (i, occupant) in here.iter().enumerate() {
        let mut tags = Vec::new();
        if game.can_collect(occupant.id()) {
            tags.push("collect");
        }
        if game.can_count(occupant.id()) {
            tags.push("count");
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", tags.join(", "))
        };
        output.push_str(&format!(
            "  {}. {} - {}{tags}\n",
            i + 1,
            occupant.name(),
            game.occupant_description(occupant.id())
        ));
    }
    output
}

/// List the backpack, numbered from 1.
pub(super) fn format_inventory(game: &Game) -> String {
    let items = game.player_inventory();
    if items.is_empty() {
        return "Your backpack is empty.\n".to_string();
    }
    let mut output = String::new();
    for (i, item) in items.iter().enumerate() {
        let usable = if game.can_use(item.id()) { " [use]" } else { "" };
        let broken = if item.is_broken_trap() { " (broken)" } else { "" };
        output.push_str(&format!("  {}. {}{broken}{usable}\n", i + 1, item.name()));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiwi_island::Level;

    const LEVEL: &str = "\
1, 2,
..,
Ana, 0, 0, 10, 5, 5,
3,
T, Trap, A trap, 0, 0, 1, 1,
K, Kiwi, A kiwi, 0, 0,
P, Rat, A rat, 0, 1,
";

    fn game() -> Game {
        Level::parse_text(LEVEL).unwrap().build().unwrap()
    }

    #[test]
    fn test_json_summary() {
        let summary = JsonGameSummary::from_game(&game(), RenderOptions::default());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["state"], "playing");
        assert_eq!(json["player"]["name"], "Ana");
        assert_eq!(json["total_predators"], 1);
        assert!(json["message"].is_null());
        assert_eq!(json["map"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_look_lists_actions() {
        let look = format_look(&game());
        assert!(look.contains("1. Trap - A trap [collect]"));
        assert!(look.contains("2. Kiwi - A kiwi [count]"));
    }

    #[test]
    fn test_inventory_listing() {
        let mut game = game();
        assert!(format_inventory(&game).contains("empty"));
        let trap = game.occupants_at_player()[0].id();
        assert!(game.collect_item(trap));
        assert_eq!(format_inventory(&game), "  1. Trap\n");
    }
}
