//! ASCII renderer for terminal play.

use std::fmt::Write as _;

use crate::game::{Game, GameState, Position, Terrain};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const BLUE: &str = "\x1b[34m";
const RED: &str = "\x1b[31m";

/// Marker drawn on the player's tile.
pub const PLAYER_MARKER: char = '@';
/// Fill drawn for tiles the player has not seen.
pub const FOG: char = '?';

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw every tile, ignoring fog.
    pub reveal_all: bool,
    /// Emit ANSI colour codes.
    pub color: bool,
}

/// Render the island grid.
///
/// Each tile is drawn as a player marker column, the terrain symbol, then
/// one column per occupant slot:
/// ```text
/// +--------------------+
/// | .   *K  ##   ^    |
/// | .E @*T  ~    .P   |
/// +--------------------+
/// ```
/// Tiles the player has not seen are filled with `?` unless
/// [`RenderOptions::reveal_all`] is set.
#[must_use]
pub fn render_island(game: &Game, options: RenderOptions) -> String {
    let island = game.island();
    let cell_width = island.max_occupants() + 2;
    let inner_width = usize::from(island.num_columns()) * (cell_width + 1) + 1;

    let mut output = String::new();
    render_border(&mut output, inner_width);
    for row in 0..i32::from(island.num_rows()) {
        output.push('|');
        for column in 0..i32::from(island.num_columns()) {
            output.push(' ');
            render_tile(&mut output, game, island.position(row, column), cell_width, options);
        }
        output.push_str(" |\n");
    }
    render_border(&mut output, inner_width);
    output
}

/// Render the player's status and the game outcome.
#[must_use]
pub fn render_status(game: &Game) -> String {
    let snapshot = game.player_snapshot();
    let mut output = String::new();

    let _ = writeln!(
        output,
        "{}: stamina {:.1}/{:.1}  backpack weight {:.1}/{:.1}  size {:.1}/{:.1}",
        game.player_name(),
        snapshot.stamina,
        snapshot.max_stamina,
        snapshot.backpack_weight,
        snapshot.max_backpack_weight,
        snapshot.backpack_size,
        snapshot.max_backpack_size
    );
    let _ = writeln!(
        output,
        "Kiwis counted: {}/{}  Predators left: {}",
        game.kiwi_count(),
        game.total_kiwis(),
        game.predators_remaining()
    );

    let inventory = game.player_inventory();
    if !inventory.is_empty() {
        let names: Vec<&str> = inventory.iter().map(|item| item.name()).collect();
        let _ = writeln!(output, "Backpack: {}", names.join(", "));
    }

    match game.state() {
        GameState::Playing => {}
        GameState::Won => {
            let _ = writeln!(output, "{}", game.win_message());
        }
        GameState::Lost => {
            let _ = writeln!(output, "{}", game.lose_message());
        }
    }
    output
}

fn render_border(output: &mut String, inner_width: usize) {
    output.push('+');
    output.push_str(&"-".repeat(inner_width));
    output.push_str("+\n");
}

fn render_tile(
    output: &mut String,
    game: &Game,
    pos: Position,
    cell_width: usize,
    options: RenderOptions,
) {
    let island = game.island();
    if !options.reveal_all && !island.is_visible(pos) {
        let fog: String = std::iter::repeat_n(FOG, cell_width).collect();
        if options.color {
            let _ = write!(output, "{DIM}{fog}{RESET}");
        } else {
            output.push_str(&fog);
        }
        return;
    }

    if island.has_player(pos) {
        if options.color {
            let _ = write!(output, "{BOLD}{PLAYER_MARKER}{RESET}");
        } else {
            output.push(PLAYER_MARKER);
        }
    } else {
        output.push(' ');
    }

    let terrain = island.terrain_at(pos);
    let symbol = terrain.map_or(' ', Terrain::symbol);
    if options.color && !island.is_explored(pos) {
        let _ = write!(output, "{DIM}{symbol}{RESET}");
    } else if options.color && terrain.is_some_and(|terrain| !terrain.is_passable()) {
        let _ = write!(output, "{BLUE}{symbol}{RESET}");
    } else {
        output.push(symbol);
    }

    let symbols = island.occupant_string_representation(pos);
    let used = symbols.chars().count();
    if options.color && island.has_predator(pos) {
        let _ = write!(output, "{RED}{symbols}{RESET}");
    } else {
        output.push_str(&symbols);
    }
    output.push_str(&" ".repeat(cell_width.saturating_sub(2 + used)));
}

impl Game {
    /// Draw the island and the player's status as plain text.
    #[must_use]
    pub fn draw(&self) -> String {
        let mut output = render_island(self, RenderOptions::default());
        output.push_str(&render_status(self));
        output
    }
}
