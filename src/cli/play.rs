//! Interactive play command: a line-oriented game loop on stdin.

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::rc::Rc;

use kiwi_island::render::{RenderOptions, render_island, render_status};
use kiwi_island::{Game, Level, LevelRotation, ListenerId, MoveDirection, OccupantId};
use tracing::{debug, info};

use super::CliError;
use super::output::{format_inventory, format_look};

const HELP: &str = "\
Commands:
  n, s, e, w       move north, south, east, west
  look             list what is on your tile
  inventory, i     list your backpack
  collect <n>      pick up item <n> from `look`
  drop <n>         drop backpack item <n>
  use <n>          use backpack item <n>
  count            count the kiwis on your tile
  map              redraw the island
  new              start a new game, on another island if there is one
  help             show this help
  quit             leave the game
";

/// One parsed player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// Move one tile.
    Move(MoveDirection),
    /// Describe the current tile.
    Look,
    /// List the backpack.
    Inventory,
    /// Pick up the n-th occupant of the tile (0-based).
    Collect(usize),
    /// Drop the n-th backpack item (0-based).
    Drop(usize),
    /// Use the n-th backpack item (0-based).
    Use(usize),
    /// Count kiwis on the tile.
    Count,
    /// Redraw the map.
    Map,
    /// Start a new game.
    New,
    /// Show the command list.
    Help,
    /// Leave the game.
    Quit,
}

/// Parse a line of input. Item numbers are 1-based.
pub(crate) fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next()?.to_ascii_lowercase();
    let index = words
        .next()
        .and_then(|word| word.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1));

    let command = match verb.as_str() {
        "n" | "north" => Command::Move(MoveDirection::North),
        "s" | "south" => Command::Move(MoveDirection::South),
        "e" | "east" => Command::Move(MoveDirection::East),
        "w" | "west" => Command::Move(MoveDirection::West),
        "look" | "l" => Command::Look,
        "inventory" | "i" => Command::Inventory,
        "collect" | "c" => Command::Collect(index?),
        "drop" | "d" => Command::Drop(index?),
        "use" | "u" => Command::Use(index?),
        "count" | "k" => Command::Count,
        "map" | "m" => Command::Map,
        "new" | "restart" => Command::New,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Where new games come from.
#[derive(Debug)]
pub(crate) enum LevelSource {
    /// One level, rebuilt from scratch for every game.
    Single(Level),
    /// A directory of levels, never the same one twice in a row.
    Rotation(LevelRotation),
}

impl LevelSource {
    /// Open a level file, or a directory of level files.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or directory cannot be read.
    pub(crate) fn open(path: &Path) -> Result<Self, CliError> {
        let source = if path.is_dir() {
            Self::Rotation(LevelRotation::from_dir(path)?)
        } else {
            Self::Single(Level::load(path)?)
        };
        Ok(source)
    }

    /// Build a fresh game with all counters at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen level fails to load or build.
    pub(crate) fn next_game(&mut self) -> Result<Game, CliError> {
        let game = match self {
            Self::Single(level) => level.build()?,
            Self::Rotation(rotation) => rotation.next_game(&mut rand::thread_rng())?,
        };
        Ok(game)
    }
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if a level cannot be loaded or the terminal fails.
pub(crate) fn execute(level: &Path, color: bool) -> Result<(), CliError> {
    let mut levels = LevelSource::open(level)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut levels, stdin.lock(), stdout.lock(), color)?;
    Ok(())
}

/// Play games from `levels`, driven by `input`, until input runs out or the
/// player quits. Returns the game in play at the end.
///
/// # Errors
///
/// Returns an error if a level fails to build or reading input or writing
/// output fails.
pub(crate) fn run(
    levels: &mut LevelSource,
    input: impl BufRead,
    mut output: impl Write,
    color: bool,
) -> Result<Game, CliError> {
    let options = RenderOptions {
        reveal_all: false,
        color,
    };

    // Redraw the map only when the game reports a change.
    let changed = Rc::new(Cell::new(true));
    let mut game = levels.next_game()?;
    let mut listener = watch(&mut game, &changed);

    write!(output, "{HELP}")?;
    for line in input.lines() {
        if changed.replace(false) {
            write!(output, "{}", render_island(&game, options))?;
            write!(output, "{}", render_status(&game))?;
        }
        let line = line?;
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                writeln!(output, "Unknown command {:?}; type `help`.", line.trim())?;
            }
            continue;
        };
        debug!(?command, "player command");
        match command {
            Command::Quit => break,
            Command::New => {
                let next = levels.next_game()?;
                game.remove_listener(listener);
                game = next;
                listener = watch(&mut game, &changed);
                changed.set(true);
                info!(player = game.player_name(), "new game started");
                writeln!(output, "A new island awaits.")?;
                continue;
            }
            _ => {}
        }
        let was_over = game.is_over();
        let reply = apply(&mut game, command, options);
        write!(output, "{reply}")?;
        if let Some(message) = game.take_player_message() {
            writeln!(output, "{message}")?;
        }
        if game.is_over() && !was_over {
            write!(output, "{}", render_island(&game, options))?;
            write!(output, "{}", render_status(&game))?;
            writeln!(output, "Type `new` to play again or `quit` to leave.")?;
        }
    }
    game.remove_listener(listener);
    output.flush()?;
    Ok(game)
}

fn watch(game: &mut Game, changed: &Rc<Cell<bool>>) -> ListenerId {
    let flag = Rc::clone(changed);
    game.add_listener(move || flag.set(true))
}

fn apply(game: &mut Game, command: Command, options: RenderOptions) -> String {
    match command {
        Command::Move(direction) => {
            if game.move_player(direction) {
                String::new()
            } else {
                format!("You cannot move {direction}.\n")
            }
        }
        Command::Look => format_look(game),
        Command::Inventory => format_inventory(game),
        Command::Collect(index) => {
            let target = game.occupants_at_player().get(index).map(|o| o.id());
            match target {
                Some(id) if game.collect_item(id) => {
                    format!("Collected {}.\n", name_of(game, id))
                }
                Some(id) => format!("You cannot collect {}.\n", name_of(game, id)),
                None => "Nothing with that number here.\n".to_string(),
            }
        }
        Command::Drop(index) => {
            let target = game.player().inventory().get(index).copied();
            match target {
                Some(id) if game.drop_item(id) => format!("Dropped {}.\n", name_of(game, id)),
                Some(_) => "There is no room to drop that here.\n".to_string(),
                None => "No item with that number in your backpack.\n".to_string(),
            }
        }
        Command::Use(index) => {
            let target = game.player().inventory().get(index).copied();
            match target {
                Some(id) => {
                    let name = name_of(game, id);
                    if game.use_item(id) {
                        format!("Used {name}.\n")
                    } else {
                        format!("Using {name} had no effect.\n")
                    }
                }
                None => "No item with that number in your backpack.\n".to_string(),
            }
        }
        Command::Count => match game.count_kiwi() {
            0 => "No uncounted kiwis here.\n".to_string(),
            1 => "Counted 1 kiwi.\n".to_string(),
            n => format!("Counted {n} kiwis.\n"),
        },
        Command::Map => render_island(game, options) + &render_status(game),
        Command::Help => HELP.to_string(),
        Command::New | Command::Quit => String::new(),
    }
}

fn name_of(game: &Game, id: OccupantId) -> String {
    game.occupant(id)
        .map_or_else(|| id.to_string(), |o| o.name().to_string())
}
