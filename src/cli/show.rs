//! Show command implementation.

use std::path::Path;

use kiwi_island::load_game;
use kiwi_island::render::{RenderOptions, render_island, render_status};

use super::output::JsonGameSummary;
use super::{CliError, OutputFormat};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the level cannot be loaded or serialized.
pub(crate) fn execute(level: &Path, format: OutputFormat, reveal: bool) -> Result<(), CliError> {
    let game = load_game(level)?;
    let options = RenderOptions {
        reveal_all: reveal,
        color: false,
    };

    match format {
        OutputFormat::Text => {
            print!("{}", render_island(&game, options));
            print!("{}", render_status(&game));
        }
        OutputFormat::Json => {
            let summary = JsonGameSummary::from_game(&game, options);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
