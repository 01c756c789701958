//! Level validation command implementation.

use std::path::Path;

use kiwi_island::Level;
use kiwi_island::game::check_invariants;

use super::CliError;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the level cannot be read, fails to build, or starts
/// in an inconsistent state.
pub(crate) fn execute(level: &Path) -> Result<(), CliError> {
    println!("Validating: {}", level.display());
    println!();

    let parsed = Level::load(level);
    print_check("Level parses", parsed.is_ok());
    let parsed = parsed?;

    let game = parsed.build();
    print_check("Terrain, player and occupants placed", game.is_ok());
    let game = game?;

    let violations = check_invariants(&game);
    print_check("Starting state consistent", violations.is_empty());
    if !violations.is_empty() {
        for violation in &violations {
            println!("    {violation}");
        }
        return Err(CliError::new(format!(
            "{} invariant violation(s)",
            violations.len()
        )));
    }

    println!();
    println!("Summary:");
    println!("  Size:       {}x{}", game.num_rows(), game.num_columns());
    println!("  Player:     {}", game.player_name());
    println!("  Occupants:  {}", parsed.occupants.len());
    println!("  Kiwis:      {}", game.total_kiwis());
    println!("  Predators:  {}", game.total_predators());

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
