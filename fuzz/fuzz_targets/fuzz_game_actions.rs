#![no_main]

//! Game action fuzzer.
//!
//! Builds a small island from fuzzer bytes, plays an arbitrary action
//! sequence against it and checks the game invariants after every step.

use arbitrary::Arbitrary;
use kiwi_island::game::check_invariants;
use kiwi_island::level::{OccupantSpec, OccupantSpecKind, PlayerStart};
use kiwi_island::{Game, GameConfig, Level, MoveDirection, Terrain};
use libfuzzer_sys::fuzz_target;

const SIZE: u16 = 5;

/// Occupant placed by the fuzzer.
#[derive(Arbitrary, Debug)]
enum FuzzOccupant {
    Trap,
    Screwdriver,
    Food { weight: u8, energy: u8 },
    Hazard { impact: u8 },
    BrokenTrap,
    Kiwi,
    Predator,
    Fauna,
}

/// One player action.
#[derive(Arbitrary, Debug)]
enum FuzzAction {
    Move(u8),
    Collect(u8),
    Drop(u8),
    Use(u8),
    Count,
}

#[derive(Arbitrary, Debug)]
struct GameInput {
    terrain: [[u8; SIZE as usize]; SIZE as usize],
    start: (u8, u8),
    stamina: u8,
    backpack: (u8, u8),
    occupants: Vec<(u8, u8, FuzzOccupant)>,
    actions: Vec<FuzzAction>,
}

fuzz_target!(|input: GameInput| {
    let Some(mut game) = build(&input) else {
        return;
    };
    let violations = check_invariants(&game);
    assert!(violations.is_empty(), "invariants violated at start: {violations:?}");

    for action in input.actions.iter().take(64) {
        let over = game.is_over();
        let stamina = game.player().stamina();
        let inventory = game.player().inventory().to_vec();

        apply(&mut game, action);

        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "invariants violated after {action:?}: {violations:?}");
        if over {
            assert_eq!(game.player().inventory(), inventory.as_slice());
            assert!((game.player().stamina() - stamina).abs() < f64::EPSILON);
        }
    }
});

fn build(input: &GameInput) -> Option<Game> {
    let terrain = input
        .terrain
        .iter()
        .map(|row| {
            row.iter()
                .map(|&b| Terrain::ALL[usize::from(b) % Terrain::ALL.len()].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>();

    let occupants = input
        .occupants
        .iter()
        .take(20)
        .map(|(row, column, occupant)| {
            let (name, kind) = match *occupant {
                FuzzOccupant::Trap => ("Trap", OccupantSpecKind::Tool { weight: 1.0, size: 1.0 }),
                FuzzOccupant::Screwdriver => (
                    "Screwdriver",
                    OccupantSpecKind::Tool { weight: 0.5, size: 0.5 },
                ),
                FuzzOccupant::Food { weight, energy } => (
                    "Apple",
                    OccupantSpecKind::Food {
                        weight: f64::from(weight % 4),
                        size: 1.0,
                        energy: f64::from(energy % 20),
                    },
                ),
                FuzzOccupant::Hazard { impact } => (
                    "Hole",
                    OccupantSpecKind::Hazard {
                        impact: f64::from(impact) / 255.0,
                    },
                ),
                FuzzOccupant::BrokenTrap => ("Broken Trap", OccupantSpecKind::Hazard { impact: 0.0 }),
                FuzzOccupant::Kiwi => ("Kiwi", OccupantSpecKind::Kiwi),
                FuzzOccupant::Predator => ("Rat", OccupantSpecKind::Predator),
                FuzzOccupant::Fauna => ("Tui", OccupantSpecKind::Fauna),
            };
            OccupantSpec {
                name: name.to_string(),
                description: name.to_lowercase(),
                row: i32::from(*row % 6),
                column: i32::from(*column % 6),
                kind,
            }
        })
        .collect::<Vec<_>>();

    let level = Level {
        rows: SIZE,
        columns: SIZE,
        terrain,
        player: PlayerStart {
            name: "Fuzz".to_string(),
            row: i32::from(input.start.0 % 5),
            column: i32::from(input.start.1 % 5),
            max_stamina: f64::from(input.stamina),
            max_backpack_weight: f64::from(input.backpack.0 % 8),
            max_backpack_size: f64::from(input.backpack.1 % 8),
        },
        occupants,
        config: GameConfig::default(),
    };
    // Off-island or overfull placements are rejected by the loader.
    level.build().ok()
}

fn apply(game: &mut Game, action: &FuzzAction) {
    match *action {
        FuzzAction::Move(d) => {
            let direction = MoveDirection::ALL[usize::from(d) % MoveDirection::ALL.len()];
            game.move_player(direction);
        }
        FuzzAction::Collect(i) => {
            if let Some(id) = game.occupants_at_player().get(usize::from(i)).map(|o| o.id()) {
                game.collect_item(id);
            }
        }
        FuzzAction::Drop(i) => {
            if let Some(id) = game.player().inventory().get(usize::from(i)).copied() {
                game.drop_item(id);
            }
        }
        FuzzAction::Use(i) => {
            if let Some(id) = game.player().inventory().get(usize::from(i)).copied() {
                game.use_item(id);
            }
        }
        FuzzAction::Count => {
            game.count_kiwi();
        }
    }
}
