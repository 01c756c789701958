//! Property-based tests for the game rules.
//!
//! Run with: cargo test --release prop_game

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use kiwi_island::game::{check_invariants, generate_reward_code, is_valid_reward_code};
use kiwi_island::level::{OccupantSpec, OccupantSpecKind, PlayerStart};
use kiwi_island::{Game, GameConfig, GameState, Level, MoveDirection, Terrain};

const ROWS: u16 = 4;
const COLUMNS: u16 = 4;

fn terrain_strategy() -> impl Strategy<Value = Terrain> {
    prop::sample::select(Terrain::ALL.to_vec())
}

fn direction_strategy() -> impl Strategy<Value = MoveDirection> {
    prop::sample::select(MoveDirection::ALL.to_vec())
}

fn grid_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::collection::vec(terrain_strategy(), usize::from(COLUMNS))
            .prop_map(|row| row.into_iter().map(Terrain::symbol).collect::<String>()),
        usize::from(ROWS),
    )
}

fn spec(name: &str, row: i32, column: i32, kind: OccupantSpecKind) -> OccupantSpec {
    OccupantSpec {
        name: name.to_string(),
        description: format!("A {name}"),
        row,
        column,
        kind,
    }
}

fn level(terrain: Vec<String>, row: i32, column: i32, stamina: f64) -> Level {
    Level {
        rows: ROWS,
        columns: COLUMNS,
        terrain,
        player: PlayerStart {
            name: "Prop".to_string(),
            row,
            column,
            max_stamina: stamina,
            max_backpack_weight: 3.0,
            max_backpack_size: 3.0,
        },
        occupants: Vec::new(),
        config: GameConfig::default(),
    }
}

/// Level with every tile sand and the player at the top-left corner.
fn sand_level(stamina: f64) -> Level {
    level(vec!["....".to_string(); usize::from(ROWS)], 0, 0, stamina)
}

/// A sand level whose player shares the top-left tile with `predators`
/// predators and `kiwis` kiwis, with a trap already in hand.
fn quota_game(predators: u32, kiwis: u32) -> Game {
    let mut level = sand_level(100.0);
    level.config.max_occupants_per_tile = 16;
    level.occupants.push(spec(
        "Trap",
        0,
        0,
        OccupantSpecKind::Tool {
            weight: 1.0,
            size: 1.0,
        },
    ));
    for _ in 0..kiwis {
        level.occupants.push(spec("Kiwi", 0, 0, OccupantSpecKind::Kiwi));
    }
    for _ in 0..predators {
        level.occupants.push(spec("Rat", 0, 0, OccupantSpecKind::Predator));
    }
    let mut game = level.build().unwrap();
    let trap = game.occupants_at_player()[0].id();
    assert!(game.collect_item(trap));
    game
}

fn trap_one(game: &mut Game) -> bool {
    let trap = game.player().inventory()[0];
    game.use_item(trap)
}

#[derive(Debug, Clone)]
enum Action {
    Move(MoveDirection),
    Collect(usize),
    Drop(usize),
    Use(usize),
    Count,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        direction_strategy().prop_map(Action::Move),
        (0usize..4).prop_map(Action::Collect),
        (0usize..4).prop_map(Action::Drop),
        (0usize..4).prop_map(Action::Use),
        Just(Action::Count),
    ]
}

fn busy_level(terrain: Vec<String>) -> Level {
    let mut level = level(terrain, 1, 1, 30.0);
    let tool = |weight| OccupantSpecKind::Tool { weight, size: 1.0 };
    level.occupants = vec![
        spec("Trap", 1, 1, tool(1.0)),
        spec("Screwdriver", 1, 1, tool(0.5)),
        spec(
            "Apple",
            1,
            2,
            OccupantSpecKind::Food {
                weight: 0.5,
                size: 0.5,
                energy: 4.0,
            },
        ),
        spec("Broken Trap", 2, 1, OccupantSpecKind::Hazard { impact: 0.0 }),
        spec("Hole", 0, 1, OccupantSpecKind::Hazard { impact: 0.25 }),
        spec("Kiwi", 2, 2, OccupantSpecKind::Kiwi),
        spec("Kiwi", 0, 0, OccupantSpecKind::Kiwi),
        spec("Rat", 2, 1, OccupantSpecKind::Predator),
        spec("Stoat", 3, 3, OccupantSpecKind::Predator),
        spec("Tui", 1, 2, OccupantSpecKind::Fauna),
    ];
    level
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// A move succeeds exactly when the target is on the island, passable,
    /// affordable, and the player is alive; it costs exactly the terrain cost.
    #[test]
    fn prop_move_legality_and_cost(
        terrain in grid_strategy(),
        row in 0i32..4,
        column in 0i32..4,
        stamina in 0.0f64..6.0,
        direction in direction_strategy(),
    ) {
        let mut game = level(terrain, row, column, stamina).build().unwrap();
        let before = game.player().stamina();
        let target = game.player().position().neighbor(direction);
        let expected = game
            .island()
            .terrain_at(target)
            .is_some_and(|t| t.is_passable() && t.stamina_cost() <= before);

        prop_assert_eq!(game.is_player_move_possible(direction), expected);
        let moved = game.move_player(direction);
        prop_assert_eq!(moved, expected);
        if moved {
            let cost = game.island().terrain_at(target).unwrap().stamina_cost();
            prop_assert!((game.player().stamina() - (before - cost)).abs() < 1e-9);
            prop_assert_eq!(game.player().position(), target);
        } else {
            prop_assert!((game.player().stamina() - before).abs() < f64::EPSILON);
        }
    }

    /// Collecting then dropping on the same tile leaves the inventory as it was.
    #[test]
    fn prop_collect_drop_is_net_noop(weight in 0.0f64..3.0, size in 0.0f64..3.0) {
        let mut level = sand_level(10.0);
        level.occupants.push(spec("Axe", 0, 0, OccupantSpecKind::Tool { weight, size }));
        let mut game = level.build().unwrap();
        let axe = game.occupants_at_player()[0].id();

        let before = game.player().inventory().to_vec();
        prop_assert!(game.collect_item(axe));
        prop_assert!(game.drop_item(axe));
        prop_assert_eq!(game.player().inventory(), before.as_slice());
        prop_assert!(game.player().backpack_weight().abs() < 1e-9);
        prop_assert_eq!(game.occupant_string_representation(0, 0), "T");
    }

    /// Counting never counts the same kiwi twice.
    #[test]
    fn prop_count_kiwi_idempotent(kiwis in 1u32..3, repeats in 1usize..5) {
        let mut game = quota_game(1, kiwis);
        let mut total = 0;
        for _ in 0..repeats {
            total += game.count_kiwi();
        }
        prop_assert_eq!(total, kiwis);
        prop_assert_eq!(game.kiwi_count(), kiwis);
    }

    /// Each successful trap removes exactly one predator; the count never
    /// goes below zero.
    #[test]
    fn prop_trapping_decrements_by_one(predators in 1u32..6, attempts in 1u32..10) {
        let mut game = quota_game(predators, 1);
        for _ in 0..attempts {
            let before = game.predators_remaining();
            let trapped = trap_one(&mut game);
            if trapped {
                prop_assert_eq!(game.predators_remaining(), before - 1);
            } else {
                prop_assert_eq!(game.predators_remaining(), before);
            }
            if game.is_over() {
                break;
            }
        }
        prop_assert_eq!(game.predators_remaining(), predators.saturating_sub(attempts));
    }

    /// Trapping every predator wins regardless of kiwis counted.
    #[test]
    fn prop_all_predators_wins(predators in 1u32..5, kiwis in 0u32..5) {
        let mut game = quota_game(predators, kiwis);
        for _ in 0..predators {
            prop_assert_eq!(game.state(), GameState::Playing);
            prop_assert!(trap_one(&mut game));
        }
        prop_assert_eq!(game.state(), GameState::Won);
        prop_assert_eq!(game.kiwi_count(), 0);
    }

    /// A hazard that drains stamina to zero or below ends the game at once.
    #[test]
    fn prop_draining_hazard_is_final(stamina in 1.0f64..20.0, impact in 0.0f64..0.99) {
        let mut level = sand_level(stamina);
        level.occupants.push(spec("Bog", 0, 1, OccupantSpecKind::Hazard { impact }));
        level.occupants.push(spec("Rat", 3, 3, OccupantSpecKind::Predator));
        let mut game = level.build().unwrap();

        prop_assert!(game.move_player(MoveDirection::East));
        let remaining = stamina - 1.0 - impact * stamina;
        if remaining <= 0.0 {
            prop_assert_eq!(game.state(), GameState::Lost);
            prop_assert!(!game.move_player(MoveDirection::West));
            prop_assert!(!game.move_player(MoveDirection::South));
            prop_assert_eq!(game.count_kiwi(), 0);
        } else {
            prop_assert!(game.player().is_alive());
        }
    }

    /// Reward codes are eight characters from A-Z and 0-9.
    #[test]
    fn prop_reward_code_shape(_seed in any::<u8>()) {
        let code = generate_reward_code();
        prop_assert_eq!(code.len(), 8);
        prop_assert!(code.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        prop_assert!(is_valid_reward_code(&code));
    }

    /// Any sequence of actions keeps the game consistent, rejected drops
    /// leave the backpack alone, and nothing changes once the game is over.
    #[test]
    fn prop_random_actions_keep_invariants(
        terrain in grid_strategy(),
        actions in prop::collection::vec(action_strategy(), 0..40),
    ) {
        let mut level = busy_level(terrain);
        // Keep the start and the item tiles walkable.
        for (row, column) in [(1, 1), (1, 2)] {
            let mut symbols: Vec<char> = level.terrain[row].chars().collect();
            symbols[column] = '.';
            level.terrain[row] = symbols.into_iter().collect();
        }
        let mut game = level.build().unwrap();

        for action in actions {
            let was_over = game.is_over();
            let inventory = game.player().inventory().to_vec();
            let stamina = game.player().stamina();

            match action {
                Action::Move(direction) => {
                    game.move_player(direction);
                }
                Action::Collect(i) => {
                    if let Some(id) = game.occupants_at_player().get(i).map(|o| o.id()) {
                        game.collect_item(id);
                    }
                }
                Action::Drop(i) => {
                    if let Some(id) = inventory.get(i).copied() {
                        if !game.drop_item(id) {
                            prop_assert_eq!(game.player().inventory(), inventory.as_slice());
                        }
                    }
                }
                Action::Use(i) => {
                    if let Some(id) = inventory.get(i).copied() {
                        game.use_item(id);
                    }
                }
                Action::Count => {
                    game.count_kiwi();
                }
            }

            let violations = check_invariants(&game);
            prop_assert!(violations.is_empty(), "{:?}", violations);
            prop_assert!(game.kiwi_count() <= game.total_kiwis());
            if was_over {
                prop_assert_eq!(game.player().inventory(), inventory.as_slice());
                prop_assert!((game.player().stamina() - stamina).abs() < f64::EPSILON);
            }
        }
    }
}

#[test]
fn test_kiwi_quota_threshold() {
    // 10 predators, 2 kiwis: 8 trapped wins, 7 does not.
    let mut game = quota_game(10, 2);
    assert_eq!(game.count_kiwi(), 2);
    for _ in 0..7 {
        assert!(trap_one(&mut game));
    }
    assert_eq!(game.state(), GameState::Playing);
    assert!(trap_one(&mut game));
    assert_eq!(game.state(), GameState::Won);
    assert!(game.win_message().contains("80%"));
}
