//! Whole-game integration tests through the public API.
//!
//! These tests load real level files and play games to the end.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use kiwi_island::game::check_invariants;
use kiwi_island::{
    Game, GameEventListener, GameState, Level, MoveDirection, OccupantId, Terrain, load_game,
};

fn level_path(name: &str) -> String {
    format!("{}/levels/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn item_here(game: &Game, name: &str) -> OccupantId {
    game.occupants_at_player()
        .iter()
        .find(|o| o.name() == name)
        .map(|o| o.id())
        .unwrap_or_else(|| panic!("no {name} on the player's tile"))
}

fn held(game: &Game, name: &str) -> OccupantId {
    game.player_inventory()
        .iter()
        .find(|o| o.name() == name)
        .map(|o| o.id())
        .unwrap_or_else(|| panic!("{name} is not held"))
}

/// Counts notifications.
#[derive(Debug, Default)]
struct Recorder {
    calls: Rc<RefCell<u32>>,
}

impl GameEventListener for Recorder {
    fn game_state_changed(&mut self) {
        *self.calls.borrow_mut() += 1;
    }
}

#[test]
fn test_shipped_levels_load_cleanly() {
    for name in ["kiwi_island.txt", "tutorial.json"] {
        let game = load_game(level_path(name)).unwrap();
        assert_eq!(game.state(), GameState::Playing, "{name}");
        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "{name}: {violations:?}");
    }

    let game = load_game(level_path("kiwi_island.txt")).unwrap();
    assert_eq!(game.num_rows(), 10);
    assert_eq!(game.total_kiwis(), 3);
    assert_eq!(game.total_predators(), 4);
    assert_eq!(game.player_name(), "River Song");
    assert_eq!(game.terrain(0, 0), Some(Terrain::Water));
    assert!(game.draw().contains('@'));
}

#[test]
fn test_tutorial_playthrough_wins() {
    let mut game = load_game(level_path("tutorial.json")).unwrap();
    let calls = Rc::new(RefCell::new(0));
    game.add_listener(Recorder {
        calls: Rc::clone(&calls),
    });

    let trap = item_here(&game, "Trap");
    assert!(game.collect_item(trap));

    assert!(game.move_player(MoveDirection::East));
    assert_eq!(game.count_kiwi(), 1);
    assert_eq!(game.state(), GameState::Playing, "quota of 100% not met yet");

    assert!(game.move_player(MoveDirection::East));
    assert!(game.move_player(MoveDirection::South));
    assert!(game.can_use(trap));
    assert!(game.use_item(trap));

    assert_eq!(game.state(), GameState::Won);
    assert_eq!(game.predators_remaining(), 0);
    assert!(game.reward_code().is_some());
    assert!(game.win_message().contains("trapped all the predators"));
    // collect, move, count, move, move, use
    assert_eq!(*calls.borrow(), 6);

    assert!(!game.move_player(MoveDirection::West), "game is over");
    assert_eq!(*calls.borrow(), 6);
}

#[test]
fn test_kiwi_quota_win() {
    let level = Level::parse_text(
        "1, 3,
        ...,
        Ana, 0, 0, 10, 5, 5,
        6,
        T, Trap, trap, 0, 0, 1, 1,
        P, Rat, rat, 0, 1,
        P, Stoat, stoat, 0, 1,
        P, Cat, cat, 0, 1,
        K, Kiwi, kiwi, 0, 2,
        P, Possum, possum, 0, 2,",
    )
    .unwrap();
    let mut game = level.build().unwrap();
    let trap = item_here(&game, "Trap");
    assert!(game.collect_item(trap));
    assert!(game.move_player(MoveDirection::East));
    for _ in 0..3 {
        assert!(game.use_item(trap));
    }
    assert_eq!(game.predators_trapped(), 3);
    assert!(!game.use_item(trap), "tile is clear");

    assert!(game.move_player(MoveDirection::East));
    assert_eq!(game.count_kiwi(), 1);
    // 3 of 4 predators is 75%, under the 80% quota.
    assert_eq!(game.state(), GameState::Playing);
    assert!(game.use_item(trap));
    assert_eq!(game.state(), GameState::Won);
}

#[test]
fn test_death_by_exhaustion() {
    let level = Level::parse_text(
        "1, 4,
        .^^.,
        Ana, 0, 0, 7, 5, 5,
        2,
        H, Swamp, a sucking swamp, 0, 2, 0.5,
        P, Rat, rat, 0, 3,",
    )
    .unwrap();
    let mut game = level.build().unwrap();

    assert!(game.move_player(MoveDirection::East));
    // 7 - 3 scrub - 3 scrub - 3.5 swamp
    assert!(game.move_player(MoveDirection::East));
    assert_eq!(game.state(), GameState::Lost);
    assert!(!game.player().is_alive());
    assert!(game.lose_message().contains("run out of stamina"));
    assert!(!game.has_player_message());
}

#[test]
fn test_food_keeps_the_player_going() {
    let level = Level::parse_text(
        "1, 3,
        .^^,
        Ana, 0, 0, 4, 5, 5,
        2,
        E, Apple, apple, 0, 0, 1, 1, 3,
        P, Rat, rat, 0, 2,",
    )
    .unwrap();
    let mut game = level.build().unwrap();
    let apple = item_here(&game, "Apple");
    assert!(game.collect_item(apple));
    assert!(game.move_player(MoveDirection::East));
    assert!((game.player_snapshot().stamina - 1.0).abs() < f64::EPSILON);
    assert_eq!(game.state(), GameState::Playing, "sand to the west is affordable");

    assert!(!game.is_player_move_possible(MoveDirection::East));
    assert!(game.use_item(held(&game, "Apple")));
    assert!(game.is_player_move_possible(MoveDirection::East));
    assert!(game.player_inventory().is_empty());
}

#[test]
fn test_stranded_player_loses() {
    let level = Level::parse_text(
        "1, 2,
        .~,
        Ana, 0, 0, 10, 5, 5,
        2,
        E, Apple, apple, 0, 0, 1, 1, 3,
        P, Rat, rat, 0, 1,",
    )
    .unwrap();
    let mut game = level.build().unwrap();
    // Only water around: the first re-evaluation ends the game.
    let apple = item_here(&game, "Apple");
    assert!(game.collect_item(apple));
    assert_eq!(game.state(), GameState::Playing, "collect does not re-evaluate");
    assert!(game.use_item(apple));
    assert_eq!(game.state(), GameState::Lost);
    assert!(game.lose_message().contains("sufficient stamina"));
}

#[test]
fn test_drop_and_recollect_on_crowded_tile() {
    let level = Level::parse_text(
        "1, 2,
        ..,
        Ana, 0, 0, 10, 5, 5,
        5,
        T, Trap, trap, 0, 0, 1, 1,
        F, Tui, tui, 0, 1,
        F, Robin, robin, 0, 1,
        F, Fantail, fantail, 0, 1,
        P, Rat, rat, 0, 0,",
    )
    .unwrap();
    let mut game = level.build().unwrap();
    let trap = item_here(&game, "Trap");
    assert!(game.collect_item(trap));
    assert!(game.move_player(MoveDirection::East));
    assert!(!game.drop_item(trap), "tile holds three birds");
    assert_eq!(game.player().inventory(), &[trap]);

    assert!(game.move_player(MoveDirection::West));
    assert!(game.drop_item(trap));
    assert!(game.collect_item(trap));
    assert_eq!(game.player().inventory(), &[trap]);
    assert!(check_invariants(&game).is_empty());
}
