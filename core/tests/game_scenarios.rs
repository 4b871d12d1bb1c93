//! Whole-game scenarios driven through the controller with scripted numbers.
use sumfall_core::*;

type Game = GameController<SequenceGenerator, MemoryHighScore>;

/// 10x6 default board, bottom four rows filled from `values` in spawn order.
fn game(values: &[TileValue], targets: &[Sum]) -> Game {
    let generator = SequenceGenerator::new(values.iter().copied(), targets.iter().copied());
    GameController::new(GameConfig::default(), generator, MemoryHighScore::default()).unwrap()
}

#[test]
fn seven_and_eight_match_fifteen() {
    let mut game = game(&[7, 8, 1, 1, 1, 1], &[15, 21]);
    game.start(Mode::Classic);

    assert_eq!(game.activate((9, 0)), ToggleOutcome::Pending { sum: 7 });
    let outcome = game.activate((9, 1));

    assert_eq!(outcome, ToggleOutcome::Matched { cleared: 2, points: 20 });
    assert_eq!(game.score(), 20);
    let target = game.target().unwrap();
    assert!((10..=25).contains(&target));
    let events = game.drain_events();
    assert_eq!(events[0], GameEvent::Celebrate { cleared: 2 });
    assert!(events.contains(&GameEvent::RowInjected));
}

#[test]
fn nine_then_nine_overflows_fifteen() {
    let mut game = game(&[9], &[15]);
    game.start(Mode::TimeAttack);

    assert_eq!(game.activate((9, 0)), ToggleOutcome::Pending { sum: 9 });
    assert_eq!(game.activate((9, 1)), ToggleOutcome::Overflow { sum: 18 });

    let grid = game.grid().unwrap();
    assert!(grid.selection().is_empty());
    assert_eq!(grid.tile_count(), 24);
    assert_eq!(game.score(), 0);
    assert_eq!(game.target(), Some(15));
    assert_eq!(game.drain_events(), [GameEvent::Overflow]);
}

#[test]
fn classic_match_on_full_board_ends_game() {
    let config = GameConfig::new((10, 6), 10);
    let generator = SequenceGenerator::new([5], [10]);
    let mut game = GameController::new(config, generator, MemoryHighScore::default()).unwrap();
    game.start(Mode::Classic);

    game.activate((9, 0));
    game.activate((8, 0));
    let after_match = game.grid().unwrap().clone();

    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.score(), 20);
    assert_eq!(after_match.tile_count(), 58);
    assert!(after_match.top_row_occupied());
    assert_eq!(game.snapshot().score, 20);
    assert_eq!(game.activate((9, 1)), ToggleOutcome::NoChange);
    assert_eq!(game.grid(), Some(&after_match));
}

#[test]
fn time_attack_countdown_injects_and_resets() {
    let mut game = game(&[3], &[20]);
    game.start(Mode::TimeAttack);
    let token = game.tick_token().unwrap();

    for left in (1..15).rev() {
        assert_eq!(game.tick(token), TickOutcome::Counting { time_left: left });
    }
    assert_eq!(game.tick(token), TickOutcome::RowInjected);

    assert_eq!(game.time_left(), Some(15));
    assert_eq!(game.grid().unwrap().tile_count(), 30);
    assert_eq!(game.state(), GameState::Playing);
}

#[test]
fn seeded_games_replay_identically() {
    let play = |seed| {
        let generator = RandomValueGenerator::new(seed);
        let mut game =
            GameController::new(GameConfig::default(), generator, MemoryHighScore::default()).unwrap();
        game.start(Mode::Classic);
        for col in 0..6 {
            game.activate((9, col));
        }
        game.snapshot()
    };

    assert_eq!(play(99), play(99));
}
