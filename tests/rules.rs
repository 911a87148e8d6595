use std::collections::HashSet;

use pocket_snake::game::{
    Direction, GameConfig, GameEngine, GameOverCause, GameState, Position, Snake, TickOutcome,
};

fn config(width: usize, height: usize, seed: u64) -> GameConfig {
    GameConfig {
        seed: Some(seed),
        ..GameConfig::new(width, height)
    }
}

fn engine(
    config: GameConfig,
    cells: &[(i32, i32)],
    heading: Direction,
    food: (i32, i32),
) -> GameEngine {
    let snake = Snake::from_cells(cells.iter().map(|&(x, y)| Position::new(x, y))).unwrap();
    let state = GameState::new(
        snake,
        heading,
        Some(Position::new(food.0, food.1)),
        config.grid_width,
        config.grid_height,
    );
    GameEngine::with_state(config, state).unwrap()
}

fn assert_body_distinct(engine: &GameEngine) {
    let cells: HashSet<Position> = engine.snake().iter().collect();
    assert_eq!(cells.len(), engine.snake().len());
}

#[test]
fn eating_grows_the_snake_and_moves_the_food() {
    let mut engine = engine(config(10, 10, 1), &[(5, 5)], Direction::Right, (6, 5));

    let outcome = engine.tick();

    assert_eq!(outcome, TickOutcome::Ate { score: 1 });
    assert_eq!(engine.snake().head(), Position::new(6, 5));
    assert_eq!(engine.snake().len(), 2);
    assert_eq!(engine.score(), 1);
    let food = engine.food().unwrap();
    assert_ne!(food, Position::new(6, 5));
    assert!(!engine.snake().contains(food));
}

#[test]
fn leaving_the_grid_ends_the_game_without_touching_state() {
    let mut engine = engine(config(10, 10, 2), &[(1, 5), (0, 5)], Direction::Left, (9, 9));
    let before = engine.state().clone();

    let outcome = engine.tick();

    assert_eq!(
        outcome,
        TickOutcome::GameOver {
            cause: GameOverCause::Wall,
            final_score: 0
        }
    );
    assert!(engine.is_game_over());
    assert_eq!(engine.snake(), &before.snake);
    assert_eq!(engine.food(), before.food);
    assert_eq!(engine.score(), before.score);
}

#[test]
fn every_edge_is_a_wall() {
    let cases = [
        ((0, 4), Direction::Left),
        ((9, 4), Direction::Right),
        ((4, 0), Direction::Up),
        ((4, 9), Direction::Down),
    ];

    for ((x, y), heading) in cases {
        let mut engine = engine(config(10, 10, 3), &[(x, y)], heading, (5, 5));
        assert_eq!(
            engine.tick(),
            TickOutcome::GameOver {
                cause: GameOverCause::Wall,
                final_score: 0
            },
            "heading {heading:?} from ({x}, {y})"
        );
    }
}

#[test]
fn reversal_is_rejected() {
    let mut moving_right = engine(
        config(10, 10, 4),
        &[(3, 3), (4, 3), (5, 3)],
        Direction::Right,
        (9, 9),
    );

    assert!(!moving_right.change_heading(Direction::Left));
    assert_eq!(moving_right.heading(), Direction::Right);

    for heading in Direction::ALL {
        let mut engine = engine(config(10, 10, 4), &[(5, 5)], heading, (9, 9));

        assert!(
            !engine.change_heading(heading.opposite()),
            "reversal from {heading:?} was accepted"
        );
        assert_eq!(engine.heading(), heading);
    }
}

#[test]
fn last_turn_before_a_tick_wins() {
    let mut engine = GameEngine::new(config(15, 15, 8)).unwrap();

    assert!(engine.change_heading(Direction::Up));
    assert!(engine.change_heading(Direction::Left));
    assert_eq!(engine.heading(), Direction::Left);

    assert_eq!(engine.tick(), TickOutcome::Moved);
    assert_eq!(engine.snake().head(), Position::new(4, 5));
}

#[test]
fn reset_restores_start_values() {
    let mut engine = engine(config(10, 10, 5), &[(1, 5), (0, 5)], Direction::Left, (9, 9));
    engine.tick();
    assert!(engine.is_game_over());

    engine.reset();

    assert!(!engine.is_game_over());
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.heading(), Direction::Right);
    assert_eq!(
        engine.snake().iter().collect::<Vec<_>>(),
        vec![engine.config().start]
    );
}

#[test]
fn game_over_is_sticky() {
    let mut engine = engine(config(6, 6, 6), &[(0, 1), (0, 0)], Direction::Up, (3, 3));
    assert!(engine.tick().is_game_over());
    let frozen = engine.state().clone();

    for _ in 0..5 {
        for heading in Direction::ALL {
            engine.change_heading(heading);
        }
        assert_eq!(engine.tick(), TickOutcome::Ignored);
    }

    assert_eq!(engine.state(), &frozen);
}

#[test]
fn random_play_keeps_invariants() {
    // Deterministic walk that turns whenever the next cell is blocked
    let mut engine = GameEngine::new(config(8, 8, 7)).unwrap();
    let mut turn = 0;

    for _ in 0..2_000 {
        if engine.is_game_over() {
            engine.reset();
        }

        let old_len = engine.snake().len();
        let old_score = engine.score();
        let next = engine.snake().head().moved_in_direction(engine.heading());
        if !engine.state().is_in_bounds(next) || engine.snake().contains(next) {
            engine.change_heading(Direction::ALL[turn % 4]);
            turn += 1;
        }

        match engine.tick() {
            TickOutcome::Moved => {
                assert_eq!(engine.snake().len(), old_len);
                assert_eq!(engine.score(), old_score);
            }
            TickOutcome::Ate { score } => {
                assert_eq!(engine.snake().len(), old_len + 1);
                assert_eq!(score, old_score + 1);
            }
            TickOutcome::GameOver {
                cause: GameOverCause::BoardFilled,
                final_score,
            } => {
                assert_eq!(final_score, old_score + 1);
                assert_eq!(engine.food(), None);
            }
            TickOutcome::GameOver { final_score, .. } => {
                assert_eq!(final_score, old_score);
                assert_eq!(engine.snake().len(), old_len);
            }
            TickOutcome::Ignored => unreachable!("game was running"),
        }

        assert_body_distinct(&engine);
        if let Some(food) = engine.food() {
            assert!(!engine.snake().contains(food));
            assert!(engine.state().is_in_bounds(food));
        }
    }
}

#[test]
fn same_seed_same_game() {
    let run = || {
        let mut engine = GameEngine::new(config(7, 7, 99)).unwrap();
        let mut foods = vec![engine.food()];
        for step in 0..40 {
            if step % 5 == 0 {
                engine.change_heading(if step % 10 == 0 {
                    Direction::Down
                } else {
                    Direction::Right
                });
            }
            if engine.tick().is_game_over() {
                engine.reset();
            }
            foods.push(engine.food());
        }
        foods
    };

    assert_eq!(run(), run());
}
