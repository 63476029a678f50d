//! Property tests for the simulation engine.
//!
//! Random direction sequences are fed into a seeded game and the board
//! invariants are checked after every tick.

use std::collections::HashSet;

use grid_snake::config::{FOOD_REWARD, GameConfig};
use grid_snake::game::{GameState, GameStatus, TickOutcome};
use grid_snake::input::Direction;
use grid_snake::snake::Position;
use proptest::prelude::*;

/// One step of player behaviour: maybe steer, then tick.
#[derive(Debug, Clone, Copy)]
enum Step {
    Tick,
    Steer(Direction),
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => Just(Step::Tick),
        1 => direction_strategy().prop_map(Step::Steer),
    ]
}

fn assert_board_invariants(state: &GameState) {
    let segments: Vec<Position> = state.snake().segments().copied().collect();
    let unique: HashSet<Position> = segments.iter().copied().collect();
    assert_eq!(unique.len(), segments.len(), "snake overlaps itself");
    assert!(
        !unique.contains(&state.food().position),
        "food placed under the snake"
    );
    assert!(
        segments
            .iter()
            .all(|segment| segment.is_within_bounds(state.bounds()))
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn random_play_preserves_invariants(
        seed in any::<u64>(),
        side in 6u16..14,
        steps in prop::collection::vec(step_strategy(), 1..200),
    ) {
        let mut state = GameState::new_with_seed(GameConfig::square(side, 200), seed)
            .expect("valid config");
        assert_board_invariants(&state);

        for step in steps {
            match step {
                Step::Steer(direction) => {
                    state.set_direction(direction);
                    continue;
                }
                Step::Tick => {}
            }

            let len_before = state.snake().len();
            let score_before = state.score();
            let food_before = state.food();
            let snake_before = state.snake().clone();
            let was_running = state.status() == GameStatus::Running;

            let outcome = state.tick();

            match outcome {
                TickOutcome::Moved => {
                    prop_assert_eq!(state.snake().len(), len_before);
                    prop_assert_eq!(state.score(), score_before);
                }
                TickOutcome::Ate => {
                    prop_assert_eq!(state.snake().len(), len_before + 1);
                    prop_assert_eq!(state.score(), score_before + FOOD_REWARD);
                }
                TickOutcome::GameOver(_) if state.snake().len() == len_before => {
                    // Collision: nothing but the status changed.
                    prop_assert_eq!(state.snake().segments().collect::<Vec<_>>(),
                        snake_before.segments().collect::<Vec<_>>());
                    prop_assert_eq!(state.food(), food_before);
                    prop_assert_eq!(state.score(), score_before);
                }
                TickOutcome::GameOver(_) => {
                    // Board filled by the final bite.
                    prop_assert_eq!(state.snake().len(), len_before + 1);
                }
                TickOutcome::Inactive => {
                    prop_assert!(!was_running);
                    prop_assert_eq!(state.snake(), &snake_before);
                }
            }

            prop_assert!(state.snake().len() >= len_before);
            if state.status() == GameStatus::Running {
                assert_board_invariants(&state);
            }
        }
    }

    #[test]
    fn reversal_never_takes_effect(seed in any::<u64>(), turns in prop::collection::vec(direction_strategy(), 1..40)) {
        let mut state = GameState::new_with_seed(GameConfig::square(30, 200), seed)
            .expect("valid config");

        for turn in turns {
            let heading = state.direction();
            state.set_direction(turn);
            let head = state.snake().head();
            if state.tick() == TickOutcome::Inactive {
                break;
            }
            prop_assert_ne!(state.direction(), heading.opposite());
            prop_assert_ne!(
                state.snake().head(),
                head.stepped(heading.opposite())
            );
        }
    }

    #[test]
    fn reset_always_restores_the_start(seed in any::<u64>(), ticks in 0usize..60) {
        let mut state = GameState::new_with_seed(GameConfig::default(), seed)
            .expect("valid config");
        for _ in 0..ticks {
            state.tick();
        }

        state.reset();

        prop_assert_eq!(
            state.snake().segments().copied().collect::<Vec<_>>(),
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
        );
        prop_assert_eq!(state.direction(), Direction::Right);
        prop_assert_eq!(state.score(), 0);
        prop_assert_eq!(state.status(), GameStatus::Running);
        prop_assert!(!state.snake().occupies(state.food().position));
    }
}
