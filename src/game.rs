use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::config::{FOOD_REWARD, GameConfig, GridSize};
use crate::error::GameError;
use crate::food::Food;
use crate::input::{Direction, GameInput};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Over,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// Result of one call to [`GameState::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The snake moved one cell.
    Moved,
    /// The snake moved onto the food and grew.
    Ate,
    /// This tick ended the game.
    GameOver(DeathReason),
    /// The game was already over; nothing changed.
    Inactive,
}

/// Complete mutable game state for one session.
///
/// Snake, food and score change only inside [`GameState::tick`]; the status
/// leaves `Over` only through a reset.
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    food: Food,
    score: u32,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a session seeded from OS entropy.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible simulations.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a seeded session with an explicit snake and food cell.
    ///
    /// Food is moved to a free cell if `food` lies under the snake or off
    /// the grid. A snake that leaves the grid or crosses itself is rejected;
    /// one that already covers every cell yields a finished game.
    pub fn from_parts(
        config: GameConfig,
        seed: u64,
        snake: Snake,
        food: Position,
    ) -> Result<Self, GameError> {
        let mut state = Self::new_with_seed(config, seed)?;

        let mut seen = HashSet::with_capacity(snake.len());
        for segment in snake.segments() {
            if !segment.is_within_bounds(config.grid) || !seen.insert(*segment) {
                return Err(GameError::InvalidSnake {
                    x: segment.x,
                    y: segment.y,
                });
            }
        }

        state.snake = snake;
        if food.is_within_bounds(config.grid) && !state.snake.occupies(food) {
            state.food = Food::new(food);
        } else {
            match Food::spawn(&mut state.rng, config.grid, &state.snake) {
                Some(spawned) => state.food = spawned,
                None => {
                    state.finish(DeathReason::BoardFilled);
                }
            }
        }
        Ok(state)
    }

    /// Heading a steering request must not reverse, or `None` while a
    /// one-cell snake may turn any way.
    ///
    /// This is the heading the next tick will commit.
    #[must_use]
    pub fn reverse_guard(&self) -> Option<Direction> {
        (self.snake.len() > 1).then_some(self.snake.pending_direction())
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;

        let snake = Snake::initial();
        let mut state = Self {
            food: Food::new(snake.head()),
            snake,
            score: 0,
            status: GameStatus::Running,
            death_reason: None,
            tick_count: 0,
            config,
            rng,
        };
        state.reset();
        Ok(state)
    }

    /// Restores the starting layout, keeping the config and RNG stream.
    pub fn reset(&mut self) {
        self.snake = Snake::initial();
        self.food = Food::spawn(&mut self.rng, self.config.grid, &self.snake)
            .expect("validated grid always has free cells around the starting snake");
        self.score = 0;
        self.status = GameStatus::Running;
        self.death_reason = None;
        self.tick_count = 0;

        debug!(
            width = self.config.grid.width,
            height = self.config.grid.height,
            food_x = self.food.position.x,
            food_y = self.food.position.y,
            "game reset"
        );
    }

    /// Switches to `config` and resets.
    pub fn reset_with(&mut self, config: GameConfig) -> Result<(), GameError> {
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Requests a heading change for the next tick.
    ///
    /// Reversals of the committed heading and requests made after the game
    /// ended are dropped silently.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.status != GameStatus::Running {
            return;
        }

        if !self.snake.request_direction(requested) {
            trace!(?requested, heading = ?self.snake.direction(), "reverse direction ignored");
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Inactive;
        }

        self.tick_count += 1;
        let next_head = self.snake.commit_direction();

        if !next_head.is_within_bounds(self.config.grid) {
            return self.finish(DeathReason::WallCollision);
        }

        if self.snake.collides_after_tail_moves(next_head) {
            return self.finish(DeathReason::SelfCollision);
        }

        let ate_food = next_head == self.food.position;
        self.snake.advance(next_head, ate_food);
        if !ate_food {
            return TickOutcome::Moved;
        }

        self.score += FOOD_REWARD;
        debug!(score = self.score, length = self.snake.len(), "food eaten");

        match Food::spawn(&mut self.rng, self.config.grid, &self.snake) {
            Some(food) => {
                self.food = food;
                TickOutcome::Ate
            }
            None => self.finish(DeathReason::BoardFilled),
        }
    }

    /// Applies one external input event.
    ///
    /// Only steering and restart concern the engine; pacing, pause and
    /// theme inputs belong to the front-end and are ignored here.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.set_direction(direction),
            GameInput::Restart if self.status == GameStatus::Over => self.reset(),
            _ => {}
        }
    }

    fn finish(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = GameStatus::Over;
        self.death_reason = Some(reason);
        debug!(
            ?reason,
            score = self.score,
            length = self.snake.len(),
            ticks = self.tick_count,
            "game over"
        );
        TickOutcome::GameOver(reason)
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Committed heading.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.snake.pending_direction()
    }

    /// Number of ticks applied while running.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }
}
