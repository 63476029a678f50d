//! Presentation data derived from a [`GameState`].
//!
//! [`compose`] is recomputed after every tick; nothing here is cached, so a
//! renderer can never draw a stale view of the engine.

use crate::config::GridSize;
use crate::game::{DeathReason, GameState, GameStatus};
use crate::snake::Position;

/// What a drawable cell represents.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SpriteKind {
    SnakeHead,
    SnakeBody,
    Food,
}

/// One grid cell to draw.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Sprite {
    pub position: Position,
    pub kind: SpriteKind,
}

/// Full-screen layer drawn above the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Overlay {
    GameOver {
        score: u32,
        reason: Option<DeathReason>,
    },
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Scene {
    pub bounds: GridSize,
    /// Food first, then the snake from tail to head so the head paints last.
    pub sprites: Vec<Sprite>,
    pub score: u32,
    pub snake_len: usize,
    pub overlay: Option<Overlay>,
}

/// Maps the current state to drawable primitives.
#[must_use]
pub fn compose(state: &GameState) -> Scene {
    let snake = state.snake();
    let mut sprites = Vec::with_capacity(snake.len() + 1);

    sprites.push(Sprite {
        position: state.food().position,
        kind: SpriteKind::Food,
    });

    let segments: Vec<Position> = snake.segments().copied().collect();
    for (index, position) in segments.iter().enumerate().rev() {
        let kind = if index == 0 {
            SpriteKind::SnakeHead
        } else {
            SpriteKind::SnakeBody
        };
        sprites.push(Sprite {
            position: *position,
            kind,
        });
    }

    let overlay = match state.status() {
        GameStatus::Over => Some(Overlay::GameOver {
            score: state.score(),
            reason: state.death_reason(),
        }),
        GameStatus::Running => None,
    };

    Scene {
        bounds: state.bounds(),
        sprites,
        score: state.score(),
        snake_len: snake.len(),
        overlay,
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::game::{DeathReason, GameState};
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{Overlay, SpriteKind, compose};

    #[test]
    fn running_scene_has_head_body_and_food() {
        let state = GameState::new_with_seed(GameConfig::default(), 1).expect("valid");

        let scene = compose(&state);

        let count = |kind: SpriteKind| scene.sprites.iter().filter(|s| s.kind == kind).count();
        assert_eq!(count(SpriteKind::SnakeHead), 1);
        assert_eq!(count(SpriteKind::SnakeBody), 2);
        assert_eq!(count(SpriteKind::Food), 1);
        assert_eq!(scene.overlay, None);
        assert_eq!(scene.snake_len, 3);
    }

    #[test]
    fn head_sprite_is_drawn_last() {
        let state = GameState::new_with_seed(GameConfig::default(), 2).expect("valid");

        let scene = compose(&state);
        let last = scene.sprites.last().expect("scene has sprites");

        assert_eq!(last.kind, SpriteKind::SnakeHead);
        assert_eq!(last.position, Position::new(5, 5));
    }

    #[test]
    fn game_over_scene_carries_overlay() {
        let snake = Snake::from_segments(
            vec![Position::new(5, 0), Position::new(5, 1), Position::new(5, 2)],
            Direction::Up,
        );
        let mut state =
            GameState::from_parts(GameConfig::default(), 3, snake, Position::new(9, 9))
                .expect("valid");
        state.tick();

        let scene = compose(&state);

        assert_eq!(
            scene.overlay,
            Some(Overlay::GameOver {
                score: 0,
                reason: Some(DeathReason::WallCollision),
            })
        );
    }

    #[test]
    fn compose_tracks_every_tick() {
        let mut state = GameState::from_parts(
            GameConfig::default(),
            4,
            Snake::initial(),
            Position::new(6, 5),
        )
        .expect("valid");

        state.tick();
        let scene = compose(&state);

        assert_eq!(scene.score, 10);
        assert_eq!(scene.snake_len, 4);
        assert_eq!(scene.sprites.len(), 5);
    }
}
