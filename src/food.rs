use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Random draws attempted before falling back to a scan of free cells.
pub const MAX_SPAWN_ATTEMPTS: usize = 256;

/// Food cell currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Places food on a cell the snake does not occupy.
    ///
    /// Returns `None` only when the snake covers the whole grid.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Self> {
        spawn_position(rng, bounds, snake).map(Self::new)
    }
}

/// Picks a uniformly random cell not occupied by the snake.
///
/// Draws random cells until one is free. On crowded boards the draws are
/// capped at [`MAX_SPAWN_ATTEMPTS`], after which the free cells are
/// enumerated and one is chosen from them directly.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    debug_assert!(bounds.width > 0 && bounds.height > 0);

    if snake.len() >= bounds.total_cells() {
        return None;
    }

    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    let candidates: Vec<Position> = (0..i32::from(bounds.height))
        .flat_map(|y| (0..i32::from(bounds.width)).map(move |x| Position { x, y }))
        .filter(|position| !snake.occupies(*position))
        .collect();

    if candidates.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
