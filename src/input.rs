use std::sync::atomic::{AtomicU8, Ordering};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::SpeedPreset;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step `(dx, dy)`; `y` grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    fn to_code(self) -> u8 {
        match self {
            Self::Up => 1,
            Self::Down => 2,
            Self::Left => 3,
            Self::Right => 4,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Up),
            2 => Some(Self::Down),
            3 => Some(Self::Left),
            4 => Some(Self::Right),
            _ => None,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    Pause,
    Faster,
    Slower,
    Speed(SpeedPreset),
    CycleTheme,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Single-slot direction register shared between an input thread and the
/// tick loop.
///
/// Only the latest accepted direction matters, so this is a register rather
/// than a queue: `store` overwrites, `take` empties. The tick loop publishes
/// the heading the next tick commits through [`DirectionLatch::guard`];
/// `store` drops reversals of it so they cannot displace an earlier valid
/// turn.
#[derive(Debug, Default)]
pub struct DirectionLatch {
    slot: AtomicU8,
    heading: AtomicU8,
}

impl DirectionLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the heading that stored directions must not reverse; `None`
    /// accepts every direction.
    pub fn guard(&self, heading: Option<Direction>) {
        let code = heading.map_or(0, Direction::to_code);
        self.heading.store(code, Ordering::Release);
    }

    /// Publishes `direction`, replacing any value not yet taken.
    ///
    /// Returns false and leaves the slot alone when `direction` reverses the
    /// guarded heading.
    pub fn store(&self, direction: Direction) -> bool {
        let heading = Direction::from_code(self.heading.load(Ordering::Acquire));
        if heading.is_some_and(|heading| !direction_change_is_valid(heading, direction)) {
            return false;
        }
        self.slot.store(direction.to_code(), Ordering::Release);
        true
    }

    /// Removes and returns the latest stored direction.
    pub fn take(&self) -> Option<Direction> {
        Direction::from_code(self.slot.swap(0, Ordering::AcqRel))
    }
}

/// Maps one terminal key event to a game input.
///
/// Arrows, WASD and HJKL steer; key releases and repeats of unmapped keys
/// are ignored.
#[must_use]
pub fn map_key_event(event: KeyEvent) -> Option<GameInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(GameInput::Quit),
            _ => None,
        };
    }

    let input = match event.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k' | 'K') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => {
            GameInput::Direction(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => {
            GameInput::Direction(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => {
            GameInput::Direction(Direction::Right)
        }
        KeyCode::Enter | KeyCode::Char(' ' | 'r' | 'R') => GameInput::Restart,
        KeyCode::Char('p' | 'P') => GameInput::Pause,
        KeyCode::Char('+' | '=') => GameInput::Faster,
        KeyCode::Char('-' | '_') => GameInput::Slower,
        KeyCode::Char('1') => GameInput::Speed(SpeedPreset::Slow),
        KeyCode::Char('2') => GameInput::Speed(SpeedPreset::Medium),
        KeyCode::Char('3') => GameInput::Speed(SpeedPreset::Fast),
        KeyCode::Char('t' | 'T') => GameInput::CycleTheme,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use crate::config::SpeedPreset;

    use super::{Direction, DirectionLatch, GameInput, direction_change_is_valid, map_key_event};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn opposite_deltas_cancel_out() {
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn direction_change_rejects_reverse() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(Direction::Down, Direction::Up));
        assert!(!direction_change_is_valid(
            Direction::Left,
            Direction::Right
        ));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn latch_keeps_only_the_latest_direction() {
        let latch = DirectionLatch::new();
        assert_eq!(latch.take(), None);

        latch.store(Direction::Up);
        latch.store(Direction::Left);

        assert_eq!(latch.take(), Some(Direction::Left));
        assert_eq!(latch.take(), None);
    }

    #[test]
    fn guarded_latch_drops_reversals_and_keeps_the_earlier_turn() {
        let latch = DirectionLatch::new();
        latch.guard(Some(Direction::Right));

        assert!(latch.store(Direction::Up));
        assert!(!latch.store(Direction::Left));
        assert_eq!(latch.take(), Some(Direction::Up));

        latch.guard(None);
        assert!(latch.store(Direction::Left));
        assert_eq!(latch.take(), Some(Direction::Left));
    }

    #[test]
    fn latch_is_visible_across_threads() {
        let latch = Arc::new(DirectionLatch::new());
        let writer = Arc::clone(&latch);

        let stored = thread::spawn(move || writer.store(Direction::Down))
            .join()
            .expect("writer thread should not panic");

        assert!(stored);

        assert_eq!(latch.take(), Some(Direction::Down));
    }

    #[test]
    fn arrows_and_letters_map_to_directions() {
        assert_eq!(
            map_key_event(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('j'))),
            Some(GameInput::Direction(Direction::Down))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('3'))),
            Some(GameInput::Speed(SpeedPreset::Fast))
        );
    }

    #[test]
    fn ctrl_c_quits_and_releases_are_ignored() {
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );

        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key_event(release), None);
        assert_eq!(map_key_event(press(KeyCode::Char('z'))), None);
    }
}
