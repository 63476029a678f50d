//! Grid snake: a deterministic, tick-driven snake simulation engine with a
//! terminal front-end.
//!
//! [`game::GameState`] is the engine. Input code calls
//! [`game::GameState::set_direction`] (or stores into an
//! [`input::DirectionLatch`] from another thread), a fixed-interval
//! [`ticker::Ticker`] decides when to call [`game::GameState::tick`], and a
//! renderer draws [`scene::compose`] after each tick.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod scene;
pub mod snake;
pub mod terminal_runtime;
pub mod ticker;
pub mod ui;
