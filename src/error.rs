use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Configuration bugs caught when a game is constructed or reset.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum GameError {
    #[error("grid {width}x{height} is too small for the starting snake (minimum side is {min})")]
    GridTooSmall { width: u16, height: u16, min: u16 },
    #[error("snake segment ({x}, {y}) is off the grid or overlaps another segment")]
    InvalidSnake { x: i32, y: i32 },
}

/// Failures while loading a game configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Game(#[from] GameError),
}

impl From<ConfigError> for io::Error {
    fn from(error: ConfigError) -> Self {
        let kind = match &error {
            ConfigError::Read { source, .. } => source.kind(),
            _ => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, error)
    }
}

impl From<GameError> for io::Error {
    fn from(error: GameError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, error)
    }
}
