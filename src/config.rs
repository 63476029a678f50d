use std::fs;
use std::path::Path;
use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GameError};

/// Default side length of the square play field.
pub const DEFAULT_GRID_SIDE: u16 = 20;

/// Smallest side that still fits the fixed starting snake `[(5,5),(4,5),(3,5)]`.
pub const MIN_GRID_SIDE: u16 = 6;

/// Score granted per food eaten.
pub const FOOD_REWARD: u32 = 10;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Interval change applied by one faster/slower step.
pub const SPEED_STEP_MS: u64 = 50;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Square grid with `side` cells per axis.
    #[must_use]
    pub fn square(side: u16) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Rejects grids that cannot hold the starting snake.
    pub fn validate(self) -> Result<(), GameError> {
        if self.width < MIN_GRID_SIDE || self.height < MIN_GRID_SIDE {
            return Err(GameError::GridTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_GRID_SIDE,
            });
        }
        Ok(())
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_SIDE)
    }
}

/// Named tick cadences offered by the front-end.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpeedPreset {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl SpeedPreset {
    #[must_use]
    pub fn interval_ms(self) -> u64 {
        match self {
            Self::Slow => 300,
            Self::Medium => DEFAULT_TICK_INTERVAL_MS,
            Self::Fast => 100,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        }
    }
}

/// Settings for one game session.
///
/// Every field has a default, so a config file only needs to name what it
/// overrides.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Config for a `side × side` grid ticking every `tick_interval_ms`.
    #[must_use]
    pub fn square(side: u16, tick_interval_ms: u64) -> Self {
        Self {
            grid: GridSize::square(side),
            tick_interval_ms,
        }
    }

    /// Tick interval clamped to the supported minimum.
    #[must_use]
    pub fn tick_interval(self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(MIN_TICK_INTERVAL_MS))
    }

    pub fn validate(self) -> Result<(), GameError> {
        self.grid.validate()
    }
}

/// Loads and validates a JSON game config.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: GameConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;

    Ok(config)
}

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    /// Background color for empty play-area cells.
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub overlay_title: Color,
    pub overlay_footer: Color,
}

/// Dark green snake on black.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    snake_head: Color::Rgb(0x00, 0x80, 0x00),
    snake_body: Color::Rgb(0x00, 0xFF, 0x00),
    food: Color::Rgb(0xFF, 0x00, 0x00),
    play_bg: Color::Black,
    border_fg: Color::Gray,
    hud_score: Color::White,
    overlay_title: Color::Red,
    overlay_footer: Color::DarkGray,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "Ocean",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    food: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::Cyan,
    hud_score: Color::Cyan,
    overlay_title: Color::Cyan,
    overlay_footer: Color::DarkGray,
};

/// Neon magenta/yellow theme.
pub const THEME_NEON: Theme = Theme {
    name: "Neon",
    snake_head: Color::White,
    snake_body: Color::Magenta,
    food: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::Magenta,
    hud_score: Color::Magenta,
    overlay_title: Color::Magenta,
    overlay_footer: Color::DarkGray,
};

/// All available themes in cycle order.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_OCEAN, THEME_NEON];

/// Play-field border.
pub const BORDER_PLAY_FIELD: border::Set = border::ROUNDED;

/// Glyph pair drawn for one grid cell (cells are two columns wide).
pub const GLYPH_CELL: &str = "██";

/// Glyph pair drawn for food.
pub const GLYPH_FOOD: &str = "()";
