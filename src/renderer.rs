use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{BORDER_PLAY_FIELD, GLYPH_CELL, GLYPH_FOOD, GridSize, Theme};
use crate::scene::{Overlay, Scene, Sprite, SpriteKind};
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu};

/// Terminal columns per grid cell; keeps cells roughly square.
const CELL_COLUMNS: u16 = 2;

/// Renders the full game frame from a composed scene.
pub fn render(frame: &mut Frame<'_>, scene: &Scene, hud: &HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, scene, hud);

    let theme = hud.theme;
    let field = field_rect(play_area, scene.bounds);
    let block = Block::bordered()
        .border_set(BORDER_PLAY_FIELD)
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(field);
    frame.render_widget(block, field);

    let buffer = frame.buffer_mut();
    for sprite in &scene.sprites {
        let Some((x, y)) = cell_to_terminal(inner, scene.bounds, sprite.position) else {
            continue;
        };
        let (glyph, style) = sprite_style(sprite, theme);
        buffer.set_string(x, y, glyph, style);
    }

    match scene.overlay {
        Some(Overlay::GameOver { score, reason }) => {
            render_game_over_menu(frame, field, score, reason, theme);
        }
        None if hud.paused => render_pause_menu(frame, field, theme),
        None => {}
    }
}

fn sprite_style(sprite: &Sprite, theme: &Theme) -> (&'static str, Style) {
    match sprite.kind {
        SpriteKind::SnakeHead => (
            GLYPH_CELL,
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD),
        ),
        SpriteKind::SnakeBody => (GLYPH_CELL, Style::new().fg(theme.snake_body)),
        SpriteKind::Food => (
            GLYPH_FOOD,
            Style::new().fg(theme.food).add_modifier(Modifier::BOLD),
        ),
    }
}

/// Centers the bordered play field inside `area`, clipped to fit.
fn field_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds
        .width
        .saturating_mul(CELL_COLUMNS)
        .saturating_add(2)
        .min(area.width);
    let height = bounds.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn cell_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
