use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::scene::Scene;

const HUD_HINT: &str = "arrows/WASD move · P pause · +/- speed · T theme · Q quit";

/// Front-end values shown next to the engine's own state.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
    pub tick_interval_ms: u64,
    pub paused: bool,
}

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, scene: &Scene, info: &HudInfo<'_>) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let stats = stats_text(scene, info);
    let hint = fit_hint(HUD_HINT, usize::from(hud_area.width), stats.width());
    let padding = usize::from(hud_area.width)
        .saturating_sub(stats.width())
        .saturating_sub(hint.width());

    let line = Line::from(vec![
        Span::styled(
            stats,
            Style::new()
                .fg(info.theme.hud_score)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(padding)),
        Span::styled(hint, Style::new().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), hud_area);

    play_area
}

fn stats_text(scene: &Scene, info: &HudInfo<'_>) -> String {
    let mut text = format!(
        " Score {}  Length {}  Speed {} ms  {}",
        scene.score, scene.snake_len, info.tick_interval_ms, info.theme.name
    );
    if info.paused && scene.overlay.is_none() {
        text.push_str("  [paused]");
    }
    text
}

/// Returns `hint` when it fits after `used` columns plus a gap, else nothing.
fn fit_hint(hint: &str, total: usize, used: usize) -> String {
    if used + 2 + hint.width() <= total {
        format!("{hint} ")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{GameConfig, THEME_OCEAN};
    use crate::game::GameState;
    use crate::scene::compose;

    use super::{HudInfo, fit_hint, stats_text};

    #[test]
    fn stats_show_score_length_and_speed() {
        let state = GameState::new_with_seed(GameConfig::default(), 1).expect("valid");
        let info = HudInfo {
            theme: &THEME_OCEAN,
            tick_interval_ms: 150,
            paused: true,
        };

        let text = stats_text(&compose(&state), &info);

        assert!(text.contains("Score 0"));
        assert!(text.contains("Length 3"));
        assert!(text.contains("Speed 150 ms"));
        assert!(text.contains("Ocean"));
        assert!(text.ends_with("[paused]"));
    }

    #[test]
    fn hint_is_dropped_when_too_narrow() {
        assert_eq!(fit_hint("keys", 20, 10), "keys ");
        assert_eq!(fit_hint("keys", 15, 10), "");
    }

    #[test]
    fn hint_width_counts_display_columns() {
        // "·" is one column but two bytes.
        assert_eq!(fit_hint("a·b", 15, 10), "a·b ");
    }
}
