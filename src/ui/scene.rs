//! Play field rendering: sky, pipes, ground, bird and the mute button.
//!
//! The 1280x480 canvas is sampled once per terminal cell at the cell
//! centre, so the field stretches to whatever size the terminal has.

use flip_birds::core::GameConfig;
use flip_birds::game::{Epoch, MuteButton, ScreenKind, Snapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Colours for one epoch.
struct Theme {
    sky: Color,
    pipe: Color,
    pipe_alt: Color,
    gap_edge: Color,
    ground: Color,
    ground_alt: Color,
    stars: bool,
}

fn theme(epoch: Epoch) -> Theme {
    match epoch {
        Epoch::First => Theme {
            sky: Color::Rgb(112, 197, 206),
            pipe: Color::Rgb(84, 160, 48),
            pipe_alt: Color::Rgb(66, 133, 38),
            gap_edge: Color::Rgb(150, 220, 90),
            ground: Color::Rgb(222, 216, 149),
            ground_alt: Color::Rgb(190, 180, 110),
            stars: false,
        },
        Epoch::Second => Theme {
            sky: Color::Rgb(20, 24, 58),
            pipe: Color::Rgb(128, 72, 160),
            pipe_alt: Color::Rgb(100, 56, 130),
            gap_edge: Color::Rgb(220, 140, 255),
            ground: Color::Rgb(60, 52, 90),
            ground_alt: Color::Rgb(44, 38, 70),
            stars: true,
        },
    }
}

/// Ground texture stripe width in canvas units.
const GROUND_STRIPE: f64 = 24.0;
/// Star field scrolls at this fraction of the pipe speed.
const STAR_PARALLAX: f64 = 0.2;

/// Canvas point at the centre of terminal cell `(col, row)` inside `area`.
pub fn canvas_point(area: Rect, col: u16, row: u16, config: &GameConfig) -> Option<(f64, f64)> {
    if area.width == 0
        || area.height == 0
        || col < area.x
        || row < area.y
        || col >= area.x + area.width
        || row >= area.y + area.height
    {
        return None;
    }
    let x = (f64::from(col - area.x) + 0.5) * config.canvas_width / f64::from(area.width);
    let y = (f64::from(row - area.y) + 0.5) * config.canvas_height / f64::from(area.height);
    Some((x, y))
}

/// Render the play field into `area`.
pub fn render_play_area(frame: &mut Frame, area: Rect, snap: &Snapshot, config: &GameConfig) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let theme = theme(snap.epoch);
    let x_scale = config.canvas_width / width as f64;
    let y_scale = config.canvas_height / height as f64;

    let bird_col = ((snap.bird.x + config.bird_size / 2.0) / x_scale) as usize;
    let bird_row = (snap.bird.center_y(config) / y_scale).clamp(0.0, (height - 1) as f64) as usize;
    let (mute_x, mute_y) = MuteButton::default().center();
    let mute_cell = ((mute_x / x_scale) as usize, (mute_y / y_scale) as usize);

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let cy = (row as f64 + 0.5) * y_scale;
        let mut spans = Vec::with_capacity(width);

        for col in 0..width {
            let cx = (col as f64 + 0.5) * x_scale;

            if (col, row) == mute_cell {
                let glyph = if snap.muted { "×" } else { "♪" };
                spans.push(Span::styled(
                    glyph,
                    Style::default().fg(Color::White).bg(theme.sky),
                ));
                continue;
            }

            if col == bird_col && row == bird_row && snap.screen != ScreenKind::Menu {
                spans.push(bird_span(snap, theme.sky));
                continue;
            }

            if cy >= config.playable_height() {
                let stripe = (((cx + snap.scroll) / GROUND_STRIPE).floor() as i64).rem_euclid(2);
                let (glyph, color) = if cy - y_scale < config.playable_height() {
                    ("▀", theme.ground)
                } else if stripe == 0 {
                    ("▒", theme.ground)
                } else {
                    ("░", theme.ground_alt)
                };
                spans.push(Span::styled(glyph, Style::default().fg(color).bg(theme.ground_alt)));
                continue;
            }

            if let Some(span) = pipe_span(snap, cx, cy, y_scale, config, &theme) {
                spans.push(span);
                continue;
            }

            if theme.stars && is_star(col, row, snap.scroll * STAR_PARALLAX / x_scale) {
                spans.push(Span::styled(
                    "·",
                    Style::default().fg(Color::Rgb(230, 230, 255)).bg(theme.sky),
                ));
                continue;
            }

            spans.push(Span::styled(" ", Style::default().bg(theme.sky)));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Bird glyph chosen by tilt; crashed birds are drawn red.
fn bird_span(snap: &Snapshot, sky: Color) -> Span<'static> {
    let glyph = if snap.bird.squash > 0.5 {
        "◆"
    } else if snap.bird.tilt < -10.0 {
        "▲"
    } else if snap.bird.tilt > 30.0 {
        "▼"
    } else {
        "►"
    };
    let color = if snap.screen == ScreenKind::Dead {
        Color::Red
    } else {
        Color::Yellow
    };
    Span::styled(
        glyph,
        Style::default()
            .fg(color)
            .bg(sky)
            .add_modifier(Modifier::BOLD),
    )
}

/// Pipe body, lip or gap edge at canvas `(cx, cy)`, if any.
fn pipe_span(
    snap: &Snapshot,
    cx: f64,
    cy: f64,
    y_scale: f64,
    config: &GameConfig,
    theme: &Theme,
) -> Option<Span<'static>> {
    let pipe = snap
        .obstacles
        .iter()
        .find(|o| cx >= o.x && cx < o.right_edge(config.pipe_width))?;

    let body = if pipe.skin % 2 == 0 {
        theme.pipe
    } else {
        theme.pipe_alt
    };
    let above = pipe.gap_y - cy;
    let below = cy - pipe.gap_bottom();

    if above > 0.0 || below > 0.0 {
        let glyph = if above.max(below) < y_scale { "▓" } else { "█" };
        return Some(Span::styled(glyph, Style::default().fg(body).bg(theme.sky)));
    }
    // Inside the gap: mark the rows touching the lips
    (-above < y_scale || -below < y_scale)
        .then(|| Span::styled("░", Style::default().fg(theme.gap_edge).bg(theme.sky)))
}

/// Sparse deterministic star field, shifted left by `offset` cells.
fn is_star(col: usize, row: usize, offset: f64) -> bool {
    let shifted = (col as i64 + offset as i64) as u64;
    let mut h = shifted
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (row as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    h ^= h >> 29;
    h % 37 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_point_maps_corners() {
        let config = GameConfig::default();
        let area = Rect::new(1, 1, 128, 48);
        let (x, y) = canvas_point(area, 1, 1, &config).unwrap();
        assert!((x - 5.0).abs() < 1e-9);
        assert!((y - 5.0).abs() < 1e-9);
        assert!(canvas_point(area, 0, 1, &config).is_none());
        assert!(canvas_point(area, 129, 1, &config).is_none());
    }

    #[test]
    fn test_mute_button_reachable_by_click() {
        let config = GameConfig::default();
        let area = Rect::new(0, 0, 128, 48);
        let (x, y) = canvas_point(area, 3, 2, &config).unwrap();
        assert!(MuteButton::default().contains(x, y));
    }

    #[test]
    fn test_star_field_is_sparse_and_stable() {
        let stars = (0..100)
            .flat_map(|c| (0..20).map(move |r| (c, r)))
            .filter(|&(c, r)| is_star(c, r, 0.0))
            .count();
        assert!(stars > 0 && stars < 200);
        assert_eq!(is_star(5, 3, 0.0), is_star(5, 3, 0.0));
    }
}
