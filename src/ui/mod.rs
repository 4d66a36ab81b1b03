mod common;
mod overlays;
pub mod scene;

use common::{create_game_layout, info_line, progress_bar, render_info_panel_frame, render_status_bar};
use flip_birds::core::GameConfig;
use flip_birds::game::{Clip, Epoch, ScreenKind, Snapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the info panel on the right.
const INFO_PANEL_WIDTH: u16 = 22;

/// Main drawing function. Returns the play field area so mouse clicks can
/// be mapped back into canvas coordinates.
pub fn draw_ui(
    frame: &mut Frame,
    snap: &Snapshot,
    config: &GameConfig,
    cinematic: Option<(Clip, f64)>,
    allow_autopilot: bool,
) -> Rect {
    let border = match snap.epoch {
        Epoch::First => Color::Cyan,
        Epoch::Second => Color::Magenta,
    };
    let layout = create_game_layout(frame, frame.size(), " Flip-Birds ", border, INFO_PANEL_WIDTH);

    scene::render_play_area(frame, layout.content, snap, config);
    overlays::render_overlay(frame, layout.content, snap, cinematic);
    render_status_bar_content(frame, layout.status_bar, snap, allow_autopilot);
    if layout.info_panel.width > 0 {
        render_info_panel(frame, layout.info_panel, snap);
    }

    layout.content
}

/// Status message and controls for the current screen.
fn render_status_bar_content(frame: &mut Frame, area: Rect, snap: &Snapshot, allow_autopilot: bool) {
    let (text, color) = match snap.screen {
        ScreenKind::Menu => ("Press Space to fly!".to_string(), Color::Yellow),
        ScreenKind::Story | ScreenKind::Ending if !snap.text_complete => {
            ("...".to_string(), Color::DarkGray)
        }
        ScreenKind::Story | ScreenKind::Ending => ("Press Space to continue".to_string(), Color::White),
        ScreenKind::Intro | ScreenKind::MidCutscene | ScreenKind::WinCinematic => {
            ("Cinematic".to_string(), Color::Magenta)
        }
        ScreenKind::Countdown => ("Get ready...".to_string(), Color::Yellow),
        ScreenKind::Playing => (
            format!("Score: {} / {}", snap.score, snap.total_pipes),
            Color::Green,
        ),
        ScreenKind::MidCutsceneText => ("Epoch 2 begins".to_string(), Color::Magenta),
        ScreenKind::Dead => ("Crashed! Press Space".to_string(), Color::Red),
        ScreenKind::WinAcknowledged => ("You made it!".to_string(), Color::Green),
    };

    let mut controls = vec![("[Space]", "Flap"), ("[M]", "Mute"), ("[S]", "Skip")];
    if allow_autopilot && snap.screen == ScreenKind::Playing {
        controls.push(("[A]", "Autopilot"));
    }
    controls.push(("[Q]", "Quit"));

    render_status_bar(frame, area, &text, color, &controls);
}

/// Score, best, epoch badge, toggles and match progress.
fn render_info_panel(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let (badge, badge_color) = match snap.epoch {
        Epoch::First => (" EPOCH 1 ", Color::Cyan),
        Epoch::Second => (" EPOCH 2 ", Color::Magenta),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            badge,
            Style::default()
                .fg(Color::Black)
                .bg(badge_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        info_line("Score", format!("{} / {}", snap.score, snap.total_pipes), Color::White),
        info_line("Best", snap.best_score.to_string(), Color::Yellow),
        Line::from(""),
        info_line(
            "Sound",
            if snap.muted { "off" } else { "on" }.to_string(),
            if snap.muted { Color::DarkGray } else { Color::Green },
        ),
    ];
    if snap.autopilot {
        lines.push(info_line("Autopilot", "ON".to_string(), Color::LightRed));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Progress:",
        Style::default().fg(Color::DarkGray),
    )));
    let bar_width = (inner.width as usize).saturating_sub(4);
    lines.push(progress_bar(snap.progress, bar_width, badge_color));

    frame.render_widget(Paragraph::new(lines), inner);
}
