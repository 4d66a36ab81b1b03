//! Per-screen cards drawn over the play field.

use super::common::{hint, progress_bar, render_card};
use flip_birds::game::story::{TAGLINE, TITLE};
use flip_birds::game::{Clip, ScreenKind, Snapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Inner width of progress bars on cards.
const CARD_BAR_WIDTH: usize = 24;

/// Scene card text for a cinematic that is played as a timed card.
fn clip_caption(clip: Clip) -> (&'static str, &'static str) {
    match clip {
        Clip::Intro => (" Prologue ", "A boy with wings takes to the evening sky."),
        Clip::MidMatch => (" A Glimpse ", "A girl on a rooftop, gone in a heartbeat."),
        Clip::Finale => (" Finale ", "An open window at the end of the city."),
    }
}

fn bold(text: String, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn text_lines(text: &str, color: Color) -> Vec<Line<'static>> {
    text.lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(color))))
        .collect()
}

/// Draw the overlay for the current screen, if it has one.
///
/// `cinematic` is the clip being played and its progress, when a
/// cinematic screen is active.
pub fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    snap: &Snapshot,
    cinematic: Option<(Clip, f64)>,
) {
    match snap.screen {
        ScreenKind::Menu => {
            let mut lines = vec![
                bold(TITLE.to_string(), Color::Yellow),
                Line::from(Span::styled(TAGLINE, Style::default().fg(Color::White))),
                Line::from(""),
            ];
            if snap.best_score > 0 {
                lines.push(Line::from(format!("Best: {}", snap.best_score)));
                lines.push(Line::from(""));
            }
            lines.push(hint("[Space] Fly"));
            render_card(frame, area, "", Color::Yellow, lines);
        }

        ScreenKind::Story | ScreenKind::Ending => {
            let title = if snap.screen == ScreenKind::Story {
                " Story "
            } else {
                " Ending "
            };
            let mut lines = text_lines(snap.text.unwrap_or(""), Color::White);
            lines.push(Line::from(""));
            if snap.text_complete {
                lines.push(hint("[Space] Continue"));
            } else {
                lines.push(hint("..."));
            }
            render_card(frame, area, title, Color::Magenta, lines);
        }

        ScreenKind::Intro | ScreenKind::MidCutscene | ScreenKind::WinCinematic => {
            let Some((clip, progress)) = cinematic else {
                return;
            };
            let (title, caption) = clip_caption(clip);
            let lines = vec![
                Line::from(Span::styled(caption, Style::default().fg(Color::White))),
                Line::from(""),
                progress_bar(progress, CARD_BAR_WIDTH, Color::Magenta),
                Line::from(""),
                hint("[S] Skip"),
            ];
            render_card(frame, area, title, Color::Magenta, lines);
        }

        ScreenKind::Countdown => {
            let number = snap.countdown.unwrap_or(1);
            let lines = vec![
                bold(number.to_string(), Color::Yellow),
                Line::from(""),
                progress_bar(
                    snap.timer_progress.unwrap_or(0.0),
                    CARD_BAR_WIDTH / 2,
                    Color::Yellow,
                ),
            ];
            render_card(frame, area, " Get Ready ", Color::Yellow, lines);
        }

        ScreenKind::MidCutsceneText => {
            let lines = vec![
                Line::from(Span::styled(
                    snap.text.unwrap_or("").to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::ITALIC),
                )),
                Line::from(""),
                progress_bar(
                    snap.timer_progress.unwrap_or(0.0),
                    CARD_BAR_WIDTH,
                    Color::Magenta,
                ),
            ];
            render_card(frame, area, " Epoch 2 ", Color::Magenta, lines);
        }

        ScreenKind::Dead => {
            let lines = vec![
                bold("CRASH!".to_string(), Color::Red),
                Line::from(""),
                Line::from(format!("Pipes passed: {} / {}", snap.score, snap.total_pipes)),
                Line::from(format!("Best: {}", snap.best_score)),
                Line::from(""),
                hint("[Space] Menu"),
            ];
            render_card(frame, area, "", Color::Red, lines);
        }

        ScreenKind::WinAcknowledged => {
            let lines = vec![
                bold(snap.text.unwrap_or("").to_string(), Color::Green),
                Line::from(""),
                Line::from(format!("All {} pipes cleared", snap.total_pipes)),
                Line::from(""),
                hint("[Space] Menu"),
            ];
            render_card(frame, area, "", Color::Green, lines);
        }

        ScreenKind::Playing => {}
    }
}
