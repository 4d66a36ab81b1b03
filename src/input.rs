//! Terminal input mapping.
//!
//! Turns crossterm key and mouse events into game events. Clicks are mapped
//! into canvas space first so the mute button can be hit-tested.

use crate::ui::scene::canvas_point;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use flip_birds::core::GameConfig;
use flip_birds::game::{GameEvent, MuteButton};
use ratatui::layout::Rect;

/// Result of handling one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Nothing for the game.
    Continue,
    /// Queue this event for the next tick.
    Game(GameEvent),
    /// Leave the program.
    Quit,
}

/// Map one terminal event. `play_area` is where the canvas was last drawn.
pub fn handle_event(
    event: &Event,
    play_area: Rect,
    config: &GameConfig,
    debug: bool,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key(key, debug),
        Event::Mouse(mouse) => handle_mouse(mouse, play_area, config),
        _ => InputResult::Continue,
    }
}

fn handle_key(key: &KeyEvent, debug: bool) -> InputResult {
    // Key repeat on some terminals arrives as Press; Release is ignored
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => InputResult::Game(GameEvent::Flap),
        KeyCode::Char('m') | KeyCode::Char('M') => InputResult::Game(GameEvent::ToggleMute),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Tab => {
            InputResult::Game(GameEvent::Skip)
        }
        KeyCode::Char('a') | KeyCode::Char('A') if debug => {
            InputResult::Game(GameEvent::ToggleAutopilot)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputResult::Quit,
        _ => InputResult::Continue,
    }
}

fn handle_mouse(mouse: &MouseEvent, play_area: Rect, config: &GameConfig) -> InputResult {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return InputResult::Continue;
    }
    match canvas_point(play_area, mouse.column, mouse.row, config) {
        Some((x, y)) if MuteButton::default().contains(x, y) => {
            InputResult::Game(GameEvent::ToggleMute)
        }
        Some(_) => InputResult::Game(GameEvent::Flap),
        None => InputResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 128,
        height: 48,
    };

    #[test]
    fn test_flap_keys() {
        let config = GameConfig::default();
        for code in [KeyCode::Char(' '), KeyCode::Up, KeyCode::Enter] {
            assert_eq!(
                handle_event(&key(code), AREA, &config, false),
                InputResult::Game(GameEvent::Flap)
            );
        }
    }

    #[test]
    fn test_autopilot_key_needs_debug() {
        let config = GameConfig::default();
        assert_eq!(
            handle_event(&key(KeyCode::Char('a')), AREA, &config, false),
            InputResult::Continue
        );
        assert_eq!(
            handle_event(&key(KeyCode::Char('a')), AREA, &config, true),
            InputResult::Game(GameEvent::ToggleAutopilot)
        );
    }

    #[test]
    fn test_quit_and_skip() {
        let config = GameConfig::default();
        assert_eq!(
            handle_event(&key(KeyCode::Esc), AREA, &config, false),
            InputResult::Quit
        );
        assert_eq!(
            handle_event(&key(KeyCode::Tab), AREA, &config, false),
            InputResult::Game(GameEvent::Skip)
        );
    }

    #[test]
    fn test_click_on_mute_button_toggles_mute() {
        let config = GameConfig::default();
        assert_eq!(
            handle_event(&click(3, 2), AREA, &config, false),
            InputResult::Game(GameEvent::ToggleMute)
        );
        assert_eq!(
            handle_event(&click(64, 24), AREA, &config, false),
            InputResult::Game(GameEvent::Flap)
        );
        assert_eq!(
            handle_event(&click(200, 24), AREA, &config, false),
            InputResult::Continue
        );
    }
}
