//! Read-only view of a session for renderers.

use super::session::GameSession;
use super::story::{self, ENDING_TEXT, MID_CUTSCENE_CAPTION, STORY_TEXT, WIN_ACKNOWLEDGED_TEXT};
use super::types::{Bird, Epoch, Obstacle, ScreenKind};

/// Everything a frame needs to draw, borrowed from the session.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub screen: ScreenKind,
    pub bird: &'a Bird,
    pub obstacles: &'a [Obstacle],
    pub score: u32,
    pub best_score: u32,
    pub total_pipes: u32,
    pub epoch: Epoch,
    pub muted: bool,
    pub autopilot: bool,
    /// Match progress, `score / total_pipes`.
    pub progress: f64,
    /// Overlay text for the current screen, already cut to the typewriter reveal.
    pub text: Option<&'a str>,
    /// The whole overlay text is visible (Story and Ending accept input).
    pub text_complete: bool,
    /// 3, 2, 1 during the countdown.
    pub countdown: Option<u32>,
    /// Progress through the current timed screen (countdown, caption pause,
    /// typewriter reveal), 0.0..=1.0.
    pub timer_progress: Option<f64>,
    pub scroll: f64,
}

/// Build the render view of `session`.
pub fn snapshot(session: &GameSession) -> Snapshot<'_> {
    let config = &session.config;
    let cps = config.typewriter_chars_per_sec;
    let elapsed = session.screen.elapsed_ms().unwrap_or(0.0);

    let (text, text_complete) = match session.screen.kind() {
        ScreenKind::Story => (
            Some(story::revealed(STORY_TEXT, elapsed, cps)),
            story::is_revealed(STORY_TEXT, elapsed, cps),
        ),
        ScreenKind::Ending => (
            Some(story::revealed(ENDING_TEXT, elapsed, cps)),
            story::is_revealed(ENDING_TEXT, elapsed, cps),
        ),
        ScreenKind::MidCutsceneText => {
            // Caption lines advance evenly across the pause
            let slot = config.mid_cutscene_text_ms / MID_CUTSCENE_CAPTION.len() as f64;
            let idx = ((elapsed / slot) as usize).min(MID_CUTSCENE_CAPTION.len() - 1);
            (Some(MID_CUTSCENE_CAPTION[idx]), true)
        }
        ScreenKind::WinAcknowledged => (Some(WIN_ACKNOWLEDGED_TEXT), true),
        _ => (None, false),
    };

    let countdown = match session.screen.kind() {
        ScreenKind::Countdown => Some(countdown_number(elapsed, config.countdown_ms)),
        _ => None,
    };

    let timer_progress = match session.screen.kind() {
        ScreenKind::Countdown => Some(ratio(elapsed, config.countdown_ms)),
        ScreenKind::MidCutsceneText => Some(ratio(elapsed, config.mid_cutscene_text_ms)),
        ScreenKind::Story => Some(story::reveal_ratio(STORY_TEXT, elapsed, cps)),
        ScreenKind::Ending => Some(story::reveal_ratio(ENDING_TEXT, elapsed, cps)),
        _ => None,
    };

    let progress = if config.total_pipes == 0 {
        1.0
    } else {
        (session.score as f64 / config.total_pipes as f64).min(1.0)
    };

    Snapshot {
        screen: session.screen.kind(),
        bird: &session.bird,
        obstacles: &session.obstacles,
        score: session.score,
        best_score: session.best_score,
        total_pipes: config.total_pipes,
        epoch: session.epoch(),
        muted: session.muted,
        autopilot: session.autopilot,
        progress,
        text,
        text_complete,
        countdown,
        timer_progress,
        scroll: session.scroll,
    }
}

fn ratio(elapsed: f64, total: f64) -> f64 {
    if total <= 0.0 {
        1.0
    } else {
        (elapsed / total).clamp(0.0, 1.0)
    }
}

/// Whole seconds left in the countdown, never below 1.
fn countdown_number(elapsed_ms: f64, countdown_ms: f64) -> u32 {
    let left = ((countdown_ms - elapsed_ms) / 1000.0).ceil();
    left.max(1.0) as u32
}
