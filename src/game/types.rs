//! Entity and screen data structures.
//!
//! Plain records mutated by the tick functions in the sibling modules. All
//! positions are canvas units with y growing downward; velocities are in
//! canvas units per nominal (60 Hz) frame.

use crate::core::config::GameConfig;
use serde::{Deserialize, Serialize};

/// The player's bird.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Left edge. Constant while playing; the world scrolls instead.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Vertical velocity (positive = downward).
    pub vy: f64,
    /// Visual tilt in degrees (positive = nose down).
    pub tilt: f64,
    /// Visual squash after a flap, decays from 1.0 to 0.0.
    pub squash: f64,
}

impl Bird {
    /// Spawn pose: vertically centred, at rest.
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            x: config.bird_x,
            y: config.canvas_height / 2.0 - config.bird_size / 2.0,
            vy: 0.0,
            tilt: 0.0,
            squash: 0.0,
        }
    }

    /// Collision box: the nominal square shrunk by the configured inset.
    pub fn hitbox(&self, config: &GameConfig) -> Hitbox {
        let inset = config.hit_inset;
        Hitbox {
            left: self.x + inset,
            right: self.x + config.bird_size - inset,
            top: self.y + inset,
            bottom: self.y + config.bird_size - inset,
        }
    }

    /// Vertical centre of the nominal square.
    pub fn center_y(&self, config: &GameConfig) -> f64 {
        self.y + config.bird_size / 2.0
    }
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// A pipe pair with a passable gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge (decreases as the world scrolls).
    pub x: f64,
    /// Top of the gap.
    pub gap_y: f64,
    /// Gap height.
    pub gap_size: f64,
    /// Set once the bird has cleared this pipe. Never unset.
    pub passed: bool,
    /// Cosmetic skin, assigned 0, 1, 2, ... in spawn order.
    pub skin: u32,
}

impl Obstacle {
    pub fn gap_bottom(&self) -> f64 {
        self.gap_y + self.gap_size
    }

    pub fn gap_center(&self) -> f64 {
        self.gap_y + self.gap_size / 2.0
    }

    pub fn right_edge(&self, pipe_width: f64) -> f64 {
        self.x + pipe_width
    }
}

/// Coarse difficulty/visual phase, derived purely from score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Epoch {
    First,
    Second,
}

impl Epoch {
    pub fn for_score(score: u32, epoch_change_score: u32) -> Self {
        if score >= epoch_change_score {
            Epoch::Second
        } else {
            Epoch::First
        }
    }

    /// 1-based number shown on the HUD badge.
    pub fn number(&self) -> u8 {
        match self {
            Epoch::First => 1,
            Epoch::Second => 2,
        }
    }

    pub fn gap_size(&self, config: &GameConfig) -> f64 {
        match self {
            Epoch::First => config.gap_epoch_one,
            Epoch::Second => config.gap_epoch_two,
        }
    }

    pub fn speed_bias(&self, config: &GameConfig) -> f64 {
        match self {
            Epoch::First => 0.0,
            Epoch::Second => config.epoch_two_speed_bias,
        }
    }
}

/// The mode the frame loop is in. Exactly one is active.
///
/// Timed screens carry their own elapsed-millisecond counter, fed by the
/// tick's frame delta rather than a wall clock.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Title screen. Initial state and the landing point after death or a win.
    Menu,
    /// Typewriter story before the first run of a cycle.
    Story { elapsed_ms: f64 },
    /// Intro cinematic (external playback).
    Intro,
    /// 3-2-1 before play starts.
    Countdown { elapsed_ms: f64 },
    /// Active play. The only screen where physics and collision run.
    Playing,
    /// Mid-match cinematic at the epoch change.
    MidCutscene,
    /// Short caption pause after the mid-match cinematic.
    MidCutsceneText { elapsed_ms: f64 },
    /// Crashed. The bird keeps tumbling for show.
    Dead { elapsed_ms: f64 },
    /// Finale cinematic after the last pipe.
    WinCinematic,
    /// Typewriter ending text.
    Ending { elapsed_ms: f64 },
    /// Win acknowledged; next flap returns to the menu with the intro re-armed.
    WinAcknowledged,
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Menu => ScreenKind::Menu,
            Screen::Story { .. } => ScreenKind::Story,
            Screen::Intro => ScreenKind::Intro,
            Screen::Countdown { .. } => ScreenKind::Countdown,
            Screen::Playing => ScreenKind::Playing,
            Screen::MidCutscene => ScreenKind::MidCutscene,
            Screen::MidCutsceneText { .. } => ScreenKind::MidCutsceneText,
            Screen::Dead { .. } => ScreenKind::Dead,
            Screen::WinCinematic => ScreenKind::WinCinematic,
            Screen::Ending { .. } => ScreenKind::Ending,
            Screen::WinAcknowledged => ScreenKind::WinAcknowledged,
        }
    }

    /// Elapsed time of a timed screen, if this is one.
    pub fn elapsed_ms(&self) -> Option<f64> {
        match self {
            Screen::Story { elapsed_ms }
            | Screen::Countdown { elapsed_ms }
            | Screen::MidCutsceneText { elapsed_ms }
            | Screen::Dead { elapsed_ms }
            | Screen::Ending { elapsed_ms } => Some(*elapsed_ms),
            _ => None,
        }
    }

    pub fn is_cinematic(&self) -> bool {
        matches!(
            self,
            Screen::Intro | Screen::MidCutscene | Screen::WinCinematic
        )
    }
}

/// Data-free tag of a [`Screen`], handy for matching and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenKind {
    Menu,
    Story,
    Intro,
    Countdown,
    Playing,
    MidCutscene,
    MidCutsceneText,
    Dead,
    WinCinematic,
    Ending,
    WinAcknowledged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bird_spawn_pose() {
        let config = GameConfig::default();
        let bird = Bird::spawn(&config);
        assert!((bird.x - 200.0).abs() < f64::EPSILON);
        assert!((bird.y - 220.0).abs() < f64::EPSILON);
        assert_eq!(bird.vy, 0.0);
        assert_eq!(bird.tilt, 0.0);
    }

    #[test]
    fn test_hitbox_is_inset() {
        let config = GameConfig::default();
        let bird = Bird::spawn(&config);
        let hb = bird.hitbox(&config);
        assert!((hb.left - 205.0).abs() < f64::EPSILON);
        assert!((hb.right - 235.0).abs() < f64::EPSILON);
        assert!((hb.top - 225.0).abs() < f64::EPSILON);
        assert!((hb.bottom - 255.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_epoch_is_pure_function_of_score() {
        for score in 0..=50 {
            let epoch = Epoch::for_score(score, 30);
            assert_eq!(epoch == Epoch::Second, score >= 30, "score {}", score);
        }
    }

    #[test]
    fn test_epoch_gap_sizes() {
        let config = GameConfig::default();
        assert!(Epoch::First.gap_size(&config) > Epoch::Second.gap_size(&config));
        assert_eq!(Epoch::First.number(), 1);
        assert_eq!(Epoch::Second.number(), 2);
    }

    #[test]
    fn test_screen_kinds_and_timers() {
        assert_eq!(Screen::Menu.kind(), ScreenKind::Menu);
        assert_eq!(
            Screen::Countdown { elapsed_ms: 12.0 }.elapsed_ms(),
            Some(12.0)
        );
        assert_eq!(Screen::Playing.elapsed_ms(), None);
        assert!(Screen::Intro.is_cinematic());
        assert!(!Screen::Countdown { elapsed_ms: 0.0 }.is_cinematic());
    }
}
