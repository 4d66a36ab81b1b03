//! The session aggregate and its lifecycle.

use super::types::{Bird, Epoch, Obstacle, Screen};
use crate::core::config::GameConfig;

/// Everything one running game owns.
///
/// Passed explicitly to the tick and snapshot functions; there is no
/// global game state.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub screen: Screen,

    // Entities
    pub bird: Bird,
    /// Active pipes, oldest (leftmost) first.
    pub obstacles: Vec<Obstacle>,

    // Scoring
    /// Pipes passed this attempt.
    pub score: u32,
    /// Best score across attempts in this process. Never persisted.
    pub best_score: u32,
    /// Pipes spawned this attempt, capped at `config.total_pipes`.
    pub total_spawned: u32,

    // One-shot flags
    /// The mid-match cinematic already played this attempt.
    pub mid_cutscene_played: bool,
    /// Show the story on the next start. Consumed when the story begins,
    /// re-armed only after a win is acknowledged.
    pub show_intro: bool,

    // Preferences
    pub muted: bool,
    /// Debug autopilot steering the bird.
    pub autopilot: bool,

    // Per-tick scratch
    /// Flap input waiting to be consumed by the next physics step.
    pub flap_queued: bool,
    /// Distance scrolled this attempt (parallax and ground texture).
    pub scroll: f64,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let bird = Bird::spawn(&config);
        let muted = config.start_muted;
        Self {
            config,
            screen: Screen::Menu,
            bird,
            obstacles: Vec::new(),
            score: 0,
            best_score: 0,
            total_spawned: 0,
            mid_cutscene_played: false,
            show_intro: true,
            muted,
            autopilot: false,
            flap_queued: false,
            scroll: 0.0,
        }
    }

    /// Start a fresh attempt.
    ///
    /// Keeps `best_score`, `muted` and `show_intro`.
    pub fn reset_session(&mut self) {
        self.bird = Bird::spawn(&self.config);
        self.obstacles.clear();
        self.score = 0;
        self.total_spawned = 0;
        self.mid_cutscene_played = false;
        self.autopilot = false;
        self.flap_queued = false;
        self.scroll = 0.0;
        self.screen = Screen::Menu;
        tracing::info!(best_score = self.best_score, "session reset");
    }

    pub fn epoch(&self) -> Epoch {
        Epoch::for_score(self.score, self.config.epoch_change_score)
    }

    /// Pipe scroll speed for the current score.
    ///
    /// Grows linearly with score plus an epoch bias, capped at
    /// `max_pipe_speed`. Depends only on score, never on time.
    pub fn pipe_speed(&self) -> f64 {
        pipe_speed_for_score(&self.config, self.score)
    }

    /// Record a pass: bump score and best score. Returns the new score.
    pub(crate) fn award_pass(&mut self) -> u32 {
        self.score += 1;
        if self.score > self.best_score {
            self.best_score = self.score;
        }
        self.score
    }
}

/// See [`GameSession::pipe_speed`].
pub fn pipe_speed_for_score(config: &GameConfig, score: u32) -> f64 {
    let epoch = Epoch::for_score(score, config.epoch_change_score);
    let ramped = config.pipe_speed * (1.0 + config.speed_ramp_per_point * score as f64);
    (ramped + epoch.speed_bias(config)).min(config.max_pipe_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = GameSession::new(GameConfig::default());
        assert_eq!(session.screen, Screen::Menu);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.score, 0);
        assert_eq!(session.best_score, 0);
        assert!(session.show_intro);
        assert!(!session.muted);
        assert!(!session.mid_cutscene_played);
    }

    #[test]
    fn test_start_muted_config() {
        let session = GameSession::new(GameConfig {
            start_muted: true,
            ..Default::default()
        });
        assert!(session.muted);
    }

    #[test]
    fn test_reset_preserves_cross_attempt_state() {
        let mut session = GameSession::new(GameConfig::default());
        session.score = 12;
        session.best_score = 17;
        session.muted = true;
        session.show_intro = false;
        session.mid_cutscene_played = true;
        session.autopilot = true;
        session.total_spawned = 14;
        session.bird.y = 10.0;
        session.bird.vy = 4.0;
        session.obstacles.push(Obstacle {
            x: 400.0,
            gap_y: 100.0,
            gap_size: 200.0,
            passed: false,
            skin: 0,
        });
        session.screen = Screen::Dead { elapsed_ms: 300.0 };

        session.reset_session();

        assert_eq!(session.bird, Bird::spawn(&session.config));
        assert!(session.obstacles.is_empty());
        assert_eq!(session.score, 0);
        assert_eq!(session.total_spawned, 0);
        assert!(!session.mid_cutscene_played);
        assert!(!session.autopilot);
        assert_eq!(session.screen, Screen::Menu);

        assert_eq!(session.best_score, 17);
        assert!(session.muted);
        assert!(!session.show_intro);
    }

    #[test]
    fn test_award_pass_tracks_best() {
        let mut session = GameSession::new(GameConfig::default());
        session.best_score = 2;
        assert_eq!(session.award_pass(), 1);
        assert_eq!(session.best_score, 2);
        session.award_pass();
        session.award_pass();
        assert_eq!(session.best_score, 3);
    }

    #[test]
    fn test_pipe_speed_ramp_is_monotonic_and_capped() {
        let config = GameConfig::default();
        let mut prev = 0.0;
        for score in 0..=config.total_pipes {
            let speed = pipe_speed_for_score(&config, score);
            assert!(speed >= prev, "speed dropped at score {}", score);
            assert!(speed <= config.max_pipe_speed + 1e-9);
            prev = speed;
        }
        assert!((pipe_speed_for_score(&config, 0) - config.pipe_speed).abs() < 1e-9);
    }

    #[test]
    fn test_epoch_two_adds_speed_bias() {
        let config = GameConfig {
            max_pipe_speed: 100.0,
            ..Default::default()
        };
        let before = pipe_speed_for_score(&config, 29);
        let after = pipe_speed_for_score(&config, 30);
        let ramp_step = config.pipe_speed * config.speed_ramp_per_point;
        assert!((after - before - ramp_step - config.epoch_two_speed_bias).abs() < 1e-9);
    }
}
