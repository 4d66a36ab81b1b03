//! Game configuration.
//!
//! Every tuning constant lives here so tests, the simulator and the
//! interactive binary can run the same rules with different knobs. A JSON
//! file may override any subset of fields; missing fields keep their
//! defaults.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tuning for one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // World
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub ground_height: f64,

    // Bird
    pub bird_x: f64,
    pub bird_size: f64,
    pub hit_inset: f64,
    pub gravity: f64,
    pub jump_velocity: f64,

    // Pipes
    pub pipe_speed: f64,
    pub pipe_width: f64,
    pub pipe_spacing: f64,
    pub prune_margin: f64,
    pub gap_epoch_one: f64,
    pub gap_epoch_two: f64,
    pub gap_margin: f64,
    pub speed_ramp_per_point: f64,
    pub epoch_two_speed_bias: f64,
    pub max_pipe_speed: f64,

    // Match
    pub total_pipes: u32,
    pub epoch_change_score: u32,

    // Timing
    pub nominal_frame_ms: f64,
    pub max_frame_steps: f64,
    pub countdown_ms: f64,
    pub mid_cutscene_text_ms: f64,
    pub typewriter_chars_per_sec: f64,
    pub intro_clip_ms: f64,
    pub mid_clip_ms: f64,
    pub finale_clip_ms: f64,

    // Presentation
    pub cinematic_volume: f32,
    pub music_volume: f32,
    pub start_muted: bool,

    /// After a death, go through the 3-second countdown before play resumes.
    /// When false the menu drops straight into `Playing`.
    pub countdown_on_retry: bool,

    /// Whether the debug autopilot toggle is honoured at all.
    pub allow_autopilot: bool,
    pub autopilot_gain: f64,

    /// Fixed RNG seed (None = entropy).
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            ground_height: GROUND_HEIGHT,

            bird_x: BIRD_X,
            bird_size: BIRD_SIZE,
            hit_inset: HIT_INSET,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,

            pipe_speed: PIPE_SPEED,
            pipe_width: PIPE_WIDTH,
            pipe_spacing: PIPE_SPACING,
            prune_margin: PRUNE_MARGIN,
            gap_epoch_one: GAP_EPOCH_ONE,
            gap_epoch_two: GAP_EPOCH_TWO,
            gap_margin: GAP_MARGIN,
            speed_ramp_per_point: SPEED_RAMP_PER_POINT,
            epoch_two_speed_bias: EPOCH_TWO_SPEED_BIAS,
            max_pipe_speed: MAX_PIPE_SPEED,

            total_pipes: TOTAL_PIPES,
            epoch_change_score: EPOCH_CHANGE_SCORE,

            nominal_frame_ms: NOMINAL_FRAME_MS,
            max_frame_steps: MAX_FRAME_STEPS,
            countdown_ms: COUNTDOWN_MS,
            mid_cutscene_text_ms: MID_CUTSCENE_TEXT_MS,
            typewriter_chars_per_sec: TYPEWRITER_CHARS_PER_SEC,
            intro_clip_ms: INTRO_CLIP_MS,
            mid_clip_ms: MID_CLIP_MS,
            finale_clip_ms: FINALE_CLIP_MS,

            cinematic_volume: CINEMATIC_VOLUME,
            music_volume: MUSIC_VOLUME,
            start_muted: false,

            countdown_on_retry: true,
            allow_autopilot: false,
            autopilot_gain: AUTOPILOT_GAIN,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Default rules with the debug autopilot enabled.
    pub fn debug() -> Self {
        Self {
            allow_autopilot: true,
            ..Default::default()
        }
    }

    /// Read a JSON config file. Fields absent from the file keep defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `config.json` from the platform config directory, or defaults
    /// when there is no such file.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Platform config file location, e.g. `~/.config/flip-birds/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "flip-birds")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Height of the band the bird may fly in (canvas minus ground).
    pub fn playable_height(&self) -> f64 {
        self.canvas_height - self.ground_height
    }

    /// X position at which the first pipe appears, fully off the right edge.
    pub fn spawn_x(&self) -> f64 {
        self.canvas_width + self.pipe_width
    }

    /// Newest pipe's x at or below which the next pipe is due.
    pub fn spawn_threshold(&self) -> f64 {
        self.canvas_width - self.pipe_spacing
    }

    /// Left-edge to left-edge distance between consecutive pipes. The open
    /// space between them is `pipe_spacing`.
    pub fn pipe_pitch(&self) -> f64 {
        self.pipe_spacing + self.pipe_width
    }

    /// Reject settings that would make the gap or pacing invariants unsatisfiable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let band = self.playable_height();
        if self.gap_margin < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gap margin {} must not be negative",
                self.gap_margin
            )));
        }
        for gap in [self.gap_epoch_one, self.gap_epoch_two] {
            if gap <= 0.0 {
                return Err(ConfigError::Invalid(format!("gap size {} must be positive", gap)));
            }
            if gap + 2.0 * self.gap_margin > band {
                return Err(ConfigError::Invalid(format!(
                    "gap {} plus margins {} does not fit playable height {}",
                    gap,
                    2.0 * self.gap_margin,
                    band
                )));
            }
        }
        if self.bird_size <= 2.0 * self.hit_inset {
            return Err(ConfigError::Invalid(
                "hit inset leaves no hitbox".to_string(),
            ));
        }
        if self.pipe_spacing <= 0.0 || self.pipe_width <= 0.0 {
            return Err(ConfigError::Invalid(
                "pipe spacing and width must be positive".to_string(),
            ));
        }
        if self.pipe_speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pipe speed {} must be positive",
                self.pipe_speed
            )));
        }
        if self.max_pipe_speed < self.pipe_speed {
            return Err(ConfigError::Invalid(format!(
                "max pipe speed {} is below the base speed {}",
                self.max_pipe_speed, self.pipe_speed
            )));
        }
        if self.gravity <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gravity {} must pull downward (positive)",
                self.gravity
            )));
        }
        if self.epoch_change_score >= self.total_pipes {
            return Err(ConfigError::Invalid(format!(
                "epoch change score {} must be below the match limit {}",
                self.epoch_change_score, self.total_pipes
            )));
        }
        if self.nominal_frame_ms <= 0.0 || self.max_frame_steps <= 0.0 {
            return Err(ConfigError::Invalid(
                "frame timing must be positive".to_string(),
            ));
        }
        if self.mid_cutscene_text_ms < 0.0 {
            return Err(ConfigError::Invalid(
                "mid-cutscene caption time must not be negative".to_string(),
            ));
        }
        if self.countdown_ms <= 0.0 || self.typewriter_chars_per_sec <= 0.0 {
            return Err(ConfigError::Invalid(
                "countdown and typewriter rate must be positive".to_string(),
            ));
        }
        if self.jump_velocity >= 0.0 {
            return Err(ConfigError::Invalid(
                "jump velocity must point upward (negative)".to_string(),
            ));
        }
        Ok(())
    }
}
