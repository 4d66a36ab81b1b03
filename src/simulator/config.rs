//! Simulation configuration.

use crate::core::config::GameConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of sessions to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Frames per session before it counts as timed out
    pub max_frames_per_run: u64,

    /// Frame-time jitter as a fraction of the nominal frame (0.0 = steady 60 Hz)
    pub frame_jitter: f64,

    /// Chance per frame of a long stall (exercises the dt clamp)
    pub stall_chance: f64,

    /// Game rules to play under
    pub game: GameConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_frames_per_run: 20_000,
            frame_jitter: 0.0,
            stall_chance: 0.0,
            game: GameConfig::debug(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// A handful of steady-clock runs.
    pub fn quick() -> Self {
        Self {
            num_runs: 10,
            ..Default::default()
        }
    }

    /// Irregular frame times: heavy jitter plus occasional stalls.
    pub fn stress(num_runs: u32) -> Self {
        Self {
            num_runs,
            frame_jitter: 0.5,
            stall_chance: 0.01,
            ..Default::default()
        }
    }
}
