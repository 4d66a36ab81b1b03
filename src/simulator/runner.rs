//! Headless session runner.
//!
//! Plays whole sessions through the real state machine with the autopilot
//! at the controls. Cinematics are completed by [`ScriptedCinematic`], text
//! screens are advanced as soon as they are revealed, and frame times can be
//! jittered to exercise the dt clamp.

use super::config::SimConfig;
use super::report::SimReport;
use crate::core::clock::FrameDelta;
use crate::core::config::GameConfig;
use crate::game::{self, GameEvent, GameSession, ScreenKind};
use crate::media::{dispatch_effects, CinematicPlayer, ScriptedCinematic, SilentMixer};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Stall length in nominal frames when a stall is rolled.
const STALL_FRAMES: f64 = 12.0;

/// How a simulated session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    Won,
    Died,
    TimedOut,
}

/// Result of one simulated session.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub outcome: RunOutcome,
    pub final_score: u32,
    pub frames: u64,
    /// Frames spent in `Playing`.
    pub playing_frames: u64,
    pub mid_cutscene_seen: bool,
    /// Spacing or gap-bound violations observed between frames.
    pub invariant_violations: u32,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?} at score {}, {} frames ({} playing)",
                run_idx + 1,
                config.num_runs,
                stats.outcome,
                stats.final_score,
                stats.frames,
                stats.playing_frames
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs, config.game.total_pipes)
}

/// Play one session from the menu until it dies, wins or times out.
pub fn simulate_single_run<R: Rng>(config: &SimConfig, rng: &mut R) -> RunStats {
    let game_config = GameConfig {
        allow_autopilot: true,
        ..config.game.clone()
    };
    let nominal = game_config.nominal_frame_ms;
    let max_steps = game_config.max_frame_steps;

    let mut player = ScriptedCinematic::new(&game_config);
    let mut mixer = SilentMixer::default();
    let mut session = GameSession::new(game_config);

    let mut frames: u64 = 0;
    let mut playing_frames: u64 = 0;
    let mut invariant_violations = 0;

    let outcome = loop {
        if frames >= config.max_frames_per_run {
            break RunOutcome::TimedOut;
        }

        let delta = FrameDelta::from_ms(frame_ms(config, nominal, rng), nominal, max_steps);

        let mut events = Vec::new();
        if let Some(event) = player.poll(delta.elapsed_ms) {
            events.push(event);
        }
        if let Some(event) = autoplay_input(&session) {
            events.push(event);
        }

        let effects = game::tick(&mut session, delta, &events, rng);
        dispatch_effects(&effects, &mut mixer, &mut player);

        frames += 1;
        match session.screen.kind() {
            ScreenKind::Playing => {
                playing_frames += 1;
                invariant_violations += count_violations(&session);
            }
            ScreenKind::Dead => break RunOutcome::Died,
            ScreenKind::WinAcknowledged => break RunOutcome::Won,
            _ => {}
        }
    };

    tracing::debug!(?outcome, score = session.score, frames, "simulated run finished");

    RunStats {
        outcome,
        final_score: session.score,
        frames,
        playing_frames,
        mid_cutscene_seen: session.mid_cutscene_played,
        invariant_violations,
    }
}

/// Milliseconds for the next frame, with optional jitter and stalls.
fn frame_ms<R: Rng>(config: &SimConfig, nominal: f64, rng: &mut R) -> f64 {
    if config.stall_chance > 0.0 && rng.gen_bool(config.stall_chance.min(1.0)) {
        return nominal * STALL_FRAMES;
    }
    if config.frame_jitter > 0.0 {
        let jitter = config.frame_jitter.min(1.0);
        return nominal * (1.0 + rng.gen_range(-jitter..=jitter));
    }
    nominal
}

/// What a patient player would press on this screen.
fn autoplay_input(session: &GameSession) -> Option<GameEvent> {
    match session.screen.kind() {
        ScreenKind::Menu => Some(GameEvent::Flap),
        ScreenKind::Story | ScreenKind::Ending => {
            game::snapshot(session).text_complete.then_some(GameEvent::Flap)
        }
        ScreenKind::Playing if !session.autopilot => Some(GameEvent::ToggleAutopilot),
        _ => None,
    }
}

/// Spacing and gap-bound checks over the live obstacles.
fn count_violations(session: &GameSession) -> u32 {
    let config = &session.config;
    let mut violations = 0;
    for pair in session.obstacles.windows(2) {
        if (pair[1].x - pair[0].x - config.pipe_pitch()).abs() > 1e-6 {
            violations += 1;
        }
    }
    for obstacle in &session.obstacles {
        if obstacle.gap_y < config.gap_margin
            || obstacle.gap_bottom() > config.playable_height() - config.gap_margin
        {
            violations += 1;
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(seed: u64) -> SimConfig {
        SimConfig {
            num_runs: 1,
            seed: Some(seed),
            verbosity: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_autopilot_wins_steady_clock() {
        let config = sim(12345);
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let stats = simulate_single_run(&config, &mut rng);

        assert_eq!(stats.outcome, RunOutcome::Won);
        assert_eq!(stats.final_score, 50);
        assert!(stats.mid_cutscene_seen);
        assert_eq!(stats.invariant_violations, 0);
    }

    #[test]
    fn test_jitter_keeps_invariants() {
        let config = SimConfig::stress(1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let stats = simulate_single_run(&config, &mut rng);
        assert_eq!(stats.invariant_violations, 0);
        assert!(stats.playing_frames > 0);
    }

    #[test]
    fn test_frame_limit_times_out() {
        let config = SimConfig {
            max_frames_per_run: 50,
            ..sim(7)
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let stats = simulate_single_run(&config, &mut rng);
        assert_eq!(stats.outcome, RunOutcome::TimedOut);
        assert_eq!(stats.frames, 50);
    }

    #[test]
    fn test_seed_near_max_wraps_per_run() {
        let config = SimConfig {
            num_runs: 2,
            max_frames_per_run: 20,
            ..sim(u64::MAX)
        };
        let report = run_simulation(&config);
        assert_eq!(report.num_runs, 2);
        assert_eq!(report.timeouts, 2);
    }

    #[test]
    fn test_full_simulation_is_reproducible() {
        let config = SimConfig {
            num_runs: 3,
            frame_jitter: 0.3,
            ..sim(99)
        };
        let a = run_simulation(&config);
        let b = run_simulation(&config);
        assert_eq!(a.num_runs, 3);
        assert_eq!(a.wins, b.wins);
        assert_eq!(a.avg_frames, b.avg_frames);
    }
}
