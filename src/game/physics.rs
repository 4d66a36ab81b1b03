//! Bird motion, pipe spawning, scrolling and pruning.

use super::session::GameSession;
use super::types::{Bird, Obstacle};
use crate::core::config::GameConfig;
use crate::core::constants::{DEATH_SPIN_RATE, MAX_TILT_DEG};
use rand::Rng;

/// Tilt range while alive (degrees).
const MIN_FLIGHT_TILT: f64 = -25.0;
/// Degrees of tilt per unit of downward velocity.
const TILT_PER_VELOCITY: f64 = 4.0;
/// Fraction of the remaining tilt error closed per nominal frame.
const TILT_EASE: f64 = 0.25;
/// Squash decay per nominal frame.
const SQUASH_DECAY: f64 = 0.12;

/// Semi-implicit Euler step: velocity first, then position. Also eases the
/// cosmetic tilt toward the velocity and decays squash.
pub fn integrate_bird(bird: &mut Bird, config: &GameConfig, dt: f64) {
    bird.vy += config.gravity * dt;
    bird.y += bird.vy * dt;

    let target = (bird.vy * TILT_PER_VELOCITY).clamp(MIN_FLIGHT_TILT, MAX_TILT_DEG);
    bird.tilt += (target - bird.tilt) * (TILT_EASE * dt).min(1.0);
    bird.squash = (bird.squash - SQUASH_DECAY * dt).max(0.0);
}

/// Post-crash tumble: falls and spins until it rests on the ground.
/// No collision or scoring is involved.
pub fn death_spin(bird: &mut Bird, config: &GameConfig, dt: f64) {
    let rest_y = config.playable_height() - config.bird_size;
    if bird.y < rest_y {
        bird.vy += config.gravity * dt;
        bird.y = (bird.y + bird.vy * dt).min(rest_y);
        bird.tilt = (bird.tilt + DEATH_SPIN_RATE * dt).min(MAX_TILT_DEG);
    } else {
        bird.y = rest_y;
        bird.vy = 0.0;
        bird.tilt = MAX_TILT_DEG;
    }
    bird.squash = 0.0;
}

/// Uniform gap top inside `[gap_margin, playable_height - gap - gap_margin]`.
pub fn random_gap_y<R: Rng>(config: &GameConfig, gap_size: f64, rng: &mut R) -> f64 {
    let min_y = config.gap_margin;
    let max_y = (config.playable_height() - gap_size - config.gap_margin).max(min_y);
    rng.gen_range(min_y..=max_y)
}

/// Where the next pipe goes, or `None` if it is not due yet.
///
/// The first pipe appears at `spawn_x`. A later pipe is due once the newest
/// one has scrolled to `canvas_width - pipe_spacing`, and is placed one
/// `pipe_pitch` right of it, so the open space between them is exactly
/// `pipe_spacing` whatever the frame timing.
pub fn next_spawn_x(session: &GameSession) -> Option<f64> {
    let config = &session.config;
    if session.total_spawned >= config.total_pipes {
        return None;
    }
    match session.obstacles.last() {
        None => Some(config.spawn_x()),
        Some(last) if last.x <= config.spawn_threshold() => Some(last.x + config.pipe_pitch()),
        Some(_) => None,
    }
}

/// Spawn a pipe if one is due. Returns true if a pipe was added.
pub fn spawn_if_due<R: Rng>(session: &mut GameSession, rng: &mut R) -> bool {
    let Some(x) = next_spawn_x(session) else {
        return false;
    };
    let gap_size = session.epoch().gap_size(&session.config);
    let gap_y = random_gap_y(&session.config, gap_size, rng);
    session.obstacles.push(Obstacle {
        x,
        gap_y,
        gap_size,
        passed: false,
        skin: session.total_spawned,
    });
    session.total_spawned += 1;
    tracing::trace!(x, gap_y, gap_size, spawned = session.total_spawned, "pipe spawned");
    true
}

/// Move every pipe left by `speed * dt`.
pub fn scroll_obstacles(obstacles: &mut [Obstacle], speed: f64, dt: f64) {
    for obstacle in obstacles {
        obstacle.x -= speed * dt;
    }
}

/// Drop pipes whose right edge is more than `prune_margin` past the left edge.
pub fn prune_obstacles(obstacles: &mut Vec<Obstacle>, config: &GameConfig) {
    obstacles.retain(|o| o.right_edge(config.pipe_width) > -config.prune_margin);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_gravity_accumulates() {
        let config = GameConfig::default();
        let mut bird = Bird::spawn(&config);
        let y0 = bird.y;
        integrate_bird(&mut bird, &config, 1.0);
        assert!((bird.vy - 0.5).abs() < 1e-9);
        assert!((bird.y - (y0 + 0.5)).abs() < 1e-9);
        integrate_bird(&mut bird, &config, 2.0);
        assert!((bird.vy - 1.5).abs() < 1e-9);
        assert!((bird.y - (y0 + 0.5 + 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_tilt_follows_velocity() {
        let config = GameConfig::default();
        let mut bird = Bird::spawn(&config);
        bird.vy = -9.0;
        integrate_bird(&mut bird, &config, 1.0);
        assert!(bird.tilt < 0.0);
        bird.vy = 20.0;
        for _ in 0..60 {
            integrate_bird(&mut bird, &config, 1.0);
        }
        assert!(bird.tilt > 45.0);
        assert!(bird.tilt <= MAX_TILT_DEG);
    }

    #[test]
    fn test_squash_decays_to_zero() {
        let config = GameConfig::default();
        let mut bird = Bird::spawn(&config);
        bird.squash = 1.0;
        for _ in 0..20 {
            integrate_bird(&mut bird, &config, 1.0);
        }
        assert_eq!(bird.squash, 0.0);
    }

    #[test]
    fn test_death_spin_rests_on_ground() {
        let config = GameConfig::default();
        let mut bird = Bird::spawn(&config);
        for _ in 0..600 {
            death_spin(&mut bird, &config, 1.0);
        }
        assert!((bird.y - (config.playable_height() - config.bird_size)).abs() < 1e-9);
        assert_eq!(bird.vy, 0.0);
        assert_eq!(bird.tilt, MAX_TILT_DEG);
    }

    #[test]
    fn test_gap_always_within_margins() {
        let config = GameConfig::default();
        for seed in 0..200u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for gap in [config.gap_epoch_one, config.gap_epoch_two] {
                let y = random_gap_y(&config, gap, &mut rng);
                assert!(y >= config.gap_margin);
                assert!(y + gap <= config.playable_height() - config.gap_margin);
            }
        }
    }

    #[test]
    fn test_first_spawn_at_right_edge() {
        let mut session = GameSession::new(GameConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(spawn_if_due(&mut session, &mut rng));
        assert_eq!(session.obstacles.len(), 1);
        assert!((session.obstacles[0].x - session.config.spawn_x()).abs() < 1e-9);
        assert_eq!(session.obstacles[0].skin, 0);
        assert_eq!(session.total_spawned, 1);
        // Not due again until it scrolls a full spacing
        assert!(!spawn_if_due(&mut session, &mut rng));
    }

    #[test]
    fn test_next_pipe_due_at_canvas_threshold() {
        let mut session = GameSession::new(GameConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        spawn_if_due(&mut session, &mut rng);

        let mut due_at = None;
        for _ in 0..400 {
            if let Some(x) = next_spawn_x(&session) {
                due_at = Some((session.obstacles[0].x, x));
                break;
            }
            scroll_obstacles(&mut session.obstacles, 3.0, 1.0);
        }
        let (first_x, next_x) = due_at.expect("second pipe never due");
        assert!(first_x <= session.config.spawn_threshold());
        assert!(first_x > session.config.spawn_threshold() - 3.0);

        // Open space between the pipes equals the configured spacing
        let gap = next_x - (first_x + session.config.pipe_width);
        assert!((gap - session.config.pipe_spacing).abs() < 1e-9);
    }

    #[test]
    fn test_spawn_respects_match_limit() {
        let mut session = GameSession::new(GameConfig::default());
        session.total_spawned = session.config.total_pipes;
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(!spawn_if_due(&mut session, &mut rng));
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_spawn_uses_epoch_gap() {
        let mut session = GameSession::new(GameConfig::default());
        session.score = 30;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        spawn_if_due(&mut session, &mut rng);
        assert!((session.obstacles[0].gap_size - session.config.gap_epoch_two).abs() < 1e-9);
    }

    #[test]
    fn test_prune_keeps_order() {
        let config = GameConfig::default();
        let mk = |x: f64, skin: u32| Obstacle {
            x,
            gap_y: 100.0,
            gap_size: 200.0,
            passed: true,
            skin,
        };
        let mut obstacles = vec![mk(-95.0, 0), mk(-85.0, 1), mk(300.0, 2)];
        prune_obstacles(&mut obstacles, &config);
        let skins: Vec<u32> = obstacles.iter().map(|o| o.skin).collect();
        assert_eq!(skins, vec![1, 2]);
    }

    #[test]
    fn test_scroll_moves_all_pipes_equally() {
        let mut obstacles = vec![
            Obstacle {
                x: 100.0,
                gap_y: 100.0,
                gap_size: 200.0,
                passed: false,
                skin: 0,
            },
            Obstacle {
                x: 420.0,
                gap_y: 120.0,
                gap_size: 200.0,
                passed: false,
                skin: 1,
            },
        ];
        scroll_obstacles(&mut obstacles, 3.0, 2.0);
        assert!((obstacles[0].x - 94.0).abs() < 1e-9);
        assert!((obstacles[1].x - obstacles[0].x - 320.0).abs() < 1e-9);
    }
}
