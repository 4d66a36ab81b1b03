//! Hitbox tests against the world bounds and pipe gaps, plus the pass check.

use super::types::{Bird, Hitbox, Obstacle};
use crate::core::config::GameConfig;

/// Touching the ground band or rising above the top of the screen.
pub fn hits_bounds(hitbox: &Hitbox, config: &GameConfig) -> bool {
    hitbox.bottom >= config.playable_height() || hitbox.top < 0.0
}

/// The hitbox overlaps the pipe horizontally and is not fully inside its gap.
pub fn hits_obstacle(hitbox: &Hitbox, obstacle: &Obstacle, pipe_width: f64) -> bool {
    let overlaps = hitbox.right > obstacle.x && hitbox.left < obstacle.right_edge(pipe_width);
    overlaps && (hitbox.top < obstacle.gap_y || hitbox.bottom > obstacle.gap_bottom())
}

/// Full collision check for the bird this tick.
pub fn check_collision(bird: &Bird, obstacles: &[Obstacle], config: &GameConfig) -> bool {
    let hitbox = bird.hitbox(config);
    if hits_bounds(&hitbox, config) {
        return true;
    }
    obstacles
        .iter()
        .any(|o| hits_obstacle(&hitbox, o, config.pipe_width))
}

/// The pipe's right edge is fully behind the bird's left edge.
pub fn has_cleared(obstacle: &Obstacle, bird: &Bird, config: &GameConfig) -> bool {
    obstacle.right_edge(config.pipe_width) < bird.x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe_at_bird(config: &GameConfig, gap_y: f64) -> Obstacle {
        Obstacle {
            x: config.bird_x - 20.0,
            gap_y,
            gap_size: 200.0,
            passed: false,
            skin: 0,
        }
    }

    #[test]
    fn test_spawn_pose_is_safe() {
        let config = GameConfig::default();
        let bird = Bird::spawn(&config);
        assert!(!check_collision(&bird, &[], &config));
    }

    #[test]
    fn test_ground_contact() {
        let config = GameConfig::default();
        let mut bird = Bird::spawn(&config);
        // hitbox bottom = y + 35; ground top = 420
        bird.y = 385.0;
        assert!(check_collision(&bird, &[], &config));
        bird.y = 384.9;
        assert!(!check_collision(&bird, &[], &config));
    }

    #[test]
    fn test_ceiling_contact() {
        let config = GameConfig::default();
        let mut bird = Bird::spawn(&config);
        bird.y = -5.0; // hitbox top exactly 0
        assert!(!check_collision(&bird, &[], &config));
        bird.y = -5.1;
        assert!(check_collision(&bird, &[], &config));
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let config = GameConfig::default();
        let mut bird = Bird::spawn(&config);
        bird.y = 150.0;
        let pipe = pipe_at_bird(&config, 100.0);
        assert!(!check_collision(&bird, &[pipe], &config));
    }

    #[test]
    fn test_inset_tolerance_at_gap_top() {
        let config = GameConfig::default();
        let mut bird = Bird::spawn(&config);
        let pipe = pipe_at_bird(&config, 100.0);

        // Nominal top 4 units above the gap: inside the inset
        bird.y = 96.0;
        assert!(!check_collision(&bird, &[pipe.clone()], &config));

        // One unit beyond the inset
        bird.y = 100.0 - config.hit_inset - 1.0;
        assert!(check_collision(&bird, &[pipe], &config));
    }

    #[test]
    fn test_inset_tolerance_at_gap_bottom() {
        let config = GameConfig::default();
        let mut bird = Bird::spawn(&config);
        let pipe = pipe_at_bird(&config, 100.0); // gap bottom 300

        bird.y = 300.0 - config.bird_size + config.hit_inset;
        assert!(!check_collision(&bird, &[pipe.clone()], &config));

        bird.y += 1.0;
        assert!(check_collision(&bird, &[pipe], &config));
    }

    #[test]
    fn test_no_horizontal_overlap_is_safe() {
        let config = GameConfig::default();
        let mut bird = Bird::spawn(&config);
        bird.y = 20.0;
        let mut pipe = pipe_at_bird(&config, 200.0);
        // Pipe left edge exactly at hitbox right edge: touching is not overlap
        pipe.x = config.bird_x + config.bird_size - config.hit_inset;
        assert!(!check_collision(&bird, &[pipe.clone()], &config));
        pipe.x -= 1.0;
        assert!(check_collision(&bird, &[pipe], &config));
    }

    #[test]
    fn test_has_cleared_requires_right_edge_behind_bird() {
        let config = GameConfig::default();
        let bird = Bird::spawn(&config);
        let mut pipe = pipe_at_bird(&config, 100.0);
        pipe.x = config.bird_x - config.pipe_width;
        assert!(!has_cleared(&pipe, &bird, &config));
        pipe.x -= 0.01;
        assert!(has_cleared(&pipe, &bird, &config));
    }
}
