//! Velocity sources: who decides the bird's vertical velocity override.
//!
//! The physics step asks the active source once per tick. Manual play
//! overrides velocity only when a flap is queued; the debug autopilot
//! steers every tick toward the next gap.

use super::types::{Bird, Obstacle};
use crate::core::config::GameConfig;

/// Inputs a velocity source may look at.
pub struct SteerContext<'a> {
    pub bird: &'a Bird,
    pub obstacles: &'a [Obstacle],
    pub config: &'a GameConfig,
    /// A flap was queued since the last physics step.
    pub flap_requested: bool,
}

/// Decides a vertical velocity override for this tick.
pub trait VelocitySource {
    /// `Some(v)` replaces the bird's velocity before gravity is applied.
    fn steer(&mut self, ctx: &SteerContext) -> Option<f64>;

    /// Whether an override from this source counts as a player flap (jump cue).
    fn is_manual(&self) -> bool;
}

/// Player input: a queued flap sets the fixed jump velocity.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualFlap;

impl VelocitySource for ManualFlap {
    fn steer(&mut self, ctx: &SteerContext) -> Option<f64> {
        ctx.flap_requested.then_some(ctx.config.jump_velocity)
    }

    fn is_manual(&self) -> bool {
        true
    }
}

/// Proportional controller toward the centre of the next uncleared gap.
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    pub gain: f64,
}

impl Autopilot {
    pub fn new(gain: f64) -> Self {
        Self { gain }
    }

    /// Vertical target: centre of the first pipe whose right edge has not yet
    /// passed the bird's hitbox, or the middle of the playable band.
    pub fn target_y(ctx: &SteerContext) -> f64 {
        let hitbox_left = ctx.bird.x + ctx.config.hit_inset;
        ctx.obstacles
            .iter()
            .find(|o| !o.passed && o.right_edge(ctx.config.pipe_width) >= hitbox_left)
            .map(|o| o.gap_center())
            .unwrap_or(ctx.config.playable_height() / 2.0)
    }
}

impl VelocitySource for Autopilot {
    fn steer(&mut self, ctx: &SteerContext) -> Option<f64> {
        let error = Self::target_y(ctx) - ctx.bird.center_y(ctx.config);
        let limit = ctx.config.jump_velocity.abs();
        Some((self.gain * error).clamp(-limit, limit))
    }

    fn is_manual(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(x: f64, gap_y: f64) -> Obstacle {
        Obstacle {
            x,
            gap_y,
            gap_size: 200.0,
            passed: false,
            skin: 0,
        }
    }

    #[test]
    fn test_manual_only_overrides_on_flap() {
        let config = GameConfig::default();
        let bird = Bird::spawn(&config);
        let mut source = ManualFlap;

        let idle = SteerContext {
            bird: &bird,
            obstacles: &[],
            config: &config,
            flap_requested: false,
        };
        assert_eq!(source.steer(&idle), None);

        let flap = SteerContext {
            flap_requested: true,
            ..idle
        };
        assert_eq!(source.steer(&flap), Some(config.jump_velocity));
    }

    #[test]
    fn test_autopilot_steers_toward_gap() {
        let config = GameConfig::default();
        let bird = Bird::spawn(&config); // centre y = 240
        let low_gap = [obstacle(500.0, 250.0)]; // centre 350
        let mut pilot = Autopilot::new(config.autopilot_gain);
        let ctx = SteerContext {
            bird: &bird,
            obstacles: &low_gap,
            config: &config,
            flap_requested: false,
        };
        let v = pilot.steer(&ctx).unwrap();
        assert!(v > 0.0, "should steer downward");

        let high_gap = [obstacle(500.0, 50.0)]; // centre 150
        let ctx = SteerContext {
            obstacles: &high_gap,
            ..ctx
        };
        assert!(pilot.steer(&ctx).unwrap() < 0.0);
    }

    #[test]
    fn test_autopilot_is_clamped_to_flap_range() {
        let config = GameConfig::default();
        let mut bird = Bird::spawn(&config);
        bird.y = 400.0;
        let gap = [obstacle(500.0, 50.0)];
        let mut pilot = Autopilot::new(10.0);
        let ctx = SteerContext {
            bird: &bird,
            obstacles: &gap,
            config: &config,
            flap_requested: true,
        };
        assert_eq!(pilot.steer(&ctx), Some(config.jump_velocity));
    }

    #[test]
    fn test_autopilot_skips_cleared_pipes() {
        let config = GameConfig::default();
        let bird = Bird::spawn(&config);
        let mut behind = obstacle(50.0, 50.0);
        behind.passed = true;
        let pipes = [behind, obstacle(700.0, 250.0)];
        let ctx = SteerContext {
            bird: &bird,
            obstacles: &pipes,
            config: &config,
            flap_requested: false,
        };
        assert!((Autopilot::target_y(&ctx) - 350.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_autopilot_defaults_to_band_centre() {
        let config = GameConfig::default();
        let bird = Bird::spawn(&config);
        let ctx = SteerContext {
            bird: &bird,
            obstacles: &[],
            config: &config,
            flap_requested: false,
        };
        assert!((Autopilot::target_y(&ctx) - config.playable_height() / 2.0).abs() < 1e-9);
    }
}
