//! Screen state machine and the per-tick driver.
//!
//! [`transition`] is the whole transition table: a pure function from the
//! current session and a [`Trigger`] to an optional [`Transition`]. Flag
//! changes are listed in the transition as [`FlagOp`]s and applied in one
//! place by [`apply_transition`]. [`tick`] feeds queued events, timers,
//! physics, scoring and collision through that table and returns the side
//! effects for the front end.

use super::collision;
use super::events::{Clip, Cue, Effect, GameEvent};
use super::physics;
use super::session::GameSession;
use super::story::{ENDING_TEXT, STORY_TEXT};
use super::types::{Screen, ScreenKind};
use super::velocity::{Autopilot, ManualFlap, SteerContext, VelocitySource};
use crate::core::clock::FrameDelta;
use rand::Rng;

/// What can move the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Event(GameEvent),
    /// The current timed screen ran its full duration.
    TimerElapsed,
    /// The bird hit the ground, the ceiling or a pipe.
    Collision,
    /// A pass brought the score to this value.
    ScoreReached(u32),
}

/// Session flag changes a transition performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOp {
    /// The story is starting; do not show it on the next start.
    ConsumeIntro,
    /// A win was acknowledged; show the story on the next start.
    ArmIntro,
    MarkMidCutscene,
    ToggleMute,
    ToggleAutopilot,
    ResetSession,
}

/// Result of a legal (screen, trigger) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub to: Screen,
    pub flags: Vec<FlagOp>,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(screen: Screen) -> Self {
        Self {
            to: screen,
            flags: Vec::new(),
            effects: Vec::new(),
        }
    }

    fn with_flags(mut self, flags: &[FlagOp]) -> Self {
        self.flags.extend_from_slice(flags);
        self
    }

    fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// The transition table. `None` means the trigger is ignored in this screen.
pub fn transition(session: &GameSession, trigger: Trigger) -> Option<Transition> {
    use GameEvent::*;
    use Trigger::*;

    let config = &session.config;
    let cps = config.typewriter_chars_per_sec;

    match (&session.screen, trigger) {
        // Mute is available everywhere and never changes the screen
        (screen, Event(ToggleMute)) => Some(
            Transition::to(screen.clone())
                .with_flags(&[FlagOp::ToggleMute])
                .with_effects(vec![Effect::SetMuted(!session.muted)]),
        ),

        (Screen::Menu, Event(Flap)) => {
            if session.show_intro {
                Some(
                    Transition::to(Screen::Story { elapsed_ms: 0.0 })
                        .with_flags(&[FlagOp::ConsumeIntro]),
                )
            } else if config.countdown_on_retry {
                Some(Transition::to(Screen::Countdown { elapsed_ms: 0.0 }))
            } else {
                Some(
                    Transition::to(Screen::Playing)
                        .with_effects(vec![Effect::StartMusic(session.epoch())]),
                )
            }
        }

        (Screen::Story { elapsed_ms }, Event(Flap | Skip))
            if super::story::is_revealed(STORY_TEXT, *elapsed_ms, cps) =>
        {
            Some(
                Transition::to(Screen::Intro).with_effects(vec![Effect::PlayCinematic {
                    clip: Clip::Intro,
                    volume: config.cinematic_volume,
                }]),
            )
        }

        (Screen::Intro, Event(CinematicEnded | Skip)) => {
            Some(Transition::to(Screen::Countdown { elapsed_ms: 0.0 }))
        }

        (Screen::Countdown { .. }, TimerElapsed) => Some(
            Transition::to(Screen::Playing)
                .with_effects(vec![Effect::StartMusic(session.epoch())]),
        ),

        (Screen::Playing, Event(ToggleAutopilot)) if config.allow_autopilot => {
            Some(Transition::to(Screen::Playing).with_flags(&[FlagOp::ToggleAutopilot]))
        }

        (Screen::Playing, Collision) => Some(
            Transition::to(Screen::Dead { elapsed_ms: 0.0 })
                .with_effects(vec![Effect::PlayCue(Cue::Death), Effect::StopMusic]),
        ),

        (Screen::Playing, ScoreReached(score)) => {
            if score >= config.epoch_change_score && !session.mid_cutscene_played {
                Some(
                    Transition::to(Screen::MidCutscene)
                        .with_flags(&[FlagOp::MarkMidCutscene])
                        .with_effects(vec![
                            Effect::PlayCue(Cue::EpochChange),
                            Effect::StopMusic,
                            Effect::PlayCinematic {
                                clip: Clip::MidMatch,
                                volume: config.cinematic_volume,
                            },
                        ]),
                )
            } else if score >= config.total_pipes {
                Some(Transition::to(Screen::WinCinematic).with_effects(vec![
                    Effect::PlayCue(Cue::Win),
                    Effect::StopMusic,
                    Effect::PlayCinematic {
                        clip: Clip::Finale,
                        volume: config.cinematic_volume,
                    },
                ]))
            } else {
                None
            }
        }

        (Screen::MidCutscene, Event(CinematicEnded | Skip)) => {
            Some(Transition::to(Screen::MidCutsceneText { elapsed_ms: 0.0 }))
        }

        (Screen::MidCutsceneText { .. }, TimerElapsed) => Some(
            Transition::to(Screen::Playing)
                .with_effects(vec![Effect::StartMusic(session.epoch())]),
        ),

        (Screen::Dead { .. }, Event(Flap)) => {
            Some(Transition::to(Screen::Menu).with_flags(&[FlagOp::ResetSession]))
        }

        (Screen::WinCinematic, Event(CinematicEnded | Skip)) => {
            Some(Transition::to(Screen::Ending { elapsed_ms: 0.0 }))
        }

        (Screen::Ending { elapsed_ms }, Event(Flap | Skip))
            if super::story::is_revealed(ENDING_TEXT, *elapsed_ms, cps) =>
        {
            Some(Transition::to(Screen::WinAcknowledged))
        }

        (Screen::WinAcknowledged, Event(Flap)) => Some(
            Transition::to(Screen::Menu).with_flags(&[FlagOp::ResetSession, FlagOp::ArmIntro]),
        ),

        _ => None,
    }
}

/// Apply a transition's flag operations, switch screens, return its effects.
pub fn apply_transition(session: &mut GameSession, transition: Transition) -> Vec<Effect> {
    let from = session.screen.kind();
    for op in &transition.flags {
        match op {
            FlagOp::ConsumeIntro => session.show_intro = false,
            FlagOp::ArmIntro => session.show_intro = true,
            FlagOp::MarkMidCutscene => session.mid_cutscene_played = true,
            FlagOp::ToggleMute => session.muted = !session.muted,
            FlagOp::ToggleAutopilot => session.autopilot = !session.autopilot,
            FlagOp::ResetSession => session.reset_session(),
        }
    }
    session.screen = transition.to;

    let to = session.screen.kind();
    if from != to {
        if from == ScreenKind::Playing {
            session.flap_queued = false;
        }
        tracing::debug!(?from, ?to, score = session.score, "screen transition");
        match to {
            ScreenKind::Dead => {
                tracing::info!(score = session.score, best = session.best_score, "bird crashed")
            }
            ScreenKind::WinCinematic => tracing::info!(score = session.score, "match won"),
            _ => {}
        }
    }
    transition.effects
}

/// Run a trigger through the table and apply the result, if any.
pub fn fire(session: &mut GameSession, trigger: Trigger) -> Vec<Effect> {
    match transition(session, trigger) {
        Some(t) => apply_transition(session, t),
        None => Vec::new(),
    }
}

/// Deliver one input or media event.
///
/// A flap while playing is queued for the next physics step; everything
/// else goes through the transition table. Events with no entry for the
/// current screen are dropped.
pub fn handle_event(session: &mut GameSession, event: GameEvent) -> Vec<Effect> {
    if event == GameEvent::Flap && session.screen == Screen::Playing {
        session.flap_queued = true;
        return Vec::new();
    }
    match transition(session, Trigger::Event(event)) {
        Some(t) => apply_transition(session, t),
        None => {
            tracing::trace!(?event, screen = ?session.screen.kind(), "event ignored");
            Vec::new()
        }
    }
}

/// Advance the session by one frame.
///
/// Events queued since the last frame are handled first, then timers, then
/// (while playing) physics, scoring and collision.
pub fn tick<R: Rng>(
    session: &mut GameSession,
    delta: FrameDelta,
    events: &[GameEvent],
    rng: &mut R,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    for &event in events {
        effects.extend(handle_event(session, event));
    }

    if let Some(elapsed) = advance_screen_timer(&mut session.screen, delta.elapsed_ms) {
        let expired = match session.screen {
            Screen::Countdown { .. } => elapsed >= session.config.countdown_ms,
            Screen::MidCutsceneText { .. } => elapsed >= session.config.mid_cutscene_text_ms,
            _ => false,
        };
        if expired {
            effects.extend(fire(session, Trigger::TimerElapsed));
        }
    }

    match session.screen.kind() {
        ScreenKind::Playing => effects.extend(step_playing(session, delta.dt, rng)),
        ScreenKind::Dead => physics::death_spin(&mut session.bird, &session.config, delta.dt),
        _ => {}
    }

    effects
}

/// Add `ms` to a timed screen's counter and return the new value.
fn advance_screen_timer(screen: &mut Screen, ms: f64) -> Option<f64> {
    match screen {
        Screen::Story { elapsed_ms }
        | Screen::Countdown { elapsed_ms }
        | Screen::MidCutsceneText { elapsed_ms }
        | Screen::Dead { elapsed_ms }
        | Screen::Ending { elapsed_ms } => {
            *elapsed_ms += ms;
            Some(*elapsed_ms)
        }
        _ => None,
    }
}

/// One physics/scoring/collision step while playing.
fn step_playing<R: Rng>(session: &mut GameSession, dt: f64, rng: &mut R) -> Vec<Effect> {
    let mut effects = Vec::new();

    // Velocity source: manual flaps or the debug autopilot
    let flap_requested = std::mem::take(&mut session.flap_queued);
    let mut manual = ManualFlap;
    let mut pilot = Autopilot::new(session.config.autopilot_gain);
    let source: &mut dyn VelocitySource = if session.autopilot {
        &mut pilot
    } else {
        &mut manual
    };
    let ctx = SteerContext {
        bird: &session.bird,
        obstacles: &session.obstacles,
        config: &session.config,
        flap_requested,
    };
    if let Some(vy) = source.steer(&ctx) {
        session.bird.vy = vy;
        if source.is_manual() {
            session.bird.squash = 1.0;
            effects.push(Effect::PlayCue(Cue::Jump));
        }
    }

    physics::integrate_bird(&mut session.bird, &session.config, dt);
    physics::spawn_if_due(session, rng);

    let speed = session.pipe_speed();
    physics::scroll_obstacles(&mut session.obstacles, speed, dt);
    session.scroll += speed * dt;

    // Scoring: one-shot per pipe. A threshold transition ends the step.
    for i in 0..session.obstacles.len() {
        let cleared = {
            let obstacle = &session.obstacles[i];
            !obstacle.passed && collision::has_cleared(obstacle, &session.bird, &session.config)
        };
        if !cleared {
            continue;
        }
        session.obstacles[i].passed = true;
        let score = session.award_pass();
        effects.push(Effect::PlayCue(Cue::Pass));

        if let Some(t) = transition(session, Trigger::ScoreReached(score)) {
            effects.extend(apply_transition(session, t));
            return effects;
        }
    }

    physics::prune_obstacles(&mut session.obstacles, &session.config);

    if collision::check_collision(&session.bird, &session.obstacles, &session.config) {
        effects.extend(fire(session, Trigger::Collision));
    }

    effects
}
