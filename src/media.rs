//! Audio and cinematic collaborators.
//!
//! The core emits [`Effect`]s; the front end owns an [`AudioMixer`] and a
//! [`CinematicPlayer`] and routes each effect with [`dispatch_effects`].
//! Failures stay on this side of the boundary: a mixer that cannot open a
//! device degrades to [`SilentMixer`], and cinematics fall back to timed
//! scene cards via [`ScriptedCinematic`].

use crate::core::config::GameConfig;
use crate::game::events::{Clip, Cue, Effect, GameEvent};
use crate::game::types::Epoch;

/// Plays cues and background music.
pub trait AudioMixer {
    /// Fire-and-forget one-shot. Must be a no-op while muted.
    fn cue(&mut self, cue: Cue);
    /// Start (or switch to) the looping track for `epoch`.
    fn start_music(&mut self, epoch: Epoch);
    fn stop_music(&mut self);
    fn set_muted(&mut self, muted: bool);
}

/// Plays cinematic clips and reports when they finish.
pub trait CinematicPlayer {
    fn play(&mut self, clip: Clip, volume: f32);
    /// Ask the current clip to stop early.
    fn skip(&mut self);
    /// Advance playback by `elapsed_ms`. Returns the single completion event
    /// of the current clip once it ends or is skipped.
    fn poll(&mut self, elapsed_ms: f64) -> Option<GameEvent>;
    /// The clip currently playing, if any.
    fn current(&self) -> Option<Clip>;
}

/// Mixer that only tracks state. Used when audio is unavailable or disabled.
#[derive(Debug, Default, Clone)]
pub struct SilentMixer {
    pub muted: bool,
    pub music: Option<Epoch>,
}

impl AudioMixer for SilentMixer {
    fn cue(&mut self, cue: Cue) {
        if !self.muted {
            tracing::trace!(?cue, "cue (silent)");
        }
    }

    fn start_music(&mut self, epoch: Epoch) {
        self.music = Some(epoch);
    }

    fn stop_music(&mut self) {
        self.music = None;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[derive(Debug, Clone, Copy)]
struct Playback {
    clip: Clip,
    elapsed_ms: f64,
    duration_ms: f64,
    skipped: bool,
}

/// Cinematic player that times each clip by its configured duration.
///
/// Emits exactly one `CinematicEnded` (or `Skip`) per `play`. Renderers
/// show a scene card using [`ScriptedCinematic::progress`].
#[derive(Debug, Clone)]
pub struct ScriptedCinematic {
    intro_ms: f64,
    mid_ms: f64,
    finale_ms: f64,
    playing: Option<Playback>,
}

impl ScriptedCinematic {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            intro_ms: config.intro_clip_ms,
            mid_ms: config.mid_clip_ms,
            finale_ms: config.finale_clip_ms,
            playing: None,
        }
    }

    pub fn duration_ms(&self, clip: Clip) -> f64 {
        match clip {
            Clip::Intro => self.intro_ms,
            Clip::MidMatch => self.mid_ms,
            Clip::Finale => self.finale_ms,
        }
    }

    /// Playback position of the current clip, 0.0..=1.0.
    pub fn progress(&self) -> f64 {
        match &self.playing {
            Some(p) if p.duration_ms > 0.0 => (p.elapsed_ms / p.duration_ms).min(1.0),
            Some(_) => 1.0,
            None => 0.0,
        }
    }
}

impl CinematicPlayer for ScriptedCinematic {
    fn play(&mut self, clip: Clip, volume: f32) {
        if let Some(previous) = self.playing.take() {
            tracing::warn!(previous = previous.clip.id(), next = clip.id(), "cinematic replaced");
        }
        tracing::debug!(clip = clip.id(), volume, "cinematic started");
        self.playing = Some(Playback {
            clip,
            elapsed_ms: 0.0,
            duration_ms: self.duration_ms(clip),
            skipped: false,
        });
    }

    fn skip(&mut self) {
        if let Some(playback) = self.playing.as_mut() {
            playback.skipped = true;
        }
    }

    fn poll(&mut self, elapsed_ms: f64) -> Option<GameEvent> {
        let playback = self.playing.as_mut()?;
        if playback.skipped {
            self.playing = None;
            return Some(GameEvent::Skip);
        }
        playback.elapsed_ms += elapsed_ms.max(0.0);
        if playback.elapsed_ms >= playback.duration_ms {
            let clip = playback.clip;
            self.playing = None;
            tracing::debug!(clip = clip.id(), "cinematic ended");
            return Some(GameEvent::CinematicEnded);
        }
        None
    }

    fn current(&self) -> Option<Clip> {
        self.playing.map(|p| p.clip)
    }
}

/// Route a tick's effects to the collaborators, in order.
pub fn dispatch_effects<A, C>(effects: &[Effect], mixer: &mut A, cinematic: &mut C)
where
    A: AudioMixer + ?Sized,
    C: CinematicPlayer + ?Sized,
{
    for effect in effects {
        match *effect {
            Effect::PlayCue(cue) => mixer.cue(cue),
            Effect::PlayCinematic { clip, volume } => cinematic.play(clip, volume),
            Effect::StartMusic(epoch) => mixer.start_music(epoch),
            Effect::StopMusic => mixer.stop_music(),
            Effect::SetMuted(muted) => mixer.set_muted(muted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingMixer {
        muted: bool,
        cues: Vec<Cue>,
        music: Option<Epoch>,
    }

    impl AudioMixer for RecordingMixer {
        fn cue(&mut self, cue: Cue) {
            if !self.muted {
                self.cues.push(cue);
            }
        }
        fn start_music(&mut self, epoch: Epoch) {
            self.music = Some(epoch);
        }
        fn stop_music(&mut self) {
            self.music = None;
        }
        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
    }

    #[test]
    fn test_scripted_clip_completes_once() {
        let config = GameConfig::default();
        let mut player = ScriptedCinematic::new(&config);
        player.play(Clip::Intro, 0.8);
        assert_eq!(player.current(), Some(Clip::Intro));

        assert_eq!(player.poll(config.intro_clip_ms - 1.0), None);
        assert_eq!(player.poll(1.0), Some(GameEvent::CinematicEnded));
        assert_eq!(player.poll(1000.0), None);
        assert_eq!(player.current(), None);
    }

    #[test]
    fn test_skip_reports_skip_once() {
        let mut player = ScriptedCinematic::new(&GameConfig::default());
        player.play(Clip::Finale, 0.8);
        player.skip();
        assert_eq!(player.poll(0.0), Some(GameEvent::Skip));
        assert_eq!(player.poll(10_000.0), None);
    }

    #[test]
    fn test_skip_without_clip_is_ignored() {
        let mut player = ScriptedCinematic::new(&GameConfig::default());
        player.skip();
        assert_eq!(player.poll(0.0), None);
        assert_eq!(player.progress(), 0.0);
    }

    #[test]
    fn test_progress_tracks_duration() {
        let config = GameConfig::default();
        let mut player = ScriptedCinematic::new(&config);
        player.play(Clip::MidMatch, 0.8);
        player.poll(config.mid_clip_ms / 2.0);
        assert!((player.progress() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_dispatch_routes_effects_in_order() {
        let mut mixer = RecordingMixer::default();
        let mut player = ScriptedCinematic::new(&GameConfig::default());
        let effects = vec![
            Effect::StartMusic(Epoch::First),
            Effect::PlayCue(Cue::Pass),
            Effect::SetMuted(true),
            Effect::PlayCue(Cue::EpochChange),
            Effect::StopMusic,
            Effect::PlayCinematic {
                clip: Clip::MidMatch,
                volume: 0.8,
            },
        ];
        dispatch_effects(&effects, &mut mixer, &mut player);
        assert_eq!(mixer.cues, vec![Cue::Pass]);
        assert!(mixer.muted);
        assert_eq!(mixer.music, None);
        assert_eq!(player.current(), Some(Clip::MidMatch));
    }

    #[test]
    fn test_silent_mixer_tracks_music() {
        let mut mixer = SilentMixer::default();
        mixer.start_music(Epoch::Second);
        mixer.cue(Cue::Jump);
        assert_eq!(mixer.music, Some(Epoch::Second));
        mixer.stop_music();
        assert_eq!(mixer.music, None);
    }
}
