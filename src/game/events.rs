//! Events the core consumes and side-effect requests it emits.
//!
//! The core never plays a sound or a clip itself. Each tick returns a list of
//! [`Effect`]s which the front end hands to its collaborators.

use super::types::Epoch;
use serde::{Deserialize, Serialize};

/// Discrete events delivered to the session between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Space / Up / Enter / click / tap.
    Flap,
    /// Mute button or `m`.
    ToggleMute,
    /// Debug autopilot switch (only honoured while playing).
    ToggleAutopilot,
    /// Explicit skip request for a cinematic or revealed text screen.
    Skip,
    /// The cinematic player finished the current clip.
    CinematicEnded,
}

/// One-shot audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Jump,
    Pass,
    Death,
    EpochChange,
    Win,
}

/// Cinematic clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clip {
    Intro,
    MidMatch,
    Finale,
}

impl Clip {
    pub fn id(&self) -> &'static str {
        match self {
            Clip::Intro => "intro",
            Clip::MidMatch => "mid-match",
            Clip::Finale => "finale",
        }
    }
}

/// A side effect requested by a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    PlayCue(Cue),
    PlayCinematic { clip: Clip, volume: f32 },
    StartMusic(Epoch),
    StopMusic,
    SetMuted(bool),
}
