//! Audio output.
//!
//! With the `audio` feature the cues and epoch music are synthesized tones
//! played through rodio. Without it, or when no output device opens, the
//! game runs with a [`SilentMixer`].

use flip_birds::core::GameConfig;
use flip_birds::media::{AudioMixer, SilentMixer};

/// Open the best available mixer.
pub fn open_mixer(config: &GameConfig, muted: bool) -> Box<dyn AudioMixer> {
    #[cfg(feature = "audio")]
    {
        match tones::ToneMixer::open(config.music_volume) {
            Ok(mut mixer) => {
                mixer.set_muted(muted);
                return Box::new(mixer);
            }
            Err(e) => tracing::warn!(error = %e, "audio unavailable, continuing silently"),
        }
    }
    #[cfg(not(feature = "audio"))]
    let _ = config;

    Box::new(SilentMixer {
        muted,
        music: None,
    })
}

#[cfg(feature = "audio")]
mod tones {
    use flip_birds::game::{Cue, Epoch};
    use flip_birds::media::AudioMixer;
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink, Source, StreamError};
    use std::f32::consts::TAU;

    const SAMPLE_RATE: u32 = 44_100;
    const CUE_VOLUME: f32 = 0.25;

    #[derive(Clone, Copy)]
    enum Wave {
        Sine,
        Saw,
        Square,
    }

    /// One tone: a linear frequency sweep with a linear fade-out.
    #[derive(Clone, Copy)]
    struct Voice {
        wave: Wave,
        from_hz: f32,
        to_hz: f32,
        start_s: f32,
        duration_s: f32,
        gain: f32,
    }

    impl Voice {
        fn new(wave: Wave, from_hz: f32, to_hz: f32, start_s: f32, duration_s: f32) -> Self {
            Self {
                wave,
                from_hz,
                to_hz,
                start_s,
                duration_s,
                gain: 1.0,
            }
        }

        fn gain(mut self, gain: f32) -> Self {
            self.gain = gain;
            self
        }
    }

    fn arpeggio(notes: &[f32], step_s: f32) -> Vec<Voice> {
        notes
            .iter()
            .enumerate()
            .map(|(i, &hz)| Voice::new(Wave::Sine, hz, hz, i as f32 * step_s, step_s * 1.6))
            .collect()
    }

    fn voices(cue: Cue) -> Vec<Voice> {
        match cue {
            Cue::Jump => vec![Voice::new(Wave::Sine, 380.0, 580.0, 0.0, 0.09)],
            Cue::Pass => vec![Voice::new(Wave::Sine, 880.0, 880.0, 0.0, 0.055)],
            Cue::Death => vec![
                Voice::new(Wave::Saw, 280.0, 45.0, 0.0, 0.45).gain(0.6),
                Voice::new(Wave::Square, 200.0, 30.0, 0.0, 0.5).gain(0.4),
            ],
            Cue::EpochChange => arpeggio(&[523.0, 659.0, 784.0], 0.12),
            Cue::Win => arpeggio(&[523.0, 659.0, 784.0, 1047.0], 0.14),
        }
    }

    /// Mix `voices` into a mono sample buffer.
    fn render(voices: &[Voice]) -> Vec<f32> {
        let end = voices
            .iter()
            .map(|v| v.start_s + v.duration_s)
            .fold(0.0_f32, f32::max);
        let len = (end * SAMPLE_RATE as f32).ceil() as usize;
        let mut out = vec![0.0_f32; len];

        for voice in voices {
            let first = (voice.start_s * SAMPLE_RATE as f32) as usize;
            let count = (voice.duration_s * SAMPLE_RATE as f32) as usize;
            let mut phase = 0.0_f32;
            for i in 0..count {
                let t = i as f32 / count as f32;
                let hz = voice.from_hz + (voice.to_hz - voice.from_hz) * t;
                phase = (phase + hz / SAMPLE_RATE as f32).fract();
                let sample = match voice.wave {
                    Wave::Sine => (phase * TAU).sin(),
                    Wave::Saw => phase * 2.0 - 1.0,
                    Wave::Square => {
                        if phase < 0.5 {
                            1.0
                        } else {
                            -1.0
                        }
                    }
                };
                if let Some(slot) = out.get_mut(first + i) {
                    *slot += sample * voice.gain * (1.0 - t);
                }
            }
        }
        out
    }

    /// One bar of the looping drone for an epoch.
    fn music_bar(epoch: Epoch) -> Vec<f32> {
        let (root, fifth) = match epoch {
            Epoch::First => (220.0, 329.6),
            Epoch::Second => (174.6, 261.6),
        };
        let bar_s = 2.0;
        let len = (bar_s * SAMPLE_RATE as f32) as usize;
        (0..len)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let swell = 0.6 + 0.4 * (t / bar_s * TAU).sin();
                ((t * root * TAU).sin() + 0.5 * (t * fifth * TAU).sin()) * 0.3 * swell
            })
            .collect()
    }

    /// Synthesized-tone mixer on the default output device.
    pub struct ToneMixer {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Option<Sink>,
        music_volume: f32,
        muted: bool,
    }

    impl ToneMixer {
        pub fn open(music_volume: f32) -> Result<Self, StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
                music: None,
                music_volume,
                muted: false,
            })
        }
    }

    impl AudioMixer for ToneMixer {
        fn cue(&mut self, cue: Cue) {
            if self.muted {
                return;
            }
            let samples = render(&voices(cue));
            match self.handle.play_raw(
                SamplesBuffer::new(1, SAMPLE_RATE, samples).amplify(CUE_VOLUME),
            ) {
                Ok(()) => {}
                Err(e) => tracing::debug!(error = %e, ?cue, "cue dropped"),
            }
        }

        fn start_music(&mut self, epoch: Epoch) {
            self.stop_music();
            let sink = match Sink::try_new(&self.handle) {
                Ok(sink) => sink,
                Err(e) => {
                    tracing::debug!(error = %e, "music sink unavailable");
                    return;
                }
            };
            sink.set_volume(if self.muted { 0.0 } else { self.music_volume });
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, music_bar(epoch)).repeat_infinite());
            self.music = Some(sink);
        }

        fn stop_music(&mut self) {
            if let Some(sink) = self.music.take() {
                sink.stop();
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            if let Some(sink) = &self.music {
                sink.set_volume(if muted { 0.0 } else { self.music_volume });
            }
        }
    }

}
