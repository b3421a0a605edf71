//! Background music and sound effects
//!
//! Music is decoded from a file and looped; the game-over sound is
//! synthesized. Any audio failure is logged and the game carries on silently.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use fundsp::prelude::*;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source, buffer::SamplesBuffer};
use thiserror::Error;

const SAMPLE_RATE: u32 = 44_100;

/// Errors from audio output or the music file
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Audio output unavailable: {0}")]
    Stream(#[from] rodio::StreamError),

    #[error("Cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot decode music: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

/// What the controller asks of the audio layer
pub trait Soundtrack {
    /// Stop any playing music and start it again from the top
    fn restart_music(&mut self);
    fn stop_music(&mut self);
    /// Fire-and-forget game-over effect
    fn game_over(&mut self);
}

/// No audio at all (`--mute`, no output device, tests)
#[derive(Debug, Default)]
pub struct Silent;

impl Soundtrack for Silent {
    fn restart_music(&mut self) {}
    fn stop_music(&mut self) {}
    fn game_over(&mut self) {}
}

/// Plays through the default output device
pub struct Speakers {
    stream: OutputStream,
    music_path: PathBuf,
    music: Option<Sink>,
}

impl Speakers {
    pub fn open(music_path: impl Into<PathBuf>) -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // Dropping the stream would otherwise print to the terminal
        stream.log_on_drop(false);
        Ok(Self {
            stream,
            music_path: music_path.into(),
            music: None,
        })
    }

    fn play_music(&mut self) -> Result<(), AudioError> {
        let file = File::open(&self.music_path).map_err(|source| AudioError::Open {
            path: self.music_path.clone(),
            source,
        })?;
        let source = Decoder::try_from(file)?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source.repeat_infinite());
        self.music = Some(sink);
        Ok(())
    }
}

impl Soundtrack for Speakers {
    fn restart_music(&mut self) {
        self.stop_music();
        if let Err(e) = self.play_music() {
            log::warn!("Error playing music: {}", e);
        }
    }

    fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }

    fn game_over(&mut self) {
        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, death_samples()));
        sink.detach(); // Play in background
    }
}

/// Sawtooth falling from 400Hz to 80Hz while fading out, half a second
fn death_samples() -> Vec<f32> {
    let freq = lfo(|t: f32| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
    let gain = lfo(|t: f32| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
    let mut sound = (freq >> saw()) * gain;
    sound.set_sample_rate(SAMPLE_RATE as f64);

    let len = SAMPLE_RATE as usize / 2;
    (0..len).map(|_| sound.get_mono()).collect()
}
