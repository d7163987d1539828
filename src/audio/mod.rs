// Audio module - Sound sample conversion and output
//
// This module provides:
// - Conversion of the core's unsigned 8-bit samples to signed 16-bit stereo
// - The `AudioSink` boundary the emulator delivers samples through
// - A stereo ring buffer shared with the device callback
// - Cross-platform audio output using cpal (feature `audio`)

pub mod buffer;
pub mod converter;
#[cfg(feature = "audio")]
pub mod output;

pub use buffer::AudioBuffer;
pub use converter::{convert_sample, AudioConverter};
#[cfg(feature = "audio")]
pub use output::{AudioOutput, OutputConfig};

use std::fmt;

/// Output sample rate in Hz
pub const SAMPLE_RATE: u32 = 44_100;

/// Emulated frames per second (PAL)
pub const FRAME_RATE: u32 = 50;

/// Samples rendered per frame
pub const SAMPLES_PER_FRAME: usize = (SAMPLE_RATE / FRAME_RATE) as usize;

/// Receives converted audio, one stereo pair per call
///
/// Delivery is fire-and-forget: sinks may drop samples but never report
/// back to the emulator.
pub trait AudioSink {
    fn deliver_sample(&mut self, left: i16, right: i16);
}

/// Sink that discards every sample
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudioSink;

impl AudioSink for NullAudioSink {
    fn deliver_sample(&mut self, _left: i16, _right: i16) {}
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn deliver_sample(&mut self, left: i16, right: i16) {
        (**self).deliver_sample(left, right);
    }
}

/// Audio output errors
#[derive(Debug)]
pub enum AudioError {
    /// No default output device
    NoDevice,
    /// Stream could not be built, started or paused
    Stream(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::NoDevice => write!(f, "No audio output device available"),
            AudioError::Stream(msg) => write!(f, "Audio stream error: {}", msg),
        }
    }
}

impl std::error::Error for AudioError {}
