// Audio output - Plays converted samples through cpal
//
// The emulator delivers signed 16-bit stereo pairs; this sink scales them to
// `f32`, applies the volume and queues them for the device callback.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use std::sync::{Arc, Mutex};

use super::buffer::AudioBuffer;
use super::{AudioError, AudioSink, SAMPLE_RATE};

/// Audio output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of device channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Buffer size in milliseconds (affects latency)
    pub buffer_duration_ms: u32,
    /// Volume (0.0-1.0)
    pub volume: f32,
}

impl OutputConfig {
    /// Create default audio configuration
    ///
    /// - Sample rate: 44.1 kHz
    /// - Channels: 2 (stereo)
    /// - Buffer duration: 100 ms
    pub fn new() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            channels: 2,
            buffer_duration_ms: 100,
            volume: 0.5,
        }
    }

    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_buffer_duration(mut self, duration_ms: u32) -> Self {
        self.buffer_duration_ms = duration_ms;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Audio output handle
///
/// Owns the cpal stream; dropping it stops playback.
pub struct AudioOutput {
    config: OutputConfig,
    stream: Stream,
    buffer: Arc<Mutex<AudioBuffer>>,
}

impl AudioOutput {
    /// Open the default output device and start the stream
    pub fn new(config: OutputConfig) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        log::info!("Audio device: {}", device.name().unwrap_or_default());

        let stream_config = StreamConfig {
            channels: config.channels,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let buffer = Arc::new(Mutex::new(AudioBuffer::with_duration(
            config.buffer_duration_ms,
            config.sample_rate,
        )));
        let callback_buffer = Arc::clone(&buffer);
        let channels = config.channels as usize;

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    match callback_buffer.lock() {
                        Ok(mut buf) => buf.drain_into(data, channels),
                        Err(_) => data.fill(0.0),
                    }
                },
                move |err| {
                    log::error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::Stream(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::Stream(e.to_string()))?;

        log::info!(
            "Audio output initialized: {} Hz, {} channel(s)",
            config.sample_rate,
            config.channels
        );

        Ok(Self {
            config,
            stream,
            buffer,
        })
    }

    /// Number of frames waiting for the device
    pub fn buffer_len(&self) -> usize {
        self.buffer.lock().map(|buf| buf.len()).unwrap_or(0)
    }

    /// Frames dropped because the device fell behind
    pub fn dropped(&self) -> u64 {
        self.buffer.lock().map(|buf| buf.dropped()).unwrap_or(0)
    }

    pub fn clear_buffer(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.clear();
        }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.config.volume = volume.clamp(0.0, 1.0);
    }

    pub fn pause(&self) -> Result<(), AudioError> {
        self.stream
            .pause()
            .map_err(|e| AudioError::Stream(e.to_string()))
    }

    pub fn resume(&self) -> Result<(), AudioError> {
        self.stream
            .play()
            .map_err(|e| AudioError::Stream(e.to_string()))
    }
}

impl AudioSink for AudioOutput {
    fn deliver_sample(&mut self, left: i16, right: i16) {
        let scale = self.config.volume / i16::MAX as f32;
        if let Ok(mut buf) = self.buffer.lock() {
            buf.push([left as f32 * scale, right as f32 * scale]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_config_defaults() {
        let config = OutputConfig::new();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.channels, 2);
        assert_eq!(config.buffer_duration_ms, 100);
    }

    #[test]
    fn test_output_config_builder() {
        let config = OutputConfig::new()
            .with_channels(1)
            .with_buffer_duration(40)
            .with_volume(1.5);

        assert_eq!(config.channels, 1);
        assert_eq!(config.buffer_duration_ms, 40);
        assert_eq!(config.volume, 1.0);
    }

    // Opening a device needs audio hardware; the stream itself is exercised
    // by running the binary.
}
