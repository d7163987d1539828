// Audio converter - Sound chip samples to signed 16-bit stereo
//
// The core renders one frame of unsigned 8-bit samples into a staging block
// owned by the converter. Each raw sample becomes `(raw << 8) - 0x7FF`,
// narrowed to 16 bits, and is delivered to both channels.

use super::{AudioSink, FRAME_RATE, SAMPLE_RATE};

/// Convert one raw sample to the signed delivery format
///
/// Computed at 32 bits and narrowed with wrap-around, so raw values of 0x80
/// and above come out negative.
///
/// # Example
/// ```
/// use vecx_rs::audio::convert_sample;
/// assert_eq!(convert_sample(0x00), -0x7FF);
/// assert_eq!(convert_sample(0x10), 0x1000 - 0x7FF);
/// ```
#[inline]
pub fn convert_sample(raw: u8) -> i16 {
    (((raw as i32) << 8) - 0x7FF) as i16
}

/// Owns the per-frame raw sample block and emits converted stereo pairs
#[derive(Debug, Clone)]
pub struct AudioConverter {
    raw: Box<[u8]>,
}

impl AudioConverter {
    /// Create a converter sized for one frame of audio
    ///
    /// # Arguments
    /// * `sample_rate` - Output sample rate in Hz
    /// * `frame_rate` - Frames per second
    pub fn new(sample_rate: u32, frame_rate: u32) -> Self {
        let samples = (sample_rate / frame_rate.max(1)) as usize;
        Self {
            raw: vec![0u8; samples].into_boxed_slice(),
        }
    }

    /// Samples produced per frame
    #[inline]
    pub fn samples_per_frame(&self) -> usize {
        self.raw.len()
    }

    /// Staging block the core renders into
    pub fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.raw
    }

    /// Convert and deliver the staged block, one sink call per sample
    ///
    /// # Returns
    /// Number of stereo pairs delivered
    pub fn deliver<S: AudioSink + ?Sized>(&self, sink: &mut S) -> usize {
        for &raw in self.raw.iter() {
            let sample = convert_sample(raw);
            sink.deliver_sample(sample, sample);
        }
        self.raw.len()
    }
}

impl Default for AudioConverter {
    fn default() -> Self {
        Self::new(SAMPLE_RATE, FRAME_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SAMPLES_PER_FRAME;

    #[derive(Default)]
    struct Recorder(Vec<(i16, i16)>);

    impl AudioSink for Recorder {
        fn deliver_sample(&mut self, left: i16, right: i16) {
            self.0.push((left, right));
        }
    }

    #[test]
    fn test_convert_zero() {
        assert_eq!(convert_sample(0x00), -2047);
    }

    #[test]
    fn test_convert_full_scale_wraps() {
        // 0xFF00 - 0x7FF = 0xF701, which reads back as -2303 in 16 bits
        assert_eq!(convert_sample(0xFF), 0xF701u16 as i16);
        assert_eq!(convert_sample(0xFF), -2303);
    }

    #[test]
    fn test_convert_below_wrap_point() {
        assert_eq!(convert_sample(0x7F), 0x7F00 - 0x7FF);
        assert_eq!(convert_sample(0x08), 1);
    }

    #[test]
    fn test_default_block_size() {
        let converter = AudioConverter::default();
        assert_eq!(converter.samples_per_frame(), 882);
        assert_eq!(converter.samples_per_frame(), SAMPLES_PER_FRAME);
    }

    #[test]
    fn test_deliver_preserves_order_and_duplicates_channels() {
        let mut converter = AudioConverter::new(400, 100);
        converter.raw_mut().copy_from_slice(&[0x00, 0xFF, 0x10, 0x08]);

        let mut sink = Recorder::default();
        let delivered = converter.deliver(&mut sink);

        assert_eq!(delivered, 4);
        assert_eq!(
            sink.0,
            vec![(-2047, -2047), (-2303, -2303), (2049, 2049), (1, 1)]
        );
    }

    #[test]
    fn test_one_call_per_sample() {
        let converter = AudioConverter::default();
        let mut sink = Recorder::default();
        converter.deliver(&mut sink);
        assert_eq!(sink.0.len(), SAMPLES_PER_FRAME);
        assert!(sink.0.iter().all(|&(l, r)| l == r));
    }
}
