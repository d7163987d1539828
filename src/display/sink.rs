// Video sink - Where composed frames go
//
// The emulator lends its pixel buffer to a sink once per frame. Sinks must
// copy what they need before returning.

use super::palette::rgb555_to_rgba;

/// Receives one composed frame per `run_frame`
pub trait VideoSink {
    /// # Arguments
    /// * `pixels` - Row-major 5-5-5 pixels
    /// * `width` - Visible pixels per row
    /// * `height` - Number of rows
    /// * `pitch` - Row stride in bytes
    fn deliver_frame(&mut self, pixels: &[u16], width: usize, height: usize, pitch: usize);
}

/// Sink that ignores every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullVideoSink;

impl VideoSink for NullVideoSink {
    fn deliver_frame(&mut self, _pixels: &[u16], _width: usize, _height: usize, _pitch: usize) {}
}

impl<S: VideoSink + ?Sized> VideoSink for Box<S> {
    fn deliver_frame(&mut self, pixels: &[u16], width: usize, height: usize, pitch: usize) {
        (**self).deliver_frame(pixels, width, height, pitch);
    }
}

/// Expands delivered frames into a tightly packed RGBA byte buffer
///
/// Used by the window to fill the `pixels` surface.
pub struct RgbaFrameSink<'a> {
    output: &'a mut [u8],
}

impl<'a> RgbaFrameSink<'a> {
    pub fn new(output: &'a mut [u8]) -> Self {
        Self { output }
    }
}

impl VideoSink for RgbaFrameSink<'_> {
    fn deliver_frame(&mut self, pixels: &[u16], width: usize, height: usize, pitch: usize) {
        let stride = pitch / std::mem::size_of::<u16>();

        for y in 0..height {
            let row = &pixels[y * stride..y * stride + width];
            let out_row = &mut self.output[y * width * 4..(y + 1) * width * 4];
            for (pixel, rgba) in row.iter().zip(out_row.chunks_exact_mut(4)) {
                rgba.copy_from_slice(&rgb555_to_rgba(*pixel));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_sink_expands_pixels() {
        let pixels = [0x7FFFu16, 0x0000, 0x0000, 0x7FFF];
        let mut output = [0u8; 16];

        RgbaFrameSink::new(&mut output).deliver_frame(&pixels, 2, 2, 4);

        assert_eq!(&output[0..4], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(&output[4..8], &[0, 0, 0, 0xFF]);
        assert_eq!(&output[12..16], &[0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_rgba_sink_honours_pitch() {
        // Two visible pixels per row, stored with one padding pixel
        let pixels = [0x7FFFu16, 0x0000, 0x1234, 0x0000, 0x7FFF, 0x1234];
        let mut output = [0u8; 16];

        RgbaFrameSink::new(&mut output).deliver_frame(&pixels, 2, 2, 6);

        assert_eq!(&output[8..12], &[0, 0, 0, 0xFF]);
        assert_eq!(&output[12..16], &[0xFF, 0xFF, 0xFF, 0xFF]);
    }
}
