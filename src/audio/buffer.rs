// Audio ring buffer - Stereo frames shared with the output callback
//
// The emulator thread pushes frames, the audio callback pops them. When the
// buffer is full new frames are dropped; when empty the callback plays
// silence.

/// Fixed-capacity ring buffer of stereo `f32` frames
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    frames: Vec<[f32; 2]>,
    read_pos: usize,
    write_pos: usize,
    count: usize,
    /// Frames rejected because the buffer was full
    dropped: u64,
}

impl AudioBuffer {
    /// Create a new audio buffer
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of stereo frames the buffer can hold
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: vec![[0.0; 2]; capacity.max(1)],
            read_pos: 0,
            write_pos: 0,
            count: 0,
            dropped: 0,
        }
    }

    /// Create a buffer sized for approximately N milliseconds at the given sample rate
    pub fn with_duration(milliseconds: u32, sample_rate: u32) -> Self {
        let capacity = (milliseconds as u64 * sample_rate as u64 / 1000) as usize;
        Self::new(capacity)
    }

    /// Push a frame into the buffer
    ///
    /// Returns false (and counts a drop) if the buffer is full.
    pub fn push(&mut self, frame: [f32; 2]) -> bool {
        if self.is_full() {
            self.dropped += 1;
            return false;
        }

        self.frames[self.write_pos] = frame;
        self.write_pos = (self.write_pos + 1) % self.frames.len();
        self.count += 1;
        true
    }

    /// Pop the oldest frame, or None if the buffer is empty
    pub fn pop(&mut self) -> Option<[f32; 2]> {
        if self.count == 0 {
            return None;
        }

        let frame = self.frames[self.read_pos];
        self.read_pos = (self.read_pos + 1) % self.frames.len();
        self.count -= 1;
        Some(frame)
    }

    /// Fill an interleaved output slice, padding with silence
    ///
    /// # Arguments
    /// * `data` - Interleaved output samples
    /// * `channels` - Output channel count; mono outputs get the left channel
    pub fn drain_into(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        for out in data.chunks_mut(channels) {
            let frame = self.pop().unwrap_or([0.0; 2]);
            for (i, sample) in out.iter_mut().enumerate() {
                *sample = if i < 2 { frame[i] } else { 0.0 };
            }
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.frames.len()
    }

    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.read_pos = 0;
        self.write_pos = 0;
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut buffer = AudioBuffer::new(4);
        assert!(buffer.is_empty());

        assert!(buffer.push([0.1, 0.1]));
        assert!(buffer.push([0.2, -0.2]));
        assert_eq!(buffer.len(), 2);

        assert_eq!(buffer.pop(), Some([0.1, 0.1]));
        assert_eq!(buffer.pop(), Some([0.2, -0.2]));
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn test_overflow_drops_newest() {
        let mut buffer = AudioBuffer::new(2);
        assert!(buffer.push([1.0, 1.0]));
        assert!(buffer.push([2.0, 2.0]));
        assert!(buffer.is_full());
        assert!(!buffer.push([3.0, 3.0]));
        assert_eq!(buffer.dropped(), 1);
        assert_eq!(buffer.pop(), Some([1.0, 1.0]));
    }

    #[test]
    fn test_wrap_around() {
        let mut buffer = AudioBuffer::new(3);
        for round in 0..10 {
            let v = round as f32;
            buffer.push([v, v]);
            buffer.push([v + 0.5, v + 0.5]);
            assert_eq!(buffer.pop(), Some([v, v]));
            assert_eq!(buffer.pop(), Some([v + 0.5, v + 0.5]));
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_drain_into_stereo_pads_with_silence() {
        let mut buffer = AudioBuffer::new(4);
        buffer.push([0.5, -0.5]);

        let mut out = [9.0f32; 4];
        buffer.drain_into(&mut out, 2);
        assert_eq!(out, [0.5, -0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_drain_into_mono() {
        let mut buffer = AudioBuffer::new(4);
        buffer.push([0.25, 0.75]);
        buffer.push([0.5, 0.5]);

        let mut out = [0.0f32; 2];
        buffer.drain_into(&mut out, 1);
        assert_eq!(out, [0.25, 0.5]);
    }

    #[test]
    fn test_with_duration() {
        let buffer = AudioBuffer::with_duration(100, 44100);
        assert_eq!(buffer.capacity(), 4410);
    }
}
