// Machine boundary - What the frame runner needs from an emulation core
//
// The instruction-level CPU and sound chip live behind `VectorCore`. Each
// frame the runner hands over controller bytes, steps the core for a fixed
// number of cycles, then pulls audio and the list of beam movements.

use std::fmt;

use crate::cartridge::Cartridge;
use crate::input::ControllerState;
use crate::vector::DrawCommand;

/// CPU cycles emulated per frame (1.5 MHz / 50 Hz)
pub const CYCLES_PER_FRAME: u32 = 30_000;

/// Errors crossing the core's persistence boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Buffer length does not match `state_size()`
    SizeMismatch { expected: usize, found: usize },

    /// Buffer contents were rejected by the core
    Corrupt(String),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::SizeMismatch { expected, found } => write!(
                f,
                "State buffer size mismatch: expected {} bytes, found {}",
                expected, found
            ),
            StateError::Corrupt(msg) => write!(f, "Corrupt state: {}", msg),
        }
    }
}

impl std::error::Error for StateError {}

/// Hardware emulation core driven once per frame
pub trait VectorCore {
    /// Reset the machine against the current cartridge region
    fn reset(&mut self, cartridge: &Cartridge);

    /// Advance the machine by `cycles` CPU cycles
    ///
    /// Refills the draw-command list returned by [`VectorCore::vectors`].
    fn emulate(&mut self, cartridge: &Cartridge, cycles: u32);

    /// Beam movements recorded during the last `emulate` call
    ///
    /// Never longer than `vector::VECTOR_CAPACITY`.
    fn vectors(&self) -> &[DrawCommand];

    /// Render the last step's sound output as unsigned 8-bit samples
    fn render_audio(&mut self, buffer: &mut [u8]);

    /// Latch controller bytes for the next step
    fn set_controls(&mut self, controls: &ControllerState);

    /// Exact size of a serialized state in bytes
    fn state_size(&self) -> usize;

    /// Serialize into a buffer of exactly `state_size()` bytes
    fn save_state(&self, buffer: &mut [u8]) -> Result<(), StateError>;

    /// Restore from a buffer of exactly `state_size()` bytes
    ///
    /// On error the core must be left as it was.
    fn load_state(&mut self, buffer: &[u8]) -> Result<(), StateError>;
}

/// Check a persistence buffer length against the core's state size
pub fn check_state_len(expected: usize, found: usize) -> Result<(), StateError> {
    if expected == found {
        Ok(())
    } else {
        Err(StateError::SizeMismatch { expected, found })
    }
}
