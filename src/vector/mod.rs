// Vector module - Vector display to raster conversion
//
// This module provides:
// - Draw command representation produced by the emulation core
// - Coordinate scaling from vector space to raster space
// - Point and line rasterization with a configurable beam radius
// - Frame composition of a full draw-command list

pub mod compositor;
pub mod raster;
pub mod scaler;

pub use compositor::{FrameCompositor, FrameStats};
pub use raster::{BeamGeometry, DiscAnchor, Rasterizer};
pub use scaler::CoordinateScaler;

/// Maximum horizontal coordinate of the analog vector space
pub const ALG_MAX_X: u32 = 33000;

/// Maximum vertical coordinate of the analog vector space
pub const ALG_MAX_Y: u32 = 41000;

/// Intensity value reserved for "beam off"; such commands are never drawn
pub const BEAM_OFF: u8 = 128;

/// Highest drawable intensity
pub const MAX_INTENSITY: u8 = 127;

/// Upper bound on the number of draw commands in a single frame
///
/// The core emulates the 1.5 MHz CPU with a phosphor decay of 30 cycles per
/// vector, so one frame can never hold more than 1_500_000 / 30 commands.
pub const VECTOR_CAPACITY: usize = 50_000;

/// A single beam movement recorded by the emulation core
///
/// Coordinates are in vector space (`0..=ALG_MAX_X`, `0..=ALG_MAX_Y`).
/// A command whose endpoints coincide after scaling is drawn as a dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawCommand {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
    /// Brightness (0-127), or `BEAM_OFF`
    pub intensity: u8,
}

impl DrawCommand {
    /// Create a line command
    pub fn line(x0: u32, y0: u32, x1: u32, y1: u32, intensity: u8) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            intensity,
        }
    }

    /// Create a dot command (both endpoints identical)
    pub fn dot(x: u32, y: u32, intensity: u8) -> Self {
        Self::line(x, y, x, y, intensity)
    }

    /// Whether the beam was off for this command
    #[inline]
    pub fn is_beam_off(&self) -> bool {
        self.intensity == BEAM_OFF
    }
}
