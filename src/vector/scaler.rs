// Coordinate scaler - Vector space to raster space mapping

use super::{DrawCommand, ALG_MAX_X, ALG_MAX_Y};
use crate::display::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Maps vector-space coordinates onto a fixed raster size
///
/// Each axis is scaled independently as `raw / device_max * dimension` in
/// single precision and truncated toward zero. Nothing is clamped here; the
/// point plotter guards its own writes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateScaler {
    max_x: f32,
    max_y: f32,
    width: f32,
    height: f32,
}

impl CoordinateScaler {
    /// Create a scaler for arbitrary device extents and output dimensions
    pub fn new(max_x: u32, max_y: u32, width: usize, height: usize) -> Self {
        Self {
            max_x: max_x as f32,
            max_y: max_y as f32,
            width: width as f32,
            height: height as f32,
        }
    }

    /// Scaler for the Vectrex analog extents onto the 330x410 output
    pub fn vectrex() -> Self {
        Self::new(ALG_MAX_X, ALG_MAX_Y, SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[inline]
    pub fn scale_x(&self, raw: u32) -> i32 {
        (raw as f32 / self.max_x * self.width) as i32
    }

    #[inline]
    pub fn scale_y(&self, raw: u32) -> i32 {
        (raw as f32 / self.max_y * self.height) as i32
    }

    /// Scale both endpoints of a command
    ///
    /// # Returns
    /// `(x0, y0, x1, y1)` in raster coordinates
    #[inline]
    pub fn scale(&self, cmd: &DrawCommand) -> (i32, i32, i32, i32) {
        (
            self.scale_x(cmd.x0),
            self.scale_y(cmd.y0),
            self.scale_x(cmd.x1),
            self.scale_y(cmd.y1),
        )
    }
}

impl Default for CoordinateScaler {
    fn default() -> Self {
        Self::vectrex()
    }
}
