// Frame Compositor - Draw-command list to pixel buffer
//
// Every frame is rebuilt from scratch: the buffer is cleared, then each
// command is scaled and dispatched to the point or line path in list order.

use super::raster::{BeamGeometry, Rasterizer};
use super::scaler::CoordinateScaler;
use super::DrawCommand;
use crate::display::{pack_color, PixelBuffer};

/// Per-frame drawing statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Commands drawn as dots
    pub points: usize,
    /// Commands drawn as lines
    pub lines: usize,
    /// Beam-off commands skipped
    pub skipped: usize,
}

impl FrameStats {
    /// Total commands seen this frame
    pub fn total(&self) -> usize {
        self.points + self.lines + self.skipped
    }
}

/// Renders a draw-command list into a [`PixelBuffer`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCompositor {
    scaler: CoordinateScaler,
    rasterizer: Rasterizer,
}

impl FrameCompositor {
    /// Create a compositor for the Vectrex extents with the given beam geometry
    pub fn new(geometry: BeamGeometry) -> Self {
        Self {
            scaler: CoordinateScaler::vectrex(),
            rasterizer: Rasterizer::new(geometry),
        }
    }

    pub fn geometry(&self) -> BeamGeometry {
        self.rasterizer.geometry()
    }

    /// Change beam radii; takes effect on the next composed frame
    pub fn set_geometry(&mut self, geometry: BeamGeometry) {
        self.rasterizer.set_geometry(geometry);
    }

    /// Clear the buffer and draw every command
    ///
    /// # Arguments
    /// * `commands` - This frame's draw commands, drawn in order
    /// * `buffer` - Target buffer; its previous contents are discarded
    ///
    /// # Returns
    /// Counts of dots, lines and skipped commands
    pub fn compose(&self, commands: &[DrawCommand], buffer: &mut PixelBuffer) -> FrameStats {
        buffer.clear();

        let mut stats = FrameStats::default();
        for cmd in commands {
            if cmd.is_beam_off() {
                stats.skipped += 1;
                continue;
            }

            let color = pack_color(cmd.intensity);
            let (x0, y0, x1, y1) = self.scaler.scale(cmd);

            if x0 == x1 && y0 == y1 {
                self.rasterizer.dot(buffer, x0, y0, color);
                stats.points += 1;
            } else {
                self.rasterizer.line(buffer, x0, y0, x1, y1, color);
                stats.lines += 1;
            }
        }

        log::trace!(
            "composed frame: {} points, {} lines, {} skipped",
            stats.points,
            stats.lines,
            stats.skipped
        );
        stats
    }
}
