// Rasterizer - Point plotting and line drawing
//
// Points are single pixels or filled discs depending on the beam radius.
// Lines use the integer incremental-error (Bresenham) algorithm and plot every
// step through the point plotter, so a thick beam thickens lines as well.

use serde::{Deserialize, Serialize};

use crate::display::{PixelBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Where the distance test of a thick dot is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscAnchor {
    /// Distance measured from the top-left corner of the clipped bounding box.
    ///
    /// The dot is a quarter disc hanging off the upper-left of the beam
    /// position, and it shifts when the box is clipped by the buffer edge.
    #[default]
    Corner,
    /// Distance measured from the beam position itself (a true disc)
    Center,
}

/// Beam thickness settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamGeometry {
    /// Radius used for dots and for every line step (1 = single pixel)
    pub point_radius: u32,
    /// Stored line width setting
    ///
    /// Lines are drawn with `point_radius` at every step; this value is kept
    /// for configuration and save states but does not change the output.
    pub line_radius: u32,
    /// Disc shape for radii above 1
    #[serde(default)]
    pub anchor: DiscAnchor,
}

impl BeamGeometry {
    /// Create a geometry, clamping both radii to at least 1
    pub fn new(point_radius: u32, line_radius: u32) -> Self {
        Self {
            point_radius: point_radius.max(1),
            line_radius: line_radius.max(1),
            anchor: DiscAnchor::Corner,
        }
    }

    pub fn with_anchor(mut self, anchor: DiscAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Return a copy with radii clamped to at least 1
    pub fn clamped(self) -> Self {
        Self {
            point_radius: self.point_radius.max(1),
            line_radius: self.line_radius.max(1),
            anchor: self.anchor,
        }
    }
}

impl Default for BeamGeometry {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Write a dot into the buffer
///
/// # Arguments
/// * `buffer` - Target pixel buffer
/// * `x`, `y` - Beam position in raster space (may lie outside the buffer)
/// * `radius` - Beam radius; 0 and 1 both write a single pixel
/// * `anchor` - Disc distance origin for radius > 1
/// * `color` - Packed 5-5-5 color
///
/// Pixels outside the buffer are never written. Existing pixels are
/// overwritten without blending.
pub fn plot_point(
    buffer: &mut PixelBuffer,
    x: i64,
    y: i64,
    radius: u32,
    anchor: DiscAnchor,
    color: u16,
) {
    let max_x = SCREEN_WIDTH as i64 - 1;
    let max_y = SCREEN_HEIGHT as i64 - 1;

    if radius <= 1 {
        if (0..=max_x).contains(&x) && (0..=max_y).contains(&y) {
            buffer.set_pixel(x as usize, y as usize, color);
        }
        return;
    }

    let r = radius as i64;
    let x_start = (x - r).max(0);
    let x_end = (x + r).min(max_x);
    let y_start = (y - r).max(0);
    let y_end = (y + r).min(max_y);

    let (origin_x, origin_y) = match anchor {
        DiscAnchor::Corner => (x_start, y_start),
        DiscAnchor::Center => (x, y),
    };
    let r_squared = r * r;

    for py in y_start..=y_end {
        let dy = py - origin_y;
        for px in x_start..=x_end {
            let dx = px - origin_x;
            if dx * dx + dy * dy <= r_squared {
                buffer.set_pixel(px as usize, py as usize, color);
            }
        }
    }
}

/// Draw a line between two raster points, endpoints inclusive
///
/// Handles every octant. Each visited position is passed to [`plot_point`]
/// with the given radius.
#[allow(clippy::too_many_arguments)]
pub fn draw_line(
    buffer: &mut PixelBuffer,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    radius: u32,
    anchor: DiscAnchor,
    color: u16,
) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let (mut x, mut y) = (x0, y0);
    loop {
        plot_point(buffer, x, y, radius, anchor, color);
        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Beam rasterizer bound to a geometry
#[derive(Debug, Clone, Copy, Default)]
pub struct Rasterizer {
    geometry: BeamGeometry,
}

impl Rasterizer {
    pub fn new(geometry: BeamGeometry) -> Self {
        Self {
            geometry: geometry.clamped(),
        }
    }

    pub fn geometry(&self) -> BeamGeometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: BeamGeometry) {
        self.geometry = geometry.clamped();
    }

    /// Plot a dot using the point radius
    #[inline]
    pub fn dot(&self, buffer: &mut PixelBuffer, x: i32, y: i32, color: u16) {
        plot_point(
            buffer,
            x as i64,
            y as i64,
            self.geometry.point_radius,
            self.geometry.anchor,
            color,
        );
    }

    /// Draw a line, plotting every step with the point radius
    #[inline]
    pub fn line(&self, buffer: &mut PixelBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u16) {
        draw_line(
            buffer,
            x0 as i64,
            y0 as i64,
            x1 as i64,
            y1 as i64,
            self.geometry.point_radius,
            self.geometry.anchor,
            color,
        );
    }
}
