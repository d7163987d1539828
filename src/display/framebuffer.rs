// Pixel Buffer - Stores the rasterized vector display
//
// The output raster is 330×410 pixels. Each pixel is a 16-bit 5-5-5 packed
// color; the vector display is monochrome so all three channels carry the
// same value.

/// Output width in pixels
pub const SCREEN_WIDTH: usize = 330;

/// Output height in pixels
pub const SCREEN_HEIGHT: usize = 410;

/// Total number of pixels in the buffer
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Bytes per row handed to the video sink
pub const ROW_PITCH: usize = SCREEN_WIDTH * std::mem::size_of::<u16>();

/// Raster target for one frame of vector output
///
/// Owned by the emulator and lent read-only to the video sink. Dimensions
/// never change at runtime.
#[derive(Clone)]
pub struct PixelBuffer {
    pixels: Box<[u16]>,
}

impl PixelBuffer {
    /// Create a new pixel buffer cleared to black
    pub fn new() -> Self {
        Self {
            pixels: vec![0u16; SCREEN_SIZE].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    #[inline]
    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }

    /// Row stride in bytes
    #[inline]
    pub fn pitch(&self) -> usize {
        ROW_PITCH
    }

    /// Set a pixel at the given coordinates
    ///
    /// # Arguments
    /// * `x` - X coordinate (0-329)
    /// * `y` - Y coordinate (0-409)
    /// * `color` - Packed 5-5-5 color
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u16) {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pixels[y * SCREEN_WIDTH + x] = color;
    }

    /// Get a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u16 {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pixels[y * SCREEN_WIDTH + x]
    }

    /// Clear every pixel to zero (black)
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Get the raw pixel data in row-major order
    pub fn as_slice(&self) -> &[u16] {
        &self.pixels
    }

    /// Number of pixels that are not black
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &SCREEN_WIDTH)
            .field("height", &SCREEN_HEIGHT)
            .field("lit_pixels", &self.lit_pixels())
            .finish()
    }
}
