// Color packing - Intensity to 5-5-5 conversions
//
// The vector display is monochrome. A beam intensity is replicated into the
// red, green and blue fields of a 16-bit 5-5-5 pixel. Intensities above 31
// spill into the neighbouring fields and are truncated to 16 bits.

/// Pack a beam intensity into a 5-5-5 grayscale pixel
///
/// # Arguments
/// * `intensity` - Beam intensity (0-127)
///
/// # Returns
/// `(c << 10) | (c << 5) | c`, truncated to 16 bits
///
/// # Example
/// ```
/// use vecx_rs::display::pack_color;
/// assert_eq!(pack_color(31), 0x7FFF);
/// assert_eq!(pack_color(5), (5 << 10) | (5 << 5) | 5);
/// ```
#[inline]
pub const fn pack_color(intensity: u8) -> u16 {
    let c = intensity as u16;
    (c << 10) | (c << 5) | c
}

/// Expand a 5-bit channel to 8 bits
#[inline]
const fn expand5(value: u16) -> u8 {
    let v = (value & 0x1F) as u8;
    (v << 3) | (v >> 2)
}

/// Convert a 5-5-5 pixel to RGB bytes
#[inline]
pub const fn rgb555_to_rgb(pixel: u16) -> [u8; 3] {
    [
        expand5(pixel >> 10), // Red
        expand5(pixel >> 5),  // Green
        expand5(pixel),       // Blue
    ]
}

/// Convert a 5-5-5 pixel to RGBA format expected by pixels crate
#[inline]
pub const fn rgb555_to_rgba(pixel: u16) -> [u8; 4] {
    let [r, g, b] = rgb555_to_rgb(pixel);
    [r, g, b, 0xFF]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_color_replicates_channels() {
        assert_eq!(pack_color(0), 0);
        assert_eq!(pack_color(1), 0x0421);
        assert_eq!(pack_color(5), 0x14A5);
        assert_eq!(pack_color(31), 0x7FFF);
    }

    #[test]
    fn test_pack_color_high_intensity_truncates() {
        // 127 << 10 loses its upper bits
        let expected = ((127u32 << 10) | (127 << 5) | 127) as u16;
        assert_eq!(pack_color(127), expected);
    }

    #[test]
    fn test_expand_full_range() {
        assert_eq!(rgb555_to_rgb(0), [0, 0, 0]);
        assert_eq!(rgb555_to_rgb(0x7FFF), [0xFF, 0xFF, 0xFF]);
        assert_eq!(rgb555_to_rgb(0x7C00), [0xFF, 0x00, 0x00]);
    }

    #[test]
    fn test_rgba_is_opaque() {
        assert_eq!(rgb555_to_rgba(pack_color(16))[3], 0xFF);
        let [r, g, b, _] = rgb555_to_rgba(pack_color(16));
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}
