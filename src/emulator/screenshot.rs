// Screenshot functionality
//
// Captures the current pixel buffer and saves it as a PNG file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::display::{rgb555_to_rgb, PixelBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save a screenshot of the current frame
///
/// # Arguments
///
/// * `buffer` - The composed pixel buffer
/// * `screenshot_root` - Base screenshot directory
/// * `cartridge_path` - Currently loaded cartridge (for the subdirectory name)
/// * `include_timestamp` - Name the file by local time instead of a counter
///
/// # Returns
///
/// Path to the saved screenshot
pub fn save_screenshot(
    buffer: &PixelBuffer,
    screenshot_root: &Path,
    cartridge_path: Option<&Path>,
    include_timestamp: bool,
) -> Result<PathBuf, ScreenshotError> {
    let screenshots_dir = screenshot_directory(screenshot_root, cartridge_path);
    fs::create_dir_all(&screenshots_dir)?;

    let file_path = if include_timestamp {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f");
        screenshots_dir.join(format!("screenshot_{}.png", timestamp))
    } else {
        next_free_path(&screenshots_dir)
    };

    save_png(
        &file_path,
        &to_rgb(buffer),
        SCREEN_WIDTH as u32,
        SCREEN_HEIGHT as u32,
    )?;

    log::info!("Screenshot saved to {}", file_path.display());
    Ok(file_path)
}

/// `<root>/<cartridge-stem>/`, or `<root>/default/` without a cartridge
fn screenshot_directory(root: &Path, cartridge_path: Option<&Path>) -> PathBuf {
    match cartridge_path.and_then(|p| p.file_stem()) {
        Some(stem) => root.join(stem),
        None => root.join("default"),
    }
}

fn next_free_path(dir: &Path) -> PathBuf {
    let mut index = 0u32;
    loop {
        let candidate = dir.join(format!("screenshot_{:04}.png", index));
        if !candidate.exists() {
            return candidate;
        }
        index += 1;
    }
}

/// Expand the 5-5-5 buffer to RGB888
fn to_rgb(buffer: &PixelBuffer) -> Vec<u8> {
    buffer
        .as_slice()
        .iter()
        .flat_map(|&pixel| rgb555_to_rgb(pixel))
        .collect()
}

fn save_png(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::pack_color;

    #[test]
    fn test_to_rgb() {
        let mut buffer = PixelBuffer::new();
        buffer.set_pixel(1, 0, pack_color(31));

        let rgb = to_rgb(&buffer);
        assert_eq!(rgb.len(), SCREEN_WIDTH * SCREEN_HEIGHT * 3);
        assert_eq!(&rgb[0..3], &[0, 0, 0]);
        assert_eq!(&rgb[3..6], &[0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_screenshot_directory() {
        let root = Path::new("screenshots");
        assert!(screenshot_directory(root, None).ends_with("screenshots/default"));
        assert!(screenshot_directory(root, Some(Path::new("test/mine.bin")))
            .ends_with("screenshots/mine"));
    }

    #[test]
    fn test_save_screenshot_writes_png() {
        let root = std::env::temp_dir().join("vecx_rs_screenshot_test");
        fs::remove_dir_all(&root).ok();

        let buffer = PixelBuffer::new();
        let first = save_screenshot(&buffer, &root, None, false).unwrap();
        let second = save_screenshot(&buffer, &root, None, false).unwrap();

        assert!(first.ends_with("default/screenshot_0000.png"));
        assert!(second.ends_with("default/screenshot_0001.png"));

        let bytes = fs::read(&first).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");

        fs::remove_dir_all(&root).ok();
    }
}
