// System and A/V information reported to hosts

use crate::audio::{FRAME_RATE, SAMPLE_RATE};
use crate::cartridge::CARTRIDGE_EXTENSIONS;
use crate::display::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Static description of the emulator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub library_name: &'static str,
    pub library_version: &'static str,
    /// Cartridge file extensions, without dots
    pub valid_extensions: &'static [&'static str],
    /// Whether a cartridge must be loaded from a path rather than a buffer
    pub need_fullpath: bool,
}

impl SystemInfo {
    pub fn new() -> Self {
        Self {
            library_name: env!("CARGO_PKG_NAME"),
            library_version: env!("CARGO_PKG_VERSION"),
            valid_extensions: &CARTRIDGE_EXTENSIONS,
            need_fullpath: false,
        }
    }

    /// Extensions joined the way file dialogs expect ("bin|vec")
    pub fn extension_filter(&self) -> String {
        self.valid_extensions.join("|")
    }
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Video mode timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ntsc,
    Pal,
}

/// Output geometry and timing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvInfo {
    pub fps: f64,
    pub sample_rate: f64,
    pub base_width: u32,
    pub base_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    /// Display aspect ratio, width / height in floating point (not the integer quotient, which is 0)
    pub aspect_ratio: f32,
}

impl AvInfo {
    pub fn new() -> Self {
        Self {
            fps: FRAME_RATE as f64,
            sample_rate: SAMPLE_RATE as f64,
            base_width: SCREEN_WIDTH as u32,
            base_height: SCREEN_HEIGHT as u32,
            max_width: SCREEN_WIDTH as u32,
            max_height: SCREEN_HEIGHT as u32,
            aspect_ratio: SCREEN_WIDTH as f32 / SCREEN_HEIGHT as f32,
        }
    }
}

impl Default for AvInfo {
    fn default() -> Self {
        Self::new()
    }
}
