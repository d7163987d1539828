// Display module - Pixel buffer, color packing and presentation
//
// This module provides:
// - 5-5-5 grayscale color packing
// - The 330×410 pixel buffer the vector output is rasterized into
// - The `VideoSink` boundary frames are delivered through
// - A winit + pixels window that drives the emulator at 50 Hz

pub mod framebuffer;
pub mod palette;
pub mod sink;
pub mod window;

pub use framebuffer::{PixelBuffer, ROW_PITCH, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};
pub use palette::{pack_color, rgb555_to_rgb, rgb555_to_rgba};
pub use sink::{NullVideoSink, RgbaFrameSink, VideoSink};
pub use window::{run_emulator, EmulatorWindow, HotkeyAction, Hotkeys, WindowConfig};
