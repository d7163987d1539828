// Emulator module - Frame runner and session state
//
// This module owns everything that lives across frames: the emulation core,
// the cartridge region, the pixel buffer, the audio staging block and the
// beam settings. `run_frame` sequences one 1/50 s step of the machine and
// pushes its output to the host's sinks. Save states, screenshots, speed
// control and configuration hang off the same context.

mod config;
mod info;
mod save_state;
mod screenshot;

pub use config::{
    AudioConfig, BeamConfig, EmulatorConfig, HotkeyConfig, SaveStateConfig, ScreenshotConfig,
    SpeedMode, VideoConfig, CONFIG_FILE,
};
pub use info::{AvInfo, Region, SystemInfo};
pub use save_state::{check_slot, SaveState, SaveStateError, SAVE_STATE_VERSION};
pub use screenshot::{save_screenshot, ScreenshotError};

use std::path::{Path, PathBuf};

use crate::audio::{AudioConverter, AudioSink, FRAME_RATE, SAMPLE_RATE};
use crate::cartridge::{Cartridge, CartridgeError};
use crate::display::{PixelBuffer, VideoSink, ROW_PITCH, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::{map_inputs, ControllerState, InputSource};
use crate::machine::{check_state_len, StateError, VectorCore, CYCLES_PER_FRAME};
use crate::vector::{BeamGeometry, FrameCompositor, FrameStats, VECTOR_CAPACITY};

/// Main emulator structure
///
/// Generic over the emulation core so hosts and tests can plug in any
/// implementation of [`VectorCore`].
pub struct Emulator<C: VectorCore> {
    /// Instruction-level machine
    core: C,

    /// Cartridge region, zero-filled when nothing is loaded
    cartridge: Cartridge,

    /// File the current cartridge came from, if any
    cartridge_path: Option<PathBuf>,

    /// Composed output of the last frame
    pixels: PixelBuffer,

    compositor: FrameCompositor,

    /// Per-frame raw audio staging block
    converter: AudioConverter,

    /// Controller bytes handed to the core on the last frame
    controls: ControllerState,

    config: EmulatorConfig,

    paused: bool,
    speed_mode: SpeedMode,
    frame_count: u64,
    last_stats: FrameStats,
}

impl<C: VectorCore> Emulator<C> {
    /// Create a new emulator around a core
    ///
    /// The beam settings come from `config.beam`. The core is reset against
    /// an empty cartridge region.
    ///
    /// # Example
    ///
    /// ```
    /// use vecx_rs::demo::TestPatternCore;
    /// use vecx_rs::emulator::{Emulator, EmulatorConfig};
    ///
    /// let emulator = Emulator::new(TestPatternCore::new(), EmulatorConfig::default());
    /// assert!(!emulator.cartridge().is_loaded());
    /// ```
    pub fn new(mut core: C, config: EmulatorConfig) -> Self {
        let cartridge = Cartridge::new();
        core.reset(&cartridge);

        let geometry = config.beam.geometry();
        log::info!(
            "Emulator created (point radius {}, line radius {}, {:?} discs)",
            geometry.point_radius,
            geometry.line_radius,
            geometry.anchor
        );

        Self {
            core,
            cartridge,
            cartridge_path: None,
            pixels: PixelBuffer::new(),
            compositor: FrameCompositor::new(geometry),
            converter: AudioConverter::new(SAMPLE_RATE, FRAME_RATE),
            controls: ControllerState::NEUTRAL,
            config,
            paused: false,
            speed_mode: SpeedMode::Normal,
            frame_count: 0,
            last_stats: FrameStats::default(),
        }
    }

    /// Run one frame of emulation
    ///
    /// Strictly in order: poll input and hand the mapped controller bytes to
    /// the core, emulate [`CYCLES_PER_FRAME`] cycles, convert and deliver the
    /// frame's audio one stereo pair at a time, compose the draw commands into
    /// the pixel buffer, and deliver the buffer to the video sink.
    ///
    /// Pausing is a host concern; this always runs a frame.
    ///
    /// # Returns
    ///
    /// Statistics of the composed frame
    pub fn run_frame<I, A, V>(&mut self, input: &mut I, audio: &mut A, video: &mut V) -> FrameStats
    where
        I: InputSource + ?Sized,
        A: AudioSink + ?Sized,
        V: VideoSink + ?Sized,
    {
        input.poll_inputs();
        self.controls = map_inputs(&*input);
        self.core.set_controls(&self.controls);

        self.core.emulate(&self.cartridge, CYCLES_PER_FRAME);

        self.core.render_audio(self.converter.raw_mut());
        self.converter.deliver(audio);

        let commands = self.core.vectors();
        if commands.len() > VECTOR_CAPACITY {
            log::warn!(
                "Core produced {} draw commands, more than the {} a frame holds",
                commands.len(),
                VECTOR_CAPACITY
            );
        }
        let stats = self.compositor.compose(commands, &mut self.pixels);

        video.deliver_frame(self.pixels.as_slice(), SCREEN_WIDTH, SCREEN_HEIGHT, ROW_PITCH);

        self.frame_count += 1;
        self.last_stats = stats;
        log::debug!(
            "Frame {}: {} points, {} lines, {} skipped",
            self.frame_count,
            stats.points,
            stats.lines,
            stats.skipped
        );
        stats
    }

    /// Load a cartridge image from memory
    ///
    /// Empty images and images larger than the cartridge region are rejected
    /// without touching the current cartridge or the core. Otherwise the
    /// region is zero-filled, overwritten and the core is reset.
    pub fn load_cartridge(&mut self, data: &[u8]) -> Result<(), CartridgeError> {
        if let Err(e) = self.cartridge.load(data) {
            log::warn!("Cartridge rejected: {}", e);
            return Err(e);
        }

        self.cartridge_path = None;
        self.core.reset(&self.cartridge);
        log::info!("Loaded {} byte cartridge", data.len());
        Ok(())
    }

    /// Load a cartridge image from a file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vecx_rs::demo::TestPatternCore;
    /// use vecx_rs::emulator::{Emulator, EmulatorConfig};
    ///
    /// let mut emulator = Emulator::new(TestPatternCore::new(), EmulatorConfig::default());
    /// emulator.load_cartridge_file("mine.vec").expect("Failed to load cartridge");
    /// ```
    pub fn load_cartridge_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CartridgeError> {
        let path = path.as_ref();
        let data = Cartridge::read_image(path)?;
        self.load_cartridge(&data)?;
        self.cartridge_path = Some(path.to_path_buf());
        log::info!("Cartridge file: {}", path.display());
        Ok(())
    }

    /// Remove the cartridge: zero-fill the region and reset the core
    pub fn unload_cartridge(&mut self) {
        self.cartridge.clear();
        self.cartridge_path = None;
        self.core.reset(&self.cartridge);
        log::info!("Cartridge unloaded");
    }

    /// Reset the core against the current cartridge
    pub fn reset(&mut self) {
        self.core.reset(&self.cartridge);
        log::info!("Emulator reset");
    }

    /// Change the beam settings for subsequent frames
    ///
    /// Radii below 1 are raised to 1.
    pub fn set_beam_geometry(&mut self, geometry: BeamGeometry) {
        let geometry = geometry.clamped();
        self.compositor.set_geometry(geometry);
        self.config.beam = BeamConfig {
            point_radius: geometry.point_radius,
            line_radius: geometry.line_radius,
            anchor: geometry.anchor,
        };
    }

    pub fn beam_geometry(&self) -> BeamGeometry {
        self.compositor.geometry()
    }

    /// Size in bytes of a serialized core state
    pub fn state_size(&self) -> usize {
        self.core.state_size()
    }

    /// Serialize the core into a buffer of exactly [`Self::state_size`] bytes
    pub fn serialize_state(&self, buffer: &mut [u8]) -> Result<(), StateError> {
        check_state_len(self.core.state_size(), buffer.len())?;
        self.core.save_state(buffer)
    }

    /// Restore the core from a buffer of exactly [`Self::state_size`] bytes
    ///
    /// On error the core is left unchanged.
    pub fn deserialize_state(&mut self, buffer: &[u8]) -> Result<(), StateError> {
        check_state_len(self.core.state_size(), buffer.len())?;
        self.core.load_state(buffer)
    }

    /// Save state to a file slot
    ///
    /// # Arguments
    ///
    /// * `slot` - Save slot number, below `config.save_state.slots`
    ///
    /// # Returns
    ///
    /// Path of the written slot file
    pub fn save_state(&self, slot: u8) -> Result<PathBuf, SaveStateError> {
        check_slot(slot, self.config.save_state.slots)?;
        let state = SaveState::from_emulator(self)?;
        let path = state.save_to_file(
            &self.config.save_state.save_directory,
            slot,
            self.cartridge_path.as_deref(),
        )?;
        log::info!("State saved to {}", path.display());
        Ok(path)
    }

    /// Load state from a file slot
    ///
    /// Nothing changes unless the whole snapshot is accepted.
    pub fn load_state(&mut self, slot: u8) -> Result<(), SaveStateError> {
        check_slot(slot, self.config.save_state.slots)?;
        let state = SaveState::load_from_file(
            &self.config.save_state.save_directory,
            slot,
            self.cartridge_path.as_deref(),
        )?;
        state.restore_to_emulator(self)?;
        log::info!("State loaded from slot {}", slot);
        Ok(())
    }

    /// Quick save to slot 0
    pub fn quick_save(&self) -> Result<PathBuf, SaveStateError> {
        self.save_state(0)
    }

    /// Quick load from slot 0
    pub fn quick_load(&mut self) -> Result<(), SaveStateError> {
        self.load_state(0)
    }

    /// Save the last composed frame as a PNG
    ///
    /// # Returns
    ///
    /// Path to the saved screenshot
    pub fn screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        save_screenshot(
            &self.pixels,
            &self.config.screenshot.screenshot_directory,
            self.cartridge_path.as_deref(),
            self.config.screenshot.include_timestamp,
        )
    }

    pub fn set_speed_mode(&mut self, mode: SpeedMode) {
        self.speed_mode = mode;
        log::info!("Speed: {:?} ({}x)", mode, mode.multiplier());
    }

    pub fn speed_mode(&self) -> SpeedMode {
        self.speed_mode
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    pub fn cartridge_path(&self) -> Option<&Path> {
        self.cartridge_path.as_deref()
    }

    /// Pixel buffer as composed by the last frame
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Controller bytes handed to the core on the last frame
    pub fn controls(&self) -> ControllerState {
        self.controls
    }

    /// Frames run since creation
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EmulatorConfig {
        &mut self.config
    }

    pub fn system_info(&self) -> SystemInfo {
        SystemInfo::new()
    }

    pub fn av_info(&self) -> AvInfo {
        AvInfo::new()
    }

    pub fn region(&self) -> Region {
        Region::Pal
    }
}
