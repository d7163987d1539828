// Window module - Hosts the emulator in a desktop window
//
// This module provides window creation, scaling, hotkeys and frame pacing
// using the winit and pixels crates. Each due frame runs the emulator with
// the window's input handler, audio sink and the `pixels` surface as sinks.

use super::framebuffer::{SCREEN_HEIGHT, SCREEN_WIDTH};
use super::sink::RgbaFrameSink;
use crate::audio::{AudioSink, NullAudioSink};
use crate::emulator::{Emulator, HotkeyConfig, VideoConfig};
use crate::input::config::string_to_keycode;
use crate::input::{InputConfig, UnifiedInputHandler};
use crate::machine::VectorCore;
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

/// Window configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Scale factor (1x, 2x, 3x, 4x, etc.)
    pub scale: u32,
    /// Whether to enable VSync
    pub vsync: bool,
    /// Start in borderless fullscreen
    pub fullscreen: bool,
}

impl WindowConfig {
    /// Create a new window configuration with default values
    ///
    /// Default: 2x scale, VSync enabled, windowed
    pub fn new() -> Self {
        Self {
            scale: 2,
            vsync: true,
            fullscreen: false,
        }
    }

    /// Take scale, VSync and fullscreen from the emulator configuration
    pub fn from_video(video: &VideoConfig) -> Self {
        Self::new()
            .with_scale(video.scale)
            .with_vsync(video.vsync)
            .with_fullscreen(video.fullscreen)
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8);
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Get the window width in pixels
    pub fn window_width(&self) -> u32 {
        SCREEN_WIDTH as u32 * self.scale
    }

    /// Get the window height in pixels
    pub fn window_height(&self) -> u32 {
        SCREEN_HEIGHT as u32 * self.scale
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Hotkey bindings resolved to physical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkeys {
    pub quick_save: KeyCode,
    pub quick_load: KeyCode,
    pub reset: KeyCode,
    pub screenshot: KeyCode,
    pub fast_forward: KeyCode,
    pub pause: KeyCode,
}

impl Hotkeys {
    /// Parse the configured key names
    ///
    /// # Returns
    /// Error message naming the first key that could not be parsed
    pub fn from_config(config: &HotkeyConfig) -> Result<Self, String> {
        Ok(Self {
            quick_save: string_to_keycode(&config.quick_save)?,
            quick_load: string_to_keycode(&config.quick_load)?,
            reset: string_to_keycode(&config.reset)?,
            screenshot: string_to_keycode(&config.screenshot)?,
            fast_forward: string_to_keycode(&config.fast_forward)?,
            pause: string_to_keycode(&config.pause)?,
        })
    }

    /// Which action a key triggers, if any
    pub fn action_for(&self, key: KeyCode) -> Option<HotkeyAction> {
        [
            (self.quick_save, HotkeyAction::QuickSave),
            (self.quick_load, HotkeyAction::QuickLoad),
            (self.reset, HotkeyAction::Reset),
            (self.screenshot, HotkeyAction::Screenshot),
            (self.fast_forward, HotkeyAction::CycleSpeed),
            (self.pause, HotkeyAction::TogglePause),
        ]
        .into_iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, action)| action)
    }
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            quick_save: KeyCode::F5,
            quick_load: KeyCode::F7,
            reset: KeyCode::F8,
            screenshot: KeyCode::F9,
            fast_forward: KeyCode::Tab,
            pause: KeyCode::KeyP,
        }
    }
}

/// Front-end actions bound to hotkeys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    QuickSave,
    QuickLoad,
    Reset,
    Screenshot,
    CycleSpeed,
    TogglePause,
}

/// Emulator display window - drives an emulator and presents its frames
pub struct EmulatorWindow<C: VectorCore> {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    hotkeys: Hotkeys,
    last_frame_time: Instant,
    input_handler: UnifiedInputHandler,
    audio: Box<dyn AudioSink>,
    emulator: Emulator<C>,
}

impl<C: VectorCore> EmulatorWindow<C> {
    /// Create a new emulator window (the OS window is created when the event
    /// loop starts)
    pub fn new(
        config: WindowConfig,
        emulator: Emulator<C>,
        input_handler: UnifiedInputHandler,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        let hotkeys = Hotkeys::from_config(&emulator.config().hotkeys).unwrap_or_else(|e| {
            log::warn!("Invalid hotkey configuration ({}), using defaults", e);
            Hotkeys::default()
        });

        Self {
            window: None,
            pixels: None,
            config,
            hotkeys,
            last_frame_time: Instant::now(),
            input_handler,
            audio,
            emulator,
        }
    }

    pub fn emulator(&self) -> &Emulator<C> {
        &self.emulator
    }

    pub fn emulator_mut(&mut self) -> &mut Emulator<C> {
        &mut self.emulator
    }

    fn title(&self) -> String {
        match self
            .emulator
            .cartridge_path()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
        {
            Some(name) => format!("vecx-rs - {}", name),
            None => "vecx-rs".to_string(),
        }
    }

    fn handle_hotkey(&mut self, action: HotkeyAction) {
        match action {
            HotkeyAction::QuickSave => {
                if let Err(e) = self.emulator.quick_save() {
                    log::error!("Quick save failed: {}", e);
                }
            }
            HotkeyAction::QuickLoad => {
                if let Err(e) = self.emulator.quick_load() {
                    log::error!("Quick load failed: {}", e);
                }
            }
            HotkeyAction::Reset => self.emulator.reset(),
            HotkeyAction::Screenshot => {
                if let Err(e) = self.emulator.screenshot() {
                    log::error!("Screenshot failed: {}", e);
                }
            }
            HotkeyAction::CycleSpeed => {
                let next = self.emulator.speed_mode().next();
                self.emulator.set_speed_mode(next);
            }
            HotkeyAction::TogglePause => self.emulator.toggle_pause(),
        }
    }

    /// Check if enough time has passed for the next frame
    fn frame_due(&mut self) -> bool {
        let frame_duration = self.emulator.speed_mode().frame_duration();

        if self.last_frame_time.elapsed() >= frame_duration {
            self.last_frame_time = Instant::now();
            true
        } else {
            false
        }
    }

    /// Run one frame unless paused, then present the surface
    fn execute_and_render(&mut self) -> Result<(), pixels::Error> {
        let Some(pixels) = &mut self.pixels else {
            return Ok(());
        };

        if !self.emulator.is_paused() {
            let mut video = RgbaFrameSink::new(pixels.frame_mut());
            self.emulator
                .run_frame(&mut self.input_handler, self.audio.as_mut(), &mut video);
        }

        pixels.render()
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), String> {
        let mut window_attributes = Window::default_attributes()
            .with_title(self.title())
            .with_inner_size(LogicalSize::new(
                self.config.window_width(),
                self.config.window_height(),
            ))
            .with_resizable(false);
        if self.config.fullscreen {
            window_attributes = window_attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(window_attributes)
            .map_err(|e| format!("Failed to create window: {}", e))?;

        let window = Arc::new(window);
        let window_size = window.inner_size();

        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());

        let pixels = Pixels::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, surface_texture)
            .map_err(|e| format!("Failed to create pixel buffer: {}", e))?;

        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }
}

impl<C: VectorCore> ApplicationHandler for EmulatorWindow<C> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_surface(event_loop) {
            log::error!("{}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::Focused(false) => {
                self.input_handler.keyboard_handler_mut().release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let action = match physical_key {
                    PhysicalKey::Code(code) => self.hotkeys.action_for(code),
                    PhysicalKey::Unidentified(_) => None,
                };

                match (state, action) {
                    (ElementState::Pressed, Some(action)) => {
                        if !repeat {
                            self.handle_hotkey(action);
                        }
                    }
                    (_, Some(_)) => {}
                    (ElementState::Pressed, None) => {
                        self.input_handler.handle_key_press(physical_key);
                    }
                    (ElementState::Released, None) => {
                        self.input_handler.handle_key_release(physical_key);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if self.frame_due() {
                    if let Err(err) = self.execute_and_render() {
                        log::error!("Render error: {}", err);
                        event_loop.exit();
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Open the configured audio output, or a silent sink
fn open_audio(enabled: bool, volume: f32) -> Box<dyn AudioSink> {
    if !enabled {
        log::info!("Audio disabled");
        return Box::new(NullAudioSink);
    }

    #[cfg(feature = "audio")]
    {
        use crate::audio::{AudioOutput, OutputConfig};

        match AudioOutput::new(OutputConfig::new().with_volume(volume)) {
            Ok(output) => return Box::new(output),
            Err(e) => log::warn!("Audio unavailable ({}), continuing without sound", e),
        }
    }

    #[cfg(not(feature = "audio"))]
    {
        let _ = volume;
        log::info!("Built without the audio feature, running silent");
    }

    Box::new(NullAudioSink)
}

/// Run the emulator in a window until it is closed
///
/// # Arguments
/// * `config` - Window configuration
/// * `emulator` - Emulator, with a cartridge already loaded if desired
/// * `input_config` - Optional input configuration for custom mappings
///
/// # Returns
/// Result indicating success or error
pub fn run_emulator<C: VectorCore>(
    config: WindowConfig,
    emulator: Emulator<C>,
    input_config: Option<&InputConfig>,
) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;

    if config.vsync {
        event_loop.set_control_flow(ControlFlow::Wait);
    } else {
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    let input_handler = match input_config {
        Some(input_cfg) => UnifiedInputHandler::from_config(input_cfg)
            .map_err(|e| format!("Failed to apply input configuration: {}", e))?,
        None => UnifiedInputHandler::new(),
    };

    let audio_config = &emulator.config().audio;
    let audio = open_audio(audio_config.enabled, audio_config.volume);

    log::info!(
        "Starting emulator: {}x{} at {}x scale ({}x{} window), VSync {}",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        config.scale,
        config.window_width(),
        config.window_height(),
        config.vsync
    );

    let mut app = EmulatorWindow::new(config, emulator, input_handler, audio);
    event_loop.run_app(&mut app)?;

    Ok(())
}
