// Configuration management
//
// Handles emulator configuration, settings persistence, and speed control.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audio::FRAME_RATE;
use crate::vector::{BeamGeometry, DiscAnchor};

/// Default configuration file path
pub const CONFIG_FILE: &str = "emulator_config.toml";

/// Emulator configuration
///
/// Stores all user-configurable settings for the emulator. Missing sections
/// fall back to their defaults when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EmulatorConfig {
    pub video: VideoConfig,
    pub beam: BeamConfig,
    pub audio: AudioConfig,
    pub save_state: SaveStateConfig,
    pub screenshot: ScreenshotConfig,
    pub hotkeys: HotkeyConfig,
}

/// Video configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Window scale (1-4)
    pub scale: u32,

    /// Enable VSync
    pub vsync: bool,

    /// Enable fullscreen
    pub fullscreen: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            scale: 2,
            vsync: true,
            fullscreen: false,
        }
    }
}

/// Beam rendering configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    /// Dot radius in pixels (1 = single pixel)
    pub point_radius: u32,

    /// Line width setting; lines are drawn with `point_radius`
    pub line_radius: u32,

    /// Thick dot shape: "corner" or "center"
    pub anchor: DiscAnchor,
}

impl BeamConfig {
    /// Geometry for the compositor, radii clamped to at least 1
    pub fn geometry(&self) -> BeamGeometry {
        BeamGeometry::new(self.point_radius, self.line_radius).with_anchor(self.anchor)
    }
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            point_radius: 1,
            line_radius: 1,
            anchor: DiscAnchor::Corner,
        }
    }
}

/// Audio configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Enable audio
    pub enabled: bool,

    /// Volume (0.0-1.0)
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.5,
        }
    }
}

/// Save state configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveStateConfig {
    /// Number of save slots (1-10)
    pub slots: u8,

    /// Save directory
    pub save_directory: PathBuf,
}

impl Default for SaveStateConfig {
    fn default() -> Self {
        Self {
            slots: 10,
            save_directory: PathBuf::from("saves"),
        }
    }
}

/// Screenshot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Screenshot directory
    pub screenshot_directory: PathBuf,

    /// Include timestamp in filename
    pub include_timestamp: bool,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            screenshot_directory: PathBuf::from("screenshots"),
            include_timestamp: true,
        }
    }
}

/// Hotkey configuration
///
/// Key names are parsed with `input::config::string_to_keycode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Quick save (default: F5)
    pub quick_save: String,

    /// Quick load (default: F7)
    pub quick_load: String,

    /// Reset (default: F8)
    pub reset: String,

    /// Screenshot (default: F9)
    pub screenshot: String,

    /// Fast forward, cycles through speed modes (default: Tab)
    pub fast_forward: String,

    /// Pause (default: P)
    pub pause: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            quick_save: "F5".to_string(),
            quick_load: "F7".to_string(),
            reset: "F8".to_string(),
            screenshot: "F9".to_string(),
            fast_forward: "Tab".to_string(),
            pause: "P".to_string(),
        }
    }
}

/// Speed mode for emulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedMode {
    /// Normal speed (1x)
    #[default]
    Normal,

    /// Fast forward 2x
    FastForward2x,

    /// Fast forward 4x
    FastForward4x,

    /// Slow motion (0.5x)
    SlowMotion,
}

impl SpeedMode {
    /// Get the speed multiplier (1.0 = normal speed)
    pub fn multiplier(self) -> f32 {
        match self {
            SpeedMode::Normal => 1.0,
            SpeedMode::FastForward2x => 2.0,
            SpeedMode::FastForward4x => 4.0,
            SpeedMode::SlowMotion => 0.5,
        }
    }

    /// Wall-clock time between emulated frames at this speed
    pub fn frame_duration(self) -> Duration {
        Duration::from_secs_f64(1.0 / (FRAME_RATE as f64 * self.multiplier() as f64))
    }

    /// Next mode in the hotkey cycle
    pub fn next(self) -> Self {
        match self {
            SpeedMode::Normal => SpeedMode::FastForward2x,
            SpeedMode::FastForward2x => SpeedMode::FastForward4x,
            SpeedMode::FastForward4x => SpeedMode::SlowMotion,
            SpeedMode::SlowMotion => SpeedMode::Normal,
        }
    }
}

impl EmulatorConfig {
    /// Load configuration from file or create default
    ///
    /// If the configuration file doesn't exist or cannot be parsed, a
    /// default configuration is returned and written to the file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vecx_rs::emulator::{EmulatorConfig, CONFIG_FILE};
    ///
    /// let config = EmulatorConfig::load_or_default(CONFIG_FILE);
    /// ```
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            log::info!(
                "Could not load {} ({}), using defaults",
                path.display(),
                e
            );
            let config = Self::default();
            if let Err(e) = config.save(path) {
                log::warn!("Could not save default config: {}", e);
            }
            config
        })
    }

    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmulatorConfig::default();
        assert_eq!(config.video.scale, 2);
        assert_eq!(config.beam.point_radius, 1);
        assert_eq!(config.beam.line_radius, 1);
        assert_eq!(config.beam.anchor, DiscAnchor::Corner);
        assert_eq!(config.audio.volume, 0.5);
        assert_eq!(config.save_state.slots, 10);
        assert_eq!(config.hotkeys.pause, "P");
    }

    #[test]
    fn test_beam_geometry_clamps() {
        let beam = BeamConfig {
            point_radius: 0,
            line_radius: 4,
            anchor: DiscAnchor::Center,
        };
        let geometry = beam.geometry();
        assert_eq!(geometry.point_radius, 1);
        assert_eq!(geometry.line_radius, 4);
        assert_eq!(geometry.anchor, DiscAnchor::Center);
    }

    #[test]
    fn test_speed_mode_multiplier() {
        assert_eq!(SpeedMode::Normal.multiplier(), 1.0);
        assert_eq!(SpeedMode::FastForward2x.multiplier(), 2.0);
        assert_eq!(SpeedMode::FastForward4x.multiplier(), 4.0);
        assert_eq!(SpeedMode::SlowMotion.multiplier(), 0.5);
    }

    #[test]
    fn test_speed_mode_frame_duration() {
        assert_eq!(SpeedMode::Normal.frame_duration(), Duration::from_millis(20));
        assert_eq!(SpeedMode::FastForward2x.frame_duration(), Duration::from_millis(10));
        assert_eq!(SpeedMode::SlowMotion.frame_duration(), Duration::from_millis(40));
    }

    #[test]
    fn test_speed_mode_cycle_returns_to_normal() {
        let mut mode = SpeedMode::Normal;
        for _ in 0..4 {
            mode = mode.next();
        }
        assert_eq!(mode, SpeedMode::Normal);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EmulatorConfig = toml::from_str(
            r#"
            [beam]
            point_radius = 3
            anchor = "center"
            "#,
        )
        .unwrap();

        assert_eq!(config.beam.point_radius, 3);
        assert_eq!(config.beam.line_radius, 1);
        assert_eq!(config.beam.anchor, DiscAnchor::Center);
        assert_eq!(config.video, VideoConfig::default());
    }

    #[test]
    fn test_config_file_save_and_load() {
        let dir = std::env::temp_dir().join("vecx_rs_emulator_config_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);

        let mut config = EmulatorConfig::default();
        config.video.scale = 4;
        config.beam.line_radius = 2;
        config.save(&path).unwrap();

        let loaded = EmulatorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_or_default_writes_file() {
        let dir = std::env::temp_dir().join("vecx_rs_emulator_config_default_test");
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);

        let config = EmulatorConfig::load_or_default(&path);
        assert_eq!(config, EmulatorConfig::default());
        assert!(path.exists());

        fs::remove_dir_all(&dir).ok();
    }
}
