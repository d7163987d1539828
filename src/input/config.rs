// Input configuration module
//
// This module provides functionality to save and load input configurations
// (keyboard and gamepad mappings) to/from TOML files.

use super::{GamepadMapping, KeyboardMapping};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use winit::keyboard::KeyCode;

/// Default input configuration file path
pub const INPUT_CONFIG_FILE: &str = "input_config.toml";

/// Serializable keyboard mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardMappingConfig {
    /// Key for joystick up (as string, e.g., "ArrowUp")
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    /// Key for button 1 (as string, e.g., "KeyZ")
    pub button1: String,
    pub button2: String,
    pub button3: String,
    pub button4: String,
}

impl KeyboardMappingConfig {
    pub fn player1_default() -> Self {
        Self::from_keyboard_mapping(&KeyboardMapping::player1_default())
    }

    pub fn player2_default() -> Self {
        Self::from_keyboard_mapping(&KeyboardMapping::player2_default())
    }

    /// Convert to runtime KeyboardMapping
    ///
    /// # Returns
    /// Result containing KeyboardMapping or error message
    pub fn to_keyboard_mapping(&self) -> Result<KeyboardMapping, String> {
        Ok(KeyboardMapping {
            up: string_to_keycode(&self.up)?,
            down: string_to_keycode(&self.down)?,
            left: string_to_keycode(&self.left)?,
            right: string_to_keycode(&self.right)?,
            button1: string_to_keycode(&self.button1)?,
            button2: string_to_keycode(&self.button2)?,
            button3: string_to_keycode(&self.button3)?,
            button4: string_to_keycode(&self.button4)?,
        })
    }

    /// Create from runtime KeyboardMapping
    pub fn from_keyboard_mapping(mapping: &KeyboardMapping) -> Self {
        Self {
            up: keycode_to_string(mapping.up),
            down: keycode_to_string(mapping.down),
            left: keycode_to_string(mapping.left),
            right: keycode_to_string(mapping.right),
            button1: keycode_to_string(mapping.button1),
            button2: keycode_to_string(mapping.button2),
            button3: keycode_to_string(mapping.button3),
            button4: keycode_to_string(mapping.button4),
        }
    }
}

/// Serializable gamepad mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadMappingConfig {
    /// Button for joystick up (as string, e.g., "DPadUp")
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    /// Button for button 1 (as string, e.g., "South")
    pub button1: String,
    pub button2: String,
    pub button3: String,
    pub button4: String,
}

impl GamepadMappingConfig {
    pub fn default_mapping() -> Self {
        Self::from_gamepad_mapping(&GamepadMapping::default_mapping())
    }

    /// Convert to runtime GamepadMapping
    pub fn to_gamepad_mapping(&self) -> Result<GamepadMapping, String> {
        Ok(GamepadMapping {
            up: string_to_gilrs_button(&self.up)?,
            down: string_to_gilrs_button(&self.down)?,
            left: string_to_gilrs_button(&self.left)?,
            right: string_to_gilrs_button(&self.right)?,
            button1: string_to_gilrs_button(&self.button1)?,
            button2: string_to_gilrs_button(&self.button2)?,
            button3: string_to_gilrs_button(&self.button3)?,
            button4: string_to_gilrs_button(&self.button4)?,
        })
    }

    /// Create from runtime GamepadMapping
    pub fn from_gamepad_mapping(mapping: &GamepadMapping) -> Self {
        Self {
            up: gilrs_button_to_string(mapping.up),
            down: gilrs_button_to_string(mapping.down),
            left: gilrs_button_to_string(mapping.left),
            right: gilrs_button_to_string(mapping.right),
            button1: gilrs_button_to_string(mapping.button1),
            button2: gilrs_button_to_string(mapping.button2),
            button3: gilrs_button_to_string(mapping.button3),
            button4: gilrs_button_to_string(mapping.button4),
        }
    }
}

/// Complete input configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub keyboard_player1: KeyboardMappingConfig,
    pub keyboard_player2: KeyboardMappingConfig,
    pub gamepad_player1: GamepadMappingConfig,
    pub gamepad_player2: GamepadMappingConfig,
}

impl InputConfig {
    /// Create a new input configuration with default mappings
    pub fn new() -> Self {
        Self {
            keyboard_player1: KeyboardMappingConfig::player1_default(),
            keyboard_player2: KeyboardMappingConfig::player2_default(),
            gamepad_player1: GamepadMappingConfig::default_mapping(),
            gamepad_player2: GamepadMappingConfig::default_mapping(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, toml_string).map_err(|e| format!("Failed to write config file: {}", e))
    }

    /// Try to load configuration from file, or create default if it doesn't exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(&path).unwrap_or_else(|e| {
            log::info!("Could not load input config ({}), using defaults", e);
            let config = Self::new();
            match config.save_to_file(&path) {
                Ok(()) => log::info!("Created default input configuration file"),
                Err(e) => log::warn!("Could not save default input config: {}", e),
            }
            config
        })
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn keycode_to_string(key: KeyCode) -> String {
    format!("{:?}", key)
}

/// Convert a key name to a KeyCode
///
/// Accepts winit variant names ("KeyP", "ArrowUp", "F5") as well as the
/// short forms used for hotkeys: a bare letter ("P") or digit ("1").
pub fn string_to_keycode(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(key) = letter_key(c.to_ascii_uppercase()).or_else(|| digit_key(c)) {
            return Ok(key);
        }
    }

    if let Some(letter) = s.strip_prefix("Key") {
        let mut chars = letter.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(key) = letter_key(c) {
                return Ok(key);
            }
        }
    }

    if let Some(digit) = s.strip_prefix("Digit") {
        let mut chars = digit.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(key) = digit_key(c) {
                return Ok(key);
            }
        }
    }

    match s {
        "ArrowUp" => Ok(KeyCode::ArrowUp),
        "ArrowDown" => Ok(KeyCode::ArrowDown),
        "ArrowLeft" => Ok(KeyCode::ArrowLeft),
        "ArrowRight" => Ok(KeyCode::ArrowRight),
        "Enter" => Ok(KeyCode::Enter),
        "Space" => Ok(KeyCode::Space),
        "Tab" => Ok(KeyCode::Tab),
        "Escape" => Ok(KeyCode::Escape),
        "Backspace" => Ok(KeyCode::Backspace),
        "ShiftLeft" => Ok(KeyCode::ShiftLeft),
        "ShiftRight" => Ok(KeyCode::ShiftRight),
        "ControlLeft" => Ok(KeyCode::ControlLeft),
        "ControlRight" => Ok(KeyCode::ControlRight),
        "AltLeft" => Ok(KeyCode::AltLeft),
        "AltRight" => Ok(KeyCode::AltRight),
        "F1" => Ok(KeyCode::F1),
        "F2" => Ok(KeyCode::F2),
        "F3" => Ok(KeyCode::F3),
        "F4" => Ok(KeyCode::F4),
        "F5" => Ok(KeyCode::F5),
        "F6" => Ok(KeyCode::F6),
        "F7" => Ok(KeyCode::F7),
        "F8" => Ok(KeyCode::F8),
        "F9" => Ok(KeyCode::F9),
        "F10" => Ok(KeyCode::F10),
        "F11" => Ok(KeyCode::F11),
        "F12" => Ok(KeyCode::F12),
        _ => Err(format!("Unknown key code: {}", s)),
    }
}

fn letter_key(c: char) -> Option<KeyCode> {
    let key = match c {
        'A' => KeyCode::KeyA,
        'B' => KeyCode::KeyB,
        'C' => KeyCode::KeyC,
        'D' => KeyCode::KeyD,
        'E' => KeyCode::KeyE,
        'F' => KeyCode::KeyF,
        'G' => KeyCode::KeyG,
        'H' => KeyCode::KeyH,
        'I' => KeyCode::KeyI,
        'J' => KeyCode::KeyJ,
        'K' => KeyCode::KeyK,
        'L' => KeyCode::KeyL,
        'M' => KeyCode::KeyM,
        'N' => KeyCode::KeyN,
        'O' => KeyCode::KeyO,
        'P' => KeyCode::KeyP,
        'Q' => KeyCode::KeyQ,
        'R' => KeyCode::KeyR,
        'S' => KeyCode::KeyS,
        'T' => KeyCode::KeyT,
        'U' => KeyCode::KeyU,
        'V' => KeyCode::KeyV,
        'W' => KeyCode::KeyW,
        'X' => KeyCode::KeyX,
        'Y' => KeyCode::KeyY,
        'Z' => KeyCode::KeyZ,
        _ => return None,
    };
    Some(key)
}

fn digit_key(c: char) -> Option<KeyCode> {
    let key = match c {
        '0' => KeyCode::Digit0,
        '1' => KeyCode::Digit1,
        '2' => KeyCode::Digit2,
        '3' => KeyCode::Digit3,
        '4' => KeyCode::Digit4,
        '5' => KeyCode::Digit5,
        '6' => KeyCode::Digit6,
        '7' => KeyCode::Digit7,
        '8' => KeyCode::Digit8,
        '9' => KeyCode::Digit9,
        _ => return None,
    };
    Some(key)
}

fn gilrs_button_to_string(button: gilrs::Button) -> String {
    format!("{:?}", button)
}

fn string_to_gilrs_button(s: &str) -> Result<gilrs::Button, String> {
    use gilrs::Button;

    match s {
        "South" => Ok(Button::South),
        "East" => Ok(Button::East),
        "North" => Ok(Button::North),
        "West" => Ok(Button::West),
        "C" => Ok(Button::C),
        "Z" => Ok(Button::Z),
        "LeftTrigger" => Ok(Button::LeftTrigger),
        "LeftTrigger2" => Ok(Button::LeftTrigger2),
        "RightTrigger" => Ok(Button::RightTrigger),
        "RightTrigger2" => Ok(Button::RightTrigger2),
        "Select" => Ok(Button::Select),
        "Start" => Ok(Button::Start),
        "Mode" => Ok(Button::Mode),
        "LeftThumb" => Ok(Button::LeftThumb),
        "RightThumb" => Ok(Button::RightThumb),
        "DPadUp" => Ok(Button::DPadUp),
        "DPadDown" => Ok(Button::DPadDown),
        "DPadLeft" => Ok(Button::DPadLeft),
        "DPadRight" => Ok(Button::DPadRight),
        _ => Err(format!("Unknown gamepad button: {}", s)),
    }
}
