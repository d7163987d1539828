// Keyboard input mapping module
//
// This module maps host keys onto the eight Vectrex controls for both
// players, with customizable key bindings.

use super::{Control, Controller, Player};
use std::collections::HashSet;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard mapping configuration for a single player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardMapping {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub button1: KeyCode,
    pub button2: KeyCode,
    pub button3: KeyCode,
    pub button4: KeyCode,
}

impl KeyboardMapping {
    /// Create default keyboard mapping for Player 1
    ///
    /// # Default Mappings
    /// - Arrow keys: joystick
    /// - Z, X, C, V: buttons 1-4
    pub fn player1_default() -> Self {
        Self {
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            button1: KeyCode::KeyZ,
            button2: KeyCode::KeyX,
            button3: KeyCode::KeyC,
            button4: KeyCode::KeyV,
        }
    }

    /// Create default keyboard mapping for Player 2
    ///
    /// # Default Mappings
    /// - WASD: joystick
    /// - G, H, J, K: buttons 1-4
    pub fn player2_default() -> Self {
        Self {
            up: KeyCode::KeyW,
            down: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            button1: KeyCode::KeyG,
            button2: KeyCode::KeyH,
            button3: KeyCode::KeyJ,
            button4: KeyCode::KeyK,
        }
    }

    /// Key bound to a control
    pub fn key_for(&self, control: Control) -> KeyCode {
        match control {
            Control::Up => self.up,
            Control::Down => self.down,
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Button1 => self.button1,
            Control::Button2 => self.button2,
            Control::Button3 => self.button3,
            Control::Button4 => self.button4,
        }
    }
}

/// Keyboard input handler
///
/// Tracks the set of held keys and answers per-player control queries.
/// Supports simultaneous key presses and both players.
pub struct KeyboardHandler {
    player1_mapping: KeyboardMapping,
    player2_mapping: KeyboardMapping,
    /// Set of currently pressed keys
    pressed_keys: HashSet<KeyCode>,
}

impl KeyboardHandler {
    /// Create a new keyboard handler with default mappings
    ///
    /// # Example
    /// ```
    /// use vecx_rs::input::keyboard::KeyboardHandler;
    ///
    /// let handler = KeyboardHandler::new();
    /// ```
    pub fn new() -> Self {
        Self::with_mappings(
            KeyboardMapping::player1_default(),
            KeyboardMapping::player2_default(),
        )
    }

    /// Create a keyboard handler with custom mappings
    pub fn with_mappings(
        player1_mapping: KeyboardMapping,
        player2_mapping: KeyboardMapping,
    ) -> Self {
        Self {
            player1_mapping,
            player2_mapping,
            pressed_keys: HashSet::new(),
        }
    }

    /// Handle a key press event
    pub fn handle_key_press(&mut self, physical_key: PhysicalKey) {
        if let PhysicalKey::Code(key_code) = physical_key {
            self.pressed_keys.insert(key_code);
        }
    }

    /// Handle a key release event
    pub fn handle_key_release(&mut self, physical_key: PhysicalKey) {
        if let PhysicalKey::Code(key_code) = physical_key {
            self.pressed_keys.remove(&key_code);
        }
    }

    /// Release every held key (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
    }

    fn mapping(&self, player: Player) -> &KeyboardMapping {
        match player {
            Player::One => &self.player1_mapping,
            Player::Two => &self.player2_mapping,
        }
    }

    /// Check if a control is held for a given player
    pub fn is_pressed(&self, player: Player, control: Control) -> bool {
        self.pressed_keys
            .contains(&self.mapping(player).key_for(control))
    }

    /// Get the current controller state for a player
    ///
    /// # Example
    /// ```
    /// use vecx_rs::input::keyboard::KeyboardHandler;
    /// use vecx_rs::input::Player;
    ///
    /// let handler = KeyboardHandler::new();
    /// let controller = handler.get_controller_state(Player::One);
    /// assert!(!controller.button1);
    /// ```
    pub fn get_controller_state(&self, player: Player) -> Controller {
        let mut controller = Controller::new();
        for control in Control::ALL {
            controller.set(control, self.is_pressed(player, control));
        }
        controller
    }

    pub fn player1_mapping(&self) -> &KeyboardMapping {
        &self.player1_mapping
    }

    pub fn player2_mapping(&self) -> &KeyboardMapping {
        &self.player2_mapping
    }

    pub fn set_player1_mapping(&mut self, mapping: KeyboardMapping) {
        self.player1_mapping = mapping;
    }

    pub fn set_player2_mapping(&mut self, mapping: KeyboardMapping) {
        self.player2_mapping = mapping;
    }
}

impl Default for KeyboardHandler {
    fn default() -> Self {
        Self::new()
    }
}
