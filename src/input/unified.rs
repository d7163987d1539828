// Unified input handler module
//
// Combines keyboard and gamepad inputs so either can drive the Vectrex
// controllers, and exposes the result as the frame's `InputSource`.

use super::{Control, Controller, GamepadHandler, InputSource, KeyboardHandler, Player};
use super::config::InputConfig;
use winit::keyboard::PhysicalKey;

/// Unified input handler that combines keyboard and gamepad inputs
///
/// A control is held if either device holds it.
pub struct UnifiedInputHandler {
    keyboard_handler: KeyboardHandler,
    gamepad_handler: GamepadHandler,
}

impl UnifiedInputHandler {
    /// Create a new unified input handler with default mappings
    pub fn new() -> Self {
        Self::with_handlers(KeyboardHandler::new(), GamepadHandler::new())
    }

    /// Create a unified input handler with custom handlers
    pub fn with_handlers(
        keyboard_handler: KeyboardHandler,
        gamepad_handler: GamepadHandler,
    ) -> Self {
        Self {
            keyboard_handler,
            gamepad_handler,
        }
    }

    /// Build handlers from a stored input configuration
    ///
    /// # Returns
    /// Error message naming the first binding that could not be parsed
    pub fn from_config(config: &InputConfig) -> Result<Self, String> {
        let keyboard = KeyboardHandler::with_mappings(
            config.keyboard_player1.to_keyboard_mapping()?,
            config.keyboard_player2.to_keyboard_mapping()?,
        );
        let gamepad = GamepadHandler::with_mappings(
            config.gamepad_player1.to_gamepad_mapping()?,
            config.gamepad_player2.to_gamepad_mapping()?,
        );
        Ok(Self::with_handlers(keyboard, gamepad))
    }

    pub fn handle_key_press(&mut self, physical_key: PhysicalKey) {
        self.keyboard_handler.handle_key_press(physical_key);
    }

    pub fn handle_key_release(&mut self, physical_key: PhysicalKey) {
        self.keyboard_handler.handle_key_release(physical_key);
    }

    /// Update gamepad states by processing pending events
    pub fn update_gamepads(&mut self) {
        self.gamepad_handler.update();
    }

    /// Get the combined controller state for a player
    pub fn get_controller_state(&self, player: Player) -> Controller {
        self.keyboard_handler
            .get_controller_state(player)
            .merge(self.gamepad_handler.get_controller_state(player))
    }

    pub fn keyboard_handler(&self) -> &KeyboardHandler {
        &self.keyboard_handler
    }

    pub fn keyboard_handler_mut(&mut self) -> &mut KeyboardHandler {
        &mut self.keyboard_handler
    }

    pub fn gamepad_handler(&self) -> &GamepadHandler {
        &self.gamepad_handler
    }

    pub fn gamepad_handler_mut(&mut self) -> &mut GamepadHandler {
        &mut self.gamepad_handler
    }

    /// List all connected gamepads with their assignments
    pub fn list_gamepads(&self) -> Vec<(usize, String, Option<Player>)> {
        self.gamepad_handler.list_gamepads()
    }
}

impl Default for UnifiedInputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for UnifiedInputHandler {
    fn poll_inputs(&mut self) {
        self.update_gamepads();
    }

    fn is_pressed(&self, player: Player, control: Control) -> bool {
        self.keyboard_handler.is_pressed(player, control)
            || self
                .gamepad_handler
                .get_controller_state(player)
                .is_pressed(control)
    }
}
