// Gamepad input mapping module
//
// This module maps gilrs gamepad buttons onto the Vectrex controls for both
// players. Gamepad support is optional: if gilrs cannot initialize, the
// handler reports nothing pressed.

use super::{Control, Controller, Player};
use gilrs::{Button as GilrsButton, Event, EventType, Gilrs};
use std::collections::HashMap;

/// Gamepad mapping configuration for a single player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamepadMapping {
    pub up: GilrsButton,
    pub down: GilrsButton,
    pub left: GilrsButton,
    pub right: GilrsButton,
    pub button1: GilrsButton,
    pub button2: GilrsButton,
    pub button3: GilrsButton,
    pub button4: GilrsButton,
}

impl GamepadMapping {
    /// Create default gamepad mapping
    ///
    /// # Default Mappings (Standard Gamepad Layout)
    /// - D-pad: joystick
    /// - South, East, West, North: buttons 1-4
    pub fn default_mapping() -> Self {
        Self {
            up: GilrsButton::DPadUp,
            down: GilrsButton::DPadDown,
            left: GilrsButton::DPadLeft,
            right: GilrsButton::DPadRight,
            button1: GilrsButton::South,
            button2: GilrsButton::East,
            button3: GilrsButton::West,
            button4: GilrsButton::North,
        }
    }

    /// Control bound to a gamepad button
    fn control_for(&self, button: GilrsButton) -> Option<Control> {
        Control::ALL
            .into_iter()
            .find(|&control| self.button_for(control) == button)
    }

    /// Gamepad button bound to a control
    pub fn button_for(&self, control: Control) -> GilrsButton {
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

/// Gamepad input handler
///
/// Manages gamepad events and keeps a digital controller state per player.
/// The first two connected gamepads are assigned to players 1 and 2.
pub struct GamepadHandler {
    /// Gilrs instance, absent when the platform backend failed
    gilrs: Option<Gilrs>,
    player1_mapping: GamepadMapping,
    player2_mapping: GamepadMapping,
    /// Map of gamepad ID to player assignment
    gamepad_assignments: HashMap<usize, Player>,
    player1_state: Controller,
    player2_state: Controller,
}

impl GamepadHandler {
    /// Create a new gamepad handler with default mappings
    ///
    /// # Example
    /// ```no_run
    /// use vecx_rs::input::gamepad::GamepadHandler;
    ///
    /// let handler = GamepadHandler::new();
    /// ```
    pub fn new() -> Self {
        Self::with_mappings(
            GamepadMapping::default_mapping(),
            GamepadMapping::default_mapping(),
        )
    }

    /// Create a gamepad handler with custom mappings
    pub fn with_mappings(player1_mapping: GamepadMapping, player2_mapping: GamepadMapping) -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                log::warn!("Gamepad support unavailable: {}", e);
                None
            }
        };

        let mut handler = Self::detached(player1_mapping, player2_mapping);
        handler.gilrs = gilrs;
        handler.auto_assign_gamepads();
        handler
    }

    /// Create a handler without a gilrs backend
    ///
    /// Useful for headless runs; every control reads as released.
    pub fn detached(player1_mapping: GamepadMapping, player2_mapping: GamepadMapping) -> Self {
        Self {
            gilrs: None,
            player1_mapping,
            player2_mapping,
            gamepad_assignments: HashMap::new(),
            player1_state: Controller::new(),
            player2_state: Controller::new(),
        }
    }

    /// Assigns the first gamepad to Player 1, second to Player 2
    fn auto_assign_gamepads(&mut self) {
        let Some(gilrs) = &self.gilrs else {
            return;
        };

        let connected = gilrs
            .gamepads()
            .filter(|(_, gamepad)| gamepad.is_connected())
            .take(Player::ALL.len());

        for ((id, gamepad), player) in connected.zip(Player::ALL) {
            self.gamepad_assignments.insert(id.into(), player);
            log::info!(
                "Gamepad '{}' (ID: {}) assigned to {:?}",
                gamepad.name(),
                id,
                player
            );
        }

        if self.gamepad_assignments.is_empty() {
            log::info!("No gamepads detected");
        }
    }

    /// Manually assign a gamepad to a player
    pub fn assign_gamepad(&mut self, gamepad_id: usize, player: Player) {
        self.gamepad_assignments.insert(gamepad_id, player);
    }

    /// Process pending gamepad events
    ///
    /// Called once per frame before the controls are sampled.
    pub fn update(&mut self) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };

        let mut events = Vec::new();
        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            events.push((usize::from(id), event));
        }

        for (gamepad_id, event) in events {
            let Some(&player) = self.gamepad_assignments.get(&gamepad_id) else {
                continue;
            };

            match event {
                EventType::ButtonPressed(button, _) => self.set_button(player, button, true),
                EventType::ButtonReleased(button, _) => self.set_button(player, button, false),
                EventType::Connected => log::info!("Gamepad {} connected", gamepad_id),
                EventType::Disconnected => {
                    log::info!("Gamepad {} disconnected", gamepad_id);
                    *self.state_mut(player) = Controller::new();
                }
                _ => {}
            }
        }
    }

    fn state_mut(&mut self, player: Player) -> &mut Controller {
        match player {
            Player::One => &mut self.player1_state,
            Player::Two => &mut self.player2_state,
        }
    }

    fn set_button(&mut self, player: Player, button: GilrsButton, pressed: bool) {
        let mapping = match player {
            Player::One => &self.player1_mapping,
            Player::Two => &self.player2_mapping,
        };

        if let Some(control) = mapping.control_for(button) {
            self.state_mut(player).set(control, pressed);
        }
    }

    /// Get the current controller state for a player
    pub fn get_controller_state(&self, player: Player) -> Controller {
        match player {
            Player::One => self.player1_state,
            Player::Two => self.player2_state,
        }
    }

    pub fn player1_mapping(&self) -> &GamepadMapping {
        &self.player1_mapping
    }

    pub fn player2_mapping(&self) -> &GamepadMapping {
        &self.player2_mapping
    }

    pub fn set_player1_mapping(&mut self, mapping: GamepadMapping) {
        self.player1_mapping = mapping;
    }

    pub fn set_player2_mapping(&mut self, mapping: GamepadMapping) {
        self.player2_mapping = mapping;
    }

    /// Get list of connected gamepads with their assignments
    pub fn list_gamepads(&self) -> Vec<(usize, String, Option<Player>)> {
        let Some(gilrs) = &self.gilrs else {
            return Vec::new();
        };

        gilrs
            .gamepads()
            .filter(|(_, gamepad)| gamepad.is_connected())
            .map(|(id, gamepad)| {
                let gamepad_id: usize = id.into();
                let player = self.gamepad_assignments.get(&gamepad_id).copied();
                (gamepad_id, gamepad.name().to_string(), player)
            })
            .collect()
    }
}

impl Default for GamepadHandler {
    fn default() -> Self {
        Self::new()
    }
}
