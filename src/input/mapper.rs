// Input mapper - Digital controls to joystick axis and button bytes
//
// Each player's joystick is reported to the core as two axis bytes and the
// eight action buttons share one byte wired active-low (bit clear = pressed).
// Player 1 owns bits 0-3, player 2 owns bits 4-7.

use super::{Control, InputSource, Player};

/// Axis value for full left / full down
pub const AXIS_MIN: u8 = 0x00;

/// Axis value when the stick is centered
pub const AXIS_CENTER: u8 = 0x80;

/// Axis value for full right / full up
pub const AXIS_MAX: u8 = 0xFF;

/// Controller bytes handed to the core before each emulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ControllerState {
    /// Player 1 horizontal, player 1 vertical, player 2 horizontal, player 2 vertical
    pub axes: [u8; 4],
    /// Active-low button byte
    pub buttons: u8,
}

impl ControllerState {
    /// Sticks centered, nothing pressed
    pub const NEUTRAL: ControllerState = ControllerState {
        axes: [AXIS_CENTER; 4],
        buttons: 0xFF,
    };

    /// Horizontal axis byte for a player
    #[inline]
    pub fn horizontal(&self, player: Player) -> u8 {
        self.axes[player.index() * 2]
    }

    /// Vertical axis byte for a player
    #[inline]
    pub fn vertical(&self, player: Player) -> u8 {
        self.axes[player.index() * 2 + 1]
    }

    /// Whether a button is pressed in this state
    ///
    /// Returns `false` for directional controls.
    pub fn is_button_pressed(&self, player: Player, control: Control) -> bool {
        match button_bit(player, control) {
            Some(bit) => self.buttons & bit == 0,
            None => false,
        }
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Horizontal axis from left/right. Neither or both yield center.
#[inline]
pub fn horizontal_axis(left: bool, right: bool) -> u8 {
    match (left, right) {
        (true, false) => AXIS_MIN,
        (false, true) => AXIS_MAX,
        _ => AXIS_CENTER,
    }
}

/// Vertical axis from up/down. Up is the maximum value.
#[inline]
pub fn vertical_axis(up: bool, down: bool) -> u8 {
    match (up, down) {
        (true, false) => AXIS_MAX,
        (false, true) => AXIS_MIN,
        _ => AXIS_CENTER,
    }
}

/// Bit in the shared button byte for a player's action button
///
/// # Returns
/// `None` for directional controls
pub fn button_bit(player: Player, control: Control) -> Option<u8> {
    let index = match control {
        Control::Button1 => 0,
        Control::Button2 => 1,
        Control::Button3 => 2,
        Control::Button4 => 3,
        _ => return None,
    };
    Some(1 << (index + 4 * player.index()))
}

/// Sample an input source into controller bytes
///
/// The source should already have been polled for this frame.
pub fn map_inputs<S: InputSource + ?Sized>(source: &S) -> ControllerState {
    let mut state = ControllerState::NEUTRAL;

    for player in Player::ALL {
        let pressed = |control| source.is_pressed(player, control);

        let base = player.index() * 2;
        state.axes[base] = horizontal_axis(pressed(Control::Left), pressed(Control::Right));
        state.axes[base + 1] = vertical_axis(pressed(Control::Up), pressed(Control::Down));

        for control in Control::BUTTONS {
            if pressed(control) {
                if let Some(bit) = button_bit(player, control) {
                    state.buttons &= !bit;
                }
            }
        }
    }

    state
}
