// Input module - Controller input handling
//
// The Vectrex controller has a four-way joystick and four buttons. Hosts
// report these as eight digital controls per player through `InputSource`;
// the mapper turns them into the axis and button bytes the core consumes.

pub mod config;
pub mod gamepad;
pub mod keyboard;
pub mod mapper;
pub mod unified;

pub use config::{GamepadMappingConfig, InputConfig, KeyboardMappingConfig};
pub use gamepad::{GamepadHandler, GamepadMapping};
pub use keyboard::{KeyboardHandler, KeyboardMapping};
pub use mapper::{map_inputs, ControllerState, AXIS_CENTER, AXIS_MAX, AXIS_MIN};
pub use unified::UnifiedInputHandler;

/// Represents which player's controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Player 1
    One,
    /// Player 2
    Two,
}

impl Player {
    /// Both players in port order
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// Zero-based port index
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// A digital control on one controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Button1,
    Button2,
    Button3,
    Button4,
}

impl Control {
    /// All eight controls
    pub const ALL: [Control; 8] = [
        Control::Up,
        Control::Down,
        Control::Left,
        Control::Right,
        Control::Button1,
        Control::Button2,
        Control::Button3,
        Control::Button4,
    ];

    /// The four action buttons in bit order
    pub const BUTTONS: [Control; 4] = [
        Control::Button1,
        Control::Button2,
        Control::Button3,
        Control::Button4,
    ];
}

/// Digital state of a single controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controller {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub button1: bool,
    pub button2: bool,
    pub button3: bool,
    pub button4: bool,
}

impl Controller {
    /// Create a new controller instance with everything released
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a control is held
    pub fn is_pressed(&self, control: Control) -> bool {
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

    /// Set the held state of a control
    pub fn set(&mut self, control: Control, pressed: bool) {
        let slot = match control {
            Control::Up => &mut self.up,
            Control::Down => &mut self.down,
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::Button1 => &mut self.button1,
            Control::Button2 => &mut self.button2,
            Control::Button3 => &mut self.button3,
            Control::Button4 => &mut self.button4,
        };
        *slot = pressed;
    }

    /// Merge two states; a control is held if either source holds it
    pub fn merge(self, other: Controller) -> Controller {
        let mut merged = Controller::new();
        for control in Control::ALL {
            merged.set(control, self.is_pressed(control) || other.is_pressed(control));
        }
        merged
    }
}

/// Host input provider sampled once per frame
pub trait InputSource {
    /// Refresh the host input state
    fn poll_inputs(&mut self);

    /// Whether a control is currently held
    fn is_pressed(&self, player: Player, control: Control) -> bool;
}

/// Input source with nothing ever pressed
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll_inputs(&mut self) {}

    fn is_pressed(&self, _player: Player, _control: Control) -> bool {
        false
    }
}
