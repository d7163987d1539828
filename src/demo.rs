// Test pattern core - A stand-in machine for running the front-end
//
// Draws a border, a rotating spoke and a joystick-driven cursor, and plays a
// square-wave tone while player 1 holds button 1. Lets the window, input,
// audio and save-state paths run without an instruction-level core.

use crate::cartridge::Cartridge;
use crate::input::{Control, ControllerState, Player, AXIS_MAX, AXIS_MIN};
use crate::machine::{check_state_len, StateError, VectorCore};
use crate::vector::{DrawCommand, ALG_MAX_X, ALG_MAX_Y, BEAM_OFF, MAX_INTENSITY};

/// Cursor travel per frame in device units
const CURSOR_STEP: u32 = 400;

/// Samples per half period of the tone (441 Hz at 44.1 kHz)
const TONE_HALF_PERIOD: u32 = 50;

const TONE_HIGH: u8 = 0x60;
const TONE_LOW: u8 = 0x10;

/// Raw sample that converts to 1, the closest to silence
pub const SILENCE: u8 = 0x08;

/// Frames per full turn of the spoke
const SPOKE_PERIOD: u32 = 200;

/// Serialized size: frame, cursor x, cursor y, tone phase, seed
const STATE_SIZE: usize = 5 * 4;

/// Built-in core that draws a moving test pattern
#[derive(Debug, Clone)]
pub struct TestPatternCore {
    frame: u32,
    cursor_x: u32,
    cursor_y: u32,
    tone_phase: u32,
    /// Derived from the cartridge image; tilts the spoke's start angle
    seed: u32,
    controls: ControllerState,
    commands: Vec<DrawCommand>,
}

impl TestPatternCore {
    pub fn new() -> Self {
        Self {
            frame: 0,
            cursor_x: ALG_MAX_X / 2,
            cursor_y: ALG_MAX_Y / 2,
            tone_phase: 0,
            seed: 0,
            controls: ControllerState::NEUTRAL,
            commands: Vec::new(),
        }
    }

    /// Frames emulated since the last reset
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Cursor position in device units
    pub fn cursor(&self) -> (u32, u32) {
        (self.cursor_x, self.cursor_y)
    }

    fn move_cursor(&mut self) {
        match self.controls.horizontal(Player::One) {
            AXIS_MIN => self.cursor_x = self.cursor_x.saturating_sub(CURSOR_STEP),
            AXIS_MAX => self.cursor_x = (self.cursor_x + CURSOR_STEP).min(ALG_MAX_X),
            _ => {}
        }
        // Up is the maximum axis value; raster rows grow downwards
        match self.controls.vertical(Player::One) {
            AXIS_MAX => self.cursor_y = self.cursor_y.saturating_sub(CURSOR_STEP),
            AXIS_MIN => self.cursor_y = (self.cursor_y + CURSOR_STEP).min(ALG_MAX_Y),
            _ => {}
        }
    }

    fn build_commands(&mut self) {
        self.commands.clear();

        let (w, h) = (ALG_MAX_X, ALG_MAX_Y);
        let border = MAX_INTENSITY / 2;
        self.commands.extend_from_slice(&[
            DrawCommand::line(0, 0, w, 0, border),
            DrawCommand::line(w, 0, w, h, border),
            DrawCommand::line(w, h, 0, h, border),
            DrawCommand::line(0, h, 0, 0, border),
        ]);

        // Beam moves to the hub with the beam off
        self.commands
            .push(DrawCommand::line(0, 0, w / 2, h / 2, BEAM_OFF));

        let turn = self.frame.wrapping_add(self.seed) % SPOKE_PERIOD;
        let angle = turn as f32 / SPOKE_PERIOD as f32 * std::f32::consts::TAU;
        let length = (w / 3) as f32;
        let tip_x = (w / 2) as f32 + length * angle.cos();
        let tip_y = (h / 2) as f32 + length * angle.sin();
        self.commands.push(DrawCommand::line(
            w / 2,
            h / 2,
            tip_x as u32,
            tip_y as u32,
            MAX_INTENSITY,
        ));

        let cursor_intensity = if self.controls.is_button_pressed(Player::One, Control::Button2) {
            MAX_INTENSITY
        } else {
            MAX_INTENSITY / 2
        };
        self.commands
            .push(DrawCommand::dot(self.cursor_x, self.cursor_y, cursor_intensity));
    }
}

impl Default for TestPatternCore {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorCore for TestPatternCore {
    fn reset(&mut self, cartridge: &Cartridge) {
        let image = &cartridge.as_slice()[..cartridge.image_len()];
        let seed = image
            .iter()
            .fold(0u32, |acc, &b| acc.wrapping_mul(31).wrapping_add(b as u32));

        *self = Self {
            seed: seed % SPOKE_PERIOD,
            ..Self::new()
        };
        log::debug!("Test pattern reset (seed {})", self.seed);
    }

    fn emulate(&mut self, _cartridge: &Cartridge, _cycles: u32) {
        self.frame = self.frame.wrapping_add(1);
        self.move_cursor();
        self.build_commands();
    }

    fn vectors(&self) -> &[DrawCommand] {
        &self.commands
    }

    fn render_audio(&mut self, buffer: &mut [u8]) {
        if !self.controls.is_button_pressed(Player::One, Control::Button1) {
            buffer.fill(SILENCE);
            self.tone_phase = 0;
            return;
        }

        for sample in buffer.iter_mut() {
            *sample = if (self.tone_phase / TONE_HALF_PERIOD) % 2 == 0 {
                TONE_HIGH
            } else {
                TONE_LOW
            };
            self.tone_phase = (self.tone_phase + 1) % (TONE_HALF_PERIOD * 2);
        }
    }

    fn set_controls(&mut self, controls: &ControllerState) {
        self.controls = *controls;
    }

    fn state_size(&self) -> usize {
        STATE_SIZE
    }

    fn save_state(&self, buffer: &mut [u8]) -> Result<(), StateError> {
        check_state_len(STATE_SIZE, buffer.len())?;

        let fields = [
            self.frame,
            self.cursor_x,
            self.cursor_y,
            self.tone_phase,
            self.seed,
        ];
        for (chunk, value) in buffer.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        Ok(())
    }

    fn load_state(&mut self, buffer: &[u8]) -> Result<(), StateError> {
        check_state_len(STATE_SIZE, buffer.len())?;

        let mut fields = [0u32; 5];
        for (value, chunk) in fields.iter_mut().zip(buffer.chunks_exact(4)) {
            *value = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        let [frame, cursor_x, cursor_y, tone_phase, seed] = fields;

        if cursor_x > ALG_MAX_X || cursor_y > ALG_MAX_Y {
            return Err(StateError::Corrupt(format!(
                "cursor ({}, {}) outside the display",
                cursor_x, cursor_y
            )));
        }
        if tone_phase >= TONE_HALF_PERIOD * 2 || seed >= SPOKE_PERIOD {
            return Err(StateError::Corrupt("tone or spoke phase out of range".into()));
        }

        self.frame = frame;
        self.cursor_x = cursor_x;
        self.cursor_y = cursor_y;
        self.tone_phase = tone_phase;
        self.seed = seed;
        self.build_commands();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::AXIS_CENTER;

    fn controls(horizontal: u8, vertical: u8, buttons: u8) -> ControllerState {
        ControllerState {
            axes: [horizontal, vertical, AXIS_CENTER, AXIS_CENTER],
            buttons,
        }
    }

    #[test]
    fn test_emulate_builds_pattern() {
        let cartridge = Cartridge::new();
        let mut core = TestPatternCore::new();
        core.emulate(&cartridge, 30_000);

        let commands = core.vectors();
        assert_eq!(commands.len(), 7);
        assert_eq!(commands.iter().filter(|c| c.is_beam_off()).count(), 1);
        assert_eq!(core.frame(), 1);
    }

    #[test]
    fn test_cursor_follows_axes() {
        let cartridge = Cartridge::new();
        let mut core = TestPatternCore::new();
        let (x0, y0) = core.cursor();

        core.set_controls(&controls(AXIS_MAX, AXIS_MAX, 0xFF));
        core.emulate(&cartridge, 30_000);
        assert_eq!(core.cursor(), (x0 + CURSOR_STEP, y0 - CURSOR_STEP));

        core.set_controls(&controls(AXIS_MIN, AXIS_MIN, 0xFF));
        core.emulate(&cartridge, 30_000);
        assert_eq!(core.cursor(), (x0, y0));
    }

    #[test]
    fn test_cursor_stays_on_screen() {
        let cartridge = Cartridge::new();
        let mut core = TestPatternCore::new();
        core.set_controls(&controls(AXIS_MAX, AXIS_MIN, 0xFF));
        for _ in 0..200 {
            core.emulate(&cartridge, 30_000);
        }
        assert_eq!(core.cursor(), (ALG_MAX_X, ALG_MAX_Y));
    }

    #[test]
    fn test_silence_without_button() {
        let mut core = TestPatternCore::new();
        let mut buffer = [0u8; 882];
        core.render_audio(&mut buffer);
        assert!(buffer.iter().all(|&s| s == SILENCE));
    }

    #[test]
    fn test_tone_while_button_held() {
        let mut core = TestPatternCore::new();
        core.set_controls(&controls(AXIS_CENTER, AXIS_CENTER, 0xFE));

        let mut buffer = [0u8; 200];
        core.render_audio(&mut buffer);
        assert!(buffer[..50].iter().all(|&s| s == TONE_HIGH));
        assert!(buffer[50..100].iter().all(|&s| s == TONE_LOW));
        assert_eq!(buffer[100], TONE_HIGH);
    }

    #[test]
    fn test_state_round_trip() {
        let cartridge = Cartridge::new();
        let mut core = TestPatternCore::new();
        core.set_controls(&controls(AXIS_MAX, AXIS_CENTER, 0xFF));
        core.emulate(&cartridge, 30_000);
        core.emulate(&cartridge, 30_000);

        let mut state = vec![0u8; core.state_size()];
        core.save_state(&mut state).unwrap();

        let mut restored = TestPatternCore::new();
        restored.load_state(&state).unwrap();
        assert_eq!(restored.frame(), 2);
        assert_eq!(restored.cursor(), core.cursor());
        assert_eq!(restored.vectors(), core.vectors());
    }

    #[test]
    fn test_corrupt_state_leaves_core_unchanged() {
        let mut core = TestPatternCore::new();
        let mut state = vec![0u8; STATE_SIZE];
        state[4..8].copy_from_slice(&u32::MAX.to_le_bytes());

        assert!(matches!(core.load_state(&state), Err(StateError::Corrupt(_))));
        assert_eq!(core.cursor(), (ALG_MAX_X / 2, ALG_MAX_Y / 2));
        assert!(matches!(
            core.load_state(&state[..8]),
            Err(StateError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_reset_seeds_from_cartridge() {
        let mut cartridge = Cartridge::new();
        cartridge.load(&[1, 2, 3]).unwrap();

        let mut core = TestPatternCore::new();
        core.emulate(&cartridge, 30_000);
        core.reset(&cartridge);

        assert_eq!(core.frame(), 0);
        assert_eq!(core.seed, 1026 % SPOKE_PERIOD);
    }
}
