// Common test utilities for frame-runner integration tests
//
// Scripted stand-ins for the emulation core and the host sinks. Every call
// the emulator makes is appended to a shared journal so tests can check the
// order of a frame's steps across all collaborators.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use vecx_rs::audio::AudioSink;
use vecx_rs::cartridge::Cartridge;
use vecx_rs::display::VideoSink;
use vecx_rs::input::{Control, ControllerState, InputSource, Player};
use vecx_rs::machine::{check_state_len, StateError, VectorCore};
use vecx_rs::vector::DrawCommand;

/// One observed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Poll,
    SetControls(ControllerState),
    Emulate(u32),
    RenderAudio(usize),
    Sample(i16, i16),
    Frame {
        width: usize,
        height: usize,
        pitch: usize,
    },
    Reset { first_byte: u8 },
}

/// Shared call log
pub type Journal = Rc<RefCell<Vec<Event>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Event kinds in order, with consecutive samples collapsed
pub fn step_names(journal: &Journal) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for event in journal.borrow().iter() {
        let name = match event {
            Event::Poll => "poll",
            Event::SetControls(_) => "set_controls",
            Event::Emulate(_) => "emulate",
            Event::RenderAudio(_) => "render_audio",
            Event::Sample(..) => "sample",
            Event::Frame { .. } => "frame",
            Event::Reset { .. } => "reset",
        };
        if name == "sample" && names.last() == Some(&"sample") {
            continue;
        }
        names.push(name);
    }
    names
}

/// Core that replays fixed draw commands and audio
pub struct ScriptedCore {
    pub journal: Journal,
    pub commands: Vec<DrawCommand>,
    /// Byte written into every audio slot
    pub audio_byte: u8,
    pub state: Vec<u8>,
    /// Reject every `load_state` with `Corrupt`
    pub refuse_state: bool,
}

impl ScriptedCore {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            commands: Vec::new(),
            audio_byte: 0x00,
            state: vec![0; 8],
            refuse_state: false,
        }
    }

    pub fn with_commands(mut self, commands: Vec<DrawCommand>) -> Self {
        self.commands = commands;
        self
    }

    pub fn with_audio_byte(mut self, byte: u8) -> Self {
        self.audio_byte = byte;
        self
    }

    fn log(&self, event: Event) {
        self.journal.borrow_mut().push(event);
    }
}

impl VectorCore for ScriptedCore {
    fn reset(&mut self, cartridge: &Cartridge) {
        self.log(Event::Reset {
            first_byte: cartridge.read(0),
        });
    }

    fn emulate(&mut self, _cartridge: &Cartridge, cycles: u32) {
        self.log(Event::Emulate(cycles));
    }

    fn vectors(&self) -> &[DrawCommand] {
        &self.commands
    }

    fn render_audio(&mut self, buffer: &mut [u8]) {
        buffer.fill(self.audio_byte);
        self.log(Event::RenderAudio(buffer.len()));
    }

    fn set_controls(&mut self, controls: &ControllerState) {
        self.log(Event::SetControls(*controls));
    }

    fn state_size(&self) -> usize {
        self.state.len()
    }

    fn save_state(&self, buffer: &mut [u8]) -> Result<(), StateError> {
        check_state_len(self.state.len(), buffer.len())?;
        buffer.copy_from_slice(&self.state);
        Ok(())
    }

    fn load_state(&mut self, buffer: &[u8]) -> Result<(), StateError> {
        check_state_len(self.state.len(), buffer.len())?;
        if self.refuse_state {
            return Err(StateError::Corrupt("refused".into()));
        }
        self.state.copy_from_slice(buffer);
        Ok(())
    }
}

/// Audio sink that journals every pair
pub struct RecordingAudio {
    pub journal: Journal,
}

impl AudioSink for RecordingAudio {
    fn deliver_sample(&mut self, left: i16, right: i16) {
        self.journal.borrow_mut().push(Event::Sample(left, right));
    }
}

/// Video sink that journals the frame shape and keeps a copy of the pixels
pub struct RecordingVideo {
    pub journal: Journal,
    pub last_frame: Vec<u16>,
}

impl RecordingVideo {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            last_frame: Vec::new(),
        }
    }
}

impl VideoSink for RecordingVideo {
    fn deliver_frame(&mut self, pixels: &[u16], width: usize, height: usize, pitch: usize) {
        self.last_frame = pixels.to_vec();
        self.journal.borrow_mut().push(Event::Frame {
            width,
            height,
            pitch,
        });
    }
}

/// Input source with a fixed set of held controls
pub struct ScriptedInput {
    pub journal: Journal,
    pub held: HashSet<(Player, Control)>,
}

impl ScriptedInput {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            held: HashSet::new(),
        }
    }

    pub fn hold(mut self, player: Player, control: Control) -> Self {
        self.held.insert((player, control));
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll_inputs(&mut self) {
        self.journal.borrow_mut().push(Event::Poll);
    }

    fn is_pressed(&self, player: Player, control: Control) -> bool {
        self.held.contains(&(player, control))
    }
}
