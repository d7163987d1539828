// Vectrex Emulator Library
// Vector display rasterization and the per-frame runner around an emulation core

// Public modules
pub mod audio;
pub mod cartridge;
pub mod demo;
pub mod display;
pub mod emulator;
pub mod input;
pub mod machine;
pub mod vector;

// Re-export main types for convenience
pub use audio::{AudioConverter, AudioSink, NullAudioSink};
#[cfg(feature = "audio")]
pub use audio::{AudioOutput, OutputConfig};
pub use cartridge::{Cartridge, CartridgeError};
pub use demo::TestPatternCore;
pub use display::{NullVideoSink, PixelBuffer, VideoSink, WindowConfig};
pub use emulator::{
    AvInfo, Emulator, EmulatorConfig, Region, SaveState, SaveStateError, SpeedMode, SystemInfo,
};
pub use input::{Control, ControllerState, InputSource, NoInput, Player, UnifiedInputHandler};
pub use machine::{StateError, VectorCore, CYCLES_PER_FRAME};
pub use vector::{BeamGeometry, DiscAnchor, DrawCommand, FrameCompositor, FrameStats};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_components() {
        let mut emulator = Emulator::new(TestPatternCore::new(), EmulatorConfig::default());
        let stats = emulator.run_frame(&mut NoInput, &mut NullAudioSink, &mut NullVideoSink);

        assert_eq!(stats.total(), 7);
        assert_eq!(stats.skipped, 1);
        assert!(emulator.pixels().lit_pixels() > 0);
    }
}
