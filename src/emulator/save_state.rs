// Save state functionality
//
// Slot files wrap the core's opaque state bytes in a small JSON envelope
// together with the beam settings and the cartridge they belong to.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::Emulator;
use crate::machine::{StateError, VectorCore};
use crate::vector::BeamGeometry;

/// Errors that can occur during save state operations
#[derive(Debug)]
pub enum SaveStateError {
    /// I/O error
    Io(io::Error),

    /// Serialization/deserialization error
    Serialization(serde_json::Error),

    /// Save state version mismatch
    VersionMismatch { expected: u32, found: u32 },

    /// Slot number outside the configured range
    InvalidSlot { slot: u8, slots: u8 },

    /// The core rejected the state bytes
    Core(StateError),
}

impl std::fmt::Display for SaveStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveStateError::Io(e) => write!(f, "I/O error: {}", e),
            SaveStateError::Serialization(e) => write!(f, "Serialization error: {}", e),
            SaveStateError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SaveStateError::InvalidSlot { slot, slots } => {
                write!(f, "Invalid slot {}: only {} slots available", slot, slots)
            }
            SaveStateError::Core(e) => write!(f, "Core state error: {}", e),
        }
    }
}

impl std::error::Error for SaveStateError {}

impl From<io::Error> for SaveStateError {
    fn from(e: io::Error) -> Self {
        SaveStateError::Io(e)
    }
}

impl From<serde_json::Error> for SaveStateError {
    fn from(e: serde_json::Error) -> Self {
        SaveStateError::Serialization(e)
    }
}

impl From<StateError> for SaveStateError {
    fn from(e: StateError) -> Self {
        SaveStateError::Core(e)
    }
}

/// Current save state format version
pub const SAVE_STATE_VERSION: u32 = 1;

/// Serialized emulator snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    /// Version number for compatibility checking
    version: u32,

    /// Timestamp when the save state was created
    timestamp: String,

    /// Cartridge file name the state was taken with
    cartridge_name: Option<String>,

    /// Beam settings at the time of saving
    beam: BeamGeometry,

    /// Opaque core state, exactly `state_size()` bytes
    core_state: Vec<u8>,
}

impl SaveState {
    /// Capture the current emulator state
    pub fn from_emulator<C: VectorCore>(emulator: &Emulator<C>) -> Result<Self, SaveStateError> {
        let cartridge_name = emulator
            .cartridge_path()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(|s| s.to_string());

        let mut core_state = vec![0u8; emulator.state_size()];
        emulator.serialize_state(&mut core_state)?;

        Ok(Self {
            version: SAVE_STATE_VERSION,
            timestamp: chrono::Local::now().to_rfc3339(),
            cartridge_name,
            beam: emulator.beam_geometry(),
            core_state,
        })
    }

    /// Restore this snapshot into an emulator
    ///
    /// Everything is validated before the core is touched; on error the
    /// emulator is unchanged.
    pub fn restore_to_emulator<C: VectorCore>(
        &self,
        emulator: &mut Emulator<C>,
    ) -> Result<(), SaveStateError> {
        if self.version != SAVE_STATE_VERSION {
            return Err(SaveStateError::VersionMismatch {
                expected: SAVE_STATE_VERSION,
                found: self.version,
            });
        }

        let current = emulator
            .cartridge_path()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str());
        if let (Some(saved), Some(current)) = (self.cartridge_name.as_deref(), current) {
            if saved != current {
                log::warn!(
                    "Save state was taken with {}, restoring into {}",
                    saved,
                    current
                );
            }
        }

        emulator.deserialize_state(&self.core_state)?;
        emulator.set_beam_geometry(self.beam);
        Ok(())
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn cartridge_name(&self) -> Option<&str> {
        self.cartridge_name.as_deref()
    }

    pub fn core_state(&self) -> &[u8] {
        &self.core_state
    }

    /// Save this snapshot to a slot file
    ///
    /// # Returns
    /// Path of the written file
    pub fn save_to_file(
        &self,
        save_root: &Path,
        slot: u8,
        cartridge_path: Option<&Path>,
    ) -> Result<PathBuf, SaveStateError> {
        let save_dir = save_directory(save_root, cartridge_path);
        fs::create_dir_all(&save_dir)?;

        let file_path = slot_path(&save_dir, slot);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&file_path, json)?;

        Ok(file_path)
    }

    /// Load a snapshot from a slot file
    pub fn load_from_file(
        save_root: &Path,
        slot: u8,
        cartridge_path: Option<&Path>,
    ) -> Result<Self, SaveStateError> {
        let file_path = slot_path(&save_directory(save_root, cartridge_path), slot);
        let json = fs::read_to_string(file_path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Check a slot number against the configured slot count
pub fn check_slot(slot: u8, slots: u8) -> Result<(), SaveStateError> {
    if slot < slots {
        Ok(())
    } else {
        Err(SaveStateError::InvalidSlot { slot, slots })
    }
}

/// Directory holding a cartridge's slots: `<root>/<cartridge-stem>/`
fn save_directory(save_root: &Path, cartridge_path: Option<&Path>) -> PathBuf {
    match cartridge_path.and_then(|p| p.file_stem()) {
        Some(stem) => save_root.join(stem),
        None => save_root.join("default"),
    }
}

fn slot_path(save_dir: &Path, slot: u8) -> PathBuf {
    save_dir.join(format!("slot_{}.state", slot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_state_error_display() {
        let err = SaveStateError::VersionMismatch {
            expected: 1,
            found: 2,
        };
        assert_eq!(err.to_string(), "Version mismatch: expected 1, found 2");

        let err = SaveStateError::InvalidSlot { slot: 12, slots: 10 };
        assert_eq!(err.to_string(), "Invalid slot 12: only 10 slots available");
    }

    #[test]
    fn test_save_state_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: SaveStateError = io_err.into();
        assert!(matches!(err, SaveStateError::Io(_)));
    }

    #[test]
    fn test_check_slot() {
        assert!(check_slot(0, 10).is_ok());
        assert!(check_slot(9, 10).is_ok());
        assert!(matches!(
            check_slot(10, 10),
            Err(SaveStateError::InvalidSlot { slot: 10, slots: 10 })
        ));
    }

    #[test]
    fn test_save_directory_with_cartridge() {
        let dir = save_directory(Path::new("saves"), Some(Path::new("/path/to/mine.vec")));
        assert_eq!(dir, PathBuf::from("saves/mine"));
    }

    #[test]
    fn test_save_directory_without_cartridge() {
        assert_eq!(
            save_directory(Path::new("saves"), None),
            PathBuf::from("saves/default")
        );
        assert_eq!(
            save_directory(Path::new("saves"), Some(Path::new("/"))),
            PathBuf::from("saves/default")
        );
    }

    #[test]
    fn test_file_round_trip() {
        let root = std::env::temp_dir().join("vecx_rs_save_state_unit_test");
        fs::remove_dir_all(&root).ok();

        let state = SaveState {
            version: SAVE_STATE_VERSION,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            cartridge_name: Some("mine.vec".to_string()),
            beam: BeamGeometry::new(2, 3),
            core_state: vec![1, 2, 3, 4],
        };

        let path = state
            .save_to_file(&root, 3, Some(Path::new("roms/mine.vec")))
            .unwrap();
        assert!(path.ends_with("mine/slot_3.state"));

        let loaded = SaveState::load_from_file(&root, 3, Some(Path::new("roms/mine.vec"))).unwrap();
        assert_eq!(loaded, state);

        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"cartridge_name\": \"mine.vec\""));

        fs::remove_dir_all(&root).ok();
    }
}
