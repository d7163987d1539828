// Save state integration tests
//
// Slot files are written under a per-test temporary directory.

mod common;

use common::{journal, ScriptedCore};
use std::fs;
use std::path::PathBuf;
use vecx_rs::emulator::{Emulator, EmulatorConfig, SaveStateError};
use vecx_rs::machine::StateError;
use vecx_rs::vector::{BeamGeometry, DiscAnchor};

fn emulator_in(name: &str) -> (Emulator<ScriptedCore>, PathBuf) {
    let dir = std::env::temp_dir().join(format!("vecx_rs_save_state_{}", name));
    fs::remove_dir_all(&dir).ok();

    let mut config = EmulatorConfig::default();
    config.save_state.save_directory = dir.clone();
    config.save_state.slots = 4;

    let emulator = Emulator::new(ScriptedCore::new(journal()), config);
    (emulator, dir)
}

#[test]
fn test_save_and_load_slot() {
    let (mut emulator, dir) = emulator_in("round_trip");
    emulator.core_mut().state = vec![1, 2, 3, 4, 5, 6, 7, 8];

    let path = emulator.save_state(2).unwrap();
    assert!(path.ends_with("default/slot_2.state"));

    emulator.core_mut().state = vec![0; 8];
    emulator.load_state(2).unwrap();
    assert_eq!(emulator.core().state, vec![1, 2, 3, 4, 5, 6, 7, 8]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_quick_save_uses_slot_zero() {
    let (mut emulator, dir) = emulator_in("quick");
    emulator.core_mut().state = vec![9; 8];

    let path = emulator.quick_save().unwrap();
    assert!(path.ends_with("slot_0.state"));

    emulator.core_mut().state = vec![0; 8];
    emulator.quick_load().unwrap();
    assert_eq!(emulator.core().state, vec![9; 8]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_beam_geometry_restored() {
    let (mut emulator, dir) = emulator_in("beam");
    let saved = BeamGeometry::new(3, 2).with_anchor(DiscAnchor::Center);
    emulator.set_beam_geometry(saved);
    emulator.save_state(1).unwrap();

    emulator.set_beam_geometry(BeamGeometry::default());
    emulator.load_state(1).unwrap();
    assert_eq!(emulator.beam_geometry(), saved);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_slot_out_of_range() {
    let (mut emulator, dir) = emulator_in("slot_range");

    assert!(matches!(
        emulator.save_state(4),
        Err(SaveStateError::InvalidSlot { slot: 4, slots: 4 })
    ));
    assert!(matches!(
        emulator.load_state(7),
        Err(SaveStateError::InvalidSlot { .. })
    ));
    assert!(!dir.exists());
}

#[test]
fn test_missing_slot_file() {
    let (mut emulator, _) = emulator_in("missing");
    assert!(matches!(emulator.load_state(3), Err(SaveStateError::Io(_))));
}

#[test]
fn test_state_size_change_rejected() {
    let (mut emulator, dir) = emulator_in("size");
    emulator.save_state(0).unwrap();

    emulator.core_mut().state = vec![5; 4];
    let result = emulator.load_state(0);

    assert!(matches!(
        result,
        Err(SaveStateError::Core(StateError::SizeMismatch {
            expected: 4,
            found: 8
        }))
    ));
    assert_eq!(emulator.core().state, vec![5; 4]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_refused_state_leaves_core_and_beam() {
    let (mut emulator, dir) = emulator_in("refused");
    emulator.set_beam_geometry(BeamGeometry::new(4, 4));
    emulator.save_state(0).unwrap();

    emulator.set_beam_geometry(BeamGeometry::default());
    emulator.core_mut().state = vec![7; 8];
    emulator.core_mut().refuse_state = true;

    assert!(matches!(
        emulator.load_state(0),
        Err(SaveStateError::Core(StateError::Corrupt(_)))
    ));
    assert_eq!(emulator.core().state, vec![7; 8]);
    assert_eq!(emulator.beam_geometry(), BeamGeometry::default());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_version_mismatch_rejected() {
    let (mut emulator, dir) = emulator_in("version");
    let path = emulator.save_state(0).unwrap();

    let json = fs::read_to_string(&path).unwrap();
    fs::write(&path, json.replace("\"version\": 1", "\"version\": 99")).unwrap();

    assert!(matches!(
        emulator.load_state(0),
        Err(SaveStateError::VersionMismatch {
            expected: 1,
            found: 99
        })
    ));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_garbled_file_rejected() {
    let (mut emulator, dir) = emulator_in("garbled");
    let path = emulator.save_state(0).unwrap();
    fs::write(&path, "not json").unwrap();

    assert!(matches!(
        emulator.load_state(0),
        Err(SaveStateError::Serialization(_))
    ));

    fs::remove_dir_all(&dir).ok();
}
