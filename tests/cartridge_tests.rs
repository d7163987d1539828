// Cartridge loading integration tests

mod common;

use common::{journal, Event, ScriptedCore};
use std::fs;
use vecx_rs::cartridge::{CartridgeError, CARTRIDGE_CAPACITY};
use vecx_rs::emulator::{Emulator, EmulatorConfig};

fn emulator() -> (Emulator<ScriptedCore>, common::Journal) {
    let log = journal();
    let emulator = Emulator::new(ScriptedCore::new(log.clone()), EmulatorConfig::default());
    log.borrow_mut().clear();
    (emulator, log)
}

#[test]
fn test_empty_cartridge_rejected_without_reset() {
    let (mut emulator, log) = emulator();

    let result = emulator.load_cartridge(&[]);

    assert!(matches!(result, Err(CartridgeError::Empty)));
    assert!(log.borrow().is_empty());
    assert!(!emulator.cartridge().is_loaded());
}

#[test]
fn test_oversized_cartridge_rejected() {
    let (mut emulator, log) = emulator();
    emulator.load_cartridge(&[0x42; 16]).unwrap();
    log.borrow_mut().clear();

    let result = emulator.load_cartridge(&vec![0x99; CARTRIDGE_CAPACITY + 1]);

    assert!(matches!(result, Err(CartridgeError::TooLarge { .. })));
    assert!(log.borrow().is_empty());
    assert_eq!(emulator.cartridge().read(0), 0x42);
    assert_eq!(emulator.cartridge().image_len(), 16);
}

#[test]
fn test_full_size_cartridge_accepted() {
    let (mut emulator, _) = emulator();
    assert!(emulator
        .load_cartridge(&vec![0x01; CARTRIDGE_CAPACITY])
        .is_ok());
    assert_eq!(emulator.cartridge().image_len(), CARTRIDGE_CAPACITY);
}

#[test]
fn test_load_resets_core_with_new_image() {
    let (mut emulator, log) = emulator();

    emulator.load_cartridge(&[0xC8, 0x00]).unwrap();

    assert_eq!(*log.borrow(), vec![Event::Reset { first_byte: 0xC8 }]);
}

#[test]
fn test_shorter_image_zero_fills_remainder() {
    let (mut emulator, _) = emulator();
    emulator.load_cartridge(&[0xFF; 64]).unwrap();
    emulator.load_cartridge(&[0x11; 8]).unwrap();

    let region = emulator.cartridge().as_slice();
    assert!(region[..8].iter().all(|&b| b == 0x11));
    assert!(region[8..].iter().all(|&b| b == 0));
}

#[test]
fn test_unload_zeroes_region_and_resets() {
    let (mut emulator, log) = emulator();
    emulator.load_cartridge(&[0xAA; 32]).unwrap();
    log.borrow_mut().clear();

    emulator.unload_cartridge();

    assert!(emulator.cartridge().as_slice().iter().all(|&b| b == 0));
    assert_eq!(*log.borrow(), vec![Event::Reset { first_byte: 0 }]);
    assert!(emulator.cartridge_path().is_none());
}

#[test]
fn test_load_cartridge_file() {
    let dir = std::env::temp_dir().join("vecx_rs_cartridge_file_test");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("minestorm.bin");
    fs::write(&path, [0x67, 0x20, 0x47]).unwrap();

    let (mut emulator, log) = emulator();
    emulator.load_cartridge_file(&path).unwrap();

    assert_eq!(emulator.cartridge_path(), Some(path.as_path()));
    assert_eq!(emulator.cartridge().read(2), 0x47);
    assert_eq!(*log.borrow(), vec![Event::Reset { first_byte: 0x67 }]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_cartridge_file() {
    let (mut emulator, log) = emulator();
    let result = emulator.load_cartridge_file("/nonexistent/vecx_rs/cart.bin");

    assert!(matches!(result, Err(CartridgeError::Io(_))));
    assert!(log.borrow().is_empty());
}
