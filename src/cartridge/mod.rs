// Cartridge module - Fixed-size cartridge ROM region
//
// The Vectrex maps up to 32 KiB of cartridge ROM. Loading copies an image
// into a zero-filled region; anything that does not fit is rejected before a
// single byte changes.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Size of the cartridge ROM region in bytes
pub const CARTRIDGE_CAPACITY: usize = 32 * 1024;

/// Cartridge file extensions accepted by the front-end
pub const CARTRIDGE_EXTENSIONS: [&str; 2] = ["bin", "vec"];

/// Errors that can occur while loading a cartridge image
#[derive(Debug)]
pub enum CartridgeError {
    /// Image contains no data
    Empty,

    /// Image does not fit in the cartridge region
    TooLarge { size: usize, capacity: usize },

    /// I/O error while reading the image
    Io(io::Error),
}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartridgeError::Empty => write!(f, "Cartridge image is empty"),
            CartridgeError::TooLarge { size, capacity } => write!(
                f,
                "Cartridge image is {} bytes, larger than the {} byte cartridge region",
                size, capacity
            ),
            CartridgeError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CartridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CartridgeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CartridgeError {
    fn from(e: io::Error) -> Self {
        CartridgeError::Io(e)
    }
}

/// Cartridge ROM region
///
/// Always `CARTRIDGE_CAPACITY` bytes long; bytes past the loaded image are
/// zero.
#[derive(Clone, PartialEq, Eq)]
pub struct Cartridge {
    rom: Box<[u8]>,
    /// Length of the loaded image, 0 when nothing is inserted
    image_len: usize,
}

impl Cartridge {
    /// Create an empty (all-zero) cartridge region
    pub fn new() -> Self {
        Self {
            rom: vec![0u8; CARTRIDGE_CAPACITY].into_boxed_slice(),
            image_len: 0,
        }
    }

    /// Check that an image can be loaded without touching the region
    pub fn validate(data: &[u8]) -> Result<(), CartridgeError> {
        if data.is_empty() {
            return Err(CartridgeError::Empty);
        }
        if data.len() > CARTRIDGE_CAPACITY {
            return Err(CartridgeError::TooLarge {
                size: data.len(),
                capacity: CARTRIDGE_CAPACITY,
            });
        }
        Ok(())
    }

    /// Replace the region contents with an image
    ///
    /// # Arguments
    /// * `data` - Raw cartridge image (1..=32768 bytes)
    ///
    /// # Returns
    /// Error if the image is empty or too large; the region is left unchanged
    pub fn load(&mut self, data: &[u8]) -> Result<(), CartridgeError> {
        Self::validate(data)?;

        self.rom.fill(0);
        self.rom[..data.len()].copy_from_slice(data);
        self.image_len = data.len();
        Ok(())
    }

    /// Zero-fill the region
    pub fn clear(&mut self) {
        self.rom.fill(0);
        self.image_len = 0;
    }

    /// Whether an image is inserted
    pub fn is_loaded(&self) -> bool {
        self.image_len > 0
    }

    /// Length of the loaded image
    pub fn image_len(&self) -> usize {
        self.image_len
    }

    /// Read a byte from the region
    ///
    /// Addresses wrap at the region size.
    #[inline]
    pub fn read(&self, address: u16) -> u8 {
        self.rom[address as usize % CARTRIDGE_CAPACITY]
    }

    /// The whole region
    pub fn as_slice(&self) -> &[u8] {
        &self.rom
    }

    /// Read an image from disk
    ///
    /// Validates the size but does not load it; pass the result to
    /// `Emulator::load_cartridge`.
    pub fn read_image<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, CartridgeError> {
        let path = path.as_ref();
        let data = fs::read(path)?;

        let known = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                CARTRIDGE_EXTENSIONS
                    .iter()
                    .any(|ext| e.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false);
        if !known {
            log::warn!(
                "{} does not have a .bin or .vec extension, loading anyway",
                path.display()
            );
        }

        Self::validate(&data)?;
        Ok(data)
    }
}

impl Default for Cartridge {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cartridge")
            .field("capacity", &CARTRIDGE_CAPACITY)
            .field("image_len", &self.image_len)
            .finish()
    }
}
