//! Cartridge ROM and bank switching.
//!
//! Plain cartridges are 2K or 4K and fill (or half-fill) the single
//! 4K window at $1000-$1FFF. 8K cartridges use the F8 scheme: two 4K
//! banks, selected by touching $1FF8 (bank 0) or $1FF9 (bank 1).

use std::error::Error;
use std::fmt;

/// Size of the cartridge window in the 6507 address space.
pub const BANK_SIZE: usize = 0x1000;

/// Rejected cartridge image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RomError {
    UnsupportedSize { size: usize },
}

impl fmt::Display for RomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSize { size } => {
                write!(f, "unsupported ROM size {size} bytes (expected 2K, 4K or 8K)")
            }
        }
    }
}

impl Error for RomError {}

/// A cartridge image, stored as one or two 4K banks.
#[derive(Debug)]
pub struct Cartridge {
    data: Vec<u8>,
    bank: usize,
    banked: bool,
}

impl Cartridge {
    /// Accepts 2K, 4K and 8K images. A 2K image occupies the upper
    /// half of the window; the lower half reads as zero.
    pub fn new(rom: &[u8]) -> Result<Self, RomError> {
        match rom.len() {
            0x800 => {
                let mut data = vec![0; BANK_SIZE];
                data[0x800..].copy_from_slice(rom);
                Ok(Self {
                    data,
                    bank: 0,
                    banked: false,
                })
            }
            0x1000 => Ok(Self {
                data: rom.to_vec(),
                bank: 0,
                banked: false,
            }),
            0x2000 => Ok(Self {
                data: rom.to_vec(),
                bank: 0,
                banked: true,
            }),
            size => Err(RomError::UnsupportedSize { size }),
        }
    }

    /// Read a byte from the active bank. Only the low 12 address bits
    /// are decoded.
    #[must_use]
    pub fn read(&self, address: u16) -> u8 {
        self.data[self.bank * BANK_SIZE + (address & 0x0FFF) as usize]
    }

    /// Select an F8 bank. Returns true when the cartridge actually
    /// switched; plain 2K/4K cartridges ignore the strobe.
    pub fn select_bank(&mut self, bank: usize) -> bool {
        if self.banked {
            self.bank = bank;
            true
        } else {
            false
        }
    }

    /// Active bank index.
    #[must_use]
    pub fn bank(&self) -> usize {
        self.bank
    }
}
