//! Memory and I/O bus interface.

/// Memory and I/O bus interface.
///
/// Components access memory and peripherals through this trait. The bus
/// handles address decoding and routing to the appropriate device.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);

    /// Read a 16-bit little-endian word as two consecutive byte reads.
    fn read_word(&mut self, address: u16) -> u16 {
        let low = self.read(address);
        let high = self.read(address.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }
}

/// A flat 64 KB RAM bus with no decode logic, for unit tests.
pub struct SimpleBus {
    memory: Box<[u8; 0x1_0000]>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            memory: Box::new([0; 0x1_0000]),
        }
    }

    /// Copy a program image into memory starting at `address`.
    pub fn load(&mut self, address: u16, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.memory[address as usize + i] = byte;
        }
    }

    /// Read without going through the bus trait (no `&mut` needed).
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.memory[address as usize]
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }
}
