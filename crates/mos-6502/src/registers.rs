//! 6502 CPU registers.

use crate::Status;
use crate::flags::{I, U};

/// 6502 register set: accumulator, two index registers, stack pointer
/// (fixed to page $01), program counter, and status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer; the stack lives at $0100-$01FF.
    pub s: u8,
    /// Program counter.
    pub pc: u16,
    /// Processor status.
    pub p: Status,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Power-on state. PC is loaded from the reset vector separately,
    /// since that requires a bus.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: 0xFD,
            pc: 0,
            p: Status(U | I),
        }
    }

    /// Address of the current top-of-stack slot.
    #[must_use]
    pub const fn stack_addr(&self) -> u16 {
        0x0100 | (self.s as u16)
    }
}
