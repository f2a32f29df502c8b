//! CPU core trait.

use std::fmt;

use crate::Bus;

/// Fatal CPU condition.
///
/// The original hardware behaves unpredictably past this point, so the
/// run loop must stop cleanly and leave all register and video state
/// intact for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuFault {
    /// The decode table has no entry for the fetched byte.
    IllegalOpcode { opcode: u8, pc: u16 },
}

impl fmt::Display for CpuFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalOpcode { opcode, pc } => {
                write!(f, "illegal opcode ${opcode:02X} at ${pc:04X}")
            }
        }
    }
}

impl std::error::Error for CpuFault {}

/// A CPU core driven one instruction at a time.
///
/// The bus is passed in, not owned, so it can be shared with the other
/// chips; the bus never calls back into the CPU.
pub trait Cpu<B: Bus> {
    /// Execute one instruction and return its cycle cost.
    ///
    /// # Errors
    ///
    /// Returns `CpuFault::IllegalOpcode` when the fetched byte has no
    /// decode entry. The CPU state is left as it was after the fetch.
    fn step(&mut self, bus: &mut B) -> Result<u32, CpuFault>;

    /// Reset to power-on state, loading PC from the reset vector.
    fn reset(&mut self, bus: &mut B);

    /// Current program counter.
    fn pc(&self) -> u16;
}
