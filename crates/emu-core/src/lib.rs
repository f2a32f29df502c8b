//! Core traits and types for cycle-accurate emulation.
//!
//! The CPU is the clock master: it executes one instruction, reports the
//! cycle cost, and every other chip is advanced by exactly that many
//! cycles before the next instruction begins. No buffering, no reordering.

mod bus;
mod cpu;
mod tickable;

pub use bus::{Bus, SimpleBus};
pub use cpu::{Cpu, CpuFault};
pub use tickable::Tickable;
