//! Debug disassembler.
//!
//! Renders one instruction as assembler text from the shared decode
//! table. Pure formatting - never touches emulated state.

use crate::opcodes::{Mode, OPCODES};

/// Disassemble the instruction starting at `bytes[0]`.
///
/// `address` is where the opcode lives, used to resolve branch targets.
/// The caller supplies three bytes; shorter instructions ignore the rest.
#[must_use]
pub fn disassemble(bytes: &[u8; 3], address: u16) -> String {
    let entry = OPCODES[bytes[0] as usize];
    let mnemonic = entry.op.mnemonic();
    let operand = u16::from(bytes[1]);
    let operand_word = u16::from_le_bytes([bytes[1], bytes[2]]);

    match entry.mode {
        Mode::Implied => mnemonic.to_string(),
        Mode::Accumulator => format!("{mnemonic} A"),
        Mode::Immediate => format!("{mnemonic} #${operand:02X}"),
        Mode::ZeroPage => format!("{mnemonic} ${operand:02X}"),
        Mode::ZeroPageX => format!("{mnemonic} ${operand:02X},X"),
        Mode::ZeroPageY => format!("{mnemonic} ${operand:02X},Y"),
        Mode::Absolute => format!("{mnemonic} ${operand_word:04X}"),
        Mode::AbsoluteX => format!("{mnemonic} ${operand_word:04X},X"),
        Mode::AbsoluteY => format!("{mnemonic} ${operand_word:04X},Y"),
        Mode::Indirect => format!("{mnemonic} (${operand_word:04X})"),
        Mode::IndirectX => format!("{mnemonic} (${operand:02X},X)"),
        Mode::IndirectY => format!("{mnemonic} (${operand:02X}),Y"),
        Mode::Relative => {
            let offset = bytes[1] as i8;
            let target = address.wrapping_add(2).wrapping_add(offset as u16);
            format!("{mnemonic} ${target:04X}")
        }
    }
}
