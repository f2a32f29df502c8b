//! 6502 processor status register (P).

/// Carry flag - set from bit 8 of an addition, the complement of bit 8 of
/// a subtraction, or the bit shifted out of a shift/rotate.
pub const C: u8 = 0x01;

/// Zero flag - set if the low 8 bits of a result are zero.
pub const Z: u8 = 0x02;

/// Interrupt disable.
pub const I: u8 = 0x04;

/// Decimal mode - selects packed-BCD arithmetic for ADC/SBC.
pub const D: u8 = 0x08;

/// Break flag - only meaningful in the byte pushed by BRK/PHP.
pub const B: u8 = 0x10;

/// Unused bit - always reads as 1.
pub const U: u8 = 0x20;

/// Overflow flag - carry-out XOR sign for add/subtract; bit 6 of the
/// operand for BIT.
pub const V: u8 = 0x40;

/// Negative flag - bit 7 of the result.
pub const N: u8 = 0x80;

/// Processor status register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status(pub u8);

impl Status {
    /// Raw value with the unused bit forced on.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self.0 | U
    }

    /// Replace the whole register; the unused bit stays set.
    pub fn set_byte(&mut self, value: u8) {
        self.0 = value | U;
    }

    /// Check if a flag is set.
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    /// Set or clear a flag based on a condition.
    pub fn assign(&mut self, flag: u8, condition: bool) {
        if condition {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    /// Update N and Z from a result byte.
    pub fn update_nz(&mut self, value: u8) {
        self.assign(N, value & 0x80 != 0);
        self.assign(Z, value == 0);
    }
}
