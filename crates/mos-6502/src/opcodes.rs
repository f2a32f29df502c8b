//! The 6502 decode table.
//!
//! One immutable 256-entry table maps each opcode byte to its operation,
//! addressing mode, and base cycle cost. Execution and the disassembler
//! both read from it; holes are `Op::Illegal` and fault the CPU.
//!
//! Base cycle costs are the documented NMOS values. Two penalties are
//! added at execution time and are not in the table: +1 for a taken
//! branch that lands on a different page than the following instruction,
//! and +1 for an indexed operand fetch that crosses a page boundary
//! (read instructions only; stores and read-modify-writes already carry
//! the fixed extra cycle in their base cost).

/// Instruction operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// No documented instruction at this opcode.
    Illegal,
}

impl Op {
    /// Three-letter assembler mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
            Self::Illegal => "???",
        }
    }
}

/// Addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No operand (CLC, RTS, ...).
    Implied,
    /// Operates on the accumulator (ASL A, ...).
    Accumulator,
    /// `#$nn` - literal byte.
    Immediate,
    /// `$nn` - page-zero address.
    ZeroPage,
    /// `$nn,X` - page-zero address plus X, wrapping within page zero.
    ZeroPageX,
    /// `$nn,Y` - page-zero address plus Y, wrapping within page zero.
    ZeroPageY,
    /// `$nnnn`.
    Absolute,
    /// `$nnnn,X`.
    AbsoluteX,
    /// `$nnnn,Y`.
    AbsoluteY,
    /// `($nnnn)` - JMP only, with the NMOS page-wrap bug.
    Indirect,
    /// `($nn,X)` - pointer in page zero indexed by X, then dereferenced.
    IndirectX,
    /// `($nn),Y` - page-zero pointer dereferenced, then indexed by Y.
    IndirectY,
    /// Signed 8-bit branch displacement.
    Relative,
}

impl Mode {
    /// Total instruction length in bytes, opcode included.
    #[must_use]
    pub const fn length(self) -> u16 {
        match self {
            Self::Implied | Self::Accumulator => 1,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::IndirectX
            | Self::IndirectY
            | Self::Relative => 2,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 3,
        }
    }
}

/// One decode table entry.
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    pub op: Op,
    pub mode: Mode,
    /// Base cycle cost, before branch/page-cross penalties.
    pub cycles: u8,
}

impl Opcode {
    const ILLEGAL: Self = Self::new(Op::Illegal, Mode::Implied, 0);

    const fn new(op: Op, mode: Mode, cycles: u8) -> Self {
        Self { op, mode, cycles }
    }
}

/// The decode table, indexed by opcode byte.
pub const OPCODES: [Opcode; 256] = {
    use Mode::{
        Absolute, AbsoluteX, AbsoluteY, Accumulator, Immediate, Implied, Indirect, IndirectX,
        IndirectY, Relative, ZeroPage, ZeroPageX, ZeroPageY,
    };

    let mut t = [Opcode::ILLEGAL; 256];

    t[0x00] = Opcode::new(Op::Brk, Implied, 7);
    t[0x01] = Opcode::new(Op::Ora, IndirectX, 6);
    t[0x05] = Opcode::new(Op::Ora, ZeroPage, 3);
    t[0x06] = Opcode::new(Op::Asl, ZeroPage, 5);
    t[0x08] = Opcode::new(Op::Php, Implied, 3);
    t[0x09] = Opcode::new(Op::Ora, Immediate, 2);
    t[0x0A] = Opcode::new(Op::Asl, Accumulator, 2);
    t[0x0D] = Opcode::new(Op::Ora, Absolute, 4);
    t[0x0E] = Opcode::new(Op::Asl, Absolute, 6);

    t[0x10] = Opcode::new(Op::Bpl, Relative, 2);
    t[0x11] = Opcode::new(Op::Ora, IndirectY, 5);
    t[0x15] = Opcode::new(Op::Ora, ZeroPageX, 4);
    t[0x16] = Opcode::new(Op::Asl, ZeroPageX, 6);
    t[0x18] = Opcode::new(Op::Clc, Implied, 2);
    t[0x19] = Opcode::new(Op::Ora, AbsoluteY, 4);
    t[0x1D] = Opcode::new(Op::Ora, AbsoluteX, 4);
    t[0x1E] = Opcode::new(Op::Asl, AbsoluteX, 7);

    t[0x20] = Opcode::new(Op::Jsr, Absolute, 6);
    t[0x21] = Opcode::new(Op::And, IndirectX, 6);
    t[0x24] = Opcode::new(Op::Bit, ZeroPage, 3);
    t[0x25] = Opcode::new(Op::And, ZeroPage, 3);
    t[0x26] = Opcode::new(Op::Rol, ZeroPage, 5);
    t[0x28] = Opcode::new(Op::Plp, Implied, 4);
    t[0x29] = Opcode::new(Op::And, Immediate, 2);
    t[0x2A] = Opcode::new(Op::Rol, Accumulator, 2);
    t[0x2C] = Opcode::new(Op::Bit, Absolute, 4);
    t[0x2D] = Opcode::new(Op::And, Absolute, 4);
    t[0x2E] = Opcode::new(Op::Rol, Absolute, 6);

    t[0x30] = Opcode::new(Op::Bmi, Relative, 2);
    t[0x31] = Opcode::new(Op::And, IndirectY, 5);
    t[0x35] = Opcode::new(Op::And, ZeroPageX, 4);
    t[0x36] = Opcode::new(Op::Rol, ZeroPageX, 6);
    t[0x38] = Opcode::new(Op::Sec, Implied, 2);
    t[0x39] = Opcode::new(Op::And, AbsoluteY, 4);
    t[0x3D] = Opcode::new(Op::And, AbsoluteX, 4);
    t[0x3E] = Opcode::new(Op::Rol, AbsoluteX, 7);

    t[0x40] = Opcode::new(Op::Rti, Implied, 6);
    t[0x41] = Opcode::new(Op::Eor, IndirectX, 6);
    t[0x45] = Opcode::new(Op::Eor, ZeroPage, 3);
    t[0x46] = Opcode::new(Op::Lsr, ZeroPage, 5);
    t[0x48] = Opcode::new(Op::Pha, Implied, 3);
    t[0x49] = Opcode::new(Op::Eor, Immediate, 2);
    t[0x4A] = Opcode::new(Op::Lsr, Accumulator, 2);
    t[0x4C] = Opcode::new(Op::Jmp, Absolute, 3);
    t[0x4D] = Opcode::new(Op::Eor, Absolute, 4);
    t[0x4E] = Opcode::new(Op::Lsr, Absolute, 6);

    t[0x50] = Opcode::new(Op::Bvc, Relative, 2);
    t[0x51] = Opcode::new(Op::Eor, IndirectY, 5);
    t[0x55] = Opcode::new(Op::Eor, ZeroPageX, 4);
    t[0x56] = Opcode::new(Op::Lsr, ZeroPageX, 6);
    t[0x58] = Opcode::new(Op::Cli, Implied, 2);
    t[0x59] = Opcode::new(Op::Eor, AbsoluteY, 4);
    t[0x5D] = Opcode::new(Op::Eor, AbsoluteX, 4);
    t[0x5E] = Opcode::new(Op::Lsr, AbsoluteX, 7);

    t[0x60] = Opcode::new(Op::Rts, Implied, 6);
    t[0x61] = Opcode::new(Op::Adc, IndirectX, 6);
    t[0x65] = Opcode::new(Op::Adc, ZeroPage, 3);
    t[0x66] = Opcode::new(Op::Ror, ZeroPage, 5);
    t[0x68] = Opcode::new(Op::Pla, Implied, 4);
    t[0x69] = Opcode::new(Op::Adc, Immediate, 2);
    t[0x6A] = Opcode::new(Op::Ror, Accumulator, 2);
    t[0x6C] = Opcode::new(Op::Jmp, Indirect, 5);
    t[0x6D] = Opcode::new(Op::Adc, Absolute, 4);
    t[0x6E] = Opcode::new(Op::Ror, Absolute, 6);

    t[0x70] = Opcode::new(Op::Bvs, Relative, 2);
    t[0x71] = Opcode::new(Op::Adc, IndirectY, 5);
    t[0x75] = Opcode::new(Op::Adc, ZeroPageX, 4);
    t[0x76] = Opcode::new(Op::Ror, ZeroPageX, 6);
    t[0x78] = Opcode::new(Op::Sei, Implied, 2);
    t[0x79] = Opcode::new(Op::Adc, AbsoluteY, 4);
    t[0x7D] = Opcode::new(Op::Adc, AbsoluteX, 4);
    t[0x7E] = Opcode::new(Op::Ror, AbsoluteX, 7);

    t[0x81] = Opcode::new(Op::Sta, IndirectX, 6);
    t[0x84] = Opcode::new(Op::Sty, ZeroPage, 3);
    t[0x85] = Opcode::new(Op::Sta, ZeroPage, 3);
    t[0x86] = Opcode::new(Op::Stx, ZeroPage, 3);
    t[0x88] = Opcode::new(Op::Dey, Implied, 2);
    t[0x8A] = Opcode::new(Op::Txa, Implied, 2);
    t[0x8C] = Opcode::new(Op::Sty, Absolute, 4);
    t[0x8D] = Opcode::new(Op::Sta, Absolute, 4);
    t[0x8E] = Opcode::new(Op::Stx, Absolute, 4);

    t[0x90] = Opcode::new(Op::Bcc, Relative, 2);
    t[0x91] = Opcode::new(Op::Sta, IndirectY, 6);
    t[0x94] = Opcode::new(Op::Sty, ZeroPageX, 4);
    t[0x95] = Opcode::new(Op::Sta, ZeroPageX, 4);
    t[0x96] = Opcode::new(Op::Stx, ZeroPageY, 4);
    t[0x98] = Opcode::new(Op::Tya, Implied, 2);
    t[0x99] = Opcode::new(Op::Sta, AbsoluteY, 5);
    t[0x9A] = Opcode::new(Op::Txs, Implied, 2);
    t[0x9D] = Opcode::new(Op::Sta, AbsoluteX, 5);

    t[0xA0] = Opcode::new(Op::Ldy, Immediate, 2);
    t[0xA1] = Opcode::new(Op::Lda, IndirectX, 6);
    t[0xA2] = Opcode::new(Op::Ldx, Immediate, 2);
    t[0xA4] = Opcode::new(Op::Ldy, ZeroPage, 3);
    t[0xA5] = Opcode::new(Op::Lda, ZeroPage, 3);
    t[0xA6] = Opcode::new(Op::Ldx, ZeroPage, 3);
    t[0xA8] = Opcode::new(Op::Tay, Implied, 2);
    t[0xA9] = Opcode::new(Op::Lda, Immediate, 2);
    t[0xAA] = Opcode::new(Op::Tax, Implied, 2);
    t[0xAC] = Opcode::new(Op::Ldy, Absolute, 4);
    t[0xAD] = Opcode::new(Op::Lda, Absolute, 4);
    t[0xAE] = Opcode::new(Op::Ldx, Absolute, 4);

    t[0xB0] = Opcode::new(Op::Bcs, Relative, 2);
    t[0xB1] = Opcode::new(Op::Lda, IndirectY, 5);
    t[0xB4] = Opcode::new(Op::Ldy, ZeroPageX, 4);
    t[0xB5] = Opcode::new(Op::Lda, ZeroPageX, 4);
    t[0xB6] = Opcode::new(Op::Ldx, ZeroPageY, 4);
    t[0xB8] = Opcode::new(Op::Clv, Implied, 2);
    t[0xB9] = Opcode::new(Op::Lda, AbsoluteY, 4);
    t[0xBA] = Opcode::new(Op::Tsx, Implied, 2);
    t[0xBC] = Opcode::new(Op::Ldy, AbsoluteX, 4);
    t[0xBD] = Opcode::new(Op::Lda, AbsoluteX, 4);
    t[0xBE] = Opcode::new(Op::Ldx, AbsoluteY, 4);

    t[0xC0] = Opcode::new(Op::Cpy, Immediate, 2);
    t[0xC1] = Opcode::new(Op::Cmp, IndirectX, 6);
    t[0xC4] = Opcode::new(Op::Cpy, ZeroPage, 3);
    t[0xC5] = Opcode::new(Op::Cmp, ZeroPage, 3);
    t[0xC6] = Opcode::new(Op::Dec, ZeroPage, 5);
    t[0xC8] = Opcode::new(Op::Iny, Implied, 2);
    t[0xC9] = Opcode::new(Op::Cmp, Immediate, 2);
    t[0xCA] = Opcode::new(Op::Dex, Implied, 2);
    t[0xCC] = Opcode::new(Op::Cpy, Absolute, 4);
    t[0xCD] = Opcode::new(Op::Cmp, Absolute, 4);
    t[0xCE] = Opcode::new(Op::Dec, Absolute, 6);

    t[0xD0] = Opcode::new(Op::Bne, Relative, 2);
    t[0xD1] = Opcode::new(Op::Cmp, IndirectY, 5);
    t[0xD5] = Opcode::new(Op::Cmp, ZeroPageX, 4);
    t[0xD6] = Opcode::new(Op::Dec, ZeroPageX, 6);
    t[0xD8] = Opcode::new(Op::Cld, Implied, 2);
    t[0xD9] = Opcode::new(Op::Cmp, AbsoluteY, 4);
    t[0xDD] = Opcode::new(Op::Cmp, AbsoluteX, 4);
    t[0xDE] = Opcode::new(Op::Dec, AbsoluteX, 7);

    t[0xE0] = Opcode::new(Op::Cpx, Immediate, 2);
    t[0xE1] = Opcode::new(Op::Sbc, IndirectX, 6);
    t[0xE4] = Opcode::new(Op::Cpx, ZeroPage, 3);
    t[0xE5] = Opcode::new(Op::Sbc, ZeroPage, 3);
    t[0xE6] = Opcode::new(Op::Inc, ZeroPage, 5);
    t[0xE8] = Opcode::new(Op::Inx, Implied, 2);
    t[0xE9] = Opcode::new(Op::Sbc, Immediate, 2);
    t[0xEA] = Opcode::new(Op::Nop, Implied, 2);
    t[0xEC] = Opcode::new(Op::Cpx, Absolute, 4);
    t[0xED] = Opcode::new(Op::Sbc, Absolute, 4);
    t[0xEE] = Opcode::new(Op::Inc, Absolute, 6);

    t[0xF0] = Opcode::new(Op::Beq, Relative, 2);
    t[0xF1] = Opcode::new(Op::Sbc, IndirectY, 5);
    t[0xF5] = Opcode::new(Op::Sbc, ZeroPageX, 4);
    t[0xF6] = Opcode::new(Op::Inc, ZeroPageX, 6);
    t[0xF8] = Opcode::new(Op::Sed, Implied, 2);
    t[0xF9] = Opcode::new(Op::Sbc, AbsoluteY, 4);
    t[0xFD] = Opcode::new(Op::Sbc, AbsoluteX, 4);
    t[0xFE] = Opcode::new(Op::Inc, AbsoluteX, 7);

    t
};
