//! MOS 6502 CPU emulator.
//!
//! Instruction-stepped: `step()` executes one whole instruction against
//! the bus and returns its cycle cost, including the taken-branch and
//! page-crossing penalties. The driving loop feeds that cost to the rest
//! of the machine so video and timer chips stay in lockstep.
//!
//! Only documented opcodes are implemented; fetching anything else is a
//! fatal [`CpuFault`] (the 2600-era software this core targets never
//! relies on undocumented opcodes, and past them real silicon behavior
//! is anyone's guess). Interrupt lines are not modeled - BRK/RTI keep
//! their full stack discipline, but nothing ever pulls IRQ or NMI.

mod addressing;
mod disasm;
pub mod flags;
mod opcodes;
mod registers;

pub use disasm::disassemble;
pub use emu_core::{Cpu, CpuFault};
pub use flags::Status;
pub use opcodes::{Mode, Op, Opcode, OPCODES};
pub use registers::Registers;

use emu_core::Bus;
use flags::{B, C, D, I, N, V, Z};
use opcodes::Mode as M;

/// The MOS 6502 CPU.
pub struct Mos6502 {
    /// CPU registers.
    pub regs: Registers,
    /// Cycles executed since reset.
    total_cycles: u64,
    /// Instructions executed since reset.
    total_instructions: u64,
}

impl Default for Mos6502 {
    fn default() -> Self {
        Self::new()
    }
}

impl Mos6502 {
    /// Create a CPU in power-on state. PC is undefined until `reset`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            total_cycles: 0,
            total_instructions: 0,
        }
    }

    #[must_use]
    pub const fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    #[must_use]
    pub const fn total_instructions(&self) -> u64 {
        self.total_instructions
    }

    /// Multi-line register snapshot for diagnostics.
    #[must_use]
    pub fn dump(&self) -> String {
        let p = self.regs.p;
        format!(
            " PC: ${:04X}  S: ${:02X}  A: ${:02X}  X: ${:02X}  Y: ${:02X}\n \
             N={} V={} B={} D={} I={} Z={} C={}\n \
             instructions={} cycles={}",
            self.regs.pc,
            self.regs.s,
            self.regs.a,
            self.regs.x,
            self.regs.y,
            u8::from(p.is_set(N)),
            u8::from(p.is_set(V)),
            u8::from(p.is_set(B)),
            u8::from(p.is_set(D)),
            u8::from(p.is_set(I)),
            u8::from(p.is_set(Z)),
            u8::from(p.is_set(C)),
            self.total_instructions,
            self.total_cycles,
        )
    }

    // =====================================================================
    // Execution
    // =====================================================================

    fn execute(&mut self, bus: &mut impl Bus, entry: Opcode) -> u32 {
        let base = u32::from(entry.cycles);

        match entry.op {
            // Loads and stores
            Op::Lda => {
                let (value, crossed) = self.read_operand(bus, entry.mode);
                self.regs.a = value;
                self.regs.p.update_nz(value);
                base + u32::from(crossed)
            }
            Op::Ldx => {
                let (value, crossed) = self.read_operand(bus, entry.mode);
                self.regs.x = value;
                self.regs.p.update_nz(value);
                base + u32::from(crossed)
            }
            Op::Ldy => {
                let (value, crossed) = self.read_operand(bus, entry.mode);
                self.regs.y = value;
                self.regs.p.update_nz(value);
                base + u32::from(crossed)
            }
            Op::Sta => self.store(bus, entry, self.regs.a),
            Op::Stx => self.store(bus, entry, self.regs.x),
            Op::Sty => self.store(bus, entry, self.regs.y),

            // Arithmetic and logic
            Op::Adc => {
                let (value, crossed) = self.read_operand(bus, entry.mode);
                self.adc(value);
                base + u32::from(crossed)
            }
            Op::Sbc => {
                let (value, crossed) = self.read_operand(bus, entry.mode);
                self.sbc(value);
                base + u32::from(crossed)
            }
            Op::And => {
                let (value, crossed) = self.read_operand(bus, entry.mode);
                self.regs.a &= value;
                self.regs.p.update_nz(self.regs.a);
                base + u32::from(crossed)
            }
            Op::Ora => {
                let (value, crossed) = self.read_operand(bus, entry.mode);
                self.regs.a |= value;
                self.regs.p.update_nz(self.regs.a);
                base + u32::from(crossed)
            }
            Op::Eor => {
                let (value, crossed) = self.read_operand(bus, entry.mode);
                self.regs.a ^= value;
                self.regs.p.update_nz(self.regs.a);
                base + u32::from(crossed)
            }
            Op::Cmp => {
                let (value, crossed) = self.read_operand(bus, entry.mode);
                self.compare(self.regs.a, value);
                base + u32::from(crossed)
            }
            Op::Cpx => {
                let (value, crossed) = self.read_operand(bus, entry.mode);
                self.compare(self.regs.x, value);
                base + u32::from(crossed)
            }
            Op::Cpy => {
                let (value, crossed) = self.read_operand(bus, entry.mode);
                self.compare(self.regs.y, value);
                base + u32::from(crossed)
            }
            Op::Bit => {
                let (value, _) = self.read_operand(bus, entry.mode);
                self.regs.p.assign(Z, self.regs.a & value == 0);
                self.regs.p.assign(N, value & 0x80 != 0);
                self.regs.p.assign(V, value & 0x40 != 0);
                base
            }

            // Shifts, rotates, increments - read-modify-write
            Op::Asl => self.rmw(bus, entry, Self::asl),
            Op::Lsr => self.rmw(bus, entry, Self::lsr),
            Op::Rol => self.rmw(bus, entry, Self::rol),
            Op::Ror => self.rmw(bus, entry, Self::ror),
            Op::Inc => self.rmw(bus, entry, |cpu, v| {
                let result = v.wrapping_add(1);
                cpu.regs.p.update_nz(result);
                result
            }),
            Op::Dec => self.rmw(bus, entry, |cpu, v| {
                let result = v.wrapping_sub(1);
                cpu.regs.p.update_nz(result);
                result
            }),

            // Register increments and transfers
            Op::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.update_nz(self.regs.x);
                base
            }
            Op::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.update_nz(self.regs.y);
                base
            }
            Op::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.x);
                base
            }
            Op::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.y);
                base
            }
            Op::Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.update_nz(self.regs.x);
                base
            }
            Op::Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.update_nz(self.regs.y);
                base
            }
            Op::Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.update_nz(self.regs.a);
                base
            }
            Op::Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.update_nz(self.regs.a);
                base
            }
            Op::Tsx => {
                self.regs.x = self.regs.s;
                self.regs.p.update_nz(self.regs.x);
                base
            }
            // TXS does not touch flags.
            Op::Txs => {
                self.regs.s = self.regs.x;
                base
            }

            // Branches
            Op::Bcc => self.branch(bus, !self.regs.p.is_set(C)),
            Op::Bcs => self.branch(bus, self.regs.p.is_set(C)),
            Op::Bne => self.branch(bus, !self.regs.p.is_set(Z)),
            Op::Beq => self.branch(bus, self.regs.p.is_set(Z)),
            Op::Bpl => self.branch(bus, !self.regs.p.is_set(N)),
            Op::Bmi => self.branch(bus, self.regs.p.is_set(N)),
            Op::Bvc => self.branch(bus, !self.regs.p.is_set(V)),
            Op::Bvs => self.branch(bus, self.regs.p.is_set(V)),

            // Jumps and subroutines
            Op::Jmp => {
                let target = self.fetch_word(bus);
                self.regs.pc = if matches!(entry.mode, M::Indirect) {
                    Self::read_word_page_bug(bus, target)
                } else {
                    target
                };
                base
            }
            Op::Jsr => {
                let target = self.fetch_word(bus);
                let ret = self.regs.pc.wrapping_sub(1);
                self.push_word(bus, ret);
                self.regs.pc = target;
                base
            }
            Op::Rts => {
                self.regs.pc = self.pull_word(bus).wrapping_add(1);
                base
            }

            // BRK/RTI keep the real stack discipline even though no
            // interrupt lines exist: return address skips the padding
            // byte, pushed status has B set, RTI restores everything.
            Op::Brk => {
                let ret = self.regs.pc.wrapping_add(1);
                self.push_word(bus, ret);
                self.push(bus, self.regs.p.to_byte() | B);
                self.regs.p.assign(I, true);
                self.regs.pc = bus.read_word(0xFFFE);
                base
            }
            Op::Rti => {
                let p = self.pull(bus);
                self.regs.p.set_byte(p);
                self.regs.pc = self.pull_word(bus);
                base
            }

            // Stack pushes and pulls
            Op::Pha => {
                self.push(bus, self.regs.a);
                base
            }
            Op::Php => {
                self.push(bus, self.regs.p.to_byte() | B);
                base
            }
            Op::Pla => {
                self.regs.a = self.pull(bus);
                self.regs.p.update_nz(self.regs.a);
                base
            }
            Op::Plp => {
                let p = self.pull(bus);
                self.regs.p.set_byte(p);
                base
            }

            // Flag operations
            Op::Clc => {
                self.regs.p.assign(C, false);
                base
            }
            Op::Sec => {
                self.regs.p.assign(C, true);
                base
            }
            Op::Cli => {
                self.regs.p.assign(I, false);
                base
            }
            Op::Sei => {
                self.regs.p.assign(I, true);
                base
            }
            Op::Cld => {
                self.regs.p.assign(D, false);
                base
            }
            Op::Sed => {
                self.regs.p.assign(D, true);
                base
            }
            Op::Clv => {
                self.regs.p.assign(V, false);
                base
            }

            Op::Nop => base,

            // step() rejects illegal opcodes before dispatch.
            Op::Illegal => unreachable!("illegal opcode reached execute"),
        }
    }

    /// Read a memory operand, reporting any page-cross penalty.
    fn read_operand(&mut self, bus: &mut impl Bus, mode: Mode) -> (u8, bool) {
        let (addr, crossed) = self.operand_addr(bus, mode);
        (bus.read(addr), crossed)
    }

    fn store(&mut self, bus: &mut impl Bus, entry: Opcode, value: u8) -> u32 {
        let (addr, _) = self.operand_addr(bus, entry.mode);
        bus.write(addr, value);
        u32::from(entry.cycles)
    }

    /// Read-modify-write, or in place on the accumulator.
    fn rmw(&mut self, bus: &mut impl Bus, entry: Opcode, f: fn(&mut Self, u8) -> u8) -> u32 {
        if matches!(entry.mode, M::Accumulator) {
            self.regs.a = f(self, self.regs.a);
        } else {
            let (addr, _) = self.operand_addr(bus, entry.mode);
            let value = bus.read(addr);
            let result = f(self, value);
            bus.write(addr, result);
        }
        u32::from(entry.cycles)
    }

    /// Conditional relative branch: 2 cycles, +1 taken, +1 if the target
    /// is on a different page than the following instruction.
    fn branch(&mut self, bus: &mut impl Bus, taken: bool) -> u32 {
        let offset = self.fetch(bus) as i8;
        if !taken {
            return 2;
        }
        let next = self.regs.pc;
        self.regs.pc = next.wrapping_add(offset as u16);
        if addressing::crossed_page(next, self.regs.pc) {
            4
        } else {
            3
        }
    }

    // =====================================================================
    // ALU
    // =====================================================================

    fn adc(&mut self, value: u8) {
        if self.regs.p.is_set(D) {
            self.adc_decimal(value);
        } else {
            self.adc_binary(value);
        }
    }

    fn adc_binary(&mut self, value: u8) {
        let a = u16::from(self.regs.a);
        let v = u16::from(value);
        let c = u16::from(self.regs.p.is_set(C));

        let result = a + v + c;
        let result8 = result as u8;

        self.regs.p.assign(C, result > 0xFF);
        self.regs
            .p
            .assign(V, (self.regs.a ^ result8) & (value ^ result8) & 0x80 != 0);
        self.regs.p.update_nz(result8);
        self.regs.a = result8;
    }

    /// Packed-BCD add with per-nibble carry propagation. Z, N, and V
    /// come from the intermediate binary result, matching NMOS silicon.
    fn adc_decimal(&mut self, value: u8) {
        let a = u16::from(self.regs.a);
        let v = u16::from(value);
        let c = u16::from(self.regs.p.is_set(C));

        let mut low = (a & 0x0F) + (v & 0x0F) + c;
        if low > 9 {
            low += 6;
        }

        let mut high = (a >> 4) + (v >> 4) + u16::from(low > 0x0F);

        let binary = (a + v + c) as u8;
        self.regs.p.assign(Z, binary == 0);
        self.regs.p.assign(N, high & 0x08 != 0);
        let b16 = u16::from(binary);
        self.regs.p.assign(V, (a ^ b16) & (v ^ b16) & 0x80 != 0);

        if high > 9 {
            high += 6;
        }

        self.regs.p.assign(C, high > 0x0F);
        self.regs.a = ((high << 4) | (low & 0x0F)) as u8;
    }

    fn sbc(&mut self, value: u8) {
        if self.regs.p.is_set(D) {
            self.sbc_decimal(value);
        } else {
            self.sbc_binary(value);
        }
    }

    fn sbc_binary(&mut self, value: u8) {
        let a = u16::from(self.regs.a);
        let v = u16::from(value);
        let borrow = u16::from(!self.regs.p.is_set(C));

        let result = a.wrapping_sub(v).wrapping_sub(borrow);
        let result8 = result as u8;

        self.regs.p.assign(C, result < 0x100);
        self.regs
            .p
            .assign(V, (self.regs.a ^ value) & (self.regs.a ^ result8) & 0x80 != 0);
        self.regs.p.update_nz(result8);
        self.regs.a = result8;
    }

    fn sbc_decimal(&mut self, value: u8) {
        let a = i16::from(self.regs.a);
        let v = i16::from(value);
        let borrow = i16::from(!self.regs.p.is_set(C));

        let mut low = (a & 0x0F) - (v & 0x0F) - borrow;
        if low < 0 {
            low = ((low - 6) & 0x0F) - 0x10;
        }

        let mut high = (a >> 4) - (v >> 4) + if low < 0 { -1 } else { 0 };
        if high < 0 {
            high = (high - 6) & 0x0F;
        }

        let binary = a.wrapping_sub(v).wrapping_sub(borrow);
        self.regs.p.assign(C, binary >= 0);
        self.regs.p.assign(Z, binary as u8 == 0);
        self.regs.p.assign(N, binary & 0x80 != 0);
        self.regs
            .p
            .assign(V, (a ^ binary) & (!v ^ binary) & 0x80 != 0);

        self.regs.a = ((high << 4) | (low & 0x0F)) as u8;
    }

    fn compare(&mut self, register: u8, value: u8) {
        let result = register.wrapping_sub(value);
        self.regs.p.assign(C, register >= value);
        self.regs.p.update_nz(result);
    }

    fn asl(&mut self, value: u8) -> u8 {
        self.regs.p.assign(C, value & 0x80 != 0);
        let result = value << 1;
        self.regs.p.update_nz(result);
        result
    }

    fn lsr(&mut self, value: u8) -> u8 {
        self.regs.p.assign(C, value & 0x01 != 0);
        let result = value >> 1;
        self.regs.p.update_nz(result);
        result
    }

    fn rol(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.regs.p.is_set(C));
        self.regs.p.assign(C, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.regs.p.update_nz(result);
        result
    }

    fn ror(&mut self, value: u8) -> u8 {
        let carry_in = if self.regs.p.is_set(C) { 0x80 } else { 0 };
        self.regs.p.assign(C, value & 0x01 != 0);
        let result = (value >> 1) | carry_in;
        self.regs.p.update_nz(result);
        result
    }
}

impl<B: Bus> Cpu<B> for Mos6502 {
    fn step(&mut self, bus: &mut B) -> Result<u32, CpuFault> {
        let pc = self.regs.pc;
        let opcode = self.fetch(bus);
        let entry = OPCODES[opcode as usize];

        if matches!(entry.op, Op::Illegal) {
            return Err(CpuFault::IllegalOpcode { opcode, pc });
        }

        let cycles = self.execute(bus, entry);
        self.total_cycles += u64::from(cycles);
        self.total_instructions += 1;
        Ok(cycles)
    }

    fn reset(&mut self, bus: &mut B) {
        self.regs = Registers::new();
        self.regs.pc = bus.read_word(0xFFFC);
        self.total_cycles = 0;
        self.total_instructions = 0;
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }
}
