//! Addressing mode resolution and stack access.

use emu_core::Bus;

use crate::Mos6502;
use crate::opcodes::Mode;

impl Mos6502 {
    /// Fetch the byte at PC and advance PC.
    pub(crate) fn fetch(&mut self, bus: &mut impl Bus) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a little-endian word at PC.
    pub(crate) fn fetch_word(&mut self, bus: &mut impl Bus) -> u16 {
        let low = self.fetch(bus);
        let high = self.fetch(bus);
        u16::from_le_bytes([low, high])
    }

    /// Read a pointer from page zero; the high byte wraps within the page.
    fn read_zp_word(bus: &mut impl Bus, pointer: u8) -> u16 {
        let low = bus.read(u16::from(pointer));
        let high = bus.read(u16::from(pointer.wrapping_add(1)));
        u16::from_le_bytes([low, high])
    }

    /// Read a word with the NMOS indirect-JMP page-wrap bug: a pointer at
    /// `$xxFF` takes its high byte from `$xx00`.
    pub(crate) fn read_word_page_bug(bus: &mut impl Bus, address: u16) -> u16 {
        let low = bus.read(address);
        let high_addr = (address & 0xFF00) | (address.wrapping_add(1) & 0x00FF);
        let high = bus.read(high_addr);
        u16::from_le_bytes([low, high])
    }

    /// Push a byte onto the stack.
    pub(crate) fn push(&mut self, bus: &mut impl Bus, value: u8) {
        bus.write(self.regs.stack_addr(), value);
        self.regs.s = self.regs.s.wrapping_sub(1);
    }

    /// Pull a byte from the stack.
    pub(crate) fn pull(&mut self, bus: &mut impl Bus) -> u8 {
        self.regs.s = self.regs.s.wrapping_add(1);
        bus.read(self.regs.stack_addr())
    }

    /// Push a word, high byte first.
    pub(crate) fn push_word(&mut self, bus: &mut impl Bus, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, value as u8);
    }

    /// Pull a word, low byte first.
    pub(crate) fn pull_word(&mut self, bus: &mut impl Bus) -> u16 {
        let low = self.pull(bus);
        let high = self.pull(bus);
        u16::from_le_bytes([low, high])
    }

    /// Resolve the effective address of a memory operand.
    ///
    /// Returns the address and whether an indexed fetch crossed a page
    /// boundary (the caller decides whether that costs a cycle).
    pub(crate) fn operand_addr(&mut self, bus: &mut impl Bus, mode: Mode) -> (u16, bool) {
        match mode {
            Mode::Immediate => {
                let addr = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                (addr, false)
            }
            Mode::ZeroPage => (u16::from(self.fetch(bus)), false),
            Mode::ZeroPageX => {
                let base = self.fetch(bus);
                (u16::from(base.wrapping_add(self.regs.x)), false)
            }
            Mode::ZeroPageY => {
                let base = self.fetch(bus);
                (u16::from(base.wrapping_add(self.regs.y)), false)
            }
            Mode::Absolute => (self.fetch_word(bus), false),
            Mode::AbsoluteX => {
                let base = self.fetch_word(bus);
                let addr = base.wrapping_add(u16::from(self.regs.x));
                (addr, crossed_page(base, addr))
            }
            Mode::AbsoluteY => {
                let base = self.fetch_word(bus);
                let addr = base.wrapping_add(u16::from(self.regs.y));
                (addr, crossed_page(base, addr))
            }
            Mode::IndirectX => {
                let pointer = self.fetch(bus).wrapping_add(self.regs.x);
                (Self::read_zp_word(bus, pointer), false)
            }
            Mode::IndirectY => {
                let pointer = self.fetch(bus);
                let base = Self::read_zp_word(bus, pointer);
                let addr = base.wrapping_add(u16::from(self.regs.y));
                (addr, crossed_page(base, addr))
            }
            Mode::Implied | Mode::Accumulator | Mode::Indirect | Mode::Relative => {
                unreachable!("mode {mode:?} has no memory operand")
            }
        }
    }
}

/// True when two addresses sit in different 256-byte pages.
pub(crate) const fn crossed_page(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}
