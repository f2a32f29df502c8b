//! The 6507 memory bus.
//!
//! The 6507 exposes 13 address lines, so the 64K space the core sees
//! folds down to 8K. Decode follows the console wiring:
//!
//! ```text
//! A12=1        cartridge window ($1000-$1FFF and mirrors)
//! $00-$3F      TIA registers
//! $80-$FF      RIOT RAM
//! $280-$297    RIOT ports and timer
//! ```
//!
//! F8 bank strobes live inside the cartridge window and trigger on
//! both reads and writes, since the switch is wired to the address
//! lines alone.

use atari_tia::Tia;
use emu_core::{Bus, Tickable};
use mos_riot_6532::Riot;

use crate::cartridge::Cartridge;

/// Cartridge, TIA and RIOT behind the 6507's 13 address lines.
pub struct AtariBus {
    cart: Cartridge,
    pub tia: Tia,
    pub riot: Riot,
}

impl AtariBus {
    #[must_use]
    pub fn new(cart: Cartridge, tia: Tia) -> Self {
        Self {
            cart,
            tia,
            riot: Riot::new(),
        }
    }

    /// Read without side effects: no bank strobes, no latch changes.
    /// Used by the tracer.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        if address & 0x1000 != 0 {
            self.cart.read(address)
        } else if address <= 0x3F {
            self.tia.read(address)
        } else {
            self.riot.read(address)
        }
    }

    /// Active cartridge bank, for diagnostics.
    #[must_use]
    pub fn cartridge_bank(&self) -> usize {
        self.cart.bank()
    }

    /// Apply an F8 strobe if `address` mirrors one. Returns true when
    /// a switch happened.
    fn bank_strobe(&mut self, address: u16) -> bool {
        match address & 0x1FFF {
            0x1FF8 => self.cart.select_bank(0),
            0x1FF9 => self.cart.select_bank(1),
            _ => false,
        }
    }
}

impl Bus for AtariBus {
    fn read(&mut self, address: u16) -> u8 {
        if address & 0x1000 != 0 {
            // The byte under a strobe address is indeterminate while
            // the switch settles.
            if self.bank_strobe(address) {
                return 0;
            }
            return self.cart.read(address);
        }
        if address <= 0x3F {
            return self.tia.read(address);
        }
        self.riot.read(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        if address & 0x1000 != 0 {
            self.bank_strobe(address);
            return;
        }
        if address <= 0x3F {
            self.tia.write(address, value);
            return;
        }
        self.riot.write(address, value);
    }
}

impl Tickable for AtariBus {
    fn clock(&mut self, cycles: u32) {
        self.tia.clock(cycles);
        self.riot.clock(cycles);
    }
}

#[cfg(test)]
mod tests {
    use atari_tia::NullTelevision;

    use super::*;

    fn bus_with(rom: &[u8]) -> AtariBus {
        let cart = Cartridge::new(rom).unwrap();
        AtariBus::new(cart, Tia::new(Box::new(NullTelevision)))
    }

    #[test]
    fn cartridge_window_mirrors_on_a12() {
        let mut rom = vec![0; 0x1000];
        rom[0x123] = 0x42;
        let mut bus = bus_with(&rom);
        assert_eq!(bus.read(0x1123), 0x42);
        assert_eq!(bus.read(0xF123), 0x42, "mirror with all high bits set");
        assert_eq!(bus.read(0xD123), 0x42);
    }

    #[test]
    fn cartridge_writes_are_ignored() {
        let rom = vec![0x42; 0x1000];
        let mut bus = bus_with(&rom);
        bus.write(0xF123, 0x99);
        assert_eq!(bus.read(0xF123), 0x42);
    }

    #[test]
    fn riot_ram_round_trips() {
        let rom = vec![0; 0x1000];
        let mut bus = bus_with(&rom);
        bus.write(0x80, 0x5A);
        assert_eq!(bus.read(0x80), 0x5A);
    }

    #[test]
    fn timer_load_reads_back_through_intim() {
        let rom = vec![0; 0x1000];
        let mut bus = bus_with(&rom);
        bus.write(0x296, 0x2A);
        assert_eq!(bus.read(0x284), 0x2A);
    }

    #[test]
    fn tia_reads_come_from_the_read_registers() {
        let rom = vec![0; 0x1000];
        let mut bus = bus_with(&rom);
        assert_eq!(bus.read(0x0C), 0x80, "INPT4 released");
        assert_eq!(bus.read(0x00), 0x00, "no collisions at power-on");
    }

    #[test]
    fn f8_strobes_switch_on_read_and_write() {
        let mut rom = vec![0xAA; 0x1000];
        rom.resize(0x2000, 0xBB);
        let mut bus = bus_with(&rom);
        assert_eq!(bus.read(0xF000), 0xAA);

        assert_eq!(bus.read(0xFFF9), 0x00, "strobe read returns nothing useful");
        assert_eq!(bus.read(0xF000), 0xBB);

        bus.read(0xFFF9);
        assert_eq!(bus.read(0xF000), 0xBB, "repeating the strobe changes nothing");

        bus.write(0xFFF8, 0x00);
        assert_eq!(bus.read(0xF000), 0xAA, "switching back restores the window");
    }

    #[test]
    fn plain_cartridge_serves_rom_at_strobe_addresses() {
        let rom = vec![0x42; 0x1000];
        let mut bus = bus_with(&rom);
        assert_eq!(bus.read(0xFFF8), 0x42);
        assert_eq!(bus.cartridge_bank(), 0);
    }

    #[test]
    fn peek_never_switches_banks() {
        let mut rom = vec![0xAA; 0x1000];
        rom.resize(0x2000, 0xBB);
        let mut bus = bus_with(&rom);
        assert_eq!(bus.peek(0xFFF9), 0xAA);
        assert_eq!(bus.read(0xF000), 0xAA, "bank unchanged");
    }

    #[test]
    fn read_word_is_little_endian() {
        let mut rom = vec![0; 0x1000];
        rom[0xFFC] = 0x34;
        rom[0xFFD] = 0x12;
        let mut bus = bus_with(&rom);
        assert_eq!(bus.read_word(0xFFFC), 0x1234);
    }
}
