//! MOS 6532 RIOT (RAM-I/O-Timer) emulator.
//!
//! The chip pairs 128 bytes of RAM with two 8-bit I/O ports and an
//! interval timer:
//!
//! ```text
//! $80-$FF   RAM
//! $280      SWCHA   port A: joystick directions (active low)
//! $282      SWCHB   port B: console switches (active low)
//! $284      INTIM   timer value, read-only
//! $294      TIM1T   load timer, 1 cycle per count
//! $295      TIM8T   load timer, 8 cycles per count
//! $296      TIM64T  load timer, 64 cycles per count
//! $297      T1024T  load timer, 1024 cycles per count
//! ```
//!
//! Loading any `TIMxT` register starts the countdown at the chosen
//! prescale. When the count passes zero it wraps to 255 and keeps
//! going; the underflow interrupt line is not modeled.

use emu_core::Tickable;

/// SWCHA register index.
const PORT_A: usize = 0;
/// SWCHB register index.
const PORT_B: usize = 2;
/// INTIM register index.
const TIMER: usize = 4;

/// One direction on a digital joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoystickDirection {
    Up,
    Down,
    Left,
    Right,
}

/// The RIOT chip: RAM, ports and the interval timer.
#[derive(Debug)]
pub struct Riot {
    ram: [u8; 128],
    regs: [u8; 8],
    timer: i64,
    prescale: i64,
    prescale_shift: u32,
}

impl Default for Riot {
    fn default() -> Self {
        Self::new()
    }
}

impl Riot {
    #[must_use]
    pub fn new() -> Self {
        let mut riot = Self {
            ram: [0; 128],
            regs: [0; 8],
            timer: 0,
            prescale: 1,
            prescale_shift: 0,
        };
        riot.reset();
        riot
    }

    /// Power-on state: all switches and directions released, timer
    /// free-running from 255 at the 1-cycle prescale.
    pub fn reset(&mut self) {
        self.ram = [0; 128];
        self.regs = [0; 8];
        self.regs[PORT_A] = 0xFF;
        // Reset and select released, color mode.
        self.regs[PORT_B] = 0x0B;
        self.timer = 255;
        self.prescale = 1;
        self.prescale_shift = 0;
        self.regs[TIMER] = 0xFF;
    }

    #[must_use]
    pub fn read(&self, address: u16) -> u8 {
        if (0x80..=0xFF).contains(&address) {
            self.ram[(address & 0x7F) as usize]
        } else {
            self.regs[(address & 0x07) as usize]
        }
    }

    pub fn write(&mut self, address: u16, value: u8) {
        if (0x80..=0xFF).contains(&address) {
            self.ram[(address & 0x7F) as usize] = value;
            return;
        }

        match address {
            0x294..=0x297 => {
                (self.prescale, self.prescale_shift) = match address {
                    0x294 => (1, 0),
                    0x295 => (8, 3),
                    0x296 => (64, 6),
                    _ => (1024, 10),
                };
                self.timer = (i64::from(value) + 1) * self.prescale - 1;
                self.regs[TIMER] = value;
            }
            address if address < 0x284 => {
                self.regs[(address & 0x07) as usize] = value;
            }
            _ => {}
        }
    }

    /// Press or release a console switch (`SWCHB`, active low).
    pub fn set_console_reset(&mut self, pressed: bool) {
        self.set_port_b_bit(0x01, pressed);
    }

    pub fn set_console_select(&mut self, pressed: bool) {
        self.set_port_b_bit(0x02, pressed);
    }

    /// Press or release a joystick direction (`SWCHA`, active low).
    /// Player 0 drives the high nibble, player 1 the low nibble.
    pub fn set_joystick(&mut self, player: usize, direction: JoystickDirection, pressed: bool) {
        let bit: u8 = match direction {
            JoystickDirection::Right => 0x80,
            JoystickDirection::Left => 0x40,
            JoystickDirection::Down => 0x20,
            JoystickDirection::Up => 0x10,
        };
        let bit = if player == 0 { bit } else { bit >> 4 };
        if pressed {
            self.regs[PORT_A] &= !bit;
        } else {
            self.regs[PORT_A] |= bit;
        }
    }

    fn set_port_b_bit(&mut self, bit: u8, pressed: bool) {
        if pressed {
            self.regs[PORT_B] &= !bit;
        } else {
            self.regs[PORT_B] |= bit;
        }
    }
}

impl Tickable for Riot {
    fn clock(&mut self, cycles: u32) {
        self.timer -= i64::from(cycles);
        while self.timer < 0 {
            // Underflow: restart from 255 at the current prescale.
            self.timer += self.prescale << 8;
        }
        self.regs[TIMER] = (self.timer >> self.prescale_shift) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWCHA: u16 = 0x280;
    const SWCHB: u16 = 0x282;
    const INTIM: u16 = 0x284;

    #[test]
    fn ram_round_trips() {
        let mut riot = Riot::new();
        riot.write(0x80, 0x42);
        riot.write(0xFF, 0x99);
        assert_eq!(riot.read(0x80), 0x42);
        assert_eq!(riot.read(0xFF), 0x99);
    }

    #[test]
    fn power_on_switches_released() {
        let riot = Riot::new();
        assert_eq!(riot.read(SWCHA), 0xFF);
        assert_eq!(riot.read(SWCHB), 0x0B);
        assert_eq!(riot.read(INTIM), 0xFF);
    }

    #[test]
    fn tim64t_counts_down_one_per_64_cycles() {
        let mut riot = Riot::new();
        riot.write(0x296, 0x2A);
        assert_eq!(riot.read(INTIM), 0x2A);

        riot.clock(63);
        assert_eq!(riot.read(INTIM), 0x2A, "still inside the first interval");
        riot.clock(1);
        assert_eq!(riot.read(INTIM), 0x29);

        riot.clock(64 * 0x29);
        assert_eq!(riot.read(INTIM), 0x00);
    }

    #[test]
    fn tim1t_counts_every_cycle() {
        let mut riot = Riot::new();
        riot.write(0x294, 10);
        riot.clock(3);
        assert_eq!(riot.read(INTIM), 7);
    }

    #[test]
    fn timer_wraps_to_255_on_underflow() {
        let mut riot = Riot::new();
        riot.write(0x294, 0);
        riot.clock(1);
        assert_eq!(riot.read(INTIM), 0xFF);
    }

    #[test]
    fn t1024t_holds_value_across_a_scanline() {
        let mut riot = Riot::new();
        riot.write(0x297, 2);
        riot.clock(76);
        assert_eq!(riot.read(INTIM), 2);
        riot.clock(1024);
        assert_eq!(riot.read(INTIM), 1);
    }

    #[test]
    fn timer_loads_only_through_tim_registers() {
        let mut riot = Riot::new();
        riot.write(0x296, 0x10);
        riot.write(0x290, 0x55);
        assert_eq!(riot.read(INTIM), 0x10, "write below $294 leaves the timer alone");
        riot.write(0x298, 0x55);
        assert_eq!(riot.read(INTIM), 0x10, "write above $297 is ignored");
    }

    #[test]
    fn joystick_bits_are_active_low() {
        let mut riot = Riot::new();
        riot.set_joystick(0, JoystickDirection::Left, true);
        assert_eq!(riot.read(SWCHA), 0xBF);
        riot.set_joystick(1, JoystickDirection::Up, true);
        assert_eq!(riot.read(SWCHA), 0xBE);
        riot.set_joystick(0, JoystickDirection::Left, false);
        assert_eq!(riot.read(SWCHA), 0xFE);
    }

    #[test]
    fn console_switches_are_active_low() {
        let mut riot = Riot::new();
        riot.set_console_reset(true);
        assert_eq!(riot.read(SWCHB) & 0x01, 0);
        riot.set_console_select(true);
        assert_eq!(riot.read(SWCHB) & 0x02, 0);
        riot.set_console_reset(false);
        riot.set_console_select(false);
        assert_eq!(riot.read(SWCHB), 0x0B);
    }
}
