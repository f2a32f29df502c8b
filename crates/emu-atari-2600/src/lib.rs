//! Cycle-accurate Atari 2600 emulator.
//!
//! The console is three chips on a 13-bit bus:
//! - 6507 CPU at 1.19 MHz (a 6502 with 13 address lines and no IRQ/NMI)
//! - TIA video at 3.58 MHz (3 color clocks per CPU cycle)
//! - RIOT: 128 bytes of RAM, joystick/console ports, interval timer
//!
//! One scanline = 76 CPU cycles, one NTSC frame = 262 scanlines.
//! There is no framebuffer in hardware; software races the beam and
//! leans on `WSYNC` to stay aligned with the scanline.

mod atari;
mod bus;
#[cfg(feature = "native")]
pub mod capture;
mod cartridge;
mod config;
mod television;

pub use atari::{Atari2600, FrameResult};
pub use bus::AtariBus;
pub use cartridge::{Cartridge, RomError};
pub use config::AtariConfig;
pub use television::{EventQueue, FramebufferTelevision, SharedFrame, FB_HEIGHT, FB_WIDTH};
