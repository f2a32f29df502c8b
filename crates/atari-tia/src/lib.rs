//! Atari TIA (Television Interface Adapter) emulator.
//!
//! The TIA generates the video signal one pixel at a time as the beam
//! sweeps a 228-clock scanline, 262 lines per NTSC frame:
//!
//! ```text
//! clocks 0-67    horizontal blank
//! clocks 68-227  visible (160 pixels)
//! lines  0-39    vertical blank
//! lines  40-231  visible (192 lines)
//! lines  232-261 overscan
//! ```
//!
//! The chip runs three color clocks per CPU cycle. Software races the
//! beam: it rewrites object registers mid-frame to build the display,
//! and the `WSYNC` strobe halts the CPU until the start of the next
//! scanline so writes can be timed per line.
//!
//! Write registers ($00-$2C) and read registers ($00-$0D) are separate
//! files; see [`regs`]. Reads past `INPT5` float to zero.
//!
//! Sound registers are latched but not synthesized. The missile-lock
//! strobes `RESMP0`/`RESMP1` and multi-copy `NUSIZ` modes are latched
//! only; `NUSIZ` scale modes 5 and 7 (double and quad width) are
//! honored.

mod objects;
pub mod palette;
pub mod regs;
mod television;

pub use television::{JoystickInput, NullTelevision, Television, TvEvent, VISIBLE_HEIGHT, VISIBLE_WIDTH};

use emu_core::Tickable;

use crate::objects::{Playfield, Player, Sprite};

/// Color clocks per scanline.
pub const CLOCKS_PER_LINE: i32 = 228;

/// Color clocks of horizontal blank at the start of each line.
pub const HBLANK_CLOCKS: i32 = 68;

/// Scanlines per NTSC frame.
pub const LINES_PER_FRAME: i32 = 262;

/// Scanlines of vertical blank at the top of each frame.
pub const VBLANK_LINES: i32 = 40;

/// Color clocks per CPU cycle.
pub const CLOCKS_PER_CPU_CYCLE: u32 = 3;

const WRITE_REG_COUNT: usize = 0x2D;
const READ_REG_COUNT: usize = 0x0E;

/// The TIA chip: beam counters, the six display objects, the register
/// files and the collision latches.
pub struct Tia {
    tv: Box<dyn Television>,
    x: i32,
    y: i32,
    write_regs: [u8; WRITE_REG_COUNT],
    read_regs: [u8; READ_REG_COUNT],
    playfield: Playfield,
    player0: Player,
    player1: Player,
    missile0: Sprite,
    missile1: Sprite,
    ball: Sprite,
    vdelp0: bool,
    vdelp1: bool,
    vdelbl: bool,
    wsync_pending: bool,
    wsync_halt: bool,
    poll_events: bool,
    frame_count: u64,
}

impl Tia {
    #[must_use]
    pub fn new(tv: Box<dyn Television>) -> Self {
        let mut read_regs = [0; READ_REG_COUNT];
        // Fire buttons are active low.
        read_regs[regs::INPT4 as usize] = 0x80;
        read_regs[regs::INPT5 as usize] = 0x80;

        Self {
            tv,
            x: 0,
            y: 0,
            write_regs: [0; WRITE_REG_COUNT],
            read_regs,
            playfield: Playfield::default(),
            player0: Player::default(),
            player1: Player::default(),
            missile0: Sprite::default(),
            missile1: Sprite::default(),
            ball: Sprite::default(),
            vdelp0: false,
            vdelp1: false,
            vdelbl: false,
            wsync_pending: false,
            wsync_halt: false,
            poll_events: false,
            frame_count: 0,
        }
    }

    /// Read a TIA register: collision latches and input ports.
    #[must_use]
    pub fn read(&self, address: u16) -> u8 {
        if address > regs::INPT5 {
            0
        } else {
            self.read_regs[address as usize]
        }
    }

    /// Write a TIA register, applying its side effects.
    pub fn write(&mut self, address: u16, value: u8) {
        if address > regs::CXCLR {
            return;
        }
        self.write_regs[address as usize] = value;

        match address {
            regs::VSYNC => {
                if value & 0x02 != 0 {
                    self.tv.refresh();
                    self.x = 0;
                    self.y = 0;
                    self.frame_count += 1;
                }
            }
            regs::WSYNC => self.wsync_pending = true,
            regs::RSYNC => self.x = 0,
            regs::NUSIZ0 => {
                self.player0.scale = player_scale(value);
                self.missile0.width = 1 << ((value >> 4) & 0x03);
            }
            regs::NUSIZ1 => {
                self.player1.scale = player_scale(value);
                self.missile1.width = 1 << ((value >> 4) & 0x03);
            }
            regs::CTRLPF => self.ball.width = 1 << ((value >> 4) & 0x03),
            regs::REFP0 => self.rebuild_player0(),
            regs::REFP1 => self.rebuild_player1(),
            regs::PF0 | regs::PF1 | regs::PF2 => self.rebuild_playfield(),
            regs::RESP0 => self.player0.reset_pending = true,
            regs::RESP1 => self.player1.reset_pending = true,
            regs::RESM0 => self.missile0.reset_pending = true,
            regs::RESM1 => self.missile1.reset_pending = true,
            regs::RESBL => self.ball.reset_pending = true,
            regs::GRP0 => {
                if self.vdelp0 {
                    self.player0.need_update = true;
                } else {
                    self.rebuild_player0();
                }
            }
            regs::GRP1 => {
                if self.vdelp1 {
                    self.player1.need_update = true;
                } else {
                    self.rebuild_player1();
                }
            }
            regs::ENAM0 => self.missile0.enabled = value & 0x02 != 0,
            regs::ENAM1 => self.missile1.enabled = value & 0x02 != 0,
            regs::ENABL => {
                if value & 0x02 == 0 {
                    self.ball.enabled = false;
                    self.ball.need_update = false;
                } else if self.vdelbl {
                    self.ball.need_update = true;
                } else {
                    self.ball.enabled = true;
                }
            }
            regs::HMP0 => self.player0.next_offset = motion_offset(value),
            regs::HMP1 => self.player1.next_offset = motion_offset(value),
            regs::HMM0 => self.missile0.next_offset = motion_offset(value),
            regs::HMM1 => self.missile1.next_offset = motion_offset(value),
            regs::HMBL => self.ball.next_offset = motion_offset(value),
            regs::VDELP0 => self.vdelp0 = value & 0x01 != 0,
            regs::VDELP1 => self.vdelp1 = value & 0x01 != 0,
            regs::VDELBL => self.vdelbl = value & 0x01 != 0,
            regs::HMOVE => {
                self.player0.offset = self.player0.next_offset;
                self.player1.offset = self.player1.next_offset;
                self.missile0.offset = self.missile0.next_offset;
                self.missile1.offset = self.missile1.next_offset;
                self.ball.offset = self.ball.next_offset;
            }
            regs::HMCLR => {
                self.player0.clear_motion();
                self.player1.clear_motion();
                self.missile0.clear_motion();
                self.missile1.clear_motion();
                self.ball.clear_motion();
            }
            regs::CXCLR => {
                for latch in &mut self.read_regs[..8] {
                    *latch = 0;
                }
            }
            _ => {}
        }
    }

    /// True while a `WSYNC` write is holding the CPU until the next
    /// scanline boundary.
    #[must_use]
    pub fn waiting_for_sync(&self) -> bool {
        self.wsync_halt
    }

    /// Frames completed since power-on, counting both `VSYNC` writes
    /// and free-running 262-line wraps.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Current beam position as (color clock, scanline).
    #[must_use]
    pub fn beam(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// True once per vertical-blank scanline: the host should poll
    /// input events now, while no pixels are being generated.
    pub fn take_event_poll(&mut self) -> bool {
        let pending = self.poll_events;
        self.poll_events = false;
        pending
    }

    /// Fetch the next input event from the attached television.
    pub fn poll_event(&mut self) -> Option<TvEvent> {
        self.tv.poll_event()
    }

    /// Press or release a joystick fire button (`INPT4`/`INPT5`,
    /// active low).
    pub fn set_fire(&mut self, player: usize, pressed: bool) {
        let reg = if player == 0 { regs::INPT4 } else { regs::INPT5 };
        self.read_regs[reg as usize] = if pressed { 0x00 } else { 0x80 };
    }

    fn rebuild_playfield(&mut self) {
        let mirrored = self.write_regs[regs::CTRLPF as usize] & 0x01 != 0;
        self.playfield.rebuild(
            self.write_regs[regs::PF0 as usize],
            self.write_regs[regs::PF1 as usize],
            self.write_regs[regs::PF2 as usize],
            mirrored,
        );
    }

    fn rebuild_player0(&mut self) {
        let reflect = self.write_regs[regs::REFP0 as usize] & 0x08 != 0;
        self.player0.rebuild(self.write_regs[regs::GRP0 as usize], reflect);
    }

    fn rebuild_player1(&mut self) {
        let reflect = self.write_regs[regs::REFP1 as usize] & 0x08 != 0;
        self.player1.rebuild(self.write_regs[regs::GRP1 as usize], reflect);
    }

    /// Advance the beam one color clock.
    fn tick(&mut self) {
        let visible_y = self.y >= VBLANK_LINES && self.y < VBLANK_LINES + i32::from(VISIBLE_HEIGHT);
        if self.x >= HBLANK_CLOCKS && visible_y {
            self.playfield.tick(self.x);
            self.player0.tick(self.x);
            self.player1.tick(self.x);
            self.missile0.tick(self.x);
            self.missile1.tick(self.x);
            self.ball.tick(self.x);
            self.update_collisions();
            self.draw_pixel();
        }

        self.x += 1;
        if self.x == CLOCKS_PER_LINE {
            self.x = 0;
            // Vertical-delay updates commit at the line boundary.
            if self.player0.need_update {
                self.rebuild_player0();
            }
            if self.player1.need_update {
                self.rebuild_player1();
            }
            if self.ball.need_update {
                self.ball.enabled = true;
                self.ball.need_update = false;
            }
            if !self.wsync_pending {
                self.wsync_halt = false;
            }
            if self.y < VBLANK_LINES {
                self.poll_events = true;
            }
            self.y += 1;
            if self.y == LINES_PER_FRAME {
                self.y = 0;
                self.frame_count += 1;
            }
        }
    }

    fn update_collisions(&mut self) {
        let p0 = self.player0.pixel;
        let p1 = self.player1.pixel;
        let m0 = self.missile0.pixel;
        let m1 = self.missile1.pixel;
        let bl = self.ball.pixel;
        let pf = self.playfield.pixel;

        let bit = |a: bool, b: bool, shift: u32| u8::from(a && b) << shift;
        self.read_regs[regs::CXM0P as usize] |= bit(m0, p1, 7) | bit(m0, p0, 6);
        self.read_regs[regs::CXM1P as usize] |= bit(m1, p0, 7) | bit(m1, p1, 6);
        self.read_regs[regs::CXP0FB as usize] |= bit(p0, pf, 7) | bit(p0, bl, 6);
        self.read_regs[regs::CXP1FB as usize] |= bit(p1, pf, 7) | bit(p1, bl, 6);
        self.read_regs[regs::CXM0FB as usize] |= bit(m0, pf, 7) | bit(m0, bl, 6);
        self.read_regs[regs::CXM1FB as usize] |= bit(m1, pf, 7) | bit(m1, bl, 6);
        self.read_regs[regs::CXBLPF as usize] |= bit(bl, pf, 7);
        self.read_regs[regs::CXPPMM as usize] |= bit(p0, p1, 7) | bit(m0, m1, 6);
    }

    fn draw_pixel(&mut self) {
        let playfield_priority = self.write_regs[regs::CTRLPF as usize] & 0x04 != 0;

        let p0 = self.player0.pixel || self.missile0.pixel;
        let p1 = self.player1.pixel || self.missile1.pixel;
        let pf = self.playfield.pixel || self.ball.pixel;

        let color_reg = if playfield_priority && pf {
            regs::COLUPF
        } else if p0 {
            regs::COLUP0
        } else if p1 {
            regs::COLUP1
        } else if pf {
            regs::COLUPF
        } else {
            regs::COLUBK
        };
        let color = self.write_regs[color_reg as usize];

        self.tv
            .set_pixel((self.x - HBLANK_CLOCKS) as u16, (self.y - VBLANK_LINES) as u16, color);
    }

    /// Apply strobed object positions. The serial pipeline means a
    /// player lands 5 clocks after the strobe, missiles and the ball 4.
    fn commit_positions(&mut self) {
        let x = self.x;
        if self.player0.reset_pending {
            self.player0.start_pos = x + 5;
            self.player0.reset_pending = false;
        }
        if self.player1.reset_pending {
            self.player1.start_pos = x + 5;
            self.player1.reset_pending = false;
        }
        if self.missile0.reset_pending {
            self.missile0.start_pos = x + 4;
            self.missile0.reset_pending = false;
        }
        if self.missile1.reset_pending {
            self.missile1.start_pos = x + 4;
            self.missile1.reset_pending = false;
        }
        if self.ball.reset_pending {
            self.ball.start_pos = x + 4;
            self.ball.reset_pending = false;
        }
    }
}

impl Tickable for Tia {
    /// Run the video clock for `cycles` CPU cycles (three color clocks
    /// each), then settle position strobes and the `WSYNC` latch.
    fn clock(&mut self, cycles: u32) {
        for _ in 0..cycles * CLOCKS_PER_CPU_CYCLE {
            self.tick();
        }
        self.commit_positions();
        if self.wsync_pending {
            self.wsync_pending = false;
            self.wsync_halt = true;
        }
    }
}

/// NUSIZ player scale. Modes 5 and 7 are double and quad width; the
/// multi-copy modes fall back to a single copy.
const fn player_scale(nusiz: u8) -> i32 {
    match nusiz & 0x07 {
        0x05 => 2,
        0x07 => 4,
        _ => 1,
    }
}

/// HMxx motion value: signed nibble in the high four bits. Positive
/// moves the object left.
const fn motion_offset(value: u8) -> i32 {
    (value as i8 >> 4) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const CYCLES_PER_LINE: u32 = 76;

    fn tia() -> Tia {
        Tia::new(Box::new(NullTelevision))
    }

    #[test]
    fn line_and_frame_geometry() {
        let mut tia = tia();
        tia.clock(CYCLES_PER_LINE);
        assert_eq!(tia.beam(), (0, 1));

        tia.clock(CYCLES_PER_LINE * 261);
        assert_eq!(tia.beam(), (0, 0));
        assert_eq!(tia.frame_count(), 1);
    }

    #[test]
    fn wsync_halts_until_end_of_line() {
        let mut tia = tia();
        tia.write(regs::WSYNC, 0);
        assert!(!tia.waiting_for_sync(), "halt is visible after the write cycle");

        tia.clock(1);
        assert!(tia.waiting_for_sync());
        tia.clock(10);
        assert!(tia.waiting_for_sync());

        // 65 more cycles complete the 228-clock line.
        tia.clock(65);
        assert!(!tia.waiting_for_sync());
        assert_eq!(tia.beam(), (0, 1));
    }

    #[test]
    fn wsync_written_twice_spans_two_lines() {
        let mut tia = tia();
        tia.write(regs::WSYNC, 0);
        tia.clock(1);
        tia.write(regs::WSYNC, 0);
        tia.clock(75);
        assert!(tia.waiting_for_sync(), "second strobe re-arms the halt");
        tia.clock(76);
        assert!(!tia.waiting_for_sync());
    }

    #[test]
    fn vsync_resets_beam_and_counts_a_frame() {
        let mut tia = tia();
        tia.clock(CYCLES_PER_LINE * 100 + 10);
        assert_ne!(tia.beam(), (0, 0));

        tia.write(regs::VSYNC, 0x02);
        assert_eq!(tia.beam(), (0, 0));
        assert_eq!(tia.frame_count(), 1);

        // Clearing the sync bit changes nothing.
        tia.write(regs::VSYNC, 0x00);
        assert_eq!(tia.frame_count(), 1);
    }

    #[test]
    fn rsync_resets_only_the_horizontal_counter() {
        let mut tia = tia();
        tia.clock(CYCLES_PER_LINE * 3 + 10);
        tia.write(regs::RSYNC, 0);
        assert_eq!(tia.beam(), (0, 3));
    }

    #[test]
    fn event_poll_window_is_vertical_blank() {
        let mut tia = tia();
        assert!(!tia.take_event_poll());

        tia.clock(CYCLES_PER_LINE);
        assert!(tia.take_event_poll(), "line 0 is inside vertical blank");
        assert!(!tia.take_event_poll(), "latch clears on read");

        tia.clock(CYCLES_PER_LINE * 39);
        tia.take_event_poll();
        tia.clock(CYCLES_PER_LINE);
        assert!(!tia.take_event_poll(), "no polling during the visible region");
    }

    #[test]
    fn input_ports_default_released() {
        let tia = tia();
        assert_eq!(tia.read(regs::INPT4), 0x80);
        assert_eq!(tia.read(regs::INPT5), 0x80);
        assert_eq!(tia.read(regs::CXM0P), 0x00);
    }

    #[test]
    fn fire_button_is_active_low() {
        let mut tia = tia();
        tia.set_fire(0, true);
        assert_eq!(tia.read(regs::INPT4), 0x00);
        tia.set_fire(0, false);
        assert_eq!(tia.read(regs::INPT4), 0x80);
        assert_eq!(tia.read(regs::INPT5), 0x80, "player 1 unaffected");
    }

    #[test]
    fn reads_past_inpt5_float_to_zero() {
        let tia = tia();
        assert_eq!(tia.read(0x0E), 0);
        assert_eq!(tia.read(0x3F), 0);
    }

    #[test]
    fn writes_past_cxclr_are_ignored() {
        let mut tia = tia();
        tia.write(0x2D, 0xFF);
        tia.write(0x3F, 0xFF);
        assert_eq!(tia.beam(), (0, 0));
    }
}
