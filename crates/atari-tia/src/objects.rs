//! The five movable objects and the playfield.
//!
//! Each object computes its own serial output for the current beam
//! position; the compositor in `lib.rs` stacks those outputs by
//! priority and records collisions.

use crate::HBLANK_CLOCKS;

/// The 40-bit playfield, rebuilt whenever PF0/PF1/PF2 or the mirror
/// bit change.
///
/// Bit 0 of `data` is the leftmost 4-clock column. PF0 contributes its
/// high nibble with PF0.4 leftmost; PF1 renders msb-first and PF2
/// lsb-first, so PF1 is bit-reversed on the way in. The right half is
/// either a straight repeat or a mirror image of the left.
#[derive(Debug, Default)]
pub(crate) struct Playfield {
    data: u64,
    pub(crate) pixel: bool,
}

impl Playfield {
    pub(crate) fn rebuild(&mut self, pf0: u8, pf1: u8, pf2: u8, mirrored: bool) {
        let mut data = u64::from(pf0 >> 4)
            | u64::from(pf1.reverse_bits()) << 4
            | u64::from(pf2) << 12;
        if mirrored {
            data |= u64::from(pf0.reverse_bits() & 0x0F) << 36
                | u64::from(pf1) << 28
                | u64::from(pf2.reverse_bits()) << 20;
        } else {
            data |= data << 20;
        }
        self.data = data;
    }

    pub(crate) fn tick(&mut self, x: i32) {
        let column = (x - HBLANK_CLOCKS) / 4;
        self.pixel = self.data >> column & 1 != 0;
    }
}

/// A player sprite: an 8-bit pattern, optionally reflected, stretched
/// by the NUSIZ scale.
#[derive(Debug)]
pub(crate) struct Player {
    data: u8,
    pub(crate) start_pos: i32,
    pub(crate) offset: i32,
    pub(crate) next_offset: i32,
    pub(crate) scale: i32,
    pub(crate) reset_pending: bool,
    pub(crate) need_update: bool,
    pub(crate) pixel: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            data: 0,
            start_pos: 0,
            offset: 0,
            next_offset: 0,
            scale: 1,
            reset_pending: false,
            need_update: false,
            pixel: false,
        }
    }
}

impl Player {
    /// Latch the serial pattern. GRP bit 7 leaves the chip first, so
    /// the unreflected pattern is bit-reversed into draw order.
    pub(crate) fn rebuild(&mut self, grp: u8, reflect: bool) {
        self.data = if reflect { grp } else { grp.reverse_bits() };
        self.need_update = false;
    }

    pub(crate) fn tick(&mut self, x: i32) {
        let start = self.start_pos - self.offset;
        if x < start {
            self.pixel = false;
            return;
        }
        let index = (x - start) / self.scale;
        self.pixel = index <= 7 && self.data >> index & 1 != 0;
    }

    /// HMCLR: drop latched and applied motion.
    pub(crate) fn clear_motion(&mut self) {
        self.offset = 0;
        self.next_offset = 0;
    }
}

/// A missile or the ball: a solid run of 1, 2, 4 or 8 clocks.
#[derive(Debug)]
pub(crate) struct Sprite {
    pub(crate) start_pos: i32,
    pub(crate) offset: i32,
    pub(crate) next_offset: i32,
    pub(crate) width: i32,
    pub(crate) enabled: bool,
    pub(crate) reset_pending: bool,
    pub(crate) need_update: bool,
    pub(crate) pixel: bool,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            start_pos: 0,
            offset: 0,
            next_offset: 0,
            width: 1,
            enabled: false,
            reset_pending: false,
            need_update: false,
            pixel: false,
        }
    }
}

impl Sprite {
    pub(crate) fn tick(&mut self, x: i32) {
        let start = self.start_pos - self.offset;
        self.pixel = self.enabled && x >= start && x < start + self.width;
    }

    /// HMCLR: drop latched and applied motion.
    pub(crate) fn clear_motion(&mut self) {
        self.offset = 0;
        self.next_offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playfield_repeat_duplicates_left_half() {
        let mut pf = Playfield::default();
        pf.rebuild(0x10, 0, 0, false);
        // PF0.4 is the leftmost column in both halves.
        pf.tick(HBLANK_CLOCKS);
        assert!(pf.pixel);
        pf.tick(HBLANK_CLOCKS + 80);
        assert!(pf.pixel);
        pf.tick(HBLANK_CLOCKS + 4);
        assert!(!pf.pixel);
    }

    #[test]
    fn playfield_mirror_reflects_right_half() {
        let mut pf = Playfield::default();
        pf.rebuild(0x10, 0, 0, true);
        pf.tick(HBLANK_CLOCKS);
        assert!(pf.pixel);
        // Mirrored: leftmost column reappears as the rightmost.
        pf.tick(HBLANK_CLOCKS + 159);
        assert!(pf.pixel);
        pf.tick(HBLANK_CLOCKS + 80);
        assert!(!pf.pixel);
    }

    #[test]
    fn player_draws_msb_first_without_reflect() {
        let mut player = Player::default();
        player.start_pos = 100;
        player.rebuild(0x80, false);
        player.tick(100);
        assert!(player.pixel, "bit 7 is the leftmost pixel");
        player.tick(101);
        assert!(!player.pixel);

        player.rebuild(0x80, true);
        player.tick(107);
        assert!(player.pixel, "reflection moves bit 7 to the right edge");
    }

    #[test]
    fn player_scale_stretches_pattern() {
        let mut player = Player::default();
        player.start_pos = 100;
        player.scale = 4;
        player.rebuild(0x80, false);
        for x in 100..104 {
            player.tick(x);
            assert!(player.pixel, "clock {x}");
        }
        player.tick(104);
        assert!(!player.pixel);
    }

    #[test]
    fn sprite_is_a_solid_run() {
        let mut missile = Sprite::default();
        missile.start_pos = 90;
        missile.width = 4;
        missile.enabled = true;
        missile.tick(89);
        assert!(!missile.pixel);
        missile.tick(90);
        assert!(missile.pixel);
        missile.tick(93);
        assert!(missile.pixel);
        missile.tick(94);
        assert!(!missile.pixel);

        missile.enabled = false;
        missile.tick(90);
        assert!(!missile.pixel);
    }

    #[test]
    fn motion_offset_shifts_start() {
        let mut missile = Sprite::default();
        missile.start_pos = 90;
        missile.enabled = true;
        missile.offset = 3;
        missile.tick(87);
        assert!(missile.pixel, "positive offset moves the object left");
    }
}
