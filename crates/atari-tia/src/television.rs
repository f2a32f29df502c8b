//! Output and input seam between the TIA and the host.
//!
//! The TIA pushes one pixel at a time as the beam sweeps the visible
//! region and signals the start of each vertical sync. What happens to
//! those pixels (framebuffer, window, nothing at all) is the
//! implementor's business.

/// Visible pixels per scanline, after the 68-clock horizontal blank.
pub const VISIBLE_WIDTH: u16 = 160;

/// Visible scanlines per frame, between vertical blank and overscan.
pub const VISIBLE_HEIGHT: u16 = 192;

/// An input event reported by the display host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvEvent {
    /// The host wants the emulation to stop.
    Quit,
    /// Console select switch changed state.
    Select { pressed: bool },
    /// Console reset switch changed state.
    Reset { pressed: bool },
    /// Left joystick direction changed state.
    Joystick { input: JoystickInput, pressed: bool },
}

/// One input on the digital joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoystickInput {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// A display the TIA draws into.
///
/// `color` is the raw 7-bit TIA color value (hue in the high nibble,
/// luminance in bits 1-3); see [`crate::palette`] for RGB conversion.
pub trait Television {
    /// Store one visible pixel. `x` is 0..160, `y` is 0..192.
    fn set_pixel(&mut self, x: u16, y: u16, color: u8);

    /// Vertical sync: the frame just drawn is complete.
    fn refresh(&mut self);

    /// Fetch the next pending input event, if any.
    fn poll_event(&mut self) -> Option<TvEvent> {
        None
    }
}

/// A television that discards everything. Useful for tests and for
/// running headless without capture.
#[derive(Debug, Default)]
pub struct NullTelevision;

impl Television for NullTelevision {
    fn set_pixel(&mut self, _x: u16, _y: u16, _color: u8) {}

    fn refresh(&mut self) {}
}
