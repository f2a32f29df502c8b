//! Framebuffer television for headless runs.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use atari_tia::{palette, Television, TvEvent, VISIBLE_HEIGHT, VISIBLE_WIDTH};

/// Framebuffer width in pixels.
pub const FB_WIDTH: u32 = VISIBLE_WIDTH as u32;

/// Framebuffer height in pixels.
pub const FB_HEIGHT: u32 = VISIBLE_HEIGHT as u32;

/// Shared handle to the ARGB32 framebuffer. The TIA owns the
/// television, so the frame is shared out through this handle.
pub type SharedFrame = Rc<RefCell<Vec<u32>>>;

/// Host-side input queue, drained by the TIA during vertical blank.
#[derive(Debug, Clone, Default)]
pub struct EventQueue(Rc<RefCell<VecDeque<TvEvent>>>);

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: TvEvent) {
        self.0.borrow_mut().push_back(event);
    }

    fn pop(&self) -> Option<TvEvent> {
        self.0.borrow_mut().pop_front()
    }
}

/// A television that renders into a shared 160x192 ARGB32 buffer and
/// feeds events from an [`EventQueue`].
pub struct FramebufferTelevision {
    frame: SharedFrame,
    events: EventQueue,
}

impl Default for FramebufferTelevision {
    fn default() -> Self {
        Self::new()
    }
}

impl FramebufferTelevision {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: Rc::new(RefCell::new(vec![0; (FB_WIDTH * FB_HEIGHT) as usize])),
            events: EventQueue::new(),
        }
    }

    /// Clone the framebuffer handle.
    #[must_use]
    pub fn frame(&self) -> SharedFrame {
        Rc::clone(&self.frame)
    }

    /// Clone the input queue handle.
    #[must_use]
    pub fn events(&self) -> EventQueue {
        self.events.clone()
    }
}

impl Television for FramebufferTelevision {
    fn set_pixel(&mut self, x: u16, y: u16, color: u8) {
        let index = usize::from(y) * FB_WIDTH as usize + usize::from(x);
        self.frame.borrow_mut()[index] = palette::rgb(color);
    }

    fn refresh(&mut self) {}

    fn poll_event(&mut self) -> Option<TvEvent> {
        self.events.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_land_in_the_shared_frame() {
        let mut tv = FramebufferTelevision::new();
        let frame = tv.frame();
        tv.set_pixel(0, 0, 0x0E);
        tv.set_pixel(159, 191, 0x0E);
        assert_eq!(frame.borrow()[0], palette::rgb(0x0E));
        assert_eq!(frame.borrow()[160 * 192 - 1], palette::rgb(0x0E));
    }

    #[test]
    fn events_drain_in_order() {
        let mut tv = FramebufferTelevision::new();
        let queue = tv.events();
        queue.push(TvEvent::Quit);
        queue.push(TvEvent::Select { pressed: true });
        assert_eq!(tv.poll_event(), Some(TvEvent::Quit));
        assert_eq!(tv.poll_event(), Some(TvEvent::Select { pressed: true }));
        assert_eq!(tv.poll_event(), None);
    }
}
