//! Top-level NTSC Atari 2600 system.
//!
//! The 6507 runs at 1.19 MHz, one third of the TIA color clock. One
//! scanline is 76 CPU cycles, one frame 262 lines. The driving loop
//! respects the `WSYNC` handshake: while the TIA holds the halt line
//! the CPU executes nothing and the chips tick one cycle at a time.

use emu_core::{Cpu, Tickable};
use mos_6502::{CpuFault, Mos6502, disassemble};
use mos_riot_6532::JoystickDirection;

use atari_tia::{JoystickInput, Tia, TvEvent};

use crate::bus::AtariBus;
use crate::cartridge::Cartridge;
use crate::config::AtariConfig;
use crate::television::{EventQueue, FramebufferTelevision, SharedFrame, FB_HEIGHT, FB_WIDTH};
use crate::RomError;

/// Why `run_frame` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameResult {
    /// The frame rendered to completion.
    Completed,
    /// The host asked to quit.
    Quit,
}

/// An NTSC Atari 2600 console.
pub struct Atari2600 {
    cpu: Mos6502,
    bus: AtariBus,
    frame: SharedFrame,
    events: EventQueue,
    trace: bool,
}

impl Atari2600 {
    /// Build a console around the given cartridge image and fetch the
    /// reset vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the ROM image size is unsupported.
    pub fn new(config: &AtariConfig) -> Result<Self, RomError> {
        let cart = Cartridge::new(&config.rom)?;
        let tv = FramebufferTelevision::new();
        let frame = tv.frame();
        let events = tv.events();

        let mut bus = AtariBus::new(cart, Tia::new(Box::new(tv)));
        let mut cpu = Mos6502::new();
        cpu.reset(&mut bus);

        Ok(Self {
            cpu,
            bus,
            frame,
            events,
            trace: false,
        })
    }

    /// Log each executed instruction to stderr.
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Execute one CPU step (or one halted cycle under `WSYNC`) and
    /// clock the TIA and RIOT by the cycles it took.
    ///
    /// # Errors
    ///
    /// Returns a fault if the CPU fetches an illegal opcode.
    pub fn step(&mut self) -> Result<u32, CpuFault> {
        let cycles = if self.bus.tia.waiting_for_sync() {
            1
        } else {
            if self.trace {
                self.trace_instruction();
            }
            self.cpu.step(&mut self.bus)?
        };
        self.bus.clock(cycles);
        Ok(cycles)
    }

    /// Run until the TIA finishes the current frame, draining host
    /// events once per vertical-blank line.
    ///
    /// # Errors
    ///
    /// Returns a fault if the CPU fetches an illegal opcode.
    pub fn run_frame(&mut self) -> Result<FrameResult, CpuFault> {
        let target = self.bus.tia.frame_count() + 1;
        while self.bus.tia.frame_count() < target {
            self.step()?;
            if self.bus.tia.take_event_poll() && self.dispatch_events() {
                return Ok(FrameResult::Quit);
            }
        }
        Ok(FrameResult::Completed)
    }

    /// Run until the CPU is about to execute `address`.
    ///
    /// # Errors
    ///
    /// Returns a fault if the CPU fetches an illegal opcode.
    pub fn run_until(&mut self, address: u16) -> Result<(), CpuFault> {
        while self.cpu.regs.pc != address {
            self.step()?;
        }
        Ok(())
    }

    /// Route pending television events to the chips. Returns true on
    /// a quit request.
    fn dispatch_events(&mut self) -> bool {
        while let Some(event) = self.bus.tia.poll_event() {
            match event {
                TvEvent::Quit => return true,
                TvEvent::Select { pressed } => self.bus.riot.set_console_select(pressed),
                TvEvent::Reset { pressed } => self.bus.riot.set_console_reset(pressed),
                TvEvent::Joystick { input, pressed } => match input {
                    JoystickInput::Fire => self.bus.tia.set_fire(0, pressed),
                    JoystickInput::Up => {
                        self.bus.riot.set_joystick(0, JoystickDirection::Up, pressed);
                    }
                    JoystickInput::Down => {
                        self.bus.riot.set_joystick(0, JoystickDirection::Down, pressed);
                    }
                    JoystickInput::Left => {
                        self.bus.riot.set_joystick(0, JoystickDirection::Left, pressed);
                    }
                    JoystickInput::Right => {
                        self.bus.riot.set_joystick(0, JoystickDirection::Right, pressed);
                    }
                },
            }
        }
        false
    }

    fn trace_instruction(&mut self) {
        let pc = self.cpu.regs.pc;
        let bytes = [
            self.bus.peek(pc),
            self.bus.peek(pc.wrapping_add(1)),
            self.bus.peek(pc.wrapping_add(2)),
        ];
        eprintln!("{pc:04X}  {}", disassemble(&bytes, pc));
    }

    /// Dump CPU state for diagnostics.
    #[must_use]
    pub fn dump(&self) -> String {
        self.cpu.dump()
    }

    /// Snapshot of the framebuffer (ARGB32, row-major 160x192).
    #[must_use]
    pub fn framebuffer(&self) -> Vec<u32> {
        self.frame.borrow().clone()
    }

    /// Framebuffer width.
    #[must_use]
    pub fn framebuffer_width(&self) -> u32 {
        FB_WIDTH
    }

    /// Framebuffer height.
    #[must_use]
    pub fn framebuffer_height(&self) -> u32 {
        FB_HEIGHT
    }

    /// Host input queue handle.
    #[must_use]
    pub fn events(&self) -> EventQueue {
        self.events.clone()
    }

    /// Reference to the CPU.
    #[must_use]
    pub fn cpu(&self) -> &Mos6502 {
        &self.cpu
    }

    /// Reference to the bus.
    #[must_use]
    pub fn bus(&self) -> &AtariBus {
        &self.bus
    }

    /// Mutable reference to the bus.
    pub fn bus_mut(&mut self) -> &mut AtariBus {
        &mut self.bus
    }
}
