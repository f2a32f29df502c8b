//! Whole-console tests: small programs running on the assembled
//! CPU/TIA/RIOT system.

use atari_tia::{palette, JoystickInput, TvEvent};
use emu_atari_2600::{Atari2600, AtariConfig, FrameResult, RomError};
use mos_6502::CpuFault;

/// Build a 4K image with `program` at $F000 and the reset vector
/// pointing there.
fn make_rom(program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0; 0x1000];
    rom[..program.len()].copy_from_slice(program);
    rom[0xFFC] = 0x00;
    rom[0xFFD] = 0xF0;
    rom
}

fn atari_with(program: &[u8]) -> Atari2600 {
    Atari2600::new(&AtariConfig {
        rom: make_rom(program),
    })
    .unwrap()
}

#[test]
fn boots_from_the_reset_vector() {
    let atari = atari_with(&[0xEA]);
    assert_eq!(atari.cpu().regs.pc, 0xF000);
}

#[test]
fn rejects_a_bad_rom_size() {
    let result = Atari2600::new(&AtariConfig { rom: vec![0; 100] });
    assert!(matches!(result, Err(RomError::UnsupportedSize { size: 100 })));
}

#[test]
fn two_k_rom_boots_from_the_upper_half() {
    // LDA #$01 at the start of the image, which maps to $F800.
    let mut rom = vec![0; 0x800];
    rom[0] = 0xA9;
    rom[1] = 0x01;
    rom[0x7FC] = 0x00;
    rom[0x7FD] = 0xF8;

    let mut atari = Atari2600::new(&AtariConfig { rom }).unwrap();
    assert_eq!(atari.cpu().regs.pc, 0xF800);
    assert_eq!(atari.bus().peek(0xF000), 0x00, "lower half reads empty");
    atari.step().unwrap();
    assert_eq!(atari.cpu().regs.a, 0x01);
}

#[test]
fn program_writes_reach_riot_ram() {
    // LDA #$42; STA $80; JMP *
    let mut atari = atari_with(&[0xA9, 0x42, 0x85, 0x80, 0x4C, 0x04, 0xF0]);
    atari.step().unwrap();
    atari.step().unwrap();
    assert_eq!(atari.bus().peek(0x80), 0x42);
}

#[test]
fn wsync_halts_the_cpu_until_the_scanline_ends() {
    // LDA #$00; STA WSYNC; JMP *
    let mut atari = atari_with(&[0xA9, 0x00, 0x85, 0x02, 0x4C, 0x04, 0xF0]);
    assert_eq!(atari.step(), Ok(2));
    assert_eq!(atari.step(), Ok(3));
    assert!(atari.bus().tia.waiting_for_sync());

    let mut halted = 0;
    while atari.bus().tia.waiting_for_sync() {
        assert_eq!(atari.step(), Ok(1), "halted cycles tick the chips one by one");
        halted += 1;
    }
    assert_eq!(halted, 71, "5 of the line's 76 cycles went to instructions");
    assert_eq!(atari.cpu().regs.pc, 0xF004);
}

#[test]
fn run_frame_paints_the_background() {
    // LDA #$1E; STA COLUBK; loop: STA WSYNC; JMP loop
    let mut atari = atari_with(&[0xA9, 0x1E, 0x85, 0x09, 0x85, 0x02, 0x4C, 0x04, 0xF0]);
    assert_eq!(atari.run_frame(), Ok(FrameResult::Completed));
    assert_eq!(atari.bus().tia.frame_count(), 1);

    let frame = atari.framebuffer();
    assert_eq!(frame.len(), 160 * 192);
    assert_eq!(frame[0], palette::rgb(0x1E));
    assert_eq!(frame[160 * 192 - 1], palette::rgb(0x1E));
}

#[test]
fn illegal_opcode_faults_the_machine() {
    let mut atari = atari_with(&[0x02]);
    assert_eq!(
        atari.run_frame(),
        Err(CpuFault::IllegalOpcode {
            opcode: 0x02,
            pc: 0xF000
        })
    );
}

#[test]
fn quit_event_stops_the_frame() {
    let mut atari = atari_with(&[0x85, 0x02, 0x4C, 0x00, 0xF0]);
    atari.events().push(TvEvent::Quit);
    assert_eq!(atari.run_frame(), Ok(FrameResult::Quit));
}

#[test]
fn console_switch_events_reach_the_riot() {
    let mut atari = atari_with(&[0x85, 0x02, 0x4C, 0x00, 0xF0]);
    atari.events().push(TvEvent::Reset { pressed: true });
    atari.events().push(TvEvent::Select { pressed: true });
    assert_eq!(atari.run_frame(), Ok(FrameResult::Completed));
    assert_eq!(atari.bus().riot.read(0x282) & 0x03, 0, "both switches held");

    atari.events().push(TvEvent::Reset { pressed: false });
    atari.events().push(TvEvent::Select { pressed: false });
    atari.run_frame().unwrap();
    assert_eq!(atari.bus().riot.read(0x282) & 0x03, 0x03);
}

#[test]
fn joystick_events_reach_the_ports() {
    let mut atari = atari_with(&[0x85, 0x02, 0x4C, 0x00, 0xF0]);
    atari.events().push(TvEvent::Joystick {
        input: JoystickInput::Left,
        pressed: true,
    });
    atari.events().push(TvEvent::Joystick {
        input: JoystickInput::Fire,
        pressed: true,
    });
    atari.run_frame().unwrap();
    assert_eq!(atari.bus().riot.read(0x280), 0xBF, "left held, active low");
    assert_eq!(atari.bus().tia.read(0x0C), 0x00, "fire held, active low");
}
