//! Unit tests for 6502 instruction behavior.

use emu_core::{Bus, Cpu, SimpleBus};
use mos_6502::{Mos6502, flags};

/// Load a program at $0200 and set PC there.
fn setup_program(bus: &mut SimpleBus, cpu: &mut Mos6502, program: &[u8]) {
    bus.load(0x0200, program);
    cpu.regs.pc = 0x0200;
}

#[test]
fn load_flags_are_pure_function_of_value() {
    for value in 0..=255u8 {
        let mut bus = SimpleBus::new();
        let mut cpu = Mos6502::new();
        setup_program(&mut bus, &mut cpu, &[0xA9, value]);
        cpu.step(&mut bus).unwrap();

        assert_eq!(cpu.regs.a, value);
        assert_eq!(cpu.regs.p.is_set(flags::Z), value == 0, "Z for {value:#04X}");
        assert_eq!(
            cpu.regs.p.is_set(flags::N),
            value & 0x80 != 0,
            "N for {value:#04X}"
        );
    }
}

#[test]
fn lda_immediate_always_two_cycles() {
    for value in [0x00u8, 0x7F, 0x80, 0xFF] {
        let mut bus = SimpleBus::new();
        let mut cpu = Mos6502::new();
        setup_program(&mut bus, &mut cpu, &[0xA9, value]);
        assert_eq!(cpu.step(&mut bus), Ok(2));
    }
}

#[test]
fn beq_not_taken_costs_two() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // LDA #$01 clears Z, so BEQ falls through.
    setup_program(&mut bus, &mut cpu, &[0xA9, 0x01, 0xF0, 0x10]);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.regs.pc, 0x0204);
}

#[test]
fn beq_taken_same_page_costs_three() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0xA9, 0x00, 0xF0, 0x10]);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(cpu.regs.pc, 0x0214);
}

#[test]
fn beq_taken_across_page_costs_four() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // BEQ at $02F0: next instruction at $02F2, target $0312.
    bus.load(0x02F0, &[0xF0, 0x20]);
    cpu.regs.p.assign(flags::Z, true);
    cpu.regs.pc = 0x02F0;
    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert_eq!(cpu.regs.pc, 0x0312);
}

#[test]
fn stack_pha_pla_round_trip() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // LDA #$42; PHA; LDA #$00; PLA
    setup_program(&mut bus, &mut cpu, &[0xA9, 0x42, 0x48, 0xA9, 0x00, 0x68]);
    let s_before = cpu.regs.s;
    for _ in 0..4 {
        cpu.step(&mut bus).unwrap();
    }
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.regs.s, s_before);
}

#[test]
fn brk_rti_round_trip() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    // BRK vector -> $F100, where an RTI waits.
    bus.write(0xFFFE, 0x00);
    bus.write(0xFFFF, 0xF1);
    bus.write(0xF100, 0x40); // RTI

    bus.load(0xF000, &[0x38, 0x00, 0xEA]); // SEC; BRK; NOP padding
    cpu.regs.pc = 0xF000;

    cpu.step(&mut bus).unwrap(); // SEC
    assert_eq!(cpu.step(&mut bus), Ok(7)); // BRK
    assert_eq!(cpu.regs.pc, 0xF100);
    assert_eq!(cpu.regs.s, 0xFA, "BRK pushes PC and status");
    assert!(cpu.regs.p.is_set(flags::I));

    assert_eq!(cpu.step(&mut bus), Ok(6)); // RTI
    assert_eq!(cpu.regs.pc, 0xF003, "return address skips the padding byte");
    assert!(cpu.regs.p.is_set(flags::C), "RTI restores the pre-BRK flags");
}

#[test]
fn jsr_rts_round_trip() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // JSR $0280; NOP. Subroutine: RTS.
    setup_program(&mut bus, &mut cpu, &[0x20, 0x80, 0x02, 0xEA]);
    bus.write(0x0280, 0x60);

    assert_eq!(cpu.step(&mut bus), Ok(6));
    assert_eq!(cpu.regs.pc, 0x0280);
    assert_eq!(cpu.step(&mut bus), Ok(6));
    assert_eq!(cpu.regs.pc, 0x0203, "RTS resumes after the JSR operand");
}

#[test]
fn sta_indexed_never_takes_page_penalty() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // STA $20F0,X with X=$20 crosses a page but stays 5 cycles.
    setup_program(&mut bus, &mut cpu, &[0x9D, 0xF0, 0x20]);
    cpu.regs.a = 0x99;
    cpu.regs.x = 0x20;
    assert_eq!(cpu.step(&mut bus), Ok(5));
    assert_eq!(bus.peek(0x2110), 0x99);
}

#[test]
fn asl_carry_from_shifted_out_bit() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0x0A]); // ASL A
    cpu.regs.a = 0x81;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x02);
    assert!(cpu.regs.p.is_set(flags::C));
}

#[test]
fn bit_copies_operand_bits_to_v_and_n() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    bus.write(0x0010, 0x40);
    setup_program(&mut bus, &mut cpu, &[0x24, 0x10]); // BIT $10
    cpu.regs.a = 0xFF;
    cpu.step(&mut bus).unwrap();
    assert!(cpu.regs.p.is_set(flags::V), "V from bit 6 of the operand");
    assert!(!cpu.regs.p.is_set(flags::N));
    assert!(!cpu.regs.p.is_set(flags::Z));
}

#[test]
fn sbc_binary_carry_is_borrow_complement() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // SEC; LDA #$03; SBC #$05
    setup_program(&mut bus, &mut cpu, &[0x38, 0xA9, 0x03, 0xE9, 0x05]);
    for _ in 0..3 {
        cpu.step(&mut bus).unwrap();
    }
    assert_eq!(cpu.regs.a, 0xFE);
    assert!(!cpu.regs.p.is_set(flags::C), "borrow clears carry");
    assert!(cpu.regs.p.is_set(flags::N));
}

#[test]
fn reset_loads_vector_and_defaults() {
    let mut bus = SimpleBus::new();
    bus.write(0xFFFC, 0x00);
    bus.write(0xFFFD, 0xF0);
    let mut cpu = Mos6502::new();
    cpu.regs.a = 0x55;
    cpu.reset(&mut bus);
    assert_eq!(cpu.regs.pc, 0xF000);
    assert_eq!(cpu.regs.a, 0);
    assert_eq!(cpu.regs.s, 0xFD);
    assert!(cpu.regs.p.is_set(flags::U), "unused bit always set");
    assert!(cpu.regs.p.is_set(flags::I));
}
