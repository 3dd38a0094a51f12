//! Tests for AND, ORA, EOR, BIT and the compare instructions.

use lib65c02::{Cpu, FlatMemory, MemoryBus, Status};

fn setup_cpu(program: &[u8]) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.load(0x8000, program);
    Cpu::new(memory)
}

#[test]
fn test_and_immediate() {
    let mut cpu = setup_cpu(&[0x29, 0x0F]);
    cpu.set_a(0xF3);
    cpu.step();
    assert_eq!(cpu.a(), 0x03);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_ora_zero_page_indirect() {
    // ORA ($20) with pointer -> 0x1234
    let mut cpu = setup_cpu(&[0x12, 0x20]);
    cpu.memory_mut().write(0x0020, 0x34);
    cpu.memory_mut().write(0x0021, 0x12);
    cpu.memory_mut().write(0x1234, 0x80);
    cpu.set_a(0x01);
    assert_eq!(cpu.step(), 5);
    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flag_n());
}

#[test]
fn test_eor_sets_zero() {
    let mut cpu = setup_cpu(&[0x49, 0xAA]);
    cpu.set_a(0xAA);
    cpu.step();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_cmp_greater_equal_less() {
    let mut cpu = setup_cpu(&[0xC9, 0x40, 0xC9, 0x50, 0xC9, 0x60]);
    cpu.set_a(0x50);

    cpu.step();
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());

    cpu.step();
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());

    cpu.step();
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.a(), 0x50);
}

#[test]
fn test_cpx_and_cpy() {
    let mut cpu = setup_cpu(&[0xE0, 0x10, 0xC0, 0x20]);
    cpu.set_x(0x10);
    cpu.set_y(0x10);

    cpu.step();
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());

    cpu.step();
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
}

#[test]
fn test_bit_memory_copies_n_and_v() {
    let mut cpu = setup_cpu(&[0x24, 0x10]);
    cpu.memory_mut().write(0x0010, 0xC0);
    cpu.set_a(0x01);
    cpu.step();
    assert!(cpu.flag_z());
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
}

#[test]
fn test_bit_immediate_only_touches_zero() {
    let mut cpu = setup_cpu(&[0x89, 0xC0]);
    cpu.set_a(0x01);
    cpu.set_flag(Status::NEGATIVE, false);
    cpu.set_flag(Status::OVERFLOW, true);
    cpu.step();
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(cpu.flag_v());
}

#[test]
fn test_lda_indirect_y_page_cross() {
    // LDA ($40),Y with base 0x10FF and Y=1
    let mut cpu = setup_cpu(&[0xB1, 0x40]);
    cpu.memory_mut().write(0x0040, 0xFF);
    cpu.memory_mut().write(0x0041, 0x10);
    cpu.memory_mut().write(0x1100, 0x77);
    cpu.set_y(1);
    assert_eq!(cpu.step(), 6);
    assert_eq!(cpu.a(), 0x77);
}

#[test]
fn test_indirect_x_pointer_wraps_in_zero_page() {
    // LDA ($FF,X) with X=0: pointer bytes at 0x00FF and 0x0000
    let mut cpu = setup_cpu(&[0xA1, 0xFF]);
    cpu.memory_mut().write(0x00FF, 0x00);
    cpu.memory_mut().write(0x0000, 0x30);
    cpu.memory_mut().write(0x3000, 0x5A);
    cpu.step();
    assert_eq!(cpu.a(), 0x5A);
}
