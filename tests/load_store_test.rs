//! Tests for loads, stores, transfers and increments.

use lib65c02::{Cpu, FlatMemory, MemoryBus};

fn setup_cpu(program: &[u8]) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.load(0x8000, program);
    Cpu::new(memory)
}

#[test]
fn test_lda_immediate_flags() {
    let mut cpu = setup_cpu(&[0xA9, 0x00, 0xA9, 0x80]);
    cpu.step();
    assert!(cpu.flag_z());
    cpu.step();
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.pc(), 0x8004);
}

#[test]
fn test_ldx_zero_page_y_wraps() {
    // LDX $F0,Y with Y=0x20 reads 0x0010
    let mut cpu = setup_cpu(&[0xB6, 0xF0]);
    cpu.memory_mut().write(0x0010, 0x42);
    cpu.memory_mut().write(0x0110, 0x99);
    cpu.set_y(0x20);
    cpu.step();
    assert_eq!(cpu.x(), 0x42);
}

#[test]
fn test_sta_absolute_y_has_no_page_penalty() {
    let mut cpu = setup_cpu(&[0x99, 0xFF, 0x20]);
    cpu.set_a(0x11);
    cpu.set_y(1);
    assert_eq!(cpu.step(), 5);
    assert_eq!(cpu.memory().peek(0x2100), 0x11);
}

#[test]
fn test_stx_sty() {
    let mut cpu = setup_cpu(&[0x86, 0x10, 0x84, 0x11]);
    cpu.set_x(0xAB);
    cpu.set_y(0xCD);
    cpu.step();
    cpu.step();
    assert_eq!(cpu.memory().peek(0x0010), 0xAB);
    assert_eq!(cpu.memory().peek(0x0011), 0xCD);
}

#[test]
fn test_transfers() {
    // TAX ; TAY ; TSX ; TXS ; TYA ; TXA
    let mut cpu = setup_cpu(&[0xAA, 0xA8, 0xBA, 0x9A, 0x98, 0x8A]);
    cpu.set_a(0x80);
    cpu.step();
    assert_eq!(cpu.x(), 0x80);
    assert!(cpu.flag_n());
    cpu.step();
    assert_eq!(cpu.y(), 0x80);
    cpu.step();
    assert_eq!(cpu.x(), 0xFD);
    cpu.set_x(0x00);
    cpu.step();
    assert_eq!(cpu.sp(), 0x00);
    // TXS leaves flags alone
    assert!(cpu.flag_n());
    cpu.step();
    assert_eq!(cpu.a(), 0x80);
    cpu.step();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_register_increments_wrap() {
    // INX ; INY ; DEX ; DEY
    let mut cpu = setup_cpu(&[0xE8, 0xC8, 0xCA, 0x88]);
    cpu.set_x(0xFF);
    cpu.set_y(0x7F);
    cpu.step();
    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
    cpu.step();
    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
    cpu.step();
    assert_eq!(cpu.x(), 0xFF);
    cpu.step();
    assert_eq!(cpu.y(), 0x7F);
}

#[test]
fn test_dec_memory() {
    let mut cpu = setup_cpu(&[0xC6, 0x10]);
    cpu.memory_mut().write(0x0010, 0x01);
    assert_eq!(cpu.step(), 5);
    assert_eq!(cpu.memory().peek(0x0010), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_flag_instructions() {
    // SEC ; SED ; SEI ; CLC ; CLD ; CLI ; CLV
    let mut cpu = setup_cpu(&[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58, 0xB8]);
    cpu.step();
    assert!(cpu.flag_c());
    cpu.step();
    assert!(cpu.flag_d());
    cpu.step();
    assert!(cpu.flag_i());
    cpu.step();
    assert!(!cpu.flag_c());
    cpu.step();
    assert!(!cpu.flag_d());
    cpu.step();
    assert!(!cpu.flag_i());
    cpu.set_flag(lib65c02::Status::OVERFLOW, true);
    cpu.step();
    assert!(!cpu.flag_v());
}
