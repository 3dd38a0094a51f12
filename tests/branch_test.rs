//! Branch timing and target tests.
//!
//! Branches cost 2 cycles when not taken, 3 when taken within the page of
//! the following instruction and 4 when the target is on another page.

use lib65c02::{Cpu, FlatMemory, MemoryBus, Status};

fn setup_cpu_at(addr: u16, program: &[u8]) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, addr as u8);
    memory.write(0xFFFD, (addr >> 8) as u8);
    memory.load(addr, program);
    Cpu::new(memory)
}

#[test]
fn test_beq_not_taken() {
    let mut cpu = setup_cpu_at(0x8000, &[0xF0, 0x10]);
    cpu.set_flag(Status::ZERO, false);
    assert_eq!(cpu.step(), 2);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_beq_taken_same_page() {
    let mut cpu = setup_cpu_at(0x8000, &[0xF0, 0x10]);
    cpu.set_flag(Status::ZERO, true);
    assert_eq!(cpu.step(), 3);
    assert_eq!(cpu.pc(), 0x8012);
}

#[test]
fn test_beq_taken_other_page() {
    let mut cpu = setup_cpu_at(0x80F0, &[0xF0, 0x20]);
    cpu.set_flag(Status::ZERO, true);
    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.pc(), 0x8112);
}

#[test]
fn test_backward_branch() {
    // BNE -4 from 0x8010
    let mut cpu = setup_cpu_at(0x8010, &[0xD0, 0xFC]);
    cpu.set_flag(Status::ZERO, false);
    assert_eq!(cpu.step(), 3);
    assert_eq!(cpu.pc(), 0x800E);
}

#[test]
fn test_flag_branches() {
    let cases: &[(u8, Status, bool)] = &[
        (0x10, Status::NEGATIVE, false), // BPL
        (0x30, Status::NEGATIVE, true),  // BMI
        (0x50, Status::OVERFLOW, false), // BVC
        (0x70, Status::OVERFLOW, true),  // BVS
        (0x90, Status::CARRY, false),    // BCC
        (0xB0, Status::CARRY, true),     // BCS
        (0xD0, Status::ZERO, false),     // BNE
        (0xF0, Status::ZERO, true),      // BEQ
    ];

    for &(opcode, flag, taken_when) in cases {
        let mut cpu = setup_cpu_at(0x8000, &[opcode, 0x04]);
        cpu.set_flag(flag, taken_when);
        cpu.step();
        assert_eq!(cpu.pc(), 0x8006, "opcode 0x{:02X} should branch", opcode);

        let mut cpu = setup_cpu_at(0x8000, &[opcode, 0x04]);
        cpu.set_flag(flag, !taken_when);
        cpu.step();
        assert_eq!(cpu.pc(), 0x8002, "opcode 0x{:02X} should fall through", opcode);
    }
}

#[test]
fn test_bra_always_taken() {
    let mut cpu = setup_cpu_at(0x8000, &[0x80, 0x7F]);
    assert_eq!(cpu.step(), 3);
    assert_eq!(cpu.pc(), 0x8081);
}

#[test]
fn test_bbr_and_bbs() {
    // BBR3 $10,+2 ; NOP ; NOP ; BBS3 $10,+2
    let mut cpu = setup_cpu_at(0x8000, &[0x3F, 0x10, 0x02, 0xEA, 0xEA, 0xBF, 0x10, 0x02]);
    cpu.memory_mut().write(0x0010, 0x00);

    // Bit 3 clear: BBR3 branches
    assert_eq!(cpu.step(), 6);
    assert_eq!(cpu.pc(), 0x8005);

    // BBS3 falls through
    assert_eq!(cpu.step(), 5);
    assert_eq!(cpu.pc(), 0x8008);
}

#[test]
fn test_bbs_taken_leaves_flags() {
    let mut cpu = setup_cpu_at(0x8000, &[0xFF, 0x10, 0x10]);
    cpu.memory_mut().write(0x0010, 0x80);
    let before = cpu.status();
    cpu.step();
    assert_eq!(cpu.pc(), 0x8013);
    assert_eq!(cpu.status(), before);
}

#[test]
fn test_bit_branch_drives_tested_byte_on_bus() {
    // BBS0 $10,+2
    let mut cpu = setup_cpu_at(0x8000, &[0x8F, 0x10, 0x02]);
    cpu.memory_mut().write(0x0010, 0x01);
    cpu.memory_mut().write(0x0200, 0x99);
    cpu.step();
    assert_eq!(cpu.pc(), 0x8005);
    assert_eq!(cpu.memory().open_bus(), 0x01);
}
