//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary CPU states and memory contents,
//! then executes a few instructions to find edge cases and crashes.

#![no_main]

use arbitrary::Arbitrary;
use lib65c02::{decode, Cpu, FlatMemory, MemoryBus, Status};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Raw status byte
    status: u8,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (instructions + operands)
    program: [u8; 16],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
    /// Small region of memory for absolute addressing
    main_memory: [u8; 256],
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    irq: bool,
    nmi: bool,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();

    // Reset to 0x8000, IRQ to 0x9000, NMI to 0xA000
    memory.load(0xFFFA, &[0x00, 0xA0, 0x00, 0x80, 0x00, 0x90]);
    memory.load(0x8000, &input.memory.program);
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);

    let mut cpu = Cpu::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(Status::from_bits_retain(input.cpu_state.status));

    cpu.memory_mut().set_irq(input.irq);
    if input.nmi {
        cpu.memory_mut().raise_nmi();
    }

    for _ in 0..4 {
        let before = cpu.cycles();
        let opcode = cpu.memory().peek(cpu.pc());
        let cycles = cpu.step();

        // One instruction, one interrupt entry or one idle cycle
        assert!(cycles >= 1);
        assert!(cycles <= (decode(opcode).base_cycles as u32 + 2).max(7));
        assert_eq!(cpu.cycles(), before + cycles as u64);
        assert!(!cpu.is_suspended());
    }
});
