//! Fuzz target for cycle-budgeted execution.
//!
//! Runs the same program twice, once with a single `clock` call and once with
//! the budget cut into arbitrary slices, and checks that both machines end in
//! the same state.

#![no_main]

use arbitrary::Arbitrary;
use lib65c02::{Cpu, FlatMemory, MemoryBus};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    program: Vec<u8>,
    zero_page: [u8; 64],
    slices: Vec<u8>,
}

fn machine(input: &FuzzInput) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFA, &[0x00, 0x80, 0x00, 0x80, 0x00, 0x80]);
    memory.load(0x0000, &input.zero_page);
    memory.load(0x8000, &input.program);
    Cpu::new(memory)
}

fuzz_target!(|input: FuzzInput| {
    if input.program.len() > 1024 || input.slices.len() > 256 {
        return;
    }

    let slices: Vec<u32> = input.slices.iter().map(|&s| s as u32 + 1).collect();
    let total: u32 = slices.iter().sum();

    let mut whole = machine(&input);
    let mut split = machine(&input);

    assert_eq!(whole.clock(total), total);
    for &slice in &slices {
        assert_eq!(split.clock(slice), slice);
    }

    assert_eq!(whole.registers(), split.registers());
    assert_eq!(whole.run_state(), split.run_state());
    assert_eq!(whole.truncation(), split.truncation());
    assert_eq!(whole.memory().ticks(), split.memory().ticks());
    for addr in 0..=0xFFFFu16 {
        assert_eq!(whole.memory().peek(addr), split.memory().peek(addr));
    }
});
