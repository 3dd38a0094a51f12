//! Fuzz target for the disassembler.
//!
//! This target feeds arbitrary byte sequences to the disassembler
//! to find edge cases and crashes in instruction decoding and formatting.

#![no_main]

use arbitrary::Arbitrary;
use lib65c02::disassembler::formatter::{format_instruction, format_listing};
use lib65c02::{disassemble, Disassembler, DisassemblyOptions, FlatMemory};
use libfuzzer_sys::fuzz_target;

/// Disassembly options for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzOptions {
    start_address: u16,
    hex_dump: bool,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    options: FuzzOptions,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let options = DisassemblyOptions {
        start_address: input.options.start_address,
        hex_dump: input.options.hex_dump,
    };

    let instructions = disassemble(&input.bytes, options);

    let mut total_size: usize = 0;
    let mut expected_address = input.options.start_address;

    for instr in &instructions {
        assert_eq!(instr.address, expected_address);
        assert!(instr.size_bytes >= 1 && instr.size_bytes <= 3);
        assert!(instr.operand_bytes.len() <= instr.size_bytes as usize);
        assert!(!format_instruction(instr).is_empty());

        total_size += instr.size_bytes as usize;
        expected_address = expected_address.wrapping_add(instr.size_bytes as u16);
    }

    assert_eq!(total_size, input.bytes.len());
    assert_eq!(format_listing(&instructions, options).lines().count(), instructions.len());

    // The bus cursor agrees with the slice decoder on complete instructions
    let mut memory = FlatMemory::new();
    memory.load(input.options.start_address, &input.bytes);
    let mut cursor = Disassembler::new(input.options.start_address);
    for instr in instructions.iter().filter(|i| i.mnemonic != ".byte") {
        assert_eq!(cursor.address, instr.address);
        assert_eq!(cursor.disassemble(&memory), format_instruction(instr));
    }
});
