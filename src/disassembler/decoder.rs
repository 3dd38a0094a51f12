//! Instruction decoder for the 65C02 disassembler

use crate::disassembler::Instruction;
use crate::memory::MemoryBus;
use crate::opcodes::decode;

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The memory address of this instruction
///
/// # Returns
///
/// `None` only when `bytes` is shorter than the instruction. Every opcode
/// decodes; reserved ones come back with `documented == false`.
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<Instruction> {
    let opcode = *bytes.first()?;
    let size = decode(opcode).size_bytes as usize;

    if bytes.len() < size {
        return None;
    }

    Some(build(address, opcode, &bytes[1..size]))
}

/// Decode the instruction at `address` through `peek`.
///
/// Operand bytes wrap around the top of the address space.
pub fn instruction_at<M: MemoryBus + ?Sized>(bus: &M, address: u16) -> Instruction {
    let opcode = bus.peek(address);
    let size = decode(opcode).size_bytes as u16;
    let operands: Vec<u8> = (1..size)
        .map(|i| bus.peek(address.wrapping_add(i)))
        .collect();
    build(address, opcode, &operands)
}

fn build(address: u16, opcode: u8, operands: &[u8]) -> Instruction {
    let metadata = decode(opcode);
    Instruction {
        address,
        opcode,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
        operand_bytes: operands.to_vec(),
        size_bytes: metadata.size_bytes,
        base_cycles: metadata.base_cycles,
        documented: metadata.documented,
    }
}
