//! 65C02 Disassembler Module
//!
//! Converts machine code into assembly text, either from a byte slice or
//! directly from a bus through [`Disassembler`], which only ever peeks and
//! so never disturbs device or open-bus state.

pub mod decoder;
pub mod formatter;

use crate::addressing::AddressingMode;
use crate::memory::MemoryBus;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "STA", "BBR3")
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,

    /// Base cycle cost (excluding penalties)
    pub base_cycles: u8,

    /// False for reserved opcodes, which execute as NOPs
    pub documented: bool,
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy, Default)]
pub struct DisassemblyOptions {
    /// Starting address for disassembly (affects address display)
    pub start_address: u16,

    /// Whether listings include the raw instruction bytes
    pub hex_dump: bool,
}

/// Disassemble a byte slice into a vector of instructions
///
/// A trailing instruction whose operands run past the end of `bytes` is
/// emitted as one `.byte` entry per remaining byte.
pub fn disassemble(bytes: &[u8], options: DisassemblyOptions) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pc = 0;
    let mut address = options.start_address;

    while pc < bytes.len() {
        match decoder::decode_instruction(&bytes[pc..], address) {
            Some(instr) => {
                pc += instr.size_bytes as usize;
                address = address.wrapping_add(instr.size_bytes as u16);
                instructions.push(instr);
            }
            None => {
                instructions.push(Instruction {
                    address,
                    opcode: bytes[pc],
                    mnemonic: ".byte",
                    addressing_mode: AddressingMode::Implied,
                    operand_bytes: vec![bytes[pc]],
                    size_bytes: 1,
                    base_cycles: 0,
                    documented: false,
                });
                pc += 1;
                address = address.wrapping_add(1);
            }
        }
    }

    instructions
}

/// Disassembly cursor over a live bus.
///
/// # Examples
///
/// ```
/// use lib65c02::{Disassembler, FlatMemory};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0x8000, &[0xA9, 0x42, 0xF0, 0xFE, 0x02]);
///
/// let mut dis = Disassembler::new(0x8000);
/// assert_eq!(dis.disassemble(&memory), "LDA  #$42");
/// assert_eq!(dis.disassemble(&memory), "BEQ  $FE [$8002]");
/// assert_eq!(dis.disassemble(&memory), "???  $02");
/// assert_eq!(dis.address, 0x8006);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disassembler {
    /// Address of the next instruction to disassemble.
    pub address: u16,
}

impl Disassembler {
    pub fn new(address: u16) -> Self {
        Self { address }
    }

    /// Decode the instruction at the cursor without advancing.
    pub fn current<M: MemoryBus + ?Sized>(&self, bus: &M) -> Instruction {
        decoder::instruction_at(bus, self.address)
    }

    /// Render the instruction at the cursor and move past it.
    pub fn disassemble<M: MemoryBus + ?Sized>(&mut self, bus: &M) -> String {
        let instr = self.current(bus);
        self.address = self.address.wrapping_add(instr.size_bytes as u16);
        formatter::format_instruction(&instr)
    }
}
