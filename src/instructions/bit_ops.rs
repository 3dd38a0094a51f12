//! # Bit Manipulation Instructions
//!
//! - RMB / SMB: Reset or set one bit of a zero page byte. No flags change.
//! - TRB / TSB: Test the byte against A (Z = `A & M == 0`), then clear or
//!   set the bits that are set in A.

use crate::bits;
use crate::cpu::{Cpu, Operand};
use crate::memory::MemoryBus;
use crate::status::Status;

/// Executes RMBn (Reset Memory Bit).
pub(crate) fn execute_rmb<M: MemoryBus>(cpu: &mut Cpu<M>, bit: u8, operand: &Operand) {
    let value = cpu.memory.read(operand.addr);
    cpu.memory.write(operand.addr, bits::clear_bit(value, bit));
}

/// Executes SMBn (Set Memory Bit).
pub(crate) fn execute_smb<M: MemoryBus>(cpu: &mut Cpu<M>, bit: u8, operand: &Operand) {
    let value = cpu.memory.read(operand.addr);
    cpu.memory.write(operand.addr, bits::set_bit(value, bit));
}

/// Executes TRB (Test and Reset Bits).
pub(crate) fn execute_trb<M: MemoryBus>(cpu: &mut Cpu<M>, operand: &Operand) {
    let value = cpu.memory.read(operand.addr);
    cpu.status.set(Status::ZERO, cpu.a & value == 0);
    cpu.memory.write(operand.addr, bits::clear_mask(value, cpu.a));
}

/// Executes TSB (Test and Set Bits).
pub(crate) fn execute_tsb<M: MemoryBus>(cpu: &mut Cpu<M>, operand: &Operand) {
    let value = cpu.memory.read(operand.addr);
    cpu.status.set(Status::ZERO, cpu.a & value == 0);
    cpu.memory.write(operand.addr, bits::set_mask(value, cpu.a));
}
