//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR operate on the accumulator (implied mode) or on
//! memory as a read-modify-write.

use crate::addressing::AddressingMode;
use crate::cpu::{Cpu, Operand};
use crate::memory::MemoryBus;
use crate::status::Status;

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// Bit 7 goes to carry, bit 0 becomes 0.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    shift(cpu, mode, operand, |value, _| (value << 1, value & 0x80 != 0));
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Bit 0 goes to carry, bit 7 becomes 0.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    shift(cpu, mode, operand, |value, _| (value >> 1, value & 0x01 != 0));
}

/// Executes the ROL (Rotate Left) instruction.
///
/// Carry enters bit 0, bit 7 goes to carry.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    shift(cpu, mode, operand, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    });
}

/// Executes the ROR (Rotate Right) instruction.
///
/// Carry enters bit 7, bit 0 goes to carry.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    shift(cpu, mode, operand, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    });
}

fn shift<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    mode: AddressingMode,
    operand: &Operand,
    op: impl FnOnce(u8, bool) -> (u8, bool),
) {
    let value = cpu.load(mode, operand);
    let (result, carry) = op(value, cpu.status.contains(Status::CARRY));
    cpu.store(mode, operand, result);
    cpu.status.set(Status::CARRY, carry);
    cpu.status.set_zn(result);
}
