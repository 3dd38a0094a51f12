//! # Load and Store Instructions
//!
//! Loads set N and Z from the loaded value. Stores touch no flags.

use crate::addressing::AddressingMode;
use crate::cpu::{Cpu, Operand};
use crate::memory::MemoryBus;

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    cpu.a = cpu.load(mode, operand);
    cpu.status.set_zn(cpu.a);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    cpu.x = cpu.load(mode, operand);
    cpu.status.set_zn(cpu.x);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    cpu.y = cpu.load(mode, operand);
    cpu.status.set_zn(cpu.y);
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut Cpu<M>, operand: &Operand) {
    cpu.memory.write(operand.addr, cpu.a);
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut Cpu<M>, operand: &Operand) {
    cpu.memory.write(operand.addr, cpu.x);
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut Cpu<M>, operand: &Operand) {
    cpu.memory.write(operand.addr, cpu.y);
}

/// Executes the STZ (Store Zero) instruction.
pub(crate) fn execute_stz<M: MemoryBus>(cpu: &mut Cpu<M>, operand: &Operand) {
    cpu.memory.write(operand.addr, 0);
}
