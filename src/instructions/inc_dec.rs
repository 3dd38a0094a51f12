//! # Increment and Decrement Instructions
//!
//! INC and DEC work on memory or, in implied mode, on the accumulator.
//! All forms wrap and set N and Z.

use crate::addressing::AddressingMode;
use crate::cpu::{Cpu, Operand};
use crate::memory::MemoryBus;

/// Executes the INC (Increment) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    let result = cpu.load(mode, operand).wrapping_add(1);
    cpu.store(mode, operand, result);
    cpu.status.set_zn(result);
}

/// Executes the DEC (Decrement) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    let result = cpu.load(mode, operand).wrapping_sub(1);
    cpu.store(mode, operand, result);
    cpu.status.set_zn(result);
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.status.set_zn(cpu.x);
}

pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.status.set_zn(cpu.y);
}

pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.status.set_zn(cpu.x);
}

pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.status.set_zn(cpu.y);
}
