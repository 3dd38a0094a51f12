//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV each touch exactly one flag.

use crate::cpu::Cpu;
use crate::memory::MemoryBus;
use crate::status::Status;

pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.status.remove(Status::CARRY);
}

pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.status.insert(Status::CARRY);
}

/// Clears I. A pending IRQ is taken after the next instruction boundary.
pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.status.remove(Status::IRQ_DISABLE);
}

pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.status.insert(Status::IRQ_DISABLE);
}

pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.status.remove(Status::DECIMAL);
}

pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.status.insert(Status::DECIMAL);
}

pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.status.remove(Status::OVERFLOW);
}
