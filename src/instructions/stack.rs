//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA / PHX / PHY / PHP: Push a register
//! - PLA / PLX / PLY / PLP: Pull a register
//!
//! The stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page. The full stack address is calculated as 0x0100 | SP.

use crate::cpu::Cpu;
use crate::memory::MemoryBus;

/// Executes the PHA (Push Accumulator) instruction.
///
/// # Examples
///
/// ```
/// use lib65c02::{Cpu, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x8000, &[0xA9, 0x42, 0x48]); // LDA #$42 ; PHA
///
/// let mut cpu = Cpu::new(memory);
/// cpu.step();
/// assert_eq!(cpu.step(), 3);
/// assert_eq!(cpu.sp(), 0xFC);
/// assert_eq!(cpu.memory().peek(0x01FD), 0x42);
/// ```
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.push(cpu.a);
}

/// Executes the PHX (Push X Register) instruction.
pub(crate) fn execute_phx<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.push(cpu.x);
}

/// Executes the PHY (Push Y Register) instruction.
pub(crate) fn execute_phy<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.push(cpu.y);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy has B and bit 5 set.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.push(cpu.status.to_pushed());
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.a = cpu.pull();
    cpu.status.set_zn(cpu.a);
}

/// Executes the PLX (Pull X Register) instruction.
pub(crate) fn execute_plx<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.x = cpu.pull();
    cpu.status.set_zn(cpu.x);
}

/// Executes the PLY (Pull Y Register) instruction.
pub(crate) fn execute_ply<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.y = cpu.pull();
    cpu.status.set_zn(cpu.y);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// B and bit 5 of the pulled byte are ignored.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let pulled = cpu.pull();
    cpu.status = cpu.status.restore(pulled);
}
