//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP / JSR / RTS: Jumps and subroutines
//! - BRK / RTI: Software interrupt and return from interrupt
//! - NOP: No operation, including the reserved encodings
//! - WAI / STP: Halt until interrupt, halt until reset
//!
//! BRK is a software interrupt that:
//! 1. Pushes PC+2 to the stack (high byte first, then low byte)
//! 2. Pushes processor status to stack with B flag set
//! 3. Sets the I (interrupt disable) flag and clears D
//! 4. Loads PC from IRQ vector at $FFFE/F

use crate::cpu::{Cpu, Operand, RunState};
use crate::memory::MemoryBus;
use crate::memory_map::IRQ_VECTOR;

/// Executes the JMP (Jump) instruction.
///
/// Indirect forms were resolved with the 65C02 pointer fetch, which reads the
/// high byte from the next address even across a page boundary.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut Cpu<M>, operand: &Operand) {
    cpu.pc = operand.addr;
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last operand byte, then jumps.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut Cpu<M>, operand: &Operand) {
    let return_address = cpu.pc.wrapping_sub(1);
    cpu.push16(return_address);
    cpu.pc = operand.addr;
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut Cpu<M>) {
    cpu.pc = cpu.pull16().wrapping_add(1);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls status (bits 4 and 5 keep their live values), then PC.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let pulled = cpu.pull();
    cpu.status = cpu.status.restore(pulled);
    cpu.pc = cpu.pull16();
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// BRK is one byte but skips a signature byte: the pushed return address is
/// the opcode address plus two.
///
/// Cycle timing: 7 cycles (fixed)
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut Cpu<M>) {
    let return_address = cpu.pc.wrapping_add(1);
    cpu.enter_handler(IRQ_VECTOR, return_address);
}

/// Executes NOP. Reserved opcodes also land here after skipping their operands.
pub(crate) fn execute_nop() {}

/// Executes the WAI (Wait for Interrupt) instruction.
pub(crate) fn execute_wai<M: MemoryBus>(cpu: &mut Cpu<M>) {
    log::trace!("WAI at pc=0x{:04X}", cpu.pc.wrapping_sub(1));
    cpu.state = RunState::Waiting;
}

/// Executes the STP (Stop) instruction. Only a reset restarts the CPU.
pub(crate) fn execute_stp<M: MemoryBus>(cpu: &mut Cpu<M>) {
    log::trace!("STP at pc=0x{:04X}", cpu.pc.wrapping_sub(1));
    cpu.state = RunState::Stopped;
}
