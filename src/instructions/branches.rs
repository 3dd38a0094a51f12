//! # Branch Instructions
//!
//! Flag branches, BRA, and the bit-test branches BBR/BBS. The condition is
//! evaluated by [`Cpu::branch_taken`], which is also what charges the
//! taken/page-cross cycles, so timing and control flow always agree.

use crate::cpu::{Cpu, Operand};
use crate::memory::MemoryBus;
use crate::opcodes::Operation;

/// Executes any branch: jumps to the resolved target when the condition holds.
pub(crate) fn execute_branch<M: MemoryBus>(cpu: &mut Cpu<M>, operation: Operation, operand: &Operand) {
    // The tested byte goes over the bus once
    if matches!(operation, Operation::Bbr(_) | Operation::Bbs(_)) {
        cpu.memory.read(operand.addr);
    }
    if cpu.branch_taken(operation, operand) {
        cpu.pc = operand.target;
    }
}
