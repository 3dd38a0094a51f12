//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC / SBC: Add and subtract with carry, binary or decimal
//! - AND / ORA / EOR: Bitwise logic on the accumulator
//! - CMP / CPX / CPY: Register comparison
//! - BIT: Bit test
//!
//! In decimal mode the 65C02 produces valid N and Z flags from the BCD
//! result. V follows the intermediate signed sum for ADC and the binary
//! subtraction for SBC.

use crate::addressing::AddressingMode;
use crate::cpu::{Cpu, Operand};
use crate::memory::MemoryBus;
use crate::status::Status;

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator.
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    let value = cpu.load(mode, operand);
    add_with_carry(cpu, value);
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Subtracts the operand and the borrow (inverted carry) from the accumulator.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    let value = cpu.load(mode, operand);
    if cpu.status.contains(Status::DECIMAL) {
        subtract_decimal(cpu, value);
    } else {
        add_with_carry(cpu, !value);
    }
}

fn add_with_carry<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) {
    let a = cpu.a as u16;
    let b = value as u16;
    let carry_in = cpu.status.contains(Status::CARRY) as u16;

    let (sum, carry) = if cpu.status.contains(Status::DECIMAL) {
        let mut lo = (a & 0x0F) + (b & 0x0F) + carry_in;
        if lo >= 0x0A {
            lo = ((lo + 0x06) & 0x0F) + 0x10;
        }
        let mut sum = (a & 0xF0) + (b & 0xF0) + lo;
        // V reflects the signed intermediate before the high-nibble fix
        cpu.status.set(Status::OVERFLOW, !(a ^ b) & (a ^ sum) & 0x80 != 0);
        if sum >= 0xA0 {
            sum += 0x60;
        }
        (sum, sum >= 0x100)
    } else {
        let sum = a + b + carry_in;
        cpu.status.set(Status::OVERFLOW, !(a ^ b) & (a ^ sum) & 0x80 != 0);
        (sum, sum > 0xFF)
    };

    cpu.a = sum as u8;
    cpu.status.set(Status::CARRY, carry);
    cpu.status.set_zn(cpu.a);
}

fn subtract_decimal<M: MemoryBus>(cpu: &mut Cpu<M>, value: u8) {
    let a = cpu.a as i16;
    let b = value as i16;
    let borrow = 1 - cpu.status.contains(Status::CARRY) as i16;

    // C and V come from the binary subtraction
    let binary = a - b - borrow;
    let overflow = (a ^ b) & (a ^ binary) & 0x80 != 0;

    let lo = (a & 0x0F) - (b & 0x0F) - borrow;
    let mut result = binary;
    if result < 0 {
        result -= 0x60;
    }
    if lo < 0 {
        result -= 0x06;
    }

    cpu.a = result as u8;
    cpu.status.set(Status::CARRY, binary >= 0);
    cpu.status.set(Status::OVERFLOW, overflow);
    cpu.status.set_zn(cpu.a);
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    let value = cpu.load(mode, operand);
    cpu.a &= value;
    cpu.status.set_zn(cpu.a);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    let value = cpu.load(mode, operand);
    cpu.a |= value;
    cpu.status.set_zn(cpu.a);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    let value = cpu.load(mode, operand);
    cpu.a ^= value;
    cpu.status.set_zn(cpu.a);
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    let value = cpu.load(mode, operand);
    let register = cpu.a;
    compare(cpu, register, value);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    let value = cpu.load(mode, operand);
    let register = cpu.x;
    compare(cpu, register, value);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    let value = cpu.load(mode, operand);
    let register = cpu.y;
    compare(cpu, register, value);
}

fn compare<M: MemoryBus>(cpu: &mut Cpu<M>, register: u8, value: u8) {
    cpu.status.set(Status::CARRY, register >= value);
    cpu.status.set_zn(register.wrapping_sub(value));
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set from `A & M`. Memory forms also copy bits 7 and 6 of the operand
/// into N and V; the immediate form leaves them alone.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut Cpu<M>, mode: AddressingMode, operand: &Operand) {
    let value = cpu.load(mode, operand);
    cpu.status.set(Status::ZERO, cpu.a & value == 0);
    if mode != AddressingMode::Immediate {
        cpu.status.set(Status::NEGATIVE, value & 0x80 != 0);
        cpu.status.set(Status::OVERFLOW, value & 0x40 != 0);
    }
}
