//! # CPU State and Execution
//!
//! This module contains the `Cpu` struct representing the 65C02 processor state and
//! the cycle-budgeted fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: a [`Status`] value (NV-BDIZC)
//! - **Run state**: running, waiting for an interrupt (`WAI`) or stopped (`STP`)
//! - **Truncation**: an instruction or interrupt entry that ran out of budget
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Execution Model
//!
//! `clock(cycles)` spends exactly `cycles` cycles. When an instruction costs more
//! than what is left, the CPU pays what it can and remembers how many cycles it
//! still owes. The cost is priced with `peek`, so nothing live happens on the
//! bus until the last cycle is paid; the next call pays the rest, then fetches
//! the instruction and applies its effects, once. `clock(0)` runs exactly one unit: an instruction,
//! an interrupt entry, or one idle cycle while halted.
//!
//! Peripherals are advanced through [`MemoryBus::tick`] by the cycles each step
//! consumed, after the step's effects. Interrupt lines are polled between steps.

use crate::addressing::AddressingMode;
use crate::instructions;
use crate::memory::MemoryBus;
use crate::memory_map::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR, STACK_BASE};
use crate::opcodes::{decode, OpcodeMetadata, Operation};
use crate::status::Status;

/// Cycles taken to enter an interrupt handler.
pub const INTERRUPT_CYCLES: u32 = 7;

/// Stack pointer after reset.
pub const RESET_SP: u8 = 0xFD;

/// Whether the CPU is fetching instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Fetching and executing.
    #[default]
    Running,
    /// Halted by `WAI` until NMI or IRQ.
    Waiting,
    /// Halted by `STP` until reset.
    Stopped,
}

/// What a truncated step was doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    /// An instruction fetched at the snapshot PC.
    Instruction,
    /// Entry into the handler at this vector.
    Interrupt(u16),
}

/// A step that ran out of cycle budget and will finish on a later `clock` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    pub kind: PendingKind,
    /// PC when the step started.
    pub pc: u16,
    /// Open-bus value when the step started.
    pub open_bus: u8,
    /// Cycles still owed before the step takes effect.
    pub owed: u32,
}

/// Resolved operand of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Operand {
    /// Effective address. For zero page relative, the tested byte's address.
    pub addr: u16,
    /// Branch destination for relative modes.
    pub target: u16,
    /// Indexing crossed a page, or the branch destination is on another page.
    pub page_crossed: bool,
}

/// Register snapshot for debuggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub status: u8,
    pub cycles: u64,
}

impl std::fmt::Display for Registers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PC:{:04X} A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} P:{:02X} CYC:{}",
            self.pc, self.a, self.x, self.y, self.sp, self.status, self.cycles
        )
    }
}

/// 65C02 CPU state and execution context.
///
/// The CPU owns its memory bus. It is generic over the bus via the `MemoryBus`
/// trait, so CPU tests run against `FlatMemory` and the full machine runs
/// against `SystemBus`.
///
/// # Examples
///
/// ```
/// use lib65c02::{Cpu, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x8000, &[0x4C, 0x34, 0x12]); // JMP $1234
///
/// let mut cpu = Cpu::new(memory);
/// assert_eq!(cpu.sp(), 0xFD);
///
/// // One cycle now, two later: the jump lands once all three are paid
/// assert_eq!(cpu.clock(1), 1);
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.clock(2), 2);
/// assert_eq!(cpu.pc(), 0x1234);
/// assert_eq!(cpu.cycles(), 3);
/// ```
pub struct Cpu<M: MemoryBus> {
    pub(crate) a: u8,
    pub(crate) x: u8,
    pub(crate) y: u8,
    pub(crate) pc: u16,
    pub(crate) sp: u8,
    pub(crate) status: Status,
    pub(crate) cycles: u64,
    pub(crate) state: RunState,
    pending: Option<Truncation>,
    pub(crate) memory: M,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a CPU on `memory` and runs the reset sequence.
    ///
    /// A, X and Y start at zero; callers wanting undefined power-on content set
    /// them afterwards.
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: RESET_SP,
            status: Status::POWER_ON,
            cycles: 0,
            state: RunState::Running,
            pending: None,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Reset sequence: SP to 0xFD, status to `I` + unused, PC from 0xFFFC.
    ///
    /// Leaves A, X, Y, memory and the cycle counter alone, exits `WAI`/`STP`
    /// and drops any truncated step.
    pub fn reset(&mut self) {
        self.sp = RESET_SP;
        self.status = Status::POWER_ON;
        self.state = RunState::Running;
        self.pending = None;
        self.pc = self.memory.read16(RESET_VECTOR);
        log::debug!("cpu reset, pc=0x{:04X}", self.pc);
    }

    /// Runs for `cycles` cycles, or one unit if `cycles` is 0.
    ///
    /// Returns the number of cycles spent, which equals `cycles` unless
    /// single-stepping.
    pub fn clock(&mut self, cycles: u32) -> u32 {
        if cycles == 0 {
            return self.run_unit(u32::MAX, true);
        }

        let mut spent = 0;
        while spent < cycles {
            spent += self.run_unit(cycles - spent, false);
        }
        spent
    }

    /// Runs one unit and returns its cycle cost.
    pub fn step(&mut self) -> u32 {
        self.clock(0)
    }

    fn run_unit(&mut self, budget: u32, single_step: bool) -> u32 {
        if let Some(pending) = self.pending {
            return self.resume(pending, budget);
        }

        if self.state == RunState::Stopped {
            let idle = if single_step { 1 } else { budget };
            self.advance(idle);
            return idle;
        }

        if self.memory.nmi_pending() {
            self.memory.acknowledge_nmi();
            self.wake();
            return self.begin_interrupt(NMI_VECTOR, budget);
        }

        if self.memory.irq_active() && !self.status.contains(Status::IRQ_DISABLE) {
            self.wake();
            return self.begin_interrupt(IRQ_VECTOR, budget);
        }

        if self.state == RunState::Waiting {
            let idle = if single_step {
                1
            } else {
                self.memory
                    .cycles_until_interrupt(budget)
                    .unwrap_or(budget)
                    .clamp(1, budget)
            };
            self.advance(idle);
            return idle;
        }

        self.begin_instruction(budget)
    }

    fn begin_instruction(&mut self, budget: u32) -> u32 {
        // Cost is worked out with peeks so an unpaid attempt touches no device
        let (metadata, preview) = self.preview();
        let cost = metadata.base_cycles as u32 + self.extra_cycles(metadata, &preview);

        if cost > budget {
            self.pending = Some(Truncation {
                kind: PendingKind::Instruction,
                pc: self.pc,
                open_bus: self.memory.open_bus(),
                owed: cost - budget,
            });
            log::trace!(
                "{} at 0x{:04X} truncated, {} of {} cycles paid",
                metadata.mnemonic,
                self.pc,
                budget,
                cost
            );
            self.advance(budget);
            return budget;
        }

        let metadata = decode(self.fetch());
        let operand = self.resolve(metadata.addressing_mode);
        instructions::execute(self, metadata, operand);
        self.advance(cost);
        cost
    }

    fn begin_interrupt(&mut self, vector: u16, budget: u32) -> u32 {
        if INTERRUPT_CYCLES > budget {
            self.pending = Some(Truncation {
                kind: PendingKind::Interrupt(vector),
                pc: self.pc,
                open_bus: self.memory.open_bus(),
                owed: INTERRUPT_CYCLES - budget,
            });
            log::trace!("interrupt entry 0x{:04X} truncated", vector);
            self.advance(budget);
            return budget;
        }

        self.service_interrupt(vector);
        self.advance(INTERRUPT_CYCLES);
        INTERRUPT_CYCLES
    }

    fn resume(&mut self, mut pending: Truncation, budget: u32) -> u32 {
        if pending.owed > budget {
            pending.owed -= budget;
            self.pending = Some(pending);
            self.advance(budget);
            return budget;
        }

        let paid = pending.owed;
        self.pending = None;
        self.pc = pending.pc;
        self.memory.restore_open_bus(pending.open_bus);

        match pending.kind {
            PendingKind::Interrupt(vector) => self.service_interrupt(vector),
            PendingKind::Instruction => {
                let metadata = decode(self.fetch());
                let operand = self.resolve(metadata.addressing_mode);
                instructions::execute(self, metadata, operand);
            }
        }

        self.advance(paid);
        paid
    }

    fn service_interrupt(&mut self, vector: u16) {
        log::trace!(
            "servicing {} at pc=0x{:04X}",
            if vector == NMI_VECTOR { "NMI" } else { "IRQ" },
            self.pc
        );
        self.enter_handler(vector, self.pc);
    }

    /// Push `return_addr` and status, set I, clear D, jump through `vector`.
    pub(crate) fn enter_handler(&mut self, vector: u16, return_addr: u16) {
        self.push16(return_addr);
        self.push(self.status.to_pushed());
        self.status.remove(Status::DECIMAL);
        self.status.insert(Status::IRQ_DISABLE);
        self.pc = self.memory.read16(vector);
    }

    fn wake(&mut self) {
        if self.state == RunState::Waiting {
            log::trace!("leaving WAI at pc=0x{:04X}", self.pc);
            self.state = RunState::Running;
        }
    }

    fn advance(&mut self, cycles: u32) {
        self.cycles += cycles as u64;
        self.memory.tick(cycles);
    }

    fn fetch(&mut self) -> u8 {
        let byte = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    /// Reads the operand bytes (advancing PC) and computes the effective address.
    fn resolve(&mut self, mode: AddressingMode) -> Operand {
        let (x, y) = (self.x, self.y);
        let memory = &mut self.memory;
        resolve_operand(mode, &mut self.pc, x, y, |addr| memory.read(addr))
    }

    /// Decodes the instruction at PC through `peek`, leaving PC and the bus alone.
    fn preview(&self) -> (&'static OpcodeMetadata, Operand) {
        let mut pc = self.pc;
        let metadata = decode(self.memory.peek(pc));
        pc = pc.wrapping_add(1);
        let operand = resolve_operand(metadata.addressing_mode, &mut pc, self.x, self.y, |addr| {
            self.memory.peek(addr)
        });
        (metadata, operand)
    }

    /// Penalty cycles on top of the table's base cost.
    fn extra_cycles(&self, metadata: &OpcodeMetadata, operand: &Operand) -> u32 {
        let mut extra = 0;

        if metadata.is_branch() {
            if self.branch_taken(metadata.operation, operand) {
                extra += 1;
                if operand.page_crossed {
                    extra += 1;
                }
            }
        } else if operand.page_crossed && metadata.page_penalty() {
            extra += 1;
        }

        if matches!(metadata.operation, Operation::Adc | Operation::Sbc)
            && self.status.contains(Status::DECIMAL)
        {
            extra += 1;
        }

        extra
    }

    /// Branch condition, evaluated without side effects.
    pub(crate) fn branch_taken(&self, operation: Operation, operand: &Operand) -> bool {
        use Operation::*;

        match operation {
            Bpl => !self.status.contains(Status::NEGATIVE),
            Bmi => self.status.contains(Status::NEGATIVE),
            Bvc => !self.status.contains(Status::OVERFLOW),
            Bvs => self.status.contains(Status::OVERFLOW),
            Bcc => !self.status.contains(Status::CARRY),
            Bcs => self.status.contains(Status::CARRY),
            Bne => !self.status.contains(Status::ZERO),
            Beq => self.status.contains(Status::ZERO),
            Bra => true,
            Bbr(bit) => !crate::bits::test_bit(self.memory.peek(operand.addr), bit),
            Bbs(bit) => crate::bits::test_bit(self.memory.peek(operand.addr), bit),
            _ => false,
        }
    }

    // ========== Operand and stack helpers ==========

    /// Reads the operand value: A for implied mode, memory otherwise.
    pub(crate) fn load(&mut self, mode: AddressingMode, operand: &Operand) -> u8 {
        match mode {
            AddressingMode::Implied => self.a,
            _ => self.memory.read(operand.addr),
        }
    }

    /// Writes a result: A for implied mode, memory otherwise.
    pub(crate) fn store(&mut self, mode: AddressingMode, operand: &Operand, value: u8) {
        match mode {
            AddressingMode::Implied => self.a = value,
            _ => self.memory.write(operand.addr, value),
        }
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    /// Pushes high byte first.
    pub(crate) fn push16(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub(crate) fn pull16(&mut self) -> u16 {
        let lo = self.pull() as u16;
        let hi = self.pull() as u16;
        (hi << 8) | lo
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the total number of CPU cycles executed since initialization.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Current run state.
    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Halted by `WAI`.
    pub fn is_waiting(&self) -> bool {
        self.state == RunState::Waiting
    }

    /// Halted by `STP`.
    pub fn is_stopped(&self) -> bool {
        self.state == RunState::Stopped
    }

    /// A step is part-paid and will finish on the next `clock` call.
    pub fn is_suspended(&self) -> bool {
        self.pending.is_some()
    }

    /// The part-paid step, if any.
    pub fn truncation(&self) -> Option<Truncation> {
        self.pending
    }

    /// Snapshot of all registers.
    pub fn registers(&self) -> Registers {
        Registers {
            pc: self.pc,
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            status: self.status.bits(),
            cycles: self.cycles,
        }
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.status.contains(Status::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.status.contains(Status::OVERFLOW)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.status.contains(Status::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.status.contains(Status::IRQ_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.status.contains(Status::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.status.contains(Status::CARRY)
    }

    // ========== Setters (tests and debuggers) ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Sets or clears one or more flags.
    pub fn set_flag(&mut self, flag: Status, on: bool) {
        self.status.set(flag, on);
    }

    // ========== Memory access ==========

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    pub fn into_memory(self) -> M {
        self.memory
    }
}

impl Operand {
    fn at(addr: u16) -> Self {
        Self {
            addr,
            ..Self::default()
        }
    }

    fn indexed(base: u16, index: u8) -> Self {
        let addr = base.wrapping_add(index as u16);
        Self {
            addr,
            target: 0,
            page_crossed: (base ^ addr) & 0xFF00 != 0,
        }
    }

    fn branch(addr: u16, next_pc: u16, displacement: i8) -> Self {
        let target = next_pc.wrapping_add_signed(displacement as i16);
        Self {
            addr,
            target,
            page_crossed: (next_pc ^ target) & 0xFF00 != 0,
        }
    }
}

/// Effective address for `mode`, reading operand bytes at `pc` and advancing it.
fn resolve_operand(
    mode: AddressingMode,
    pc: &mut u16,
    x: u8,
    y: u8,
    mut read: impl FnMut(u16) -> u8,
) -> Operand {
    use AddressingMode::*;

    let mut next = || {
        let byte = read(*pc);
        *pc = pc.wrapping_add(1);
        byte
    };

    match mode {
        Implied => Operand::default(),
        Immediate => {
            let addr = *pc;
            *pc = pc.wrapping_add(1);
            Operand::at(addr)
        }
        ZeroPage => Operand::at(next() as u16),
        ZeroPageX => Operand::at(next().wrapping_add(x) as u16),
        ZeroPageY => Operand::at(next().wrapping_add(y) as u16),
        Relative => {
            let displacement = next() as i8;
            Operand::branch(0, *pc, displacement)
        }
        Absolute => Operand::at(word(next(), next())),
        AbsoluteX => Operand::indexed(word(next(), next()), x),
        AbsoluteY => Operand::indexed(word(next(), next()), y),
        Indirect => {
            let pointer = word(next(), next());
            Operand::at(word(read(pointer), read(pointer.wrapping_add(1))))
        }
        AbsoluteIndexedIndirect => {
            let pointer = word(next(), next()).wrapping_add(x as u16);
            Operand::at(word(read(pointer), read(pointer.wrapping_add(1))))
        }
        IndirectX => {
            let pointer = next().wrapping_add(x);
            Operand::at(zero_page_word(&mut read, pointer))
        }
        IndirectY => {
            let pointer = next();
            Operand::indexed(zero_page_word(&mut read, pointer), y)
        }
        ZeroPageIndirect => {
            let pointer = next();
            Operand::at(zero_page_word(&mut read, pointer))
        }
        ZeroPageRelative => {
            let zp = next() as u16;
            let displacement = next() as i8;
            Operand::branch(zp, *pc, displacement)
        }
    }
}

fn word(lo: u8, hi: u8) -> u16 {
    ((hi as u16) << 8) | lo as u16
}

fn zero_page_word(read: &mut impl FnMut(u16) -> u8, pointer: u8) -> u16 {
    word(read(pointer as u16), read(pointer.wrapping_add(1) as u16))
}
