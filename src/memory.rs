//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations. The CPU owns a `MemoryBus` and sees the whole machine
//! through it: memory, interrupt lines and the peripheral clock.
//!
//! - `FlatMemory`: 64KB of RAM with hand-driven interrupt lines, for CPU tests
//! - `SystemBus` (in [`crate::bus`]): the canonical RAM / video RAM / I/O / ROM map
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows 65C02 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Unmapped reads return the open-bus value (the last byte driven on the bus)
//! - Writes to ROM/unmapped regions are ignored
//! - A live `read` may have side effects (acknowledging a timer flag); `peek` never does

/// Memory bus trait for CPU to read/write bytes.
///
/// Implementations of this trait provide the memory backend for the CPU.
/// The CPU accesses all memory (RAM, ROM, I/O) through this abstraction, and
/// polls interrupt lines and advances peripherals through it as well.
///
/// # Design
///
/// - `read(&mut self)`: a live read can update the open-bus latch or device state
/// - `peek(&self)`: side-effect free inspection for debuggers and the disassembler
/// - No error types: 65C02 hardware has no bus error mechanism
///
/// # Examples
///
/// ```
/// use lib65c02::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// assert_eq!(mem.peek(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use lib65c02::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],  // 32KB RAM (0x0000-0x7FFF)
///     rom: [u8; 0x8000],  // 32KB ROM (0x8000-0xFFFF)
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&mut self, addr: u16) -> u8 {
///         self.peek(addr)
///     }
///
///     fn peek(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///         // Writes to ROM (0x8000+) are silently ignored
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// This method must never panic. Unmapped addresses return the open-bus value.
    fn read(&mut self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic. If the address is read-only or unmapped,
    /// implementations ignore the write (matching 65C02 hardware behavior).
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a byte without any side effect on the bus or on devices.
    fn peek(&self, addr: u16) -> u8;

    /// Reads a little-endian 16-bit word from `addr` and `addr + 1`.
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Reads a little-endian 16-bit word from the zero page, wrapping at 0xFF.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65c02::{MemoryBus, FlatMemory};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0x00FF, 0x34);
    /// mem.write(0x0000, 0x12);
    /// assert_eq!(mem.read16_zero_page(0xFF), 0x1234);
    /// ```
    fn read16_zero_page(&mut self, addr: u8) -> u16 {
        let lo = self.read(addr as u16) as u16;
        let hi = self.read(addr.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    /// Checks if the IRQ (Interrupt Request) line is active.
    ///
    /// # Hardware Semantics
    ///
    /// The IRQ line is **level-sensitive** and **shared** among all devices.
    /// It is active while ANY device holds it, and the CPU masks it with the
    /// Interrupt-Disable flag.
    ///
    /// # Default Implementation
    ///
    /// Returns `false` for memories without interrupt-capable devices.
    fn irq_active(&self) -> bool {
        false
    }

    /// Checks if an NMI edge has been latched and not yet serviced.
    fn nmi_pending(&self) -> bool {
        false
    }

    /// Clears the NMI latch once the CPU has taken the interrupt.
    fn acknowledge_nmi(&mut self) {}

    /// Advances peripherals by `cycles` system clock cycles.
    fn tick(&mut self, _cycles: u32) {}

    /// Cycles until some peripheral will next raise an interrupt, if that happens
    /// within `max` cycles.
    fn cycles_until_interrupt(&self, _max: u32) -> Option<u32> {
        None
    }

    /// Last value driven on the data bus.
    fn open_bus(&self) -> u8 {
        0
    }

    /// Puts back an open-bus value captured earlier (used when an instruction
    /// is truncated and later resumed).
    fn restore_open_bus(&mut self, _value: u8) {}
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses (0x0000-0xFFFF) are mapped to a single contiguous RAM
/// array. The IRQ level and the NMI latch are driven by hand, which makes this
/// the memory of choice for CPU-level tests.
///
/// # Examples
///
/// ```
/// use lib65c02::{Cpu, FlatMemory, MemoryBus};
///
/// // Create memory and set up reset vector
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.write(0x8000, 0xEA); // NOP
///
/// let mut cpu = Cpu::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.step(), 2);
/// assert_eq!(cpu.pc(), 0x8001);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,
    open_bus: u8,
    irq: bool,
    nmi: bool,
    ticks: u64,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
            open_bus: 0,
            irq: false,
            nmi: false,
            ticks: 0,
        }
    }

    /// Copies `bytes` into memory starting at `addr`, wrapping at 0xFFFF.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.data[addr.wrapping_add(i as u16) as usize] = byte;
        }
    }

    /// Drives the IRQ line level.
    pub fn set_irq(&mut self, active: bool) {
        self.irq = active;
    }

    /// Latches an NMI edge. Raising an already latched NMI is a no-op.
    pub fn raise_nmi(&mut self) {
        self.nmi = true;
    }

    /// Clears the NMI latch.
    pub fn clear_nmi(&mut self) {
        self.nmi = false;
    }

    /// Total cycles the CPU has reported through `tick`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&mut self, addr: u16) -> u8 {
        self.open_bus = self.data[addr as usize];
        self.open_bus
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.open_bus = value;
        self.data[addr as usize] = value;
    }

    fn peek(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn irq_active(&self) -> bool {
        self.irq
    }

    fn nmi_pending(&self) -> bool {
        self.nmi
    }

    fn acknowledge_nmi(&mut self) {
        self.nmi = false;
    }

    fn tick(&mut self, cycles: u32) {
        self.ticks += cycles as u64;
    }

    fn open_bus(&self) -> u8 {
        self.open_bus
    }

    fn restore_open_bus(&mut self, value: u8) {
        self.open_bus = value;
    }
}
