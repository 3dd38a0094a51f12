//! # 65C02 System Emulator Core
//!
//! A cycle-accurate WDC 65C02 emulator together with the small computer built
//! around it: 8 KiB of RAM, 8 KiB of video RAM, an 8 KiB ROM, a 6522 VIA in
//! the I/O window, and a video timing circuit that raises NMI at the start of
//! every vertical blank.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib65c02::{Cpu, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//!
//! // Initialize CPU - it will load PC from the reset vector
//! let mut cpu = Cpu::new(memory);
//!
//! // Verify initial state
//! assert_eq!(cpu.pc(), 0x8000);
//! assert_eq!(cpu.sp(), 0xFD);
//! assert_eq!(cpu.flag_i(), true);
//! ```
//!
//! ## Architecture
//!
//! - **Ownership**: the CPU owns its bus; the bus owns memory, peripherals and
//!   the video timing. Peripherals live in an arena and are named by handle.
//! - **Cycle budgets**: `Cpu::clock(n)` spends exactly `n` cycles, suspending an
//!   instruction that does not fit and finishing it on the next call.
//! - **Polling**: after each step the bus advances peripherals by the cycles
//!   spent; the CPU polls NMI and IRQ between steps.
//! - **Table-driven decode**: all opcode metadata lives in [`OPCODE_TABLE`].
//!
//! ## Modules
//!
//! - `cpu` - CPU state and execution loop
//! - `memory` - `MemoryBus` trait and the flat test memory
//! - `bus` / `memory_map` - the system memory map
//! - `devices` - memory blocks, the VIA, the device arena and IRQ lines
//! - `video` - beam timing and vblank NMI
//! - `opcodes` / `addressing` / `status` - ISA description
//! - `disassembler` - bytes or bus contents to assembly text
//! - `system` - the assembled machine

pub mod addressing;
pub mod bits;
pub mod bus;
pub mod config;
pub mod cpu;
pub mod devices;
pub mod disassembler;
pub mod error;
pub mod memory;
pub mod memory_map;
pub mod opcodes;
pub mod status;
pub mod system;
pub mod video;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use bus::SystemBus;
pub use config::SystemConfig;
pub use cpu::{Cpu, Registers, RunState};
pub use devices::{
    Device, DeviceArena, DeviceError, DeviceHandle, FillPolicy, InterruptDevice, IrqLines,
    MemoryBlock, Via,
};
pub use disassembler::{disassemble, Disassembler, DisassemblyOptions, Instruction};
pub use error::{EmulatorError, Result};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{decode, OpcodeMetadata, Operation, OPCODE_TABLE};
pub use status::Status;
pub use system::System;
pub use video::VideoTiming;

#[cfg(feature = "wasm")]
pub use wasm::Emulator65C02;
