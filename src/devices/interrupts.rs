//! Interrupt support for memory-mapped devices.
//!
//! This module provides the `InterruptDevice` trait that devices implement to
//! signal interrupt requests, and [`IrqLines`], the set of devices currently
//! holding the shared IRQ line.
//!
//! # Hardware-Accurate Interrupt Model
//!
//! The 65C02 has a single active-low IRQ line shared among all devices, and a
//! separate NMI line that is edge-triggered.
//!
//! ## IRQ Line Behavior
//!
//! - **Level-sensitive**: The IRQ line reflects the current state of all devices
//! - **Logical OR**: IRQ line is active if ANY device has a pending interrupt
//! - **No queuing**: asserting twice from the same device is the same as once
//! - **ISR acknowledgment**: The interrupt service routine must explicitly
//!   acknowledge each device through its registers (e.g. the VIA's IFR)
//!
//! ## Interrupt Service Sequence
//!
//! When the CPU sees a latched NMI, or an active IRQ line with the I flag clear,
//! it finishes the current instruction and then:
//!
//! 1. Pushes PC (high byte, then low byte) to stack
//! 2. Pushes status register to stack with Break and Unused set
//! 3. Sets I, clears D
//! 4. Loads PC from 0xFFFA (NMI) or 0xFFFE (IRQ)
//!
//! **Total: 7 cycles**
//!
//! # Example
//!
//! ```rust
//! use lib65c02::InterruptDevice;
//!
//! struct TimerDevice {
//!     interrupt_pending: bool,
//! }
//!
//! impl InterruptDevice for TimerDevice {
//!     fn has_interrupt(&self) -> bool {
//!         self.interrupt_pending
//!     }
//! }
//! ```

use std::collections::BTreeSet;

use super::DeviceHandle;

/// Trait for devices that can signal interrupt requests to the CPU.
///
/// # Contract
///
/// - `has_interrupt()` **MUST** reflect the current state and **MUST NOT** modify it
/// - Device remains pending until the ISR acknowledges it through a register
pub trait InterruptDevice {
    /// Check if device has a pending interrupt request.
    fn has_interrupt(&self) -> bool;

    /// Cycles until this device will next raise an interrupt, if it does so
    /// within `max_cycles`. Used to skip ahead while the CPU is halted.
    fn cycles_until_interrupt(&self, _max_cycles: u32) -> Option<u32> {
        None
    }
}

/// The set of devices currently asserting IRQ.
///
/// The line is active while the set is non-empty. Assert and release are
/// idempotent.
///
/// # Examples
///
/// ```
/// use lib65c02::{DeviceArena, IrqLines, Via};
///
/// let mut arena = DeviceArena::new();
/// let via = arena.add_device(0x6000, Box::new(Via::new())).unwrap();
///
/// let mut lines = IrqLines::default();
/// lines.assert(via);
/// lines.assert(via);
/// assert!(lines.is_active());
///
/// lines.release(via);
/// assert!(!lines.is_active());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrqLines {
    asserted: BTreeSet<DeviceHandle>,
}

impl IrqLines {
    /// Add `handle` to the set of asserting devices.
    pub fn assert(&mut self, handle: DeviceHandle) {
        self.asserted.insert(handle);
    }

    /// Remove `handle` from the set of asserting devices.
    pub fn release(&mut self, handle: DeviceHandle) {
        self.asserted.remove(&handle);
    }

    /// Assert or release depending on `active`.
    pub fn set(&mut self, handle: DeviceHandle, active: bool) {
        if active {
            self.assert(handle);
        } else {
            self.release(handle);
        }
    }

    /// Whether `handle` is currently asserting.
    pub fn is_asserted(&self, handle: DeviceHandle) -> bool {
        self.asserted.contains(&handle)
    }

    /// Whether any device is asserting.
    pub fn is_active(&self) -> bool {
        !self.asserted.is_empty()
    }

    /// Release every device.
    pub fn clear(&mut self) {
        self.asserted.clear();
    }
}
