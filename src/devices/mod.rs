//! Memory-mapped device support for the 65C02 system.
//!
//! This module provides the arena that holds the peripherals living in the
//! system's I/O window, and the trait every peripheral implements.
//!
//! # Architecture
//!
//! - **Device trait**: Abstract interface for memory-mapped hardware components
//! - **DeviceArena**: Owns the devices, routes addresses to them and hands out
//!   stable [`DeviceHandle`]s so devices never hold references to each other or
//!   to the bus
//! - **Device implementations**: [`MemoryBlock`] (RAM/ROM) and [`Via`] (6522 timers)
//!
//! # Example
//!
//! ```rust
//! use lib65c02::{DeviceArena, MemoryBlock, Via};
//!
//! let mut arena = DeviceArena::new();
//!
//! // 16 VIA registers at 0x6000-0x600F
//! let via = arena.add_device(0x6000, Box::new(Via::new())).unwrap();
//!
//! // 256 bytes of extra RAM at 0x7000
//! arena.add_device(0x7000, Box::new(MemoryBlock::ram(0x7000, 256))).unwrap();
//!
//! assert_eq!(arena.find(0x600E), Some((via, 0x0E)));
//! assert_eq!(arena.find(0x6800), None);
//! ```

use std::any::Any;
use std::fmt;

use thiserror::Error;

pub mod block;
pub mod interrupts;
pub mod via;

pub use block::{FillPolicy, MemoryBlock};
pub use interrupts::{InterruptDevice, IrqLines};
pub use via::Via;

/// Abstract interface for memory-mapped hardware devices.
///
/// Devices implement this trait to provide read/write access to their internal
/// registers and state. The arena calls these methods with offset-based
/// addressing (0 to size-1) to keep devices independent of where they are mapped.
///
/// # Design
///
/// - **Offset-based**: Device receives offset (0 to size-1), not absolute address
/// - **No panics**: All operations must succeed or fail gracefully
/// - **Live read vs peek**: `read` may acknowledge flags; `peek` must not
/// - **Clocked**: `tick` advances internal timers by system cycles
///
/// # Examples
///
/// ```rust
/// use lib65c02::Device;
/// use std::any::Any;
///
/// struct SimpleRam {
///     data: Vec<u8>,
/// }
///
/// impl Device for SimpleRam {
///     fn peek(&self, offset: u16) -> u8 {
///         self.data[offset as usize]
///     }
///
///     fn write(&mut self, offset: u16, value: u8) {
///         self.data[offset as usize] = value;
///     }
///
///     fn size(&self) -> u16 {
///         self.data.len() as u16
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
/// ```
pub trait Device {
    /// Live read from the device at `offset`. May have side effects.
    ///
    /// Defaults to [`Device::peek`] for devices whose reads are pure.
    fn read(&mut self, offset: u16) -> u8 {
        self.peek(offset)
    }

    /// Read from the device at `offset` without side effects.
    fn peek(&self, offset: u16) -> u8;

    /// Write byte to device at offset relative to device base address.
    fn write(&mut self, offset: u16, value: u8);

    /// Return size of device's address space in bytes.
    fn size(&self) -> u16;

    /// Advance the device by `cycles` system clock cycles.
    fn tick(&mut self, _cycles: u32) {}

    /// Return the device to its power-on-reset state.
    fn reset(&mut self) {}

    /// Typed access for callers that know the concrete device.
    fn as_any(&self) -> &dyn Any;

    /// Mutable typed access for callers that know the concrete device.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the interrupt view of this device, if it can assert IRQ.
    fn as_interrupt_device(&self) -> Option<&dyn InterruptDevice> {
        None
    }
}

/// Stable identity of a device registered in a [`DeviceArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceHandle(pub(crate) usize);

impl DeviceHandle {
    /// Position of the device in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Error returned when device registration or interrupt signalling fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Address range overlaps with an existing device or a fixed memory block.
    #[error(
        "device address range overlap: new device at 0x{new_base:04X} (size {new_size}) \
         overlaps with existing range at 0x{existing_base:04X} (size {existing_size})"
    )]
    Overlap {
        /// Base address of the new device
        new_base: u16,
        /// Size of the new device
        new_size: u16,
        /// Base address of the conflicting existing range
        existing_base: u16,
        /// Size of the conflicting existing range
        existing_size: u16,
    },

    /// A handle that was never returned by `add_device`.
    #[error("unknown device handle {0}")]
    UnknownDevice(DeviceHandle),

    /// The device does not fit inside the bus's I/O window.
    #[error(
        "device at 0x{base:04X} (size {size}) lies outside the I/O window \
         0x{window_start:04X}-0x{window_end:04X}"
    )]
    OutOfRange {
        /// Requested base address
        base: u16,
        /// Size of the device
        size: u16,
        /// First address of the window
        window_start: u16,
        /// Last address of the window
        window_end: u16,
    },
}

/// Internal mapping of a device to a base address.
struct DeviceMapping {
    base_addr: u16,
    device: Box<dyn Device>,
}

impl DeviceMapping {
    fn contains(&self, addr: u16) -> bool {
        addr >= self.base_addr && ((addr - self.base_addr) as u32) < self.device.size() as u32
    }
}

/// Owns memory-mapped devices and routes addresses to them.
///
/// # Address Routing
///
/// 1. Iterate through registered devices
/// 2. Check if address falls within device's range (base_addr to base_addr+size-1)
/// 3. If found, return its handle and the offset (addr - base_addr)
#[derive(Default)]
pub struct DeviceArena {
    devices: Vec<DeviceMapping>,
}

impl DeviceArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device at the specified base address.
    ///
    /// The device will occupy addresses from `base_addr` to `base_addr + device.size() - 1`.
    ///
    /// # Returns
    ///
    /// * `Ok(handle)` - Device registered successfully
    /// * `Err(DeviceError::Overlap)` - Address range overlaps with existing device
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lib65c02::{DeviceArena, MemoryBlock};
    ///
    /// let mut arena = DeviceArena::new();
    /// arena.add_device(0x4000, Box::new(MemoryBlock::ram(0x4000, 0x1000))).unwrap();
    ///
    /// // This will fail (overlap)
    /// let result = arena.add_device(0x4800, Box::new(MemoryBlock::ram(0x4800, 0x100)));
    /// assert!(result.is_err());
    /// ```
    pub fn add_device(
        &mut self,
        base_addr: u16,
        device: Box<dyn Device>,
    ) -> Result<DeviceHandle, DeviceError> {
        let new_size = device.size();
        let new_end = base_addr as u32 + new_size as u32;

        for mapping in &self.devices {
            let existing_size = mapping.device.size();
            let existing_end = mapping.base_addr as u32 + existing_size as u32;

            // [base_addr, new_end) against [mapping.base_addr, existing_end)
            if (base_addr as u32) < existing_end && new_end > mapping.base_addr as u32 {
                return Err(DeviceError::Overlap {
                    new_base: base_addr,
                    new_size,
                    existing_base: mapping.base_addr,
                    existing_size,
                });
            }
        }

        let handle = DeviceHandle(self.devices.len());
        log::debug!(
            "device {} registered at 0x{:04X}-0x{:04X}",
            handle,
            base_addr,
            new_end.saturating_sub(1)
        );
        self.devices.push(DeviceMapping { base_addr, device });
        Ok(handle)
    }

    /// Find the device that handles `addr` and the offset within it.
    pub fn find(&self, addr: u16) -> Option<(DeviceHandle, u16)> {
        self.devices
            .iter()
            .position(|mapping| mapping.contains(addr))
            .map(|index| (DeviceHandle(index), addr - self.devices[index].base_addr))
    }

    /// Whether `handle` was returned by this arena.
    pub fn contains(&self, handle: DeviceHandle) -> bool {
        handle.0 < self.devices.len()
    }

    /// Base address a device is mapped at.
    pub fn base_addr(&self, handle: DeviceHandle) -> Option<u16> {
        self.devices.get(handle.0).map(|mapping| mapping.base_addr)
    }

    /// Shared access to a device.
    pub fn get(&self, handle: DeviceHandle) -> Option<&dyn Device> {
        self.devices.get(handle.0).map(|mapping| mapping.device.as_ref())
    }

    /// Mutable access to a device.
    pub fn get_mut(&mut self, handle: DeviceHandle) -> Option<&mut (dyn Device + 'static)> {
        self.devices
            .get_mut(handle.0)
            .map(|mapping| mapping.device.as_mut())
    }

    /// Typed access to a device.
    pub fn downcast<T: Device + 'static>(&self, handle: DeviceHandle) -> Option<&T> {
        self.get(handle)?.as_any().downcast_ref::<T>()
    }

    /// Mutable typed access to a device.
    pub fn downcast_mut<T: Device + 'static>(&mut self, handle: DeviceHandle) -> Option<&mut T> {
        self.get_mut(handle)?.as_any_mut().downcast_mut::<T>()
    }

    /// Handles of every registered device, in registration order.
    pub fn handles(&self) -> impl Iterator<Item = DeviceHandle> {
        (0..self.devices.len()).map(DeviceHandle)
    }

    /// Number of registered devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no device is registered.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
