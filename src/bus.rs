//! # System Bus
//!
//! The canonical memory map of the machine, and the owner of everything the CPU
//! talks to: RAM, video RAM, ROM, the peripherals in the I/O window, the video
//! timing circuit, the IRQ set, the NMI latch and the open-bus latch.
//!
//! Address decode uses the top three address bits (see [`crate::memory_map`]).
//! Addresses in the I/O window that no peripheral claims are unmapped: reads
//! return the open-bus value and writes are dropped.

use crate::devices::{Device, DeviceArena, DeviceError, DeviceHandle, IrqLines, MemoryBlock};
use crate::memory::MemoryBus;
use crate::memory_map::{
    region, Region, IO_END, IO_START, RAM_SIZE, RAM_START, ROM_SIZE, ROM_START, VRAM_SIZE,
    VRAM_START,
};
use crate::video::VideoTiming;

/// Memory map, peripherals and interrupt lines of the system.
///
/// # Examples
///
/// ```rust
/// use lib65c02::{MemoryBus, SystemBus, Via};
///
/// let mut bus = SystemBus::new();
/// let via = bus.add_device(0x6000, Box::new(Via::new())).unwrap();
///
/// bus.write(0x0200, 0x42);
/// assert_eq!(bus.read(0x0200), 0x42);
///
/// // Unmapped I/O reads return the last value on the bus
/// bus.write(0x0300, 0x99);
/// assert_eq!(bus.read(0x5000), 0x99);
///
/// bus.assert_irq(via).unwrap();
/// assert!(bus.irq_active());
/// ```
pub struct SystemBus {
    ram: MemoryBlock,
    vram: MemoryBlock,
    rom: MemoryBlock,
    devices: DeviceArena,
    video: VideoTiming,
    irq: IrqLines,
    nmi: bool,
    open_bus: u8,
}

impl SystemBus {
    /// Zero-filled RAM and ROM, no peripherals, beam at the top of the frame.
    pub fn new() -> Self {
        Self {
            ram: MemoryBlock::ram(RAM_START, RAM_SIZE),
            vram: MemoryBlock::ram(VRAM_START, VRAM_SIZE),
            rom: MemoryBlock::rom(ROM_START, ROM_SIZE),
            devices: DeviceArena::new(),
            video: VideoTiming::new(),
            irq: IrqLines::default(),
            nmi: false,
            open_bus: 0,
        }
    }

    /// Map a peripheral into the I/O window.
    ///
    /// # Errors
    ///
    /// * `DeviceError::OutOfRange` - the device does not fit in 0x4000-0xDFFF
    /// * `DeviceError::Overlap` - the range collides with another peripheral
    pub fn add_device(
        &mut self,
        base_addr: u16,
        device: Box<dyn Device>,
    ) -> Result<DeviceHandle, DeviceError> {
        let size = device.size();
        let last = base_addr as u32 + (size as u32).max(1) - 1;
        if base_addr < IO_START || last > IO_END as u32 {
            return Err(DeviceError::OutOfRange {
                base: base_addr,
                size,
                window_start: IO_START,
                window_end: IO_END,
            });
        }

        let handle = self.devices.add_device(base_addr, device)?;
        self.sync_irq(handle);
        Ok(handle)
    }

    /// Add `handle` to the set of devices asserting IRQ. Idempotent.
    ///
    /// # Errors
    ///
    /// `DeviceError::UnknownDevice` if `handle` was not returned by this bus.
    pub fn assert_irq(&mut self, handle: DeviceHandle) -> Result<(), DeviceError> {
        self.check_handle(handle)?;
        self.irq.assert(handle);
        Ok(())
    }

    /// Remove `handle` from the set of devices asserting IRQ. Idempotent.
    ///
    /// # Errors
    ///
    /// `DeviceError::UnknownDevice` if `handle` was not returned by this bus.
    pub fn release_irq(&mut self, handle: DeviceHandle) -> Result<(), DeviceError> {
        self.check_handle(handle)?;
        self.irq.release(handle);
        Ok(())
    }

    /// Latch an NMI edge. Raising an already latched NMI is a no-op.
    pub fn raise_nmi(&mut self) {
        self.nmi = true;
    }

    /// Drop a latched NMI without servicing it.
    pub fn clear_nmi(&mut self) {
        self.nmi = false;
    }

    /// Devices currently asserting IRQ.
    pub fn irq_lines(&self) -> &IrqLines {
        &self.irq
    }

    /// Soft reset of everything behind the bus: peripherals, beam position,
    /// interrupt lines. Memory content is kept.
    pub fn reset(&mut self) {
        let handles: Vec<_> = self.devices.handles().collect();
        for handle in handles {
            if let Some(device) = self.devices.get_mut(handle) {
                device.reset();
            }
        }
        self.video.reset();
        self.irq.clear();
        self.nmi = false;
    }

    pub fn ram(&self) -> &MemoryBlock {
        &self.ram
    }

    pub fn ram_mut(&mut self) -> &mut MemoryBlock {
        &mut self.ram
    }

    pub fn vram(&self) -> &MemoryBlock {
        &self.vram
    }

    pub fn vram_mut(&mut self) -> &mut MemoryBlock {
        &mut self.vram
    }

    pub fn rom(&self) -> &MemoryBlock {
        &self.rom
    }

    pub fn rom_mut(&mut self) -> &mut MemoryBlock {
        &mut self.rom
    }

    pub fn video(&self) -> &VideoTiming {
        &self.video
    }

    pub fn video_mut(&mut self) -> &mut VideoTiming {
        &mut self.video
    }

    pub fn devices(&self) -> &DeviceArena {
        &self.devices
    }

    /// Typed access to a peripheral.
    pub fn device<T: Device + 'static>(&self, handle: DeviceHandle) -> Option<&T> {
        self.devices.downcast::<T>(handle)
    }

    /// Mutable typed access to a peripheral. The IRQ set is not re-synchronised
    /// until the device is next accessed or ticked through the bus.
    pub fn device_mut<T: Device + 'static>(&mut self, handle: DeviceHandle) -> Option<&mut T> {
        self.devices.downcast_mut::<T>(handle)
    }

    fn check_handle(&self, handle: DeviceHandle) -> Result<(), DeviceError> {
        if self.devices.contains(handle) {
            Ok(())
        } else {
            Err(DeviceError::UnknownDevice(handle))
        }
    }

    /// Mirror an interrupt-capable device's state into the IRQ set.
    fn sync_irq(&mut self, handle: DeviceHandle) {
        let state = self
            .devices
            .get(handle)
            .and_then(|device| device.as_interrupt_device())
            .map(|device| device.has_interrupt());
        if let Some(active) = state {
            self.irq.set(handle, active);
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for SystemBus {
    fn read(&mut self, addr: u16) -> u8 {
        let value = match region(addr) {
            Region::Ram => self.ram.get(addr),
            Region::VideoRam => self.vram.get(addr),
            Region::Rom => self.rom.get(addr),
            Region::Io => match self.devices.find(addr) {
                Some((handle, offset)) => {
                    let value = self.devices.get_mut(handle).map(|d| d.read(offset));
                    self.sync_irq(handle);
                    value
                }
                None => None,
            },
        };

        if let Some(value) = value {
            self.open_bus = value;
        }
        self.open_bus
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.open_bus = value;
        match region(addr) {
            Region::Ram => {
                self.ram.set(addr, value);
            }
            Region::VideoRam => {
                self.vram.set(addr, value);
            }
            Region::Rom => {}
            Region::Io => {
                if let Some((handle, offset)) = self.devices.find(addr) {
                    if let Some(device) = self.devices.get_mut(handle) {
                        device.write(offset, value);
                    }
                    self.sync_irq(handle);
                }
            }
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        let value = match region(addr) {
            Region::Ram => self.ram.get(addr),
            Region::VideoRam => self.vram.get(addr),
            Region::Rom => self.rom.get(addr),
            Region::Io => self
                .devices
                .find(addr)
                .and_then(|(handle, offset)| self.devices.get(handle).map(|d| d.peek(offset))),
        };
        value.unwrap_or(self.open_bus)
    }

    fn irq_active(&self) -> bool {
        self.irq.is_active()
    }

    fn nmi_pending(&self) -> bool {
        self.nmi
    }

    fn acknowledge_nmi(&mut self) {
        self.nmi = false;
    }

    fn tick(&mut self, cycles: u32) {
        if cycles == 0 {
            return;
        }

        let handles: Vec<_> = self.devices.handles().collect();
        for handle in handles {
            if let Some(device) = self.devices.get_mut(handle) {
                device.tick(cycles);
            }
            self.sync_irq(handle);
        }

        if self.video.tick(cycles) {
            self.raise_nmi();
        }
    }

    fn cycles_until_interrupt(&self, max: u32) -> Option<u32> {
        let peripherals = self.devices.handles().filter_map(|handle| {
            self.devices
                .get(handle)?
                .as_interrupt_device()?
                .cycles_until_interrupt(max)
        });

        let vblank = (!self.video.frame_ready())
            .then(|| self.video.cycles_until_vblank())
            .filter(|&cycles| cycles <= max);

        peripherals.chain(vblank).min()
    }

    fn open_bus(&self) -> u8 {
        self.open_bus
    }

    fn restore_open_bus(&mut self, value: u8) {
        self.open_bus = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::via::{reg, Via};

    #[test]
    fn test_rom_writes_discarded() {
        let mut bus = SystemBus::new();
        bus.rom_mut().fill(0xEA);
        bus.write(0xE000, 0x00);
        assert_eq!(bus.read(0xE000), 0xEA);
    }

    #[test]
    fn test_open_bus_after_unmapped_read() {
        let mut bus = SystemBus::new();
        bus.write(0x0010, 0x3C);
        bus.read(0x0010);
        assert_eq!(bus.read(0x8000), 0x3C);
        // Reading unmapped space does not change the latch
        assert_eq!(bus.read(0x9000), 0x3C);
    }

    #[test]
    fn test_peek_keeps_open_bus() {
        let mut bus = SystemBus::new();
        bus.write(0x0000, 0x11);
        bus.ram_mut().set(0x0001, 0x22);
        assert_eq!(bus.peek(0x0001), 0x22);
        assert_eq!(bus.open_bus(), 0x11);
    }

    #[test]
    fn test_video_ram_is_writable() {
        let mut bus = SystemBus::new();
        bus.write(0x2000 + 5 * 128 + 7, 0x1F);
        assert_eq!(bus.vram().as_slice()[5 * 128 + 7], 0x1F);
    }

    #[test]
    fn test_device_must_fit_io_window() {
        let mut bus = SystemBus::new();
        let result = bus.add_device(0x1000, Box::new(Via::new()));
        assert!(matches!(result, Err(DeviceError::OutOfRange { .. })));

        let result = bus.add_device(0xDFF8, Box::new(Via::new()));
        assert!(matches!(result, Err(DeviceError::OutOfRange { .. })));

        assert!(bus.add_device(0xDFF0, Box::new(Via::new())).is_ok());
    }

    #[test]
    fn test_unknown_handle_rejected() {
        let mut bus = SystemBus::new();
        let bogus = DeviceHandle(9);
        assert_eq!(bus.assert_irq(bogus), Err(DeviceError::UnknownDevice(bogus)));
        assert!(!bus.irq_active());
    }

    #[test]
    fn test_via_irq_follows_ifr() {
        let mut bus = SystemBus::new();
        let via = bus.add_device(0x6000, Box::new(Via::new())).unwrap();

        bus.write(0x6000 + reg::IER, 0xC0);
        bus.write(0x6000 + reg::T1C_L, 10);
        bus.write(0x6000 + reg::T1C_H, 0);
        bus.tick(10);
        assert!(bus.irq_active());
        assert!(bus.irq_lines().is_asserted(via));

        bus.write(0x6000 + reg::IFR, 0x40);
        assert!(!bus.irq_active());
    }

    #[test]
    fn test_vblank_raises_nmi_once() {
        let mut bus = SystemBus::new();
        bus.tick(crate::video::CYCLES_PER_FRAME);
        assert!(bus.nmi_pending());
        bus.acknowledge_nmi();

        // Frame not acknowledged: no new NMI
        bus.tick(crate::video::CYCLES_PER_FRAME);
        assert!(!bus.nmi_pending());
    }

    #[test]
    fn test_cycles_until_interrupt() {
        let mut bus = SystemBus::new();
        bus.add_device(0x6000, Box::new(Via::new())).unwrap();
        bus.write(0x6000 + reg::T1C_L, 50);
        bus.write(0x6000 + reg::T1C_H, 0);

        assert_eq!(bus.cycles_until_interrupt(1000), Some(50));
        assert_eq!(bus.cycles_until_interrupt(10), None);
        assert_eq!(
            bus.cycles_until_interrupt(u32::MAX),
            Some(50)
        );
    }
}
