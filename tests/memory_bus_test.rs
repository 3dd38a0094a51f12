//! System bus memory map and open-bus behavior.

use lib65c02::memory_map::{region, Region, IO_END, IO_START};
use lib65c02::{DeviceError, MemoryBus, SystemBus, Via};

#[test]
fn test_region_boundaries() {
    assert_eq!(region(0x0000), Region::Ram);
    assert_eq!(region(0x1FFF), Region::Ram);
    assert_eq!(region(0x2000), Region::VideoRam);
    assert_eq!(region(0x3FFF), Region::VideoRam);
    assert_eq!(region(IO_START), Region::Io);
    assert_eq!(region(IO_END), Region::Io);
    assert_eq!(region(0xE000), Region::Rom);
    assert_eq!(region(0xFFFF), Region::Rom);
}

#[test]
fn test_ram_and_video_ram_are_writable() {
    let mut bus = SystemBus::new();
    bus.write(0x0000, 0x11);
    bus.write(0x1FFF, 0x22);
    bus.write(0x2000, 0x33);
    bus.write(0x3FFF, 0x44);

    assert_eq!(bus.read(0x0000), 0x11);
    assert_eq!(bus.read(0x1FFF), 0x22);
    assert_eq!(bus.read(0x2000), 0x33);
    assert_eq!(bus.read(0x3FFF), 0x44);
    assert_eq!(bus.vram().as_slice()[0], 0x33);
}

#[test]
fn test_rom_writes_are_discarded() {
    let mut bus = SystemBus::new();
    bus.rom_mut().load_from_buffer(&[0xAB], 0x0000, 1);

    bus.write(0xE000, 0x00);
    assert_eq!(bus.read(0xE000), 0xAB);
}

#[test]
fn test_unmapped_io_returns_open_bus() {
    let mut bus = SystemBus::new();
    bus.write(0x0200, 0x5A);
    assert_eq!(bus.read(0x0200), 0x5A);
    assert_eq!(bus.read(0x4000), 0x5A);
    assert_eq!(bus.read(0xDFFF), 0x5A);

    // A write to an unmapped address still drives the bus
    bus.write(0x8000, 0x77);
    assert_eq!(bus.open_bus(), 0x77);
    assert_eq!(bus.read(0x8000), 0x77);
}

#[test]
fn test_peek_does_not_drive_open_bus() {
    let mut bus = SystemBus::new();
    bus.write(0x0010, 0x10);
    bus.write(0x0020, 0x20);
    bus.read(0x0010);

    assert_eq!(bus.peek(0x0020), 0x20);
    assert_eq!(bus.open_bus(), 0x10);
    assert_eq!(bus.peek(0x5000), 0x10);
}

#[test]
fn test_read16_zero_page_wraps() {
    let mut bus = SystemBus::new();
    bus.write(0x00FF, 0x34);
    bus.write(0x0000, 0x12);
    bus.write(0x0100, 0x99);
    assert_eq!(bus.read16_zero_page(0xFF), 0x1234);
    assert_eq!(bus.read16(0x00FF), 0x9934);
}

#[test]
fn test_device_window_checks() {
    let mut bus = SystemBus::new();

    assert!(matches!(
        bus.add_device(0x1000, Box::new(Via::new())),
        Err(DeviceError::OutOfRange { .. })
    ));
    assert!(matches!(
        bus.add_device(0xDFF8, Box::new(Via::new())),
        Err(DeviceError::OutOfRange { .. })
    ));

    bus.add_device(0x6000, Box::new(Via::new())).unwrap();
    assert!(bus.add_device(0x6008, Box::new(Via::new())).is_err());
    assert!(bus.add_device(0x6010, Box::new(Via::new())).is_ok());
    assert_eq!(bus.devices().len(), 2);
}

#[test]
fn test_device_registers_are_mirrored_through_the_bus() {
    let mut bus = SystemBus::new();
    bus.add_device(0x6000, Box::new(Via::new())).unwrap();

    bus.write(0x6000, 0xA5); // ORB
    assert_eq!(bus.read(0x6000), 0xA5);
    assert_eq!(bus.read(0x600E), 0x80); // IER reads with bit 7 set
}

#[test]
fn test_reset_keeps_memory_and_drops_latches() {
    let mut bus = SystemBus::new();
    let via = bus.add_device(0x6000, Box::new(Via::new())).unwrap();
    bus.write(0x0300, 0x42);
    bus.write(0x6000, 0xFF);
    bus.raise_nmi();
    bus.assert_irq(via).unwrap();

    bus.reset();
    assert_eq!(bus.peek(0x0300), 0x42);
    assert_eq!(bus.peek(0x6000), 0x00);
    assert!(!bus.nmi_pending());
    assert!(!bus.irq_active());
    assert!(!bus.video().frame_ready());
}

#[test]
fn test_extra_memory_block_in_io_window() {
    use lib65c02::MemoryBlock;

    let mut bus = SystemBus::new();
    bus.add_device(0x8000, Box::new(MemoryBlock::ram(0x8000, 0x100)))
        .unwrap();
    bus.add_device(0x9000, Box::new(MemoryBlock::rom(0x9000, 0x100)))
        .unwrap();

    bus.write(0x8010, 0x42);
    assert_eq!(bus.read(0x8010), 0x42);

    bus.write(0x9010, 0x42);
    assert_eq!(bus.read(0x9010), 0x00);

    // Just past the block is unmapped again
    assert_eq!(bus.read(0x8100), 0x00);
    bus.write(0x0000, 0x99);
    assert_eq!(bus.read(0x8100), 0x99);
}
