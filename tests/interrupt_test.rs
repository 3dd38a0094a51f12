//! Integration tests for NMI and IRQ handling.
//!
//! These tests verify:
//! - NMI edge semantics (a latched NMI is serviced once)
//! - IRQ level semantics and the I flag
//! - 7-cycle interrupt entry and the pushed status byte
//! - Device-driven IRQ through the system bus

use lib65c02::{Cpu, Device, FlatMemory, InterruptDevice, MemoryBus, SystemBus};
use std::any::Any;

/// Mock interrupt device for testing.
///
/// This device exposes a simple memory-mapped interface:
/// - Offset 0 (STATUS): Read interrupt pending (bit 7)
/// - Offset 1 (CONTROL): Write bit 7 to clear the interrupt
struct MockInterruptDevice {
    interrupt_pending: bool,
}

impl MockInterruptDevice {
    // Register offsets
    const STATUS_REG: u16 = 0;
    const CONTROL_REG: u16 = 1;

    fn new() -> Self {
        Self {
            interrupt_pending: false,
        }
    }
}

impl InterruptDevice for MockInterruptDevice {
    fn has_interrupt(&self) -> bool {
        self.interrupt_pending
    }
}

impl Device for MockInterruptDevice {
    fn peek(&self, offset: u16) -> u8 {
        match offset {
            Self::STATUS_REG if self.interrupt_pending => 0x80,
            _ => 0x00,
        }
    }

    fn write(&mut self, offset: u16, value: u8) {
        match offset {
            Self::CONTROL_REG if value & 0x80 != 0 => self.interrupt_pending = false,
            // Writing the status register triggers an interrupt, for tests
            Self::STATUS_REG => self.interrupt_pending = true,
            _ => {}
        }
    }

    fn size(&self) -> u16 {
        2
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_interrupt_device(&self) -> Option<&dyn InterruptDevice> {
        Some(self)
    }
}

fn setup_cpu(program: &[u8]) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0xFFFA, 0x00);
    memory.write(0xFFFB, 0xA0);
    memory.write(0xFFFE, 0x00);
    memory.write(0xFFFF, 0x90);
    memory.load(0x8000, program);
    Cpu::new(memory)
}

#[test]
fn test_nmi_raised_twice_is_serviced_once() {
    let mut cpu = setup_cpu(&[0xEA; 8]);
    // Handler: NOPs
    cpu.memory_mut().load(0xA000, &[0xEA; 8]);

    cpu.memory_mut().raise_nmi();
    cpu.memory_mut().raise_nmi();

    assert_eq!(cpu.step(), 7);
    assert_eq!(cpu.pc(), 0xA000);
    assert!(!cpu.memory().nmi_pending());

    assert_eq!(cpu.step(), 2);
    assert_eq!(cpu.pc(), 0xA001);
    assert_eq!(cpu.sp(), 0xFA);
}

#[test]
fn test_nmi_ignores_interrupt_disable() {
    let mut cpu = setup_cpu(&[0xEA]);
    assert!(cpu.flag_i());
    cpu.memory_mut().raise_nmi();
    cpu.step();
    assert_eq!(cpu.pc(), 0xA000);
}

#[test]
fn test_irq_masked_by_i_flag() {
    let mut cpu = setup_cpu(&[0xEA, 0x58, 0xEA]);
    cpu.memory_mut().set_irq(true);

    // I is set after reset
    assert_eq!(cpu.step(), 2);
    assert_eq!(cpu.pc(), 0x8001);

    // CLI, then the IRQ is taken at the next boundary
    cpu.step();
    assert_eq!(cpu.step(), 7);
    assert_eq!(cpu.pc(), 0x9000);
    assert!(cpu.flag_i());
}

#[test]
fn test_interrupt_pushes_return_address_and_status() {
    let mut cpu = setup_cpu(&[0x58, 0xEA]);
    cpu.step();
    cpu.memory_mut().set_irq(true);
    cpu.step();

    assert_eq!(cpu.memory().peek(0x01FD), 0x80);
    assert_eq!(cpu.memory().peek(0x01FC), 0x01);
    let pushed = cpu.memory().peek(0x01FB);
    assert_eq!(pushed & 0x30, 0x30);
    assert_eq!(pushed & 0x04, 0x00);
}

#[test]
fn test_nmi_takes_priority_over_irq() {
    let mut cpu = setup_cpu(&[0x58, 0xEA]);
    cpu.step();
    cpu.memory_mut().set_irq(true);
    cpu.memory_mut().raise_nmi();
    cpu.step();
    assert_eq!(cpu.pc(), 0xA000);
}

#[test]
fn test_device_irq_through_system_bus() {
    let mut bus = SystemBus::new();
    let handle = bus
        .add_device(0x4000, Box::new(MockInterruptDevice::new()))
        .unwrap();
    assert!(!bus.irq_active());

    bus.write(0x4000, 0x00);
    assert!(bus.irq_active());
    assert!(bus.irq_lines().is_asserted(handle));
    assert_eq!(bus.read(0x4000), 0x80);

    bus.write(0x4001, 0x80);
    assert!(!bus.irq_active());
    assert_eq!(bus.read(0x4000), 0x00);
}

#[test]
fn test_manual_irq_assertion_is_idempotent() {
    let mut bus = SystemBus::new();
    let handle = bus
        .add_device(0x4000, Box::new(MockInterruptDevice::new()))
        .unwrap();

    bus.assert_irq(handle).unwrap();
    bus.assert_irq(handle).unwrap();
    assert!(bus.irq_active());
    bus.release_irq(handle).unwrap();
    assert!(!bus.irq_active());
    bus.release_irq(handle).unwrap();
    assert!(!bus.irq_active());
}
